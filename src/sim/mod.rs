//! Deterministic simulation module
//!
//! All physics lives here. This module must be pure and deterministic:
//! - One fixed step per frame
//! - Seeded RNG only
//! - Stable iteration order (by registry index)
//! - No rendering or platform dependencies

pub mod body;
pub mod collision;
pub mod registry;
pub mod state;
pub mod tick;

pub use body::Body;
pub use collision::{CollisionResult, evaluate_collision};
pub use registry::BodyRegistry;
pub use state::{Arena, SimState};
pub use tick::{StepEvents, advance, step_body};
