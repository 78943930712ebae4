//! Bouncing Balls - elastic circles in a rectangular arena
//!
//! Core modules:
//! - `sim`: Deterministic simulation (bodies, collisions, stepping)
//! - `renderer`: Render adapters (headless recorder, WebGPU SDF pipeline)
//! - `driver`: Frame loop, timers and event polling
//! - `config`: Data-driven simulation parameters

pub mod config;
pub mod driver;
pub mod error;
pub mod renderer;
pub mod sim;

pub use config::SimConfig;
pub use error::{Error, Result};

use glam::DVec2;

/// Simulation configuration defaults
pub mod consts {
    /// Arena dimensions (logical units)
    pub const ARENA_WIDTH: f64 = 1200.0;
    pub const ARENA_HEIGHT: f64 = 600.0;

    /// Ball defaults
    pub const BALL_DIAMETER: f64 = 20.0;
    pub const BALL_COUNT: usize = 50;
    /// Maximum initial speed (units per step); speeds are drawn from 1..=MAX
    pub const MAX_INITIAL_SPEED: u32 = 5;

    /// Fixed relative path of the native configuration file
    pub const CONFIG_PATH: &str = "config/simulation.json";
}

/// Unit vector for an angle in radians
#[inline]
pub fn unit_from_angle(theta: f64) -> DVec2 {
    DVec2::new(theta.cos(), theta.sin())
}

/// Rotate a vector by 90° counter-clockwise
#[inline]
pub fn perpendicular(v: DVec2) -> DVec2 {
    DVec2::new(-v.y, v.x)
}
