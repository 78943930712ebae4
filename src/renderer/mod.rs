//! Render adapters
//!
//! The simulation only needs two things from a renderer: draw a filled
//! circle and present the frame. `HeadlessRenderer` records draw calls for
//! native runs and tests; `SdfRenderState` draws with WebGPU, evaluating
//! every circle as a signed distance field in the fragment shader.

pub mod headless;
pub mod sdf_pipeline;

pub use headless::{CircleDraw, HeadlessRenderer};
pub use sdf_pipeline::SdfRenderState;

use crate::sim::SimState;

/// Arena background (light gray)
pub const BACKGROUND: [f32; 4] = [0.706, 0.706, 0.706, 1.0];
/// Letterbox area outside the arena
pub const OUTSIDE: [f32; 4] = [0.02, 0.02, 0.05, 1.0];

/// Shared, read-only ball appearance
///
/// One instance is created at startup and handed to the renderer behind an
/// `Rc`; bodies never own it.
#[derive(Debug, Clone, PartialEq)]
pub struct BallSprite {
    /// Fill color (RGBA, alpha used as opacity)
    pub tint: [f32; 4],
    /// Anti-aliasing half-width in pixels
    pub edge_softness: f32,
}

impl Default for BallSprite {
    fn default() -> Self {
        Self {
            tint: [0.85, 0.15, 0.15, 1.0],
            edge_softness: 1.0,
        }
    }
}

/// Sink for per-frame draw calls
pub trait Renderer {
    /// Queue a filled circle whose bounding box has its top-left at (x, y)
    fn draw_circle(&mut self, x: f64, y: f64, radius: f64);

    /// Show the completed frame and reset for the next one
    fn present(&mut self);
}

/// Draw every body at its current position, then present
pub fn draw_frame<R: Renderer + ?Sized>(state: &SimState, renderer: &mut R) {
    for body in &state.bodies {
        renderer.draw_circle(body.pos.x, body.pos.y, body.radius);
    }
    renderer.present();
}
