//! Recording renderer for native runs and tests

use std::rc::Rc;

use super::{BallSprite, Renderer};

/// A single queued circle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CircleDraw {
    pub x: f64,
    pub y: f64,
    pub radius: f64,
}

/// Renderer that keeps the last presented frame in memory
#[derive(Debug)]
pub struct HeadlessRenderer {
    sprite: Rc<BallSprite>,
    pending: Vec<CircleDraw>,
    last_frame: Vec<CircleDraw>,
    frames_presented: u64,
}

impl HeadlessRenderer {
    pub fn new(sprite: Rc<BallSprite>) -> Self {
        Self {
            sprite,
            pending: Vec::new(),
            last_frame: Vec::new(),
            frames_presented: 0,
        }
    }

    pub fn sprite(&self) -> &BallSprite {
        &self.sprite
    }

    /// Circles of the most recently presented frame
    pub fn last_frame(&self) -> &[CircleDraw] {
        &self.last_frame
    }

    pub fn frames_presented(&self) -> u64 {
        self.frames_presented
    }
}

impl Renderer for HeadlessRenderer {
    fn draw_circle(&mut self, x: f64, y: f64, radius: f64) {
        self.pending.push(CircleDraw { x, y, radius });
    }

    fn present(&mut self) {
        std::mem::swap(&mut self.pending, &mut self.last_frame);
        self.pending.clear();
        self.frames_presented += 1;
        log::trace!(
            "Presented frame {} ({} circles)",
            self.frames_presented,
            self.last_frame.len()
        );
    }
}
