//! Body kinematics
//!
//! A body is a non-rotating circle. Its velocity is stored as a scalar speed
//! and a unit direction so that collisions can swap speeds exactly.

use glam::DVec2;

use super::collision::CollisionResult;
use super::state::Arena;

/// A ball entity
#[derive(Debug, Clone, PartialEq)]
pub struct Body {
    pub id: u32,
    /// Top-left corner of the bounding box (render anchor)
    pub pos: DVec2,
    pub radius: f64,
    /// Velocity magnitude (units per step)
    pub speed: f64,
    /// Unit heading
    pub direction: DVec2,
}

impl Body {
    pub fn new(id: u32, pos: DVec2, radius: f64, speed: f64, direction: DVec2) -> Self {
        Self {
            id,
            pos,
            radius,
            speed,
            direction: direction.try_normalize().unwrap_or(DVec2::X),
        }
    }

    #[inline]
    pub fn diameter(&self) -> f64 {
        self.radius * 2.0
    }

    /// Center of the circle
    #[inline]
    pub fn center(&self) -> DVec2 {
        self.pos + DVec2::splat(self.radius)
    }

    /// Effective velocity (direction * speed)
    #[inline]
    pub fn velocity(&self) -> DVec2 {
        self.direction * self.speed
    }

    /// Kinetic energy with unit mass
    pub fn kinetic_energy(&self) -> f64 {
        0.5 * self.speed * self.speed
    }

    /// Move by an arbitrary offset
    #[inline]
    pub fn shift(&mut self, delta: DVec2) {
        self.pos += delta;
    }

    /// Move by one step of velocity
    #[inline]
    pub fn translate(&mut self) {
        self.shift(self.velocity());
    }

    /// Resolve an active collision with `other`
    ///
    /// `collision` must come from `evaluate_collision(self, other)`. Normal
    /// components are exchanged, tangential components kept, speeds swapped,
    /// and each body is pushed half the penetration depth apart.
    pub fn resolve_collision(&mut self, other: &mut Body, collision: &CollisionResult) {
        let c = collision;

        let self_dir = c.tangent * c.tangent_proj_a + c.normal * c.normal_proj_b;
        let other_dir = c.tangent * c.tangent_proj_b + c.normal * c.normal_proj_a;

        // A zero exchanged heading falls back to moving away from the partner
        self.direction = self_dir.try_normalize().unwrap_or(-c.normal);
        other.direction = other_dir.try_normalize().unwrap_or(c.normal);

        std::mem::swap(&mut self.speed, &mut other.speed);

        let correction = c.normal * (c.penetration() / 2.0);
        self.shift(-correction);
        other.shift(correction);
    }

    /// Clamp position into the arena without touching velocity
    pub fn contain_within(&mut self, arena: &Arena) {
        let max = arena.max_position(self.diameter());
        self.pos = self.pos.clamp(DVec2::ZERO, max);
    }

    /// Clamp to the walls and turn the heading back inside
    ///
    /// Axes are handled independently, so a corner reflects both.
    /// Returns the number of axes that were reflected.
    pub fn reflect_off_walls(&mut self, arena: &Arena) -> u32 {
        let max = arena.max_position(self.diameter());
        let mut reflected = 0;

        if self.pos.x < 0.0 {
            self.pos.x = 0.0;
            self.direction.x = self.direction.x.abs();
            reflected += 1;
        } else if self.pos.x > max.x {
            self.pos.x = max.x;
            self.direction.x = -self.direction.x.abs();
            reflected += 1;
        }

        if self.pos.y < 0.0 {
            self.pos.y = 0.0;
            self.direction.y = self.direction.y.abs();
            reflected += 1;
        } else if self.pos.y > max.y {
            self.pos.y = max.y;
            self.direction.y = -self.direction.y.abs();
            reflected += 1;
        }

        reflected
    }
}
