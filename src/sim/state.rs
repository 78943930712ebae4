//! Simulation state and initial conditions
//!
//! Everything the frame loop mutates lives here. Spawning is driven by a
//! seeded PCG stream, so a seed fully determines a run.

use glam::DVec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::body::Body;
use super::registry::BodyRegistry;
use crate::config::SimConfig;
use crate::error::Result;
use crate::unit_from_angle;

/// Rectangular bounds with the origin at the top-left corner
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Arena {
    pub width: f64,
    pub height: f64,
}

impl Arena {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Largest top-left position a body of this diameter may occupy
    #[inline]
    pub fn max_position(&self, diameter: f64) -> DVec2 {
        DVec2::new(self.width - diameter, self.height - diameter)
    }

    /// Whether a body lies fully inside the arena
    pub fn contains(&self, body: &Body) -> bool {
        let max = self.max_position(body.diameter());
        body.pos.x >= 0.0 && body.pos.y >= 0.0 && body.pos.x <= max.x && body.pos.y <= max.y
    }
}

/// Complete simulation state
#[derive(Debug, Clone)]
pub struct SimState {
    /// Seed used to spawn the bodies
    pub seed: u64,
    pub arena: Arena,
    /// Active bodies (fixed population, index order is step order)
    pub bodies: BodyRegistry,
    /// Number of completed `advance` calls
    pub time_ticks: u64,
}

impl SimState {
    /// Create a state with no bodies
    pub fn empty(arena: Arena) -> Self {
        Self {
            seed: 0,
            arena,
            bodies: BodyRegistry::new(),
            time_ticks: 0,
        }
    }

    /// Validate the config and spawn its bodies from `seed`
    pub fn new(config: &SimConfig, seed: u64) -> Result<Self> {
        config.validate()?;

        let mut state = Self {
            seed,
            arena: Arena::new(config.arena_width, config.arena_height),
            bodies: BodyRegistry::with_capacity(config.ball_count),
            time_ticks: 0,
        };
        let mut rng = Pcg32::seed_from_u64(seed);
        state.spawn_bodies(config, &mut rng);

        log::info!(
            "Spawned {} bodies in {}x{} arena (seed {})",
            state.bodies.len(),
            config.arena_width,
            config.arena_height,
            seed
        );
        Ok(state)
    }

    /// Spawn the initial population
    ///
    /// Positions are uniform over the arena minus one diameter, speeds are
    /// integers in `1..=max_initial_speed`, and body `i` heads along angle
    /// `i` radians.
    fn spawn_bodies(&mut self, config: &SimConfig, rng: &mut Pcg32) {
        let diameter = config.ball_diameter;
        let max = self.arena.max_position(diameter);

        for i in 0..config.ball_count {
            let pos = DVec2::new(rng.random_range(0.0..max.x), rng.random_range(0.0..max.y));
            let speed = rng.random_range(1..=config.max_initial_speed) as f64;
            let direction = unit_from_angle(i as f64);

            self.bodies
                .push(Body::new(i as u32, pos, config.ball_radius(), speed, direction));
        }
    }

    #[inline]
    pub fn body_count(&self) -> usize {
        self.bodies.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spawn_matches_config() {
        let config = SimConfig::default();
        let state = SimState::new(&config, 42).unwrap();

        assert_eq!(state.body_count(), 50);
        for (i, body) in state.bodies.iter().enumerate() {
            assert_eq!(body.id, i as u32);
            assert_eq!(body.radius, 10.0);
            assert!(body.pos.x >= 0.0 && body.pos.x < 1180.0);
            assert!(body.pos.y >= 0.0 && body.pos.y < 580.0);
            assert!(body.speed >= 1.0 && body.speed <= 5.0);
            assert_eq!(body.speed.fract(), 0.0);
            let expected = unit_from_angle(i as f64);
            assert!((body.direction - expected).length() < 1e-12);
        }
    }

    #[test]
    fn test_same_seed_same_spawn() {
        let config = SimConfig::default();
        let a = SimState::new(&config, 7).unwrap();
        let b = SimState::new(&config, 7).unwrap();
        let c = SimState::new(&config, 8).unwrap();

        assert_eq!(a.bodies.as_slice(), b.bodies.as_slice());
        assert_ne!(a.bodies.as_slice(), c.bodies.as_slice());
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = SimConfig {
            ball_diameter: -1.0,
            ..Default::default()
        };
        assert!(SimState::new(&config, 1).is_err());
    }

    #[test]
    fn test_arena_contains() {
        let arena = Arena::new(100.0, 50.0);
        let inside = Body::new(0, DVec2::new(80.0, 30.0), 10.0, 1.0, DVec2::X);
        let outside = Body::new(1, DVec2::new(81.0, 30.0), 10.0, 1.0, DVec2::X);
        assert!(arena.contains(&inside));
        assert!(!arena.contains(&outside));
    }
}
