//! Per-frame simulation step
//!
//! One `advance` walks the registry in index order. Each body checks every
//! other body, resolves overlaps immediately (mutating both participants),
//! then moves and reflects off the walls. Bodies later in the order see the
//! already-updated state of earlier ones.

use std::ops::AddAssign;

use super::collision::evaluate_collision;
use super::registry::BodyRegistry;
use super::state::{Arena, SimState};

/// Counters for what happened during a step
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StepEvents {
    /// Pairwise collisions resolved
    pub collisions: u32,
    /// Wall reflections (per axis)
    pub wall_hits: u32,
}

impl AddAssign for StepEvents {
    fn add_assign(&mut self, rhs: Self) {
        self.collisions += rhs.collisions;
        self.wall_hits += rhs.wall_hits;
    }
}

/// Step the body at `index` against the rest of the registry
///
/// Collided partners are clamped back into the arena after being pushed,
/// since partners earlier in the order will not get another reflection
/// pass this frame.
pub fn step_body(bodies: &mut BodyRegistry, index: usize, arena: &Arena) -> StepEvents {
    let mut events = StepEvents::default();

    for other in 0..bodies.len() {
        // pair_mut skips the body itself
        let Some((body, partner)) = bodies.pair_mut(index, other) else {
            continue;
        };

        let collision = evaluate_collision(body, partner);
        if collision.hit {
            body.resolve_collision(partner, &collision);
            partner.contain_within(arena);
            events.collisions += 1;
        }
    }

    if let Some(body) = bodies.get_mut(index) {
        body.translate();
        events.wall_hits += body.reflect_off_walls(arena);
    }

    events
}

/// Advance the whole simulation by one step
pub fn advance(state: &mut SimState) -> StepEvents {
    let mut events = StepEvents::default();

    for index in 0..state.bodies.len() {
        events += step_body(&mut state.bodies, index, &state.arena);
    }

    state.time_ticks += 1;
    events
}
