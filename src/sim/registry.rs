//! Ordered body storage
//!
//! Indices are stable for the lifetime of a run: bodies are pushed once at
//! spawn time and never removed.

use super::body::Body;

/// All active bodies, in spawn order
#[derive(Debug, Clone, Default)]
pub struct BodyRegistry {
    bodies: Vec<Body>,
}

impl BodyRegistry {
    pub fn new() -> Self {
        Self { bodies: Vec::new() }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            bodies: Vec::with_capacity(capacity),
        }
    }

    /// Append a body during spawning, returning its index
    pub fn push(&mut self, body: Body) -> usize {
        self.bodies.push(body);
        self.bodies.len() - 1
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Body> {
        self.bodies.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut Body> {
        self.bodies.get_mut(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Body> {
        self.bodies.iter()
    }

    pub fn as_slice(&self) -> &[Body] {
        &self.bodies
    }

    /// Mutable access to two distinct bodies at once
    ///
    /// Returns `None` when `a == b` or either index is out of range.
    pub fn pair_mut(&mut self, a: usize, b: usize) -> Option<(&mut Body, &mut Body)> {
        if a == b || a >= self.bodies.len() || b >= self.bodies.len() {
            return None;
        }
        if a < b {
            let (head, tail) = self.bodies.split_at_mut(b);
            Some((&mut head[a], &mut tail[0]))
        } else {
            let (head, tail) = self.bodies.split_at_mut(a);
            Some((&mut tail[0], &mut head[b]))
        }
    }

    /// Total kinetic energy (unit masses)
    pub fn kinetic_energy(&self) -> f64 {
        self.bodies.iter().map(Body::kinetic_energy).sum()
    }
}

impl<'a> IntoIterator for &'a BodyRegistry {
    type Item = &'a Body;
    type IntoIter = std::slice::Iter<'a, Body>;

    fn into_iter(self) -> Self::IntoIter {
        self.bodies.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::DVec2;

    fn registry_of(n: u32) -> BodyRegistry {
        let mut registry = BodyRegistry::new();
        for id in 0..n {
            registry.push(Body::new(
                id,
                DVec2::new(id as f64 * 30.0, 0.0),
                10.0,
                1.0,
                DVec2::X,
            ));
        }
        registry
    }

    #[test]
    fn test_push_returns_index() {
        let mut registry = registry_of(2);
        let index = registry.push(Body::new(9, DVec2::ZERO, 10.0, 1.0, DVec2::Y));
        assert_eq!(index, 2);
        assert_eq!(registry.len(), 3);
        assert_eq!(registry.get(2).map(|b| b.id), Some(9));
    }

    #[test]
    fn test_pair_mut_orders_results() {
        let mut registry = registry_of(4);

        let (a, b) = registry.pair_mut(3, 1).unwrap();
        assert_eq!((a.id, b.id), (3, 1));
        a.speed = 7.0;
        b.speed = 8.0;

        assert_eq!(registry.get(3).unwrap().speed, 7.0);
        assert_eq!(registry.get(1).unwrap().speed, 8.0);

        let (a, b) = registry.pair_mut(0, 2).unwrap();
        assert_eq!((a.id, b.id), (0, 2));
    }

    #[test]
    fn test_pair_mut_rejects_self_and_out_of_range() {
        let mut registry = registry_of(3);
        assert!(registry.pair_mut(1, 1).is_none());
        assert!(registry.pair_mut(0, 3).is_none());
    }

    #[test]
    fn test_kinetic_energy_sums_bodies() {
        let registry = registry_of(4);
        assert_eq!(registry.kinetic_energy(), 2.0);
    }
}
