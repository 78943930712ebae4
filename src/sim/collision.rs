//! Collision detection between circular bodies
//!
//! Decomposes each body's direction into components along the line of
//! centers (normal) and perpendicular to it (tangent). The resolution step
//! exchanges the normal components and keeps the tangential ones.

use glam::DVec2;

use super::body::Body;
use crate::perpendicular;

/// Result of a pairwise collision check
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CollisionResult {
    /// Whether the two circles overlap
    pub hit: bool,
    /// Distance between the two centers
    pub distance: f64,
    /// Sum of the two radii
    pub radii_sum: f64,
    /// Unit vector from A's center toward B's center
    pub normal: DVec2,
    /// Normal rotated by 90°
    pub tangent: DVec2,
    /// Projections of A's and B's directions onto the normal
    pub normal_proj_a: f64,
    pub normal_proj_b: f64,
    /// Projections of A's and B's directions onto the tangent
    pub tangent_proj_a: f64,
    pub tangent_proj_b: f64,
}

impl CollisionResult {
    pub fn miss(distance: f64, radii_sum: f64) -> Self {
        Self {
            hit: false,
            distance,
            radii_sum,
            normal: DVec2::ZERO,
            tangent: DVec2::ZERO,
            normal_proj_a: 0.0,
            normal_proj_b: 0.0,
            tangent_proj_a: 0.0,
            tangent_proj_b: 0.0,
        }
    }

    /// Overlap depth (positive while colliding)
    #[inline]
    pub fn penetration(&self) -> f64 {
        self.radii_sum - self.distance
    }
}

/// Check two bodies for overlap
///
/// Colliding iff the center distance is strictly less than the radii sum;
/// touching circles are not colliding. Coincident centers collide with a
/// `+X` normal so the pair still gets pushed apart.
pub fn evaluate_collision(a: &Body, b: &Body) -> CollisionResult {
    let delta = b.center() - a.center();
    let distance = delta.length();
    let radii_sum = a.radius + b.radius;

    if distance >= radii_sum {
        return CollisionResult::miss(distance, radii_sum);
    }

    let normal = if distance > 0.0 {
        delta / distance
    } else {
        DVec2::X
    };
    let tangent = perpendicular(normal);

    CollisionResult {
        hit: true,
        distance,
        radii_sum,
        normal,
        tangent,
        normal_proj_a: a.direction.dot(normal),
        normal_proj_b: b.direction.dot(normal),
        tangent_proj_a: a.direction.dot(tangent),
        tangent_proj_b: b.direction.dot(tangent),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn body_at(id: u32, x: f64, y: f64, direction: DVec2) -> Body {
        Body::new(id, DVec2::new(x, y), 10.0, 3.0, direction)
    }

    #[test]
    fn test_overlapping_bodies_collide() {
        let a = body_at(0, 100.0, 100.0, DVec2::X);
        let b = body_at(1, 119.0, 100.0, -DVec2::X);

        let result = evaluate_collision(&a, &b);
        assert!(result.hit);
        assert!((result.distance - 19.0).abs() < 1e-12);
        assert_eq!(result.radii_sum, 20.0);
        assert!((result.penetration() - 1.0).abs() < 1e-12);
        assert_eq!(result.normal, DVec2::X);
        assert_eq!(result.tangent, DVec2::Y);
        assert_eq!(result.normal_proj_a, 1.0);
        assert_eq!(result.normal_proj_b, -1.0);
        assert_eq!(result.tangent_proj_a, 0.0);
        assert_eq!(result.tangent_proj_b, 0.0);
    }

    #[test]
    fn test_touching_bodies_do_not_collide() {
        // distance == radii_sum is not a collision
        let a = body_at(0, 100.0, 100.0, DVec2::X);
        let b = body_at(1, 120.0, 100.0, -DVec2::X);

        let result = evaluate_collision(&a, &b);
        assert!(!result.hit);
        assert_eq!(result.distance, 20.0);
    }

    #[test]
    fn test_far_bodies_do_not_collide() {
        let a = body_at(0, 0.0, 0.0, DVec2::X);
        let b = body_at(1, 300.0, 200.0, DVec2::Y);

        assert!(!evaluate_collision(&a, &b).hit);
    }

    #[test]
    fn test_coincident_centers_use_fallback_normal() {
        let a = body_at(0, 50.0, 50.0, DVec2::Y);
        let b = body_at(1, 50.0, 50.0, -DVec2::Y);

        let result = evaluate_collision(&a, &b);
        assert!(result.hit);
        assert_eq!(result.distance, 0.0);
        assert_eq!(result.normal, DVec2::X);
        assert!(result.normal.is_finite() && result.tangent.is_finite());
        assert_eq!(result.penetration(), 20.0);
    }

    #[test]
    fn test_normal_points_from_a_to_b() {
        let a = body_at(0, 100.0, 100.0, DVec2::X);
        let b = body_at(1, 100.0, 88.0, DVec2::X);

        let result = evaluate_collision(&a, &b);
        assert!(result.hit);
        assert!((result.normal - DVec2::new(0.0, -1.0)).length() < 1e-12);
    }

    proptest! {
        #[test]
        fn prop_detection_threshold(
            ax in 0.0f64..500.0, ay in 0.0f64..500.0,
            bx in 0.0f64..500.0, by in 0.0f64..500.0,
        ) {
            let a = body_at(0, ax, ay, DVec2::X);
            let b = body_at(1, bx, by, DVec2::Y);
            let distance = (b.center() - a.center()).length();

            let result = evaluate_collision(&a, &b);
            prop_assert_eq!(result.hit, distance < 20.0);
        }

        #[test]
        fn prop_normal_tangent_orthonormal(
            dx in -19.0f64..19.0, dy in -19.0f64..19.0,
            theta_a in 0.0f64..std::f64::consts::TAU,
            theta_b in 0.0f64..std::f64::consts::TAU,
        ) {
            let a = body_at(0, 200.0, 200.0, crate::unit_from_angle(theta_a));
            let b = body_at(1, 200.0 + dx, 200.0 + dy, crate::unit_from_angle(theta_b));

            let result = evaluate_collision(&a, &b);
            prop_assume!(result.hit);
            prop_assert!(result.normal.dot(result.tangent).abs() < 1e-9);
            prop_assert!((result.normal.length() - 1.0).abs() < 1e-9);
            prop_assert!((result.tangent.length() - 1.0).abs() < 1e-9);

            // Projections reconstruct each direction
            let rebuilt_a = result.normal * result.normal_proj_a + result.tangent * result.tangent_proj_a;
            let rebuilt_b = result.normal * result.normal_proj_b + result.tangent * result.tangent_proj_b;
            prop_assert!((rebuilt_a - a.direction).length() < 1e-9);
            prop_assert!((rebuilt_b - b.direction).length() < 1e-9);
        }
    }
}
