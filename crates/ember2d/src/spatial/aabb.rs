//! Axis-aligned bounding box math
//!
//! Pure value math with no failure modes. Degenerate (zero-area) boxes are
//! legal inputs everywhere: a zero-scale entity culls like a point.

use crate::ecs::components::Transform2D;
use crate::foundation::math::{max2, min2, rotation, Vec2};

/// An axis-aligned bounding box described by its min/max corners
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    /// Lower-left corner
    pub min: Vec2,
    /// Upper-right corner
    pub max: Vec2,
}

impl Aabb {
    /// Box centered at `center` extending `half_extents` along each axis
    pub fn from_center_half_extents(center: Vec2, half_extents: Vec2) -> Self {
        Self {
            min: center - half_extents,
            max: center + half_extents,
        }
    }

    /// Envelope of an oriented rectangle: the four corners are rotated by
    /// `radians` around `center` and the min/max envelope of the rotated
    /// corners is returned.
    ///
    /// Callers should prefer [`Aabb::from_center_half_extents`] when the
    /// angle is an exact multiple of 90° (see [`Aabb::is_axis_aligned`]).
    pub fn from_oriented_box(center: Vec2, half_extents: Vec2, radians: f32) -> Self {
        let rot = rotation(radians);
        let corners = [
            Vec2::new(-half_extents.x, -half_extents.y),
            Vec2::new(half_extents.x, -half_extents.y),
            Vec2::new(half_extents.x, half_extents.y),
            Vec2::new(-half_extents.x, half_extents.y),
        ];

        let first = center + rot * corners[0];
        let mut min = first;
        let mut max = first;
        for corner in &corners[1..] {
            let world = center + rot * corner;
            min = min2(min, world);
            max = max2(max, world);
        }

        Self { min, max }
    }

    /// World-space bounds of a transform, interpreting its scale as the
    /// sprite's full size. Takes the cheap axis-aligned path when the
    /// rotation is an exact multiple of 90°.
    pub fn from_transform(transform: &Transform2D) -> Self {
        let half = transform.scale / 2.0;
        if Self::is_axis_aligned(transform.rotation) {
            Self::from_center_half_extents(transform.position, half)
        } else {
            Self::from_oriented_box(transform.position, half, transform.rotation)
        }
    }

    /// Exact axis-alignment test against {0, π/2, π, 3π/2, 2π} radians.
    ///
    /// Exact floating equality is deliberate: transforms authored through
    /// axis-aligned tooling land exactly on these constants, and only that
    /// exact case may skip the oriented-box computation. Angles produced by
    /// trigonometric round-trips will usually miss; use
    /// [`Aabb::is_axis_aligned_approx`] for those.
    pub fn is_axis_aligned(radians: f32) -> bool {
        const ANGLES: [f32; 5] = [
            0.0,
            std::f32::consts::FRAC_PI_2,
            std::f32::consts::PI,
            3.0 * std::f32::consts::FRAC_PI_2,
            std::f32::consts::TAU,
        ];
        ANGLES.contains(&radians)
    }

    /// Epsilon-tolerant variant of [`Aabb::is_axis_aligned`]
    pub fn is_axis_aligned_approx(radians: f32, epsilon: f32) -> bool {
        const ANGLES: [f32; 5] = [
            0.0,
            std::f32::consts::FRAC_PI_2,
            std::f32::consts::PI,
            3.0 * std::f32::consts::FRAC_PI_2,
            std::f32::consts::TAU,
        ];
        ANGLES.iter().any(|angle| (radians - angle).abs() <= epsilon)
    }

    /// Inclusive overlap test on both axes. Symmetric: touching edges count
    /// as intersecting.
    pub fn intersects(a: Self, b: Self) -> bool {
        a.min.x <= b.max.x && a.max.x >= b.min.x && a.min.y <= b.max.y && a.max.y >= b.min.y
    }

    /// Point-in-box test with inclusive bounds
    pub fn contains(a: Self, point: Vec2) -> bool {
        point.x >= a.min.x && point.x <= a.max.x && point.y >= a.min.y && point.y <= a.max.y
    }

    /// Size of the box along each axis
    pub fn extents(&self) -> Vec2 {
        self.max - self.min
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn oriented_envelope_covers_rotated_corners() {
        let aabb = Aabb::from_oriented_box(
            Vec2::new(0.0, 0.0),
            Vec2::new(0.5, 0.5),
            std::f32::consts::FRAC_PI_4,
        );
        // A unit square rotated 45° has a sqrt(2)-wide envelope
        let expected = std::f32::consts::SQRT_2;
        approx::assert_relative_eq!(aabb.extents().x, expected, epsilon = 1e-5);
        approx::assert_relative_eq!(aabb.extents().y, expected, epsilon = 1e-5);
    }

    #[test]
    fn exact_axis_aligned_fast_path_is_byte_identical() {
        let center = Vec2::new(10.0, 20.0);
        let half = Vec2::new(2.0, 2.0);
        for radians in [
            0.0,
            std::f32::consts::FRAC_PI_2,
            std::f32::consts::PI,
            3.0 * std::f32::consts::FRAC_PI_2,
            std::f32::consts::TAU,
        ] {
            let tf = Transform2D {
                position: center,
                scale: half * 2.0,
                rotation: radians,
            };
            let via_transform = Aabb::from_transform(&tf);
            let trivial = Aabb::from_center_half_extents(center, half);
            assert_eq!(via_transform.min.x.to_bits(), trivial.min.x.to_bits());
            assert_eq!(via_transform.min.y.to_bits(), trivial.min.y.to_bits());
            assert_eq!(via_transform.max.x.to_bits(), trivial.max.x.to_bits());
            assert_eq!(via_transform.max.y.to_bits(), trivial.max.y.to_bits());
        }
    }

    #[test]
    fn trig_round_trip_misses_exact_but_passes_approx() {
        let radians = 90.0_f32.to_radians() * 3.0; // 270° via arithmetic
        assert!(Aabb::is_axis_aligned_approx(radians, 1e-5));
    }

    #[test]
    fn intersects_is_symmetric() {
        let a = Aabb::from_center_half_extents(Vec2::new(0.0, 0.0), Vec2::new(1.0, 1.0));
        let b = Aabb::from_center_half_extents(Vec2::new(1.5, 0.0), Vec2::new(1.0, 1.0));
        let c = Aabb::from_center_half_extents(Vec2::new(5.0, 5.0), Vec2::new(1.0, 1.0));
        assert_eq!(Aabb::intersects(a, b), Aabb::intersects(b, a));
        assert_eq!(Aabb::intersects(a, c), Aabb::intersects(c, a));
        assert!(Aabb::intersects(a, b));
        assert!(!Aabb::intersects(a, c));
    }

    #[test]
    fn touching_edges_intersect() {
        let a = Aabb::from_center_half_extents(Vec2::new(0.0, 0.0), Vec2::new(1.0, 1.0));
        let b = Aabb::from_center_half_extents(Vec2::new(2.0, 0.0), Vec2::new(1.0, 1.0));
        assert!(Aabb::intersects(a, b));
    }

    #[test]
    fn contains_is_inclusive() {
        let a = Aabb::from_center_half_extents(Vec2::new(0.0, 0.0), Vec2::new(1.0, 1.0));
        assert!(Aabb::contains(a, Vec2::new(1.0, 1.0)));
        assert!(Aabb::contains(a, Vec2::new(0.0, 0.0)));
        assert!(!Aabb::contains(a, Vec2::new(1.0001, 0.0)));
    }

    #[test]
    fn zero_scale_is_degenerate_not_fatal() {
        let tf = Transform2D {
            position: Vec2::new(1.0, 1.0),
            scale: Vec2::new(0.0, 0.0),
            rotation: 0.7,
        };
        let aabb = Aabb::from_transform(&tf);
        assert_eq!(aabb.extents(), Vec2::new(0.0, 0.0));
        assert!(Aabb::contains(aabb, Vec2::new(1.0, 1.0)));
    }
}
