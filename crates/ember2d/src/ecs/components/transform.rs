//! 2D transform component

use crate::ecs::Component;
use crate::foundation::math::{Mat3, Vec2};

/// Position, scale and rotation of an entity.
///
/// Rotation is stored in radians; the `_degrees` accessors convert at the
/// API boundary. Scale components may be negative to express mirroring; a
/// zero scale makes the entity's bounds degenerate but is not an error.
/// Mutated by gameplay systems and, for entities with a dynamic body, by
/// the physics bridge after each fixed step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform2D {
    /// World-space position
    pub position: Vec2,
    /// Size along each axis; sprites and physics shapes are sized from it
    pub scale: Vec2,
    /// Rotation around the Z axis, in radians
    pub rotation: f32,
}

impl Default for Transform2D {
    fn default() -> Self {
        Self {
            position: Vec2::new(0.0, 0.0),
            scale: Vec2::new(1.0, 1.0),
            rotation: 0.0,
        }
    }
}

impl Component for Transform2D {}

impl Transform2D {
    /// Transform at `position` with unit scale and no rotation
    pub fn from_position(position: Vec2) -> Self {
        Self {
            position,
            ..Self::default()
        }
    }

    /// Transform at `position` rotated by `degrees`
    pub fn from_position_rotation(position: Vec2, degrees: f32) -> Self {
        Self {
            position,
            rotation: degrees.to_radians(),
            ..Self::default()
        }
    }

    /// Transform at `position` with the given scale
    pub fn from_position_scale(position: Vec2, scale: Vec2) -> Self {
        Self {
            position,
            scale,
            ..Self::default()
        }
    }

    /// Transform with position, scale and rotation (in degrees)
    pub fn from_position_scale_rotation(position: Vec2, scale: Vec2, degrees: f32) -> Self {
        Self {
            position,
            scale,
            rotation: degrees.to_radians(),
        }
    }

    /// Transform at the origin with the given scale
    pub fn from_scale(scale: Vec2) -> Self {
        Self {
            scale,
            ..Self::default()
        }
    }

    /// Rotation in degrees
    pub fn rotation_degrees(&self) -> f32 {
        self.rotation.to_degrees()
    }

    /// Set the rotation from degrees
    pub fn set_rotation_degrees(&mut self, degrees: f32) {
        self.rotation = degrees.to_radians();
    }

    /// Column-major model matrix: translation * rotation * scale
    pub fn model_matrix(&self) -> Mat3 {
        let (s, c) = self.rotation.sin_cos();
        let rot = Mat3::new(c, -s, 0.0, s, c, 0.0, 0.0, 0.0, 1.0);
        let scale = Mat3::new(
            self.scale.x,
            0.0,
            0.0,
            0.0,
            self.scale.y,
            0.0,
            0.0,
            0.0,
            1.0,
        );
        let trans = Mat3::new(
            1.0,
            0.0,
            self.position.x,
            0.0,
            1.0,
            self.position.y,
            0.0,
            0.0,
            1.0,
        );
        trans * rot * scale
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn degrees_round_trip() {
        let tf = Transform2D::from_position_rotation(Vec2::new(0.0, 0.0), 90.0);
        assert_relative_eq!(tf.rotation, std::f32::consts::FRAC_PI_2);
        assert_relative_eq!(tf.rotation_degrees(), 90.0);
    }

    #[test]
    fn model_matrix_places_local_origin_at_position() {
        let tf = Transform2D::from_position_scale_rotation(
            Vec2::new(3.0, -1.0),
            Vec2::new(2.0, 2.0),
            45.0,
        );
        let origin = tf.model_matrix() * nalgebra::Vector3::new(0.0, 0.0, 1.0);
        assert_relative_eq!(origin.x, 3.0, epsilon = 1e-5);
        assert_relative_eq!(origin.y, -1.0, epsilon = 1e-5);
    }

    #[test]
    fn model_matrix_applies_scale_then_rotation() {
        let tf = Transform2D::from_position_scale_rotation(
            Vec2::new(0.0, 0.0),
            Vec2::new(2.0, 1.0),
            90.0,
        );
        // local +x unit corner scaled to 2, then rotated onto +y
        let p = tf.model_matrix() * nalgebra::Vector3::new(1.0, 0.0, 1.0);
        assert_relative_eq!(p.x, 0.0, epsilon = 1e-5);
        assert_relative_eq!(p.y, 2.0, epsilon = 1e-5);
    }
}
