//! Math types and operations for 2D simulation and rendering

/// 2D vector type used throughout the engine
pub type Vec2 = nalgebra::Vector2<f32>;

/// 3x3 matrix type, used for 2D model transforms (rotation/scale/translation)
pub type Mat3 = nalgebra::Matrix3<f32>;

/// 2x2 matrix type, used for plain 2D rotations
pub type Mat2 = nalgebra::Matrix2<f32>;

/// Build a counter-clockwise 2D rotation matrix for the given angle in radians
pub fn rotation(radians: f32) -> Mat2 {
    let (s, c) = radians.sin_cos();
    Mat2::new(c, -s, s, c)
}

/// Component-wise minimum of two vectors
pub fn min2(a: Vec2, b: Vec2) -> Vec2 {
    Vec2::new(a.x.min(b.x), a.y.min(b.y))
}

/// Component-wise maximum of two vectors
pub fn max2(a: Vec2, b: Vec2) -> Vec2 {
    Vec2::new(a.x.max(b.x), a.y.max(b.y))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn rotation_quarter_turn() {
        let m = rotation(std::f32::consts::FRAC_PI_2);
        let v = m * Vec2::new(1.0, 0.0);
        assert_relative_eq!(v.x, 0.0, epsilon = 1e-6);
        assert_relative_eq!(v.y, 1.0, epsilon = 1e-6);
    }

    #[test]
    fn min_max_componentwise() {
        let a = Vec2::new(1.0, 5.0);
        let b = Vec2::new(3.0, 2.0);
        assert_eq!(min2(a, b), Vec2::new(1.0, 2.0));
        assert_eq!(max2(a, b), Vec2::new(3.0, 5.0));
    }
}
