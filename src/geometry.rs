//! 2D point and vector operations for the triangle animation.
//!
//! Everything here is a pure function over finite reals. Angles are taken in
//! degrees and converted internally, matching the rest of the simulation.

use glam::Vec2;

/// Convert degrees to radians.
#[inline]
pub fn degrees_to_rads(degrees: f32) -> f32 {
    degrees / 180.0 * std::f32::consts::PI
}

/// Rotate a vector by `angle` degrees around the origin.
pub fn rotate_by(angle: f32, v: Vec2) -> Vec2 {
    let (sine, cosine) = degrees_to_rads(angle).sin_cos();
    Vec2::new(v.x * cosine - v.y * sine, v.y * cosine + v.x * sine)
}

/// Translate a point by a vector.
#[inline]
pub fn translate_by(v: Vec2, p: Vec2) -> Vec2 {
    p + v
}

/// Vector pointing from `a` to `b`.
#[inline]
pub fn vector_from(a: Vec2, b: Vec2) -> Vec2 {
    b - a
}

/// Rotate `point` around `center` by `angle` degrees.
pub fn rotate_around(center: Vec2, angle: f32, point: Vec2) -> Vec2 {
    translate_by(rotate_by(angle, vector_from(center, point)), center)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: Vec2, b: Vec2) -> bool {
        (a - b).length() < 1e-4
    }

    #[test]
    fn quarter_turn_around_the_origin() {
        let p = rotate_around(Vec2::ZERO, 90.0, Vec2::new(1.0, 0.0));
        assert!(approx(p, Vec2::new(0.0, 1.0)), "got {:?}", p);
    }

    #[test]
    fn rotation_preserves_distance_to_pivot() {
        let pivot = Vec2::new(3.0, -2.0);
        let point = Vec2::new(7.5, 1.25);
        let before = (point - pivot).length();
        for angle in [15.0, 90.0, 123.4, 270.0, 360.0] {
            let rotated = rotate_around(pivot, angle, point);
            assert!(((rotated - pivot).length() - before).abs() < 1e-3);
        }
    }

    #[test]
    fn full_turn_is_identity() {
        let p = rotate_around(Vec2::new(1.0, 1.0), 360.0, Vec2::new(4.0, 5.0));
        assert!(approx(p, Vec2::new(4.0, 5.0)));
    }

    #[test]
    fn translate_inverts_vector_from() {
        let a = Vec2::new(2.0, 3.0);
        let b = Vec2::new(-1.0, 8.0);
        assert!(approx(translate_by(vector_from(a, b), a), b));
    }
}
