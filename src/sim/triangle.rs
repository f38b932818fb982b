//! Triangle geometry derived from particles.

use glam::Vec2;

use crate::geometry;
use crate::render::{Canvas, Path};
use crate::sim::particle::Particle;

/// Derived triangle view of a particle, recomputed every frame.
///
/// Equilateral and pointing up, vertices at distance `radius` from the
/// particle center. Never persisted; the particle is what animates, the
/// triangle is what gets drawn.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Triangle {
    pub vertices: [Vec2; 3],
    /// Rotation pivot; the source particle's center.
    pub origin: Vec2,
}

impl Triangle {
    /// Build the triangle for a particle's current center and radius.
    /// Vertices sit at 90, 210 and 330 degrees from the center.
    pub fn from_particle(p: &Particle) -> Self {
        let c = p.center;
        let r = p.radius;
        let a = Vec2::new(c.x, c.y - r);
        let b = Vec2::new(0.866 * r + c.x, 0.5 * r + c.y);
        let d = Vec2::new(-0.866 * r + c.x, 0.5 * r + c.y);
        Self {
            vertices: [a, b, d],
            origin: c,
        }
    }

    /// Vertices rotated by `angle` degrees around the triangle's own origin.
    pub fn rotated(&self, angle: f32) -> [Vec2; 3] {
        self.vertices
            .map(|v| geometry::rotate_around(self.origin, angle, v))
    }

    /// Stroke the rotated outline onto the canvas.
    pub fn stroke(&self, canvas: &mut Canvas, angle: f32, color: (u8, u8, u8)) {
        let [a, b, c] = self.rotated(angle);
        let mut path = Path::new();
        path.move_to(a);
        path.line_to(b);
        path.line_to(c);
        path.close_path();
        canvas.stroke(&path, color);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn approx(a: Vec2, b: Vec2) -> bool {
        (a - b).length() < 1e-3
    }

    fn particle_at(cx: f32, cy: f32, radius: f32) -> Particle {
        let mut rng = StdRng::seed_from_u64(3);
        let mut p = Particle::create(0.0, cx, cy, &mut rng);
        p.radius = radius;
        p
    }

    #[test]
    fn vertices_follow_the_closed_form() {
        let tri = Triangle::from_particle(&particle_at(10.0, 10.0, 2.0));
        assert!(approx(tri.vertices[0], Vec2::new(10.0, 8.0)));
        assert!(approx(tri.vertices[1], Vec2::new(11.732, 11.0)));
        assert!(approx(tri.vertices[2], Vec2::new(8.268, 11.0)));
        assert_eq!(tri.origin, Vec2::new(10.0, 10.0));
    }

    #[test]
    fn rotation_pivots_on_the_origin() {
        let tri = Triangle::from_particle(&particle_at(5.0, 5.0, 3.0));
        for v in tri.rotated(77.0) {
            assert!(((v - tri.origin).length() - 3.0).abs() < 1e-3);
        }
        let unrotated = tri.rotated(0.0);
        assert!(approx(unrotated[0], tri.vertices[0]));
    }

    #[test]
    fn stroke_marks_the_canvas() {
        let mut canvas = Canvas::new(40, 40);
        let tri = Triangle::from_particle(&particle_at(20.0, 20.0, 8.0));
        tri.stroke(&mut canvas, 0.0, (255, 255, 255));

        // apex of the triangle
        assert!(canvas.is_covered(20, 12));
        // center stays empty; only the outline is stroked
        assert!(!canvas.is_covered(20, 20));
    }
}
