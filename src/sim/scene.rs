//! The live particle field and its per-tick transition.

use glam::Vec2;
use rand::Rng;
use tracing::debug;

use crate::render::Canvas;
use crate::sim::particle::Particle;
use crate::sim::schedule::Step;
use crate::sim::triangle::Triangle;
use crate::text::{self, Layout, SeedError};

/// Particle field seeded from rasterized text.
///
/// The scene owns simulation state only; drawing, the reveal delay and frame
/// scheduling belong to the display driver.
pub struct Scene {
    pub width: usize,
    pub height: usize,
    particles: Vec<Particle>,
}

impl Scene {
    /// Build a scene from pre-sampled seed points.
    pub fn from_seeds(
        width: usize,
        height: usize,
        gravity: f32,
        seeds: &[Vec2],
        rng: &mut impl Rng,
    ) -> Self {
        let particles: Vec<Particle> = seeds
            .iter()
            .map(|s| Particle::create(gravity, s.x, s.y, rng))
            .collect();
        debug!(
            "scene: {} particles on a {}x{} canvas",
            particles.len(),
            width,
            height
        );
        Self {
            width,
            height,
            particles,
        }
    }

    /// Rasterize `text` onto the canvas, sample seed points on a `frequency`
    /// grid and build the scene from them. The glyphs are erased again; only
    /// the seed positions survive. Empty text yields an empty, valid scene.
    pub fn seed(
        canvas: &mut Canvas,
        text: &str,
        layout: Layout,
        frequency: usize,
        gravity: f32,
        rng: &mut impl Rng,
    ) -> Result<Self, SeedError> {
        let seeds = text::seed_points(canvas, text, layout, frequency)?;
        Ok(Self::from_seeds(
            canvas.width,
            canvas.height,
            gravity,
            &seeds,
            rng,
        ))
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    /// Advance every particle one step and hand back this frame's triangles.
    ///
    /// Triangles derive from the pre-update state in the same pass, so what
    /// gets drawn is the state the schedule just acted on. The particle
    /// collection is replaced wholesale; values never alias across ticks.
    pub fn tick(&mut self, step: Step, rng: &mut impl Rng) -> Vec<Triangle> {
        let mut triangles = Vec::with_capacity(self.particles.len());
        let next: Vec<Particle> = self
            .particles
            .iter()
            .map(|p| {
                triangles.push(Triangle::from_particle(p));
                p.update(step, rng)
            })
            .collect();
        self.particles = next;
        triangles
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    const STEP: Step = Step {
        speed: 4.0,
        growth_rate: 0.1,
    };

    const LAYOUT: Layout = Layout {
        font_size: 8,
        line_height: 10,
    };

    fn rng() -> StdRng {
        StdRng::seed_from_u64(11)
    }

    #[test]
    fn seeds_particles_inside_the_canvas() {
        let mut rng = rng();
        let mut canvas = Canvas::new(100, 100);
        let scene = Scene::seed(&mut canvas, "HI", LAYOUT, 5, 0.0, &mut rng).unwrap();

        assert!(!scene.is_empty());
        for p in scene.particles() {
            assert!(p.center.x >= 0.0 && p.center.x < 100.0);
            assert!(p.center.y >= 0.0 && p.center.y < 100.0);
            assert_eq!(p.center, p.origin);
            assert_eq!(p.gravity, 0.0);
        }
    }

    #[test]
    fn empty_text_makes_a_blank_scene_that_still_ticks() {
        let mut rng = rng();
        let mut canvas = Canvas::new(80, 80);
        let mut scene = Scene::seed(&mut canvas, "", LAYOUT, 5, 0.0, &mut rng).unwrap();

        assert!(scene.is_empty());
        let triangles = scene.tick(STEP, &mut rng);
        assert!(triangles.is_empty());
    }

    #[test]
    fn tick_derives_triangles_from_the_pre_update_state() {
        let mut rng = rng();
        let seeds = [Vec2::new(30.0, 30.0), Vec2::new(60.0, 60.0)];
        let mut scene = Scene::from_seeds(100, 100, 0.0, &seeds, &mut rng);

        let before: Vec<_> = scene.particles().to_vec();
        let triangles = scene.tick(STEP, &mut rng);

        assert_eq!(triangles.len(), before.len());
        for (tri, p) in triangles.iter().zip(&before) {
            assert_eq!(tri.origin, p.center);
        }
        // and the particles themselves moved on
        for (next, prev) in scene.particles().iter().zip(&before) {
            assert_ne!(next.center, prev.center);
        }
    }

    #[test]
    fn long_runs_stay_finite() {
        let mut rng = rng();
        let seeds = [Vec2::new(50.0, 50.0); 4];
        let mut scene = Scene::from_seeds(100, 100, 0.0, &seeds, &mut rng);
        for _ in 0..10_000 {
            scene.tick(STEP, &mut rng);
        }
        for p in scene.particles() {
            assert!(p.center.x.is_finite() && p.center.y.is_finite());
            assert!(p.radius.is_finite());
        }
    }
}
