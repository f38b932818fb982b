//! Per-particle state and its physics update/recycle rule.

use glam::Vec2;
use rand::Rng;
use std::f32::consts::TAU;

use crate::sim::schedule::Step;

/// Velocity damping applied every tick.
const FRICTION: f32 = 0.99;
/// Radius of a freshly created particle.
const SPAWN_RADIUS: f32 = 1.5;
/// Velocity magnitude at creation; later ticks take theirs from the schedule.
const SPAWN_SPEED: f32 = 4.0;
/// Radius delta per tick until the schedule overrides it.
const SPAWN_GROWTH_RATE: f32 = 0.05;

/// One animated node of the reveal.
///
/// A particle starts on a seed point sampled from the rasterized text, drifts
/// with its velocity while its radius grows toward `radius_max`, shrinks once
/// it got there, and recycles back to `origin` when it leaves the top of the
/// canvas or collapses below radius 1. Particles are never destroyed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Particle {
    pub center: Vec2,
    /// Seed position this particle recycles back to. Fixed at creation.
    pub origin: Vec2,
    pub velocity: Vec2,
    pub radius: f32,
    /// Radius the particle grows toward before it starts dying.
    pub radius_max: f32,
    /// Set once the radius peaked; only a recycle clears it.
    pub dying: bool,
    pub friction: f32,
    pub gravity: f32,
    /// Radius delta per tick; refreshed from the schedule at recycle time.
    pub growth_rate: f32,
    /// Speed the next recycle will launch with.
    pub speed: f32,
}

impl Particle {
    /// Create a particle resting on its seed point, moving at the spawn speed
    /// in a uniformly random direction.
    pub fn create(gravity: f32, cx: f32, cy: f32, rng: &mut impl Rng) -> Self {
        let heading = rng.gen_range(0.0..TAU);
        Self {
            center: Vec2::new(cx, cy),
            origin: Vec2::new(cx, cy),
            velocity: velocity_from(SPAWN_SPEED, heading),
            radius: SPAWN_RADIUS,
            radius_max: rng.gen_range(SPAWN_RADIUS..=6.0),
            dying: false,
            friction: FRICTION,
            gravity,
            growth_rate: SPAWN_GROWTH_RATE,
            speed: SPAWN_SPEED,
        }
    }

    /// Advance one tick, returning the next particle state.
    ///
    /// A particle above the top edge or collapsed below radius 1 recycles back
    /// to its origin with the step's speed and growth rate and a fresh random
    /// heading. Otherwise it integrates: position by velocity, friction and
    /// gravity on the velocity, radius toward `radius_max` and back down once
    /// `dying`. Velocity keeps its previous heading and magnitude through
    /// integration; the step's speed only reaches the velocity at recycle
    /// time, with the `speed` field carrying it until then.
    pub fn update(&self, step: Step, rng: &mut impl Rng) -> Self {
        if self.center.y < 0.0 || self.radius < 1.0 {
            let heading = rng.gen_range(0.0..TAU);
            Self {
                center: self.origin,
                velocity: velocity_from(step.speed, heading),
                radius: 1.0,
                radius_max: rng.gen_range(1.0..=6.0),
                dying: false,
                growth_rate: step.growth_rate,
                speed: step.speed,
                ..*self
            }
        } else {
            let center = self.center + self.velocity;
            let velocity = Vec2::new(
                self.velocity.x * self.friction,
                (self.velocity.y + self.gravity) * self.friction,
            );
            let (radius, dying) = if self.radius < self.radius_max && !self.dying {
                (self.radius + self.growth_rate, false)
            } else {
                (self.radius - self.growth_rate, true)
            };
            Self {
                center,
                velocity,
                radius,
                dying,
                speed: step.speed,
                ..*self
            }
        }
    }
}

fn velocity_from(speed: f32, heading: f32) -> Vec2 {
    Vec2::new(heading.cos() * speed, heading.sin() * speed)
}
