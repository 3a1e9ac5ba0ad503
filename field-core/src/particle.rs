//! A single animated particle: position, velocity, visual state, and the
//! triangle-wave pulse that drives its size oscillation.

use crate::color::Rgba;
use crate::config::FieldConfig;
use glam::Vec2;
use rand::Rng;

/// Fraction by which the pulse grows a particle at peak phase.
const PULSE_AMOUNT: f32 = 0.3;

#[derive(Debug, Clone)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    pub base_size: f32,
    pub color: Rgba,
    /// Current pulse phase in `[0, 1]`.
    pub pulse_phase: f32,
    /// Per-step phase advance, drawn once at spawn.
    pub pulse_speed: f32,
    /// Pulse direction, `+1.0` or `-1.0`.
    pub pulse_dir: f32,
}

impl Particle {
    /// Spawns a particle uniformly at random inside `bounds`.
    ///
    /// Velocity components are independently uniform in `[-0.5, 0.5]`
    /// scaled by the configured speed. The display color is the configured
    /// base color with each RGB channel jittered by up to ±15 and an
    /// opacity drawn uniform in `[0.3, 0.6]`.
    pub fn spawn(cfg: &FieldConfig, bounds: Vec2, rng: &mut impl Rng) -> Self {
        let pos = Vec2::new(
            rng.random_range(0.0..=bounds.x.max(0.0)),
            rng.random_range(0.0..=bounds.y.max(0.0)),
        );
        let vel = Vec2::new(
            rng.random_range(-0.5..=0.5),
            rng.random_range(-0.5..=0.5),
        ) * cfg.speed;

        let size_mul = rng.random_range(0.7..=1.2);
        let opacity = rng.random_range(0.3..=0.6);
        let color = cfg.particle_color.jittered(15, rng).with_alpha(opacity);

        Self {
            pos,
            vel,
            base_size: cfg.particle_size * size_mul,
            color,
            pulse_phase: 0.0,
            pulse_speed: rng.random_range(0.01..=0.03),
            pulse_dir: if rng.random_bool(0.5) { 1.0 } else { -1.0 },
        }
    }

    /// Advances the particle by one frame.
    ///
    /// Position moves by one velocity step; leaving `[0, bounds]` on an
    /// axis negates that axis's velocity without clamping the position, so
    /// a particle may overshoot by at most one step before turning back.
    /// The pulse phase advances as a triangle wave clamped to `[0, 1]`.
    pub fn step(&mut self, bounds: Vec2) {
        self.pos += self.vel;

        if self.pos.x < 0.0 || self.pos.x > bounds.x {
            self.vel.x = -self.vel.x;
        }
        if self.pos.y < 0.0 || self.pos.y > bounds.y {
            self.vel.y = -self.vel.y;
        }

        self.pulse_phase += self.pulse_speed * self.pulse_dir;
        if self.pulse_phase > 1.0 {
            self.pulse_phase = 1.0;
            self.pulse_dir = -1.0;
        } else if self.pulse_phase < 0.0 {
            self.pulse_phase = 0.0;
            self.pulse_dir = 1.0;
        }
    }

    /// Current pulsing radius: `base_size × (1 + 0.3 × pulse_phase)`.
    pub fn pulse_radius(&self) -> f32 {
        self.base_size * (1.0 + PULSE_AMOUNT * self.pulse_phase)
    }
}
