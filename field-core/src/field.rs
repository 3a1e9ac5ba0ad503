//! The particle field: an exclusively-owned particle set, per-frame
//! updates, and the pairwise connection pass.

use crate::config::{FieldConfig, FieldOptions};
use crate::particle::Particle;
use glam::Vec2;
use rand::rngs::ThreadRng;

/// A connection between two particles that are within the configured
/// distance threshold of each other.
#[derive(Debug, Clone, Copy)]
pub struct Connection {
    pub a: Vec2,
    pub b: Vec2,
    /// Stroke opacity, decaying linearly to zero at the threshold.
    pub opacity: f32,
    /// Effective stroke width, already scaled by proximity.
    pub width: f32,
}

/// Opacity of a connection at the given distance: `0.8 × (1 − d/threshold)`.
///
/// Monotonically decreasing on `[0, threshold)`; callers never draw at or
/// beyond the threshold.
pub fn connection_opacity(distance: f32, threshold: f32) -> f32 {
    0.8 * (1.0 - distance / threshold)
}

/// A set of particles confined to a rectangular canvas-space region.
///
/// The particle set is owned exclusively by the field and is replaced
/// wholesale on reconfiguration; there is no identity continuity across
/// [`ParticleField::regenerate`].
#[derive(Debug)]
pub struct ParticleField {
    particles: Vec<Particle>,
    cfg: FieldConfig,
    bounds: Vec2,
    rng: ThreadRng,
}

impl ParticleField {
    /// Creates a field with exactly `cfg.particle_count` particles inside
    /// `bounds`.
    pub fn new(cfg: FieldConfig, bounds: Vec2) -> Self {
        let mut field = Self {
            particles: Vec::new(),
            cfg,
            bounds,
            rng: rand::rng(),
        };
        field.regenerate();
        field
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn cfg(&self) -> &FieldConfig {
        &self.cfg
    }

    pub fn bounds(&self) -> Vec2 {
        self.bounds
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    /// Atomically replaces the entire particle set from the current
    /// configuration. The previous set is discarded; no positions carry
    /// over.
    pub fn regenerate(&mut self) {
        self.particles = (0..self.cfg.particle_count)
            .map(|_| Particle::spawn(&self.cfg, self.bounds, &mut self.rng))
            .collect();
    }

    /// Advances every particle by one frame.
    pub fn update(&mut self) {
        for p in &mut self.particles {
            p.step(self.bounds);
        }
    }

    /// Adopts new bounds. Existing particle positions are kept as-is, not
    /// rescaled; out-of-bounds stragglers reflect back in on later steps.
    pub fn resize(&mut self, bounds: Vec2) {
        self.bounds = bounds;
    }

    /// Merges the given options over the current configuration and
    /// immediately regenerates the particle set. This is the live-retint
    /// path: the canvas and loop are untouched.
    pub fn apply_options(&mut self, opts: &FieldOptions) {
        opts.apply_to(&mut self.cfg);
        self.regenerate();
        log::debug!(
            "field reconfigured: {} particles in {}x{}",
            self.particles.len(),
            self.bounds.x,
            self.bounds.y
        );
    }

    /// Computes all connections for the current frame.
    ///
    /// Full unordered-pair scan: O(N²) by design, acceptable for the tens
    /// of particles this field targets (see
    /// [`crate::config::MAX_PARTICLE_COUNT`]). Pairs closer than 70% of the
    /// threshold get a 1.2× stroke width, the rest 0.8×.
    pub fn connections(&self) -> Vec<Connection> {
        let threshold = self.cfg.connection_distance;
        let near = threshold * 0.7;
        let mut out = Vec::new();

        for i in 0..self.particles.len() {
            for j in (i + 1)..self.particles.len() {
                let a = self.particles[i].pos;
                let b = self.particles[j].pos;
                let distance = a.distance(b);

                if distance < threshold {
                    let width_mul = if distance < near { 1.2 } else { 0.8 };
                    out.push(Connection {
                        a,
                        b,
                        opacity: connection_opacity(distance, threshold),
                        width: self.cfg.line_width * width_mul,
                    });
                }
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn field_with(count: usize, bounds: Vec2) -> ParticleField {
        let mut cfg = FieldConfig::default();
        cfg.particle_count = count;
        ParticleField::new(cfg, bounds)
    }

    #[test]
    fn new_field_has_exactly_configured_count_inside_bounds() {
        let bounds = Vec2::new(300.0, 200.0);
        let field = field_with(20, bounds);

        assert_eq!(field.len(), 20);
        for p in field.particles() {
            assert!((0.0..=bounds.x).contains(&p.pos.x));
            assert!((0.0..=bounds.y).contains(&p.pos.y));
        }
    }

    #[test]
    fn empty_field_updates_without_panicking() {
        let mut field = field_with(0, Vec2::new(100.0, 100.0));
        assert!(field.is_empty());
        for _ in 0..10 {
            field.update();
        }
        assert!(field.connections().is_empty());
    }

    #[test]
    fn apply_options_replaces_set_immediately() {
        let mut field = field_with(20, Vec2::new(100.0, 100.0));
        assert_eq!(field.len(), 20);

        let opts = FieldOptions {
            particle_count: Some(5),
            ..FieldOptions::default()
        };
        field.apply_options(&opts);

        assert_eq!(field.len(), 5);
        assert_eq!(field.cfg().particle_count, 5);
        // Unspecified config fields survive the merge.
        assert_eq!(field.cfg().connection_distance, 150.0);
    }

    #[test]
    fn resize_keeps_particle_positions() {
        let mut field = field_with(10, Vec2::new(200.0, 200.0));
        let before: Vec<Vec2> = field.particles().iter().map(|p| p.pos).collect();

        field.resize(Vec2::new(400.0, 400.0));

        assert_eq!(field.bounds(), Vec2::new(400.0, 400.0));
        let after: Vec<Vec2> = field.particles().iter().map(|p| p.pos).collect();
        assert_eq!(before, after);
    }

    #[test]
    fn huge_threshold_connects_every_pair() {
        // On a 100x100 canvas the maximum possible distance is ~141, well
        // under a 1000.0 threshold, so all 3 pairs must connect.
        let mut cfg = FieldConfig::default();
        cfg.particle_count = 3;
        cfg.connection_distance = 1000.0;
        let mut field = ParticleField::new(cfg, Vec2::new(100.0, 100.0));

        field.update();
        assert_eq!(field.connections().len(), 3);
    }

    #[test]
    fn opacity_decays_monotonically_and_vanishes_at_threshold() {
        let threshold = 150.0;
        let mut last = f32::INFINITY;
        for i in 0..150 {
            let d = i as f32;
            let o = connection_opacity(d, threshold);
            assert!(o < last, "opacity must strictly decrease");
            assert!(o > 0.0);
            last = o;
        }
        assert!(connection_opacity(threshold, threshold).abs() < 1e-6);
    }

    #[test]
    fn near_pairs_get_wider_strokes() {
        let mut cfg = FieldConfig::default();
        cfg.particle_count = 0;
        cfg.connection_distance = 100.0;
        cfg.line_width = 1.0;
        let mut field = ParticleField::new(cfg, Vec2::new(500.0, 500.0));

        // Hand-place three particles: one pair at distance 50 (inside the
        // 70% band), one at distance 90 (outside it).
        let mut rng = rand::rng();
        let template = Particle::spawn(field.cfg(), field.bounds(), &mut rng);
        let mut at = |x: f32| {
            let mut p = template.clone();
            p.pos = Vec2::new(x, 0.0);
            p.vel = Vec2::ZERO;
            p
        };
        field.particles = vec![at(0.0), at(50.0), at(140.0)];

        let mut conns = field.connections();
        conns.sort_by(|a, b| a.width.total_cmp(&b.width));

        // (50, 140) pair is at distance 90: thin. (0, 50) pair: wide.
        // (0, 140) is beyond the threshold entirely.
        assert_eq!(conns.len(), 2);
        assert!((conns[0].width - 0.8).abs() < 1e-6);
        assert!((conns[1].width - 1.2).abs() < 1e-6);
    }
}
