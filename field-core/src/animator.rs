//! Animator lifecycle: mounting against a host surface, ticking the
//! field once per scheduled frame, and idempotent start/stop.
//!
//! The animator has no notion of real time or of a frame callback; the
//! host calls [`Animator::tick`] once per repaint and paints whatever
//! scene comes back. While stopped, `tick` returns `None` and the field
//! does not advance, so the host's last-painted frame stays on screen.

use crate::config::{FieldConfig, FieldOptions};
use crate::field::ParticleField;
use crate::scene::Scene;
use glam::Vec2;
use thiserror::Error;

/// The narrow surface the host environment supplies: something with a
/// queryable layout box the canvas can be sized to.
pub trait Mount {
    /// Current layout box, or `None` if the mount cannot be resolved.
    fn bounding_box(&self) -> Option<Vec2>;
}

/// The single fatal construction failure: the mount did not resolve.
#[derive(Debug, Error)]
pub enum MountError {
    #[error("mount point has no bounding box")]
    Unresolved,
}

#[derive(Debug)]
pub struct Animator {
    field: ParticleField,
    running: bool,
}

impl Animator {
    /// Mounts a new animator, sizing its canvas space to the mount's
    /// current layout box (truncated to whole pixels).
    ///
    /// This is the only fallible operation; everything after a successful
    /// mount is total.
    pub fn mount(mount: &dyn Mount, cfg: FieldConfig) -> Result<Self, MountError> {
        let bounds = mount.bounding_box().ok_or(MountError::Unresolved)?.floor();
        log::debug!("animator mounted at {}x{}", bounds.x, bounds.y);
        Ok(Self {
            field: ParticleField::new(cfg, bounds),
            running: false,
        })
    }

    /// Begins producing scenes. No-op if already running.
    pub fn start(&mut self) {
        self.running = true;
    }

    /// Stops producing scenes. No-op if already stopped. Guaranteed to
    /// suppress every subsequent [`Animator::tick`] until restarted.
    pub fn stop(&mut self) {
        self.running = false;
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Advances one frame and returns the scene to paint, or `None` while
    /// stopped.
    pub fn tick(&mut self) -> Option<Scene> {
        if !self.running {
            return None;
        }
        self.field.update();
        Some(Scene::build(&self.field))
    }

    /// Resynchronizes the canvas space with the mount's new layout box.
    /// Particle positions are not rescaled.
    pub fn resize(&mut self, bounds: Vec2) {
        let bounds = bounds.floor();
        log::debug!("animator resized to {}x{}", bounds.x, bounds.y);
        self.field.resize(bounds);
    }

    /// Merges the given options over the current configuration and
    /// regenerates the particle set, without restarting the loop or
    /// touching the canvas.
    pub fn update_options(&mut self, opts: &FieldOptions) {
        self.field.apply_options(opts);
    }

    pub fn field(&self) -> &ParticleField {
        &self.field
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FixedMount(Option<Vec2>);

    impl Mount for FixedMount {
        fn bounding_box(&self) -> Option<Vec2> {
            self.0
        }
    }

    fn mounted(count: usize, bounds: Vec2) -> Animator {
        let mut cfg = FieldConfig::default();
        cfg.particle_count = count;
        Animator::mount(&FixedMount(Some(bounds)), cfg).unwrap()
    }

    #[test]
    fn mount_fails_without_a_bounding_box() {
        let result = Animator::mount(&FixedMount(None), FieldConfig::default());
        assert!(matches!(result, Err(MountError::Unresolved)));
    }

    #[test]
    fn mount_truncates_subpixel_layout() {
        let anim = mounted(5, Vec2::new(200.7, 100.9));
        assert_eq!(anim.field().bounds(), Vec2::new(200.0, 100.0));
        assert_eq!(anim.field().len(), 5);
    }

    #[test]
    fn tick_is_suppressed_until_started() {
        let mut anim = mounted(10, Vec2::new(100.0, 100.0));
        assert!(!anim.is_running());
        assert!(anim.tick().is_none());

        anim.start();
        assert!(anim.tick().is_some());
    }

    #[test]
    fn stop_halts_ticks_and_start_resumes() {
        let mut anim = mounted(10, Vec2::new(100.0, 100.0));
        anim.start();
        anim.tick().unwrap();

        anim.stop();
        let frozen: Vec<_> = anim.field().particles().iter().map(|p| p.pos).collect();
        for _ in 0..5 {
            assert!(anim.tick().is_none());
        }
        // No mutation happened while stopped.
        let after: Vec<_> = anim.field().particles().iter().map(|p| p.pos).collect();
        assert_eq!(frozen, after);

        anim.start();
        assert!(anim.tick().is_some());
    }

    #[test]
    fn start_and_stop_are_idempotent() {
        let mut anim = mounted(1, Vec2::new(100.0, 100.0));
        anim.start();
        anim.start();
        assert!(anim.is_running());
        anim.stop();
        anim.stop();
        assert!(!anim.is_running());
    }

    #[test]
    fn update_options_swaps_particle_set_mid_run() {
        let mut anim = mounted(20, Vec2::new(100.0, 100.0));
        anim.start();
        anim.tick();

        let opts = FieldOptions {
            particle_count: Some(5),
            ..FieldOptions::default()
        };
        anim.update_options(&opts);

        assert_eq!(anim.field().len(), 5);
        // The loop keeps going.
        assert!(anim.is_running());
        assert!(anim.tick().is_some());
    }

    #[test]
    fn resize_mid_run_keeps_positions_valid() {
        let mut anim = mounted(10, Vec2::new(200.0, 200.0));
        anim.start();
        anim.tick();

        let before: Vec<_> = anim.field().particles().iter().map(|p| p.pos).collect();
        anim.resize(Vec2::new(400.0, 400.0));
        let after: Vec<_> = anim.field().particles().iter().map(|p| p.pos).collect();

        assert_eq!(before, after);
        assert_eq!(anim.field().bounds(), Vec2::new(400.0, 400.0));
    }
}
