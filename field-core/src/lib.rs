//! Core particle-field animation library.
//!
//! Main components:
//! - [`particle`] — a single animated particle and its kinematics.
//! - [`field`] — the owned particle set and pairwise connection pass.
//! - [`scene`] — the per-frame draw list handed to a host for painting.
//! - [`animator`] — lifecycle: mounting, ticking, start/stop.
//! - [`config`] — field configuration, JSON loading, live overlays.
//! - [`color`] — structured RGBA parsed once from CSS-style strings.
//! - [`theme`] — light/dark palettes and the theme-change observer.
//! - [`debounce`] — settle-delay debouncing for resize bursts.

pub mod animator;
pub mod color;
pub mod config;
pub mod debounce;
pub mod field;
pub mod particle;
pub mod scene;
pub mod theme;
