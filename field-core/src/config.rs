//! Field configuration: defaults, JSON loading, validation, and the
//! partial-overlay type used for live reconfiguration.

use crate::color::Rgba;
use serde::Deserialize;
use std::path::Path;
use std::{fs, io};
use thiserror::Error;

/// Upper bound on the configured particle count.
///
/// The connection pass is a full O(N²) pairwise scan per frame; the field is
/// designed for tens of particles, and this cap keeps a misconfigured file
/// from locking up the render loop.
pub const MAX_PARTICLE_COUNT: usize = 10_000;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] io::Error),
    #[error("failed to parse config file: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid config: {0}")]
    Validation(String),
}

/// Complete configuration for a particle field.
///
/// Every field has a default, so a config file may specify any subset.
/// Colors are given in their CSS string form (`rgba(r, g, b, a)`) and
/// parsed once at load time.
#[derive(Debug, Clone, Deserialize)]
pub struct FieldConfig {
    #[serde(default = "default_particle_count")]
    pub particle_count: usize,
    #[serde(default = "default_particle_size")]
    pub particle_size: f32,
    #[serde(default = "default_particle_color")]
    pub particle_color: Rgba,
    #[serde(default = "default_line_color")]
    pub line_color: Rgba,
    #[serde(default = "default_line_width")]
    pub line_width: f32,
    #[serde(default = "default_speed")]
    pub speed: f32,
    #[serde(default = "default_connection_distance")]
    pub connection_distance: f32,
    #[serde(default = "default_auto_resize")]
    pub auto_resize: bool,
}

fn default_particle_count() -> usize {
    20
}
fn default_particle_size() -> f32 {
    3.0
}
fn default_particle_color() -> Rgba {
    Rgba::new(255, 138, 101, 0.7)
}
fn default_line_color() -> Rgba {
    Rgba::new(255, 138, 101, 0.2)
}
fn default_line_width() -> f32 {
    1.0
}
fn default_speed() -> f32 {
    1.0
}
fn default_connection_distance() -> f32 {
    150.0
}
fn default_auto_resize() -> bool {
    true
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self {
            particle_count: default_particle_count(),
            particle_size: default_particle_size(),
            particle_color: default_particle_color(),
            line_color: default_line_color(),
            line_width: default_line_width(),
            speed: default_speed(),
            connection_distance: default_connection_distance(),
            auto_resize: default_auto_resize(),
        }
    }
}

impl FieldConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.particle_count > MAX_PARTICLE_COUNT {
            return Err(ConfigError::Validation(format!(
                "particle_count {} exceeds the maximum of {}",
                self.particle_count, MAX_PARTICLE_COUNT
            )));
        }
        if !(self.connection_distance.is_finite() && self.connection_distance > 0.0) {
            return Err(ConfigError::Validation(format!(
                "connection_distance must be finite and positive, got {}",
                self.connection_distance
            )));
        }
        if !(self.particle_size.is_finite() && self.particle_size > 0.0) {
            return Err(ConfigError::Validation(format!(
                "particle_size must be finite and positive, got {}",
                self.particle_size
            )));
        }
        if !(self.speed.is_finite() && self.speed >= 0.0) {
            return Err(ConfigError::Validation(format!(
                "speed must be finite and non-negative, got {}",
                self.speed
            )));
        }
        if !(self.line_width.is_finite() && self.line_width >= 0.0) {
            return Err(ConfigError::Validation(format!(
                "line_width must be finite and non-negative, got {}",
                self.line_width
            )));
        }
        Ok(())
    }
}

/// Partial configuration overlay.
///
/// Only the specified fields replace their counterparts in a
/// [`FieldConfig`]; everything else is retained. This is the mechanism
/// behind live reconfiguration (e.g. a theme change retinting the field).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FieldOptions {
    pub particle_count: Option<usize>,
    pub particle_size: Option<f32>,
    pub particle_color: Option<Rgba>,
    pub line_color: Option<Rgba>,
    pub line_width: Option<f32>,
    pub speed: Option<f32>,
    pub connection_distance: Option<f32>,
    pub auto_resize: Option<bool>,
}

impl FieldOptions {
    /// Merges the specified fields over `cfg`, leaving the rest untouched.
    pub fn apply_to(&self, cfg: &mut FieldConfig) {
        if let Some(v) = self.particle_count {
            cfg.particle_count = v;
        }
        if let Some(v) = self.particle_size {
            cfg.particle_size = v;
        }
        if let Some(v) = self.particle_color {
            cfg.particle_color = v;
        }
        if let Some(v) = self.line_color {
            cfg.line_color = v;
        }
        if let Some(v) = self.line_width {
            cfg.line_width = v;
        }
        if let Some(v) = self.speed {
            cfg.speed = v;
        }
        if let Some(v) = self.connection_distance {
            cfg.connection_distance = v;
        }
        if let Some(v) = self.auto_resize {
            cfg.auto_resize = v;
        }
    }
}

/// Loads and validates a [`FieldConfig`] from a JSON file.
pub fn load_config(path: &Path) -> Result<FieldConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    let config: FieldConfig = serde_json::from_str(&content)?;
    config.validate()?;
    Ok(config)
}
