//! Structured RGBA color.
//!
//! Colors enter the system as CSS-style `rgb(...)` / `rgba(...)` strings
//! (the configuration wire format) and are parsed exactly once, at load
//! time. The render path only ever sees [`Rgba`] values.

use rand::Rng;
use serde::{Deserialize, Deserializer};
use std::fmt;
use thiserror::Error;

/// Errors produced when parsing a color string.
#[derive(Debug, Error, PartialEq)]
pub enum ColorParseError {
    #[error("expected `rgb(r, g, b)` or `rgba(r, g, b, a)`, got `{0}`")]
    Format(String),
    #[error("invalid color channel `{0}` (expected integer 0-255)")]
    Channel(String),
    #[error("invalid alpha `{0}` (expected float in [0, 1])")]
    Alpha(String),
}

/// An RGBA color with 8-bit channels and a fractional alpha.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f32,
}

impl Rgba {
    pub const fn new(r: u8, g: u8, b: u8, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Parses a CSS-style color string.
    ///
    /// Accepted forms are `rgb(r, g, b)` (alpha defaults to `1.0`) and
    /// `rgba(r, g, b, a)`. Channels must be integers in `0..=255`, alpha
    /// a float in `[0, 1]`.
    pub fn parse(s: &str) -> Result<Self, ColorParseError> {
        let trimmed = s.trim();

        let (body, has_alpha) = if let Some(rest) = trimmed.strip_prefix("rgba(") {
            (rest, true)
        } else if let Some(rest) = trimmed.strip_prefix("rgb(") {
            (rest, false)
        } else {
            return Err(ColorParseError::Format(s.to_string()));
        };

        let body = body
            .strip_suffix(')')
            .ok_or_else(|| ColorParseError::Format(s.to_string()))?;

        let parts: Vec<&str> = body.split(',').map(str::trim).collect();
        let expected = if has_alpha { 4 } else { 3 };
        if parts.len() != expected {
            return Err(ColorParseError::Format(s.to_string()));
        }

        let channel = |p: &str| {
            p.parse::<u8>()
                .map_err(|_| ColorParseError::Channel(p.to_string()))
        };

        let r = channel(parts[0])?;
        let g = channel(parts[1])?;
        let b = channel(parts[2])?;

        let a = if has_alpha {
            let a = parts[3]
                .parse::<f32>()
                .map_err(|_| ColorParseError::Alpha(parts[3].to_string()))?;
            if !(0.0..=1.0).contains(&a) {
                return Err(ColorParseError::Alpha(parts[3].to_string()));
            }
            a
        } else {
            1.0
        };

        Ok(Self { r, g, b, a })
    }

    /// Returns this color with each RGB channel shifted by an independent
    /// random offset in `[-amount, +amount]`, saturating at the channel
    /// bounds. Alpha is unchanged.
    pub fn jittered(&self, amount: i16, rng: &mut impl Rng) -> Self {
        let mut shift = |c: u8| {
            let offset = rng.random_range(-amount..=amount);
            (c as i16 + offset).clamp(0, 255) as u8
        };
        let (r, g, b) = (shift(self.r), shift(self.g), shift(self.b));
        Self { r, g, b, a: self.a }
    }

    /// Returns this color with the alpha replaced (clamped to `[0, 1]`).
    pub fn with_alpha(&self, a: f32) -> Self {
        Self {
            a: a.clamp(0.0, 1.0),
            ..*self
        }
    }
}

impl fmt::Display for Rgba {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
    }
}

impl<'de> Deserialize<'de> for Rgba {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Rgba::parse(&s).map_err(serde::de::Error::custom)
    }
}
