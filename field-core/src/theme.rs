//! Site-wide theme state and its observer registration.
//!
//! The animator itself has no theme awareness; glue code subscribes to a
//! [`ThemeState`] and reacts to changes by retinting the field through
//! [`FieldOptions`]. Detection order mirrors the usual convention: an
//! explicitly stored preference wins over the OS-level one.

use crate::color::Rgba;
use crate::config::FieldOptions;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Theme {
    Light,
    Dark,
}

/// The field colors appropriate for a theme.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ThemePalette {
    pub particle_color: Rgba,
    pub line_color: Rgba,
}

impl Theme {
    pub fn is_dark(self) -> bool {
        self == Theme::Dark
    }

    pub fn opposite(self) -> Theme {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    /// Warm ember tones on dark backgrounds, muted slate on light ones.
    pub fn palette(self) -> ThemePalette {
        match self {
            Theme::Dark => ThemePalette {
                particle_color: Rgba::new(255, 138, 101, 0.5),
                line_color: Rgba::new(255, 138, 101, 0.12),
            },
            Theme::Light => ThemePalette {
                particle_color: Rgba::new(44, 62, 80, 0.7),
                line_color: Rgba::new(44, 62, 80, 0.25),
            },
        }
    }
}

impl From<ThemePalette> for FieldOptions {
    fn from(palette: ThemePalette) -> Self {
        FieldOptions {
            particle_color: Some(palette.particle_color),
            line_color: Some(palette.line_color),
            ..FieldOptions::default()
        }
    }
}

/// Current theme plus registered change observers.
pub struct ThemeState {
    current: Theme,
    observers: Vec<Box<dyn FnMut(Theme)>>,
}

impl ThemeState {
    pub fn new(initial: Theme) -> Self {
        Self {
            current: initial,
            observers: Vec::new(),
        }
    }

    /// Resolves the initial theme: a stored preference wins, otherwise the
    /// OS-level preference signal decides.
    pub fn detect(stored: Option<Theme>, prefers_dark: bool) -> Self {
        let initial = stored.unwrap_or(if prefers_dark {
            Theme::Dark
        } else {
            Theme::Light
        });
        Self::new(initial)
    }

    pub fn current(&self) -> Theme {
        self.current
    }

    /// Registers a change observer. The handler is invoked immediately
    /// with the current theme, then again on every change.
    pub fn subscribe(&mut self, mut handler: impl FnMut(Theme) + 'static) {
        handler(self.current);
        self.observers.push(Box::new(handler));
    }

    /// Switches to `theme`, notifying observers. No-op if unchanged.
    pub fn set(&mut self, theme: Theme) {
        if theme == self.current {
            return;
        }
        self.current = theme;
        for observer in &mut self.observers {
            observer(theme);
        }
    }

    /// Flips between light and dark, returning the new theme.
    pub fn toggle(&mut self) -> Theme {
        self.set(self.current.opposite());
        self.current
    }
}

impl std::fmt::Debug for ThemeState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ThemeState")
            .field("current", &self.current)
            .field("observers", &self.observers.len())
            .finish()
    }
}
