//! Application entry point for the particle field viewer.
//!
//! This binary sets up logging and eframe/egui, loads an optional JSON
//! configuration file given as the first argument, and delegates all
//! interactive logic and painting to [`FieldApp`] from the `app` module.

mod app;
mod paint;

use app::FieldApp;
use field_core::config::{self, FieldConfig};
use std::path::PathBuf;

/// Starts the native eframe application.
///
/// A config file path may be passed as the first CLI argument; a missing
/// or invalid file falls back to defaults with a logged warning (the
/// field is decorative, so startup never fails on configuration).
fn main() -> eframe::Result<()> {
    env_logger::init();

    let cfg = match std::env::args().nth(1).map(PathBuf::from) {
        Some(path) => match config::load_config(&path) {
            Ok(cfg) => cfg,
            Err(err) => {
                log::warn!(
                    "could not load config from {}: {err}; using defaults",
                    path.display()
                );
                FieldConfig::default()
            }
        },
        None => FieldConfig::default(),
    };

    let options = eframe::NativeOptions::default();

    eframe::run_native(
        "Particle Field",
        options,
        Box::new(move |cc| Ok(Box::new(FieldApp::new(cc, cfg)))),
    )
}
