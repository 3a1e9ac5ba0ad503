//! Interactive particle-field host built with eframe/egui.
//!
//! This module defines [`FieldApp`], which owns the animator, the theme
//! state, and the resize debouncer, and implements [`eframe::App`] to
//! mount, tick, and paint the field on the central panel.

use eframe::App;
use egui::Rect;
use field_core::animator::{Animator, Mount};
use field_core::config::{FieldConfig, FieldOptions};
use field_core::debounce::Debouncer;
use field_core::scene::{DrawOp, Scene};
use field_core::theme::{Theme, ThemeState};
use glam::Vec2;
use std::cell::RefCell;
use std::rc::Rc;
use std::time::{Duration, Instant};

use crate::paint;

/// Storage key for the persisted theme preference.
const THEME_STORAGE_KEY: &str = "theme";

/// [`Mount`] backed by an egui panel rect.
struct PanelMount(Rect);

impl Mount for PanelMount {
    fn bounding_box(&self) -> Option<Vec2> {
        let size = self.0.size();
        if size.x > 0.0 && size.y > 0.0 {
            Some(Vec2::new(size.x, size.y))
        } else {
            None
        }
    }
}

/// Main application state.
///
/// The animator is mounted lazily on the first frame with a usable panel
/// rect; if mounting fails the app stays up with an empty background (a
/// decorative layer has no user-facing error surface).
pub struct FieldApp {
    /// Configuration used when the animator is mounted on the first
    /// frame with a usable panel rect.
    cfg: FieldConfig,
    animator: Option<Animator>,
    mount_failed: bool,

    theme: ThemeState,
    /// Theme changes delivered by the observer, drained each frame.
    theme_events: Rc<RefCell<Vec<Theme>>>,

    debouncer: Debouncer,
    last_size: Vec2,

    /// Last produced scene, re-painted while the animator is stopped so
    /// the final frame stays on screen.
    last_scene: Scene,
}

impl FieldApp {
    pub fn new(cc: &eframe::CreationContext<'_>, cfg: FieldConfig) -> Self {
        let stored = cc
            .storage
            .and_then(|s| s.get_string(THEME_STORAGE_KEY))
            .and_then(|s| match s.as_str() {
                "dark" => Some(Theme::Dark),
                "light" => Some(Theme::Light),
                _ => None,
            });
        let prefers_dark = cc.egui_ctx.style().visuals.dark_mode;

        let mut theme = ThemeState::detect(stored, prefers_dark);

        let theme_events = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&theme_events);
        // The observer also delivers the initial theme, so the field is
        // retinted right after mounting.
        theme.subscribe(move |t| sink.borrow_mut().push(t));

        Self {
            cfg,
            animator: None,
            mount_failed: false,
            theme,
            theme_events,
            debouncer: Debouncer::default(),
            last_size: Vec2::ZERO,
            last_scene: Scene::default(),
        }
    }

    fn connection_count(&self) -> usize {
        self.last_scene
            .ops
            .iter()
            .filter(|op| matches!(op, DrawOp::Line { .. }))
            .count()
    }

    /// Builds the top control bar.
    fn ui_top_panel(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::top("top_panel").show(ctx, |ui| {
            ui.horizontal(|ui| {
                let running = self
                    .animator
                    .as_ref()
                    .is_some_and(|a| a.is_running());

                if ui
                    .button(if running { "⏸ Pause" } else { "▶ Run" })
                    .clicked()
                    && let Some(anim) = self.animator.as_mut()
                {
                    if running {
                        anim.stop();
                    } else {
                        anim.start();
                    }
                }

                if ui.button("Reset").clicked()
                    && let Some(anim) = self.animator.as_mut()
                {
                    // An empty overlay still regenerates the particle set.
                    anim.update_options(&FieldOptions::default());
                }

                ui.separator();

                if let Some(anim) = self.animator.as_mut() {
                    let mut count = anim.field().cfg().particle_count;
                    let count_response = ui.add(
                        egui::DragValue::new(&mut count)
                            .prefix("particles: ")
                            .range(0..=500_usize)
                            .speed(1.0),
                    );
                    if count_response.changed() {
                        anim.update_options(&FieldOptions {
                            particle_count: Some(count),
                            ..FieldOptions::default()
                        });
                    }

                    let mut speed = anim.field().cfg().speed;
                    let speed_response =
                        ui.add(egui::Slider::new(&mut speed, 0.0..=5.0).text("speed"));
                    if speed_response.changed() {
                        anim.update_options(&FieldOptions {
                            speed: Some(speed),
                            ..FieldOptions::default()
                        });
                    }

                    let mut dist = anim.field().cfg().connection_distance;
                    let dist_response = ui.add(
                        egui::Slider::new(&mut dist, 10.0..=500.0).text("link distance"),
                    );
                    if dist_response.changed() {
                        anim.update_options(&FieldOptions {
                            connection_distance: Some(dist),
                            ..FieldOptions::default()
                        });
                    }
                }

                ui.separator();

                let label = if self.theme.current().is_dark() {
                    "☀ Light"
                } else {
                    "🌙 Dark"
                };
                if ui.button(label).clicked() {
                    self.theme.toggle();
                }
            });
        });
    }

    /// Builds the bottom status bar.
    fn ui_status_bar(&self, ctx: &egui::Context) {
        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if let Some(anim) = self.animator.as_ref() {
                    let bounds = anim.field().bounds();
                    ui.label(format!("canvas = {}x{}", bounds.x, bounds.y));
                    ui.separator();
                    ui.label(format!("connections = {}", self.connection_count()));
                    ui.label(format!("particles = {}", anim.field().len()));
                }
            });
        });
    }

    /// Ticks and paints the field on the central panel.
    fn ui_central_panel(&mut self, ctx: &egui::Context) {
        egui::CentralPanel::default().show(ctx, |ui| {
            let rect = ui.available_rect_before_wrap();
            let painter = ui.painter_at(rect);
            let now = Instant::now();

            // First usable rect mounts the animator. A failed mount leaves
            // the app inert: the field simply never appears.
            if self.animator.is_none() && !self.mount_failed {
                match Animator::mount(&PanelMount(rect), self.cfg.clone()) {
                    Ok(mut anim) => {
                        anim.start();
                        self.last_size = Vec2::new(rect.width(), rect.height()).floor();
                        self.animator = Some(anim);
                    }
                    Err(err) => {
                        log::error!("failed to mount particle field: {err}");
                        self.mount_failed = true;
                    }
                }
            }

            let Some(anim) = self.animator.as_mut() else {
                return;
            };

            // Apply pending theme changes through the options overlay.
            for theme in self.theme_events.borrow_mut().drain(..) {
                anim.update_options(&theme.palette().into());
            }

            // Debounced resize: only the last geometry change within the
            // settle window reaches the field.
            let size = Vec2::new(rect.width(), rect.height()).floor();
            if anim.field().cfg().auto_resize && size != self.last_size {
                self.debouncer.trigger(now);
                self.last_size = size;
            }
            if self.debouncer.fire_ready(now) {
                anim.resize(size);
            }

            if let Some(scene) = anim.tick() {
                self.last_scene = scene;
            }
            paint::paint_scene(&painter, rect, &self.last_scene);

            if anim.is_running() {
                ctx.request_repaint();
            } else if self.debouncer.is_pending() {
                ctx.request_repaint_after(Duration::from_millis(50));
            }
        });
    }
}

impl App for FieldApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.ui_top_panel(ctx);
        self.ui_status_bar(ctx);
        self.ui_central_panel(ctx);
    }

    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        let value = if self.theme.current().is_dark() {
            "dark"
        } else {
            "light"
        };
        storage.set_string(THEME_STORAGE_KEY, value.to_string());
    }
}
