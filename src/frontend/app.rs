//! Application shell driving widget updates from the egui event loop
//!
//! The event loop is the host "tick" from the core's point of view: each
//! frame checks whether the update interval elapsed and, if so, runs the
//! widgets' synchronous `update()` calls back to back. Fetch errors keep
//! the previous frame on screen and surface in the status bar; the next
//! tick retries naturally.

use crate::config::UiState;
use crate::controller::SharedController;
use crate::frontend::{image_pane, striptool_pane};
use crate::widgets::{ImagePlot, Striptool};
use egui::Color32;
use std::time::{Duration, Instant};

/// Top-level eframe application
pub struct VisApp {
    striptool: Option<Striptool>,
    image_plot: Option<ImagePlot>,
    controller: SharedController,
    tick_interval: Duration,
    last_tick: Option<Instant>,
    last_error: Option<String>,
    ui_state: UiState,
    image_texture: Option<egui::TextureHandle>,
}

impl VisApp {
    /// Build the app, restoring persisted selections where they still
    /// name a known variable
    pub fn new(
        striptool: Option<Striptool>,
        image_plot: Option<ImagePlot>,
        controller: SharedController,
        tick_interval: Duration,
        ui_state: UiState,
    ) -> Self {
        let mut app = Self {
            striptool,
            image_plot,
            controller,
            tick_interval,
            last_tick: None,
            last_error: None,
            ui_state,
            image_texture: None,
        };

        if let (Some(tool), Some(name)) = (
            app.striptool.as_mut(),
            app.ui_state.last_scalar_variable.as_deref(),
        ) {
            if tool.select(name).is_err() {
                tracing::debug!("saved striptool selection {:?} no longer exists", name);
            }
        }
        if let (Some(plot), Some(name)) = (
            app.image_plot.as_mut(),
            app.ui_state.last_image_variable.as_deref(),
        ) {
            if plot.select(name).is_err() {
                tracing::debug!("saved image selection {:?} no longer exists", name);
            }
        }

        app
    }

    /// Run one synchronous update cycle over all widgets
    fn tick(&mut self) {
        let mut errors = Vec::new();

        if let Some(tool) = self.striptool.as_mut() {
            if let Err(e) = tool.update() {
                tracing::warn!("striptool update failed: {}", e);
                errors.push(e.to_string());
            }
        }
        if let Some(plot) = self.image_plot.as_mut() {
            if let Err(e) = plot.update(None) {
                tracing::warn!("image plot update failed: {}", e);
                errors.push(e.to_string());
            }
        }

        self.last_error = if errors.is_empty() {
            None
        } else {
            Some(errors.join("; "))
        };
    }
}

impl eframe::App for VisApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let due = self
            .last_tick
            .map_or(true, |t| t.elapsed() >= self.tick_interval);
        if due {
            self.tick();
            self.last_tick = Some(Instant::now());
        }

        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                let stats = self.controller.borrow().stats();
                ui.label(format!(
                    "fetches: {:.1}% ok ({} failed)",
                    stats.success_rate(),
                    stats.failed_fetches
                ));
                ui.separator();
                ui.label(format!("last fetch: {} us", stats.last_fetch_time_us));
                if let Some(err) = &self.last_error {
                    ui.separator();
                    ui.colored_label(Color32::from_rgb(220, 90, 70), err);
                }
            });
        });

        let mut selection_dirty = false;

        if let Some(image_plot) = self.image_plot.as_mut() {
            let texture = &mut self.image_texture;
            let ui_state = &mut self.ui_state;
            egui::SidePanel::right("image_panel")
                .default_width(420.0)
                .show(ctx, |ui| {
                    if let Some(name) = image_pane::render(image_plot, texture, ui) {
                        ui_state.last_image_variable = Some(name);
                        selection_dirty = true;
                    }
                });
        }

        if let Some(striptool) = self.striptool.as_mut() {
            let ui_state = &mut self.ui_state;
            egui::CentralPanel::default().show(ctx, |ui| {
                if let Some(name) = striptool_pane::render(striptool, ui) {
                    ui_state.last_scalar_variable = Some(name);
                    selection_dirty = true;
                }
            });
        } else {
            egui::CentralPanel::default().show(ctx, |ui| {
                ui.label("No scalar variables configured");
            });
        }

        if selection_dirty {
            if let Err(e) = self.ui_state.save() {
                tracing::debug!("failed to persist UI state: {}", e);
            }
        }

        ctx.request_repaint_after(self.tick_interval);
    }
}
