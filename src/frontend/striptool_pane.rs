//! Striptool pane - variable selector, reset control, and time-series plot

use crate::widgets::Striptool;
use egui::Ui;
use egui_plot::{Legend, Line, Plot, PlotPoints};

/// Format an epoch-seconds axis position as a wall-clock tick label
fn format_time_tick(value: f64) -> String {
    let secs = value as i64;
    let nsecs = ((value - secs as f64) * 1e9) as u32;
    chrono::DateTime::from_timestamp(secs, nsecs)
        .map(|dt| dt.format("%H:%M:%S").to_string())
        .unwrap_or_default()
}

/// Render the striptool pane
///
/// Returns the newly selected variable name when the user switched, so
/// the app shell can persist the selection.
pub fn render(striptool: &mut Striptool, ui: &mut Ui) -> Option<String> {
    let mut changed = None;

    ui.horizontal(|ui| {
        let mut selected = striptool.live_variable().to_string();
        egui::ComboBox::from_label("Variable to plot")
            .selected_text(selected.clone())
            .show_ui(ui, |ui| {
                for name in striptool.variable_names() {
                    ui.selectable_value(&mut selected, name.clone(), name.as_str());
                }
            });

        if selected != striptool.live_variable() {
            match striptool.select(&selected) {
                Ok(()) => changed = Some(selected),
                // The selector only offers known names, but the core
                // still validates; log instead of crashing the frame.
                Err(e) => tracing::warn!("selection rejected: {}", e),
            }
        }

        if ui.button("Reset").clicked() {
            striptool.reset_active();
        }
    });

    let source = striptool.source();
    let line_name = striptool.live_variable().to_string();
    let points = source.points();

    Plot::new("striptool_plot")
        .legend(Legend::default())
        .x_axis_label("time")
        .y_axis_label(source.y_label().to_string())
        .x_axis_formatter(|mark, _range| format_time_tick(mark.value))
        .show(ui, |plot_ui| {
            plot_ui.line(Line::new(line_name, PlotPoints::from(points)).width(2.0));
        });

    changed
}
