//! Image pane - variable selector and colormapped raster plot
//!
//! The raster is uploaded as an egui texture shaded through the widget's
//! color choice and positioned in axis coordinates from the frame
//! extents, so zoom and cursor readout work in physical units.

use crate::widgets::ImagePlot;
use egui::Ui;
use egui_plot::{Plot, PlotImage, PlotPoint};

/// Render the image pane
///
/// Returns the newly selected variable name when the user switched, so
/// the app shell can persist the selection. The switch takes effect on
/// the next update tick.
pub fn render(
    image_plot: &mut ImagePlot,
    texture: &mut Option<egui::TextureHandle>,
    ui: &mut Ui,
) -> Option<String> {
    let mut changed = None;

    if image_plot.variable_names().len() > 1 {
        ui.horizontal(|ui| {
            let mut selected = image_plot.live_variable().to_string();
            egui::ComboBox::from_id_salt("image_pane_variable_selector")
                .selected_text(selected.clone())
                .show_ui(ui, |ui| {
                    for name in image_plot.variable_names() {
                        ui.selectable_value(&mut selected, name.clone(), name.as_str());
                    }
                });

            if selected != image_plot.live_variable() {
                match image_plot.select(&selected) {
                    Ok(()) => changed = Some(selected),
                    Err(e) => tracing::warn!("selection rejected: {}", e),
                }
            }
        });
    }

    let source = image_plot.source();
    if source.is_empty() {
        ui.label("Waiting for image data...");
        return changed;
    }

    let image = source.image();
    let (w, h) = (image.width(), image.height());
    let colors = image_plot.color().shade(image);

    // Texture rows run top-down while the source grid is bottom-up; write
    // rows in reverse so the raster lands upright. This is a sink
    // convention fixup, not a second orientation pass.
    let mut rgba = Vec::with_capacity(w * h * 4);
    for row in (0..h).rev() {
        for color in &colors[row * w..(row + 1) * w] {
            rgba.extend_from_slice(&color.to_array());
        }
    }
    let color_image = egui::ColorImage::from_rgba_unmultiplied([w, h], &rgba);

    if let Some(handle) = texture.as_mut() {
        handle.set(color_image, egui::TextureOptions::NEAREST);
    } else {
        *texture = Some(ui.ctx().load_texture(
            "image_pane_raster",
            color_image,
            egui::TextureOptions::NEAREST,
        ));
    }
    let Some(handle) = texture.as_ref() else {
        return changed;
    };
    let texture_id = handle.id();

    let (x, y, dw, dh) = source.extents();
    Plot::new("image_plot")
        .x_axis_label(source.x_label().to_string())
        .y_axis_label(source.y_label().to_string())
        .show(ui, |plot_ui| {
            plot_ui.image(PlotImage::new(
                "image_pane_raster",
                texture_id,
                PlotPoint::new(x + dw / 2.0, y + dh / 2.0),
                [dw as f32, dh as f32],
            ));
        });

    changed
}
