//! # pvvis-rs: live process variable viewer
//!
//! A real-time visualization tool for control-system process variables
//! (PVs): scalar time series on a striptool and 2D beam images on a
//! raster plot, independent of whether Channel Access or pvAccess carries
//! the values underneath.
//!
//! ## Architecture
//!
//! - **Controller**: transport-agnostic `get`/`put` access to PVs; the
//!   core only ever pulls current values through this trait
//! - **Monitors**: per-variable adapters that turn "current value" into
//!   render-ready data: accumulating history for scalars and reorienting
//!   rasters for images
//! - **Widgets**: striptool and image plot state machines that poll the
//!   live monitor each tick and republish into their render sources
//! - **Frontend**: eframe/egui panes reading those sources, with
//!   egui_plot for drawing
//!
//! Everything is single-threaded and cooperative: the host event loop
//! serializes `update()` ticks, and the only blocking operation is the
//! controller's value fetch.
//!
//! ## Example
//!
//! ```ignore
//! use pvvis_rs::{
//!     config::VisConfig,
//!     controller::{shared, SimulatedController},
//!     widgets::Striptool,
//! };
//! use std::rc::Rc;
//!
//! let config = VisConfig::load("model.yml")?;
//! let controller = shared(SimulatedController::new());
//!
//! let mut striptool = Striptool::new(
//!     config.scalars.clone(),
//!     Rc::clone(&controller),
//!     config.striptool.limit,
//! )?;
//!
//! // Host loop tick:
//! striptool.update()?;
//! let series = striptool.source();
//! ```

pub mod colormap;
pub mod config;
pub mod controller;
pub mod error;
pub mod frontend;
pub mod monitors;
pub mod types;
pub mod widgets;

// Re-export commonly used types
pub use colormap::{ColorSpec, LinearColorMapper, Palette};
pub use config::VisConfig;
pub use controller::{shared, Controller, ImageValue, SharedController, SimulatedController};
pub use error::{PvVisError, Result};
pub use frontend::VisApp;
pub use monitors::{ImageFrame, ImageMonitor, ScalarMonitor};
pub use types::{
    axis_label, orient_for_display, ImageExtents, ImageGrid, ImageVariable, ScalarVariable,
};
pub use widgets::{ImagePlot, ImageSource, SeriesSource, Striptool};
