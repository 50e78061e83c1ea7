//! Plot-facing widgets and their render data sources
//!
//! A widget owns monitors for a set of variables, tracks which one is
//! live, and synchronizes its render source on every update tick. The
//! host event loop drives `update()`; selector and reset controls mutate
//! widget state and take effect on the next poll.

pub mod image_plot;
pub mod source;
pub mod striptool;

pub use image_plot::ImagePlot;
pub use source::{ImageSource, SeriesSource};
pub use striptool::Striptool;
