//! Frontend module for the egui UI
//!
//! This module renders widget data sources with eframe/egui. The panes
//! read the sources maintained by the core widgets; all polling happens
//! in the app shell's tick, never during painting.

pub mod app;
pub mod image_pane;
pub mod striptool_pane;

pub use app::VisApp;
