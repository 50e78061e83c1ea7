//! Monitors turning "current PV value" into render-ready data
//!
//! A monitor wraps one variable and a shared [`Controller`] handle. Each
//! poll pulls the current value through the controller and transforms it
//! for display: [`ScalarMonitor`] accumulates an append-only time series,
//! [`ImageMonitor`] reorients the latest raster. Monitors never retry a
//! failed fetch; errors propagate to the caller, which typically just
//! polls again on the next tick.
//!
//! [`Controller`]: crate::controller::Controller

pub mod image;
pub mod scalar;

pub use image::{ImageFrame, ImageMonitor};
pub use scalar::ScalarMonitor;

/// Wall-clock timestamp in seconds since the Unix epoch
pub(crate) fn now_seconds() -> f64 {
    chrono::Utc::now().timestamp_millis() as f64 / 1000.0
}
