//! Controller trait for unified process variable access
//!
//! This module provides a common trait for transport clients, hiding
//! whether the underlying wire protocol is Channel Access or pvAccess.
//! The visualization core only ever pulls current values through this
//! interface; it never concerns itself with connection management or
//! protocol encoding.

pub mod sim;

pub use sim::SimulatedController;

use crate::error::Result;
use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

/// Size of the rolling window for recent fetch times
const RECENT_WINDOW_SIZE: usize = 100;

/// A raw image payload as it comes off the wire
///
/// The pixel buffer is row-major in the source convention (origin
/// top-left); reorientation for display happens in the image monitor, not
/// here. Spatial extents are static variable metadata and do not travel
/// with the payload.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageValue {
    /// Number of pixel columns
    pub width: usize,
    /// Number of pixel rows
    pub height: usize,
    /// Row-major pixel values; expected length `width * height`
    pub data: Vec<f64>,
}

impl ImageValue {
    pub fn new(width: usize, height: usize, data: Vec<f64>) -> Self {
        Self {
            width,
            height,
            data,
        }
    }
}

/// Statistics for controller fetch operations
///
/// Tracks success rates and timing for value fetches.
#[derive(Debug, Clone)]
pub struct ControllerStats {
    /// Total number of successful fetches
    pub successful_fetches: u64,
    /// Total number of failed fetches
    pub failed_fetches: u64,
    /// Total fetch time in microseconds
    pub total_fetch_time_us: u64,
    /// Last fetch time in microseconds
    pub last_fetch_time_us: u64,
    /// Rolling window of recent fetch times for jitter calculation
    pub recent_fetch_times: VecDeque<u64>,
}

impl Default for ControllerStats {
    fn default() -> Self {
        Self {
            successful_fetches: 0,
            failed_fetches: 0,
            total_fetch_time_us: 0,
            last_fetch_time_us: 0,
            recent_fetch_times: VecDeque::with_capacity(RECENT_WINDOW_SIZE),
        }
    }
}

impl ControllerStats {
    /// Calculate average fetch time in microseconds
    pub fn avg_fetch_time_us(&self) -> f64 {
        if self.successful_fetches == 0 {
            0.0
        } else {
            self.total_fetch_time_us as f64 / self.successful_fetches as f64
        }
    }

    /// Calculate success rate as percentage
    pub fn success_rate(&self) -> f64 {
        let total = self.successful_fetches + self.failed_fetches;
        if total == 0 {
            100.0
        } else {
            (self.successful_fetches as f64 / total as f64) * 100.0
        }
    }

    /// Record a successful fetch
    pub fn record_success(&mut self, time_us: u64) {
        self.successful_fetches += 1;
        self.total_fetch_time_us += time_us;
        self.last_fetch_time_us = time_us;

        self.recent_fetch_times.push_back(time_us);
        if self.recent_fetch_times.len() > RECENT_WINDOW_SIZE {
            self.recent_fetch_times.pop_front();
        }
    }

    /// Record a failed fetch
    pub fn record_failure(&mut self) {
        self.failed_fetches += 1;
    }

    /// Calculate jitter (max - min) over recent window in microseconds
    pub fn jitter_us(&self) -> u64 {
        if self.recent_fetch_times.is_empty() {
            return 0;
        }
        let min = self.recent_fetch_times.iter().min().copied().unwrap_or(0);
        let max = self.recent_fetch_times.iter().max().copied().unwrap_or(0);
        max.saturating_sub(min)
    }

    /// Reset all statistics
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Unified interface for process variable access
///
/// Implementations exist per transport (Channel Access, pvAccess, or a
/// simulated source); the visualization core depends only on this trait.
/// All access is sequential: monitors share one controller instance in a
/// single-threaded cooperative loop, so implementations are not required
/// to support concurrent calls.
///
/// # Example
///
/// ```ignore
/// fn read_all(controller: &mut dyn Controller, names: &[&str]) -> Vec<Result<f64>> {
///     names.iter().map(|n| controller.get_value(n)).collect()
/// }
/// ```
#[cfg_attr(test, mockall::automock)]
pub trait Controller {
    /// Fetch the current value of a scalar process variable
    fn get_value(&mut self, name: &str) -> Result<f64>;

    /// Fetch the current payload of an image process variable
    fn get_image(&mut self, name: &str) -> Result<ImageValue>;

    /// Assign the value of a scalar process variable
    ///
    /// Part of the controller contract but unused by the visualization
    /// core, which only ever reads.
    fn put_value(&mut self, name: &str, value: f64) -> Result<()>;

    /// Snapshot of fetch statistics for this controller
    fn stats(&self) -> ControllerStats {
        ControllerStats::default()
    }
}

/// A controller shared across the monitors of a process
///
/// The controller outlives the monitors that borrow it and is reused
/// sequentially; the core is single-threaded, so no locking is involved.
pub type SharedController = Rc<RefCell<dyn Controller>>;

/// Wrap a controller for sharing across monitors
pub fn shared(controller: impl Controller + 'static) -> SharedController {
    Rc::new(RefCell::new(controller))
}
