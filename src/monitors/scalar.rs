//! Scalar monitor: one variable, accumulated time series
//!
//! The monitor keeps the full history so widgets can stay stateless with
//! respect to accumulation; bounding the rendered window is a
//! presentation-layer concern applied by the widget, never here.

use crate::controller::SharedController;
use crate::error::Result;
use crate::monitors::now_seconds;
use crate::types::ScalarVariable;

/// Wraps a scalar variable and accumulates `(timestamp, value)` history
///
/// History is append-only and unbounded; only an explicit [`reset`]
/// clears it.
///
/// [`reset`]: ScalarMonitor::reset
pub struct ScalarMonitor {
    variable: ScalarVariable,
    controller: SharedController,
    timestamps: Vec<f64>,
    values: Vec<f64>,
}

impl ScalarMonitor {
    pub fn new(variable: ScalarVariable, controller: SharedController) -> Self {
        Self {
            variable,
            controller,
            timestamps: Vec::new(),
            values: Vec::new(),
        }
    }

    /// The wrapped variable's metadata
    pub fn variable(&self) -> &ScalarVariable {
        &self.variable
    }

    /// Engineering units, fixed at construction
    pub fn units(&self) -> Option<&str> {
        self.variable.units.as_deref()
    }

    /// Fetch the current value, append it, and return the full history
    ///
    /// Returns the entire accumulated series as parallel `(timestamps,
    /// values)` slices. A failed fetch propagates without touching the
    /// history.
    pub fn poll(&mut self) -> Result<(&[f64], &[f64])> {
        let value = self.controller.borrow_mut().get_value(&self.variable.name)?;

        // Wall clocks may step backwards; history stays ordered regardless.
        let mut now = now_seconds();
        if let Some(&last) = self.timestamps.last() {
            now = now.max(last);
        }

        self.timestamps.push(now);
        self.values.push(value);
        Ok((&self.timestamps, &self.values))
    }

    /// Clear all accumulated history
    ///
    /// Idempotent; the next poll starts a fresh series.
    pub fn reset(&mut self) {
        self.timestamps.clear();
        self.values.clear();
    }

    /// The accumulated history without polling
    pub fn history(&self) -> (&[f64], &[f64]) {
        (&self.timestamps, &self.values)
    }

    /// Number of accumulated samples
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controller::{shared, MockController, SimulatedController};
    use crate::error::PvVisError;

    fn monitor_with_mock(mock: MockController) -> ScalarMonitor {
        ScalarMonitor::new(ScalarVariable::new("beam_current"), shared(mock))
    }

    #[test]
    fn test_poll_appends_and_returns_full_history() {
        let mut mock = MockController::new();
        let mut next = 0.0;
        mock.expect_get_value().times(3).returning(move |_| {
            next += 1.0;
            Ok(next)
        });

        let mut monitor = monitor_with_mock(mock);
        {
            let (ts, ys) = monitor.poll().unwrap();
            assert_eq!(ts.len(), 1);
            assert_eq!(ys, &[1.0]);
        }
        monitor.poll().unwrap();
        let (ts, ys) = monitor.poll().unwrap();
        assert_eq!(ts.len(), 3);
        assert_eq!(ys, &[1.0, 2.0, 3.0]);
        assert!(ts.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn test_fetch_error_propagates_without_append() {
        let mut mock = MockController::new();
        let mut calls = 0;
        mock.expect_get_value().times(2).returning(move |name| {
            calls += 1;
            if calls == 1 {
                Err(PvVisError::fetch(name, "disconnected"))
            } else {
                Ok(7.0)
            }
        });

        let mut monitor = monitor_with_mock(mock);
        assert!(matches!(monitor.poll(), Err(PvVisError::Fetch { .. })));
        assert!(monitor.is_empty());

        let (_, ys) = monitor.poll().unwrap();
        assert_eq!(ys, &[7.0]);
    }

    #[test]
    fn test_reset_then_poll_keeps_only_newest() {
        let mut mock = MockController::new();
        mock.expect_get_value().returning(|_| Ok(1.0));

        let mut monitor = monitor_with_mock(mock);
        monitor.poll().unwrap();
        monitor.poll().unwrap();
        monitor.reset();
        assert!(monitor.is_empty());
        // Idempotent.
        monitor.reset();

        let (ts, ys) = monitor.poll().unwrap();
        assert_eq!(ts.len(), 1);
        assert_eq!(ys, &[1.0]);
    }

    #[test]
    fn test_units_fixed_at_construction() {
        let mock = MockController::new();
        let monitor = ScalarMonitor::new(
            ScalarVariable::new("beam_current").with_units("mA"),
            shared(mock),
        );
        assert_eq!(monitor.units(), Some("mA"));
    }

    // Property-based tests using proptest
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn test_history_grows_one_per_poll(
            values in prop::collection::vec(-1e9f64..1e9, 1..50)
        ) {
            let mut sim = SimulatedController::new();
            for &v in &values {
                sim.push_scalar("x", v);
            }

            let mut monitor = ScalarMonitor::new(ScalarVariable::new("x"), shared(sim));
            for (i, &expected) in values.iter().enumerate() {
                let (ts, ys) = monitor.poll().unwrap();
                prop_assert_eq!(ts.len(), i + 1);
                prop_assert_eq!(ys[i], expected);
                prop_assert!(ts.windows(2).all(|w| w[0] <= w[1]));
            }
        }
    }
}
