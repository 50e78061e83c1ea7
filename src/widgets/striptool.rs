//! Striptool widget: rolling time-series display over scalar monitors
//!
//! Owns one [`ScalarMonitor`] per registered variable and a
//! [`SeriesSource`] that a plot reads. Exactly one variable is live at a
//! time; `update()` polls it and republishes the (window-bounded) series.
//! The bound applies only to the rendered view; the monitor underneath
//! keeps its full history.

use crate::controller::SharedController;
use crate::error::{PvVisError, Result};
use crate::monitors::ScalarMonitor;
use crate::types::{axis_label, ScalarVariable};
use crate::widgets::SeriesSource;
use std::collections::HashMap;
use std::rc::Rc;

/// Drives one time-series plot over a set of scalar variables
pub struct Striptool {
    monitors: HashMap<String, ScalarMonitor>,
    order: Vec<String>,
    live_variable: String,
    limit: Option<usize>,
    source: SeriesSource,
}

impl Striptool {
    /// Set up monitors, the live variable, and the data source
    ///
    /// The first declared variable starts live. `limit`, when given,
    /// bounds the rendered window to the most recent samples and must be
    /// positive.
    pub fn new(
        variables: Vec<ScalarVariable>,
        controller: SharedController,
        limit: Option<usize>,
    ) -> Result<Self> {
        if variables.is_empty() {
            return Err(PvVisError::Config(
                "striptool requires at least one variable".to_string(),
            ));
        }
        if limit == Some(0) {
            return Err(PvVisError::Config(
                "striptool limit must be a positive integer".to_string(),
            ));
        }

        let mut monitors = HashMap::new();
        let mut order = Vec::new();
        for variable in variables {
            let name = variable.name.clone();
            if monitors
                .insert(
                    name.clone(),
                    ScalarMonitor::new(variable, Rc::clone(&controller)),
                )
                .is_some()
            {
                return Err(PvVisError::Config(format!(
                    "duplicate variable name: {name}"
                )));
            }
            order.push(name);
        }

        let live_variable = order[0].clone();
        Ok(Self {
            monitors,
            order,
            live_variable,
            limit,
            source: SeriesSource::default(),
        })
    }

    /// Switch the live variable
    ///
    /// Unknown names are rejected and leave the current selection
    /// untouched; a selector UI should never offer one, but the core
    /// still validates.
    pub fn select(&mut self, name: &str) -> Result<()> {
        if !self.monitors.contains_key(name) {
            return Err(PvVisError::InvalidSelection {
                name: name.to_string(),
            });
        }
        self.live_variable = name.to_string();
        Ok(())
    }

    /// Poll the live variable and republish its series
    ///
    /// The rendered window is the exact tail of the most recent `limit`
    /// samples, not a decimation. On error the previous source contents
    /// stay in place.
    pub fn update(&mut self) -> Result<()> {
        let limit = self.limit;
        let monitor = self
            .monitors
            .get_mut(&self.live_variable)
            .ok_or_else(|| PvVisError::InvalidSelection {
                name: self.live_variable.clone(),
            })?;

        let label = axis_label(&monitor.variable().name, monitor.units());
        let (ts, ys) = monitor.poll()?;
        let start = limit.map_or(0, |k| ts.len().saturating_sub(k));
        self.source.replace(&ts[start..], &ys[start..], label);
        Ok(())
    }

    /// Clear the live variable's accumulated history
    ///
    /// Other monitors keep theirs; the next `update()` starts the live
    /// series over from the freshly polled sample.
    pub fn reset_active(&mut self) {
        if let Some(monitor) = self.monitors.get_mut(&self.live_variable) {
            monitor.reset();
        }
    }

    /// Name of the variable currently displayed
    pub fn live_variable(&self) -> &str {
        &self.live_variable
    }

    /// Registered variable names in declaration order, for selector UIs
    pub fn variable_names(&self) -> &[String] {
        &self.order
    }

    /// The configured render window bound, if any
    pub fn limit(&self) -> Option<usize> {
        self.limit
    }

    /// The data source the plot reads
    pub fn source(&self) -> &SeriesSource {
        &self.source
    }

    /// Read access to a variable's monitor
    pub fn monitor(&self, name: &str) -> Option<&ScalarMonitor> {
        self.monitors.get(name)
    }
}
