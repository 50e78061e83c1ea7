//! Image plot widget: 2D raster display over image monitors
//!
//! No time dimension here; the live variable selects which
//! [`ImageMonitor`] is polled, and every successful update replaces the
//! whole [`ImageSource`] at once. Color rendering must be decided at
//! construction: a palette or a color mapper, never neither.

use crate::colormap::{ColorSpec, LinearColorMapper, Palette};
use crate::controller::SharedController;
use crate::error::{PvVisError, Result};
use crate::monitors::ImageMonitor;
use crate::types::{axis_label, ImageVariable};
use crate::widgets::ImageSource;
use std::collections::HashMap;
use std::rc::Rc;

/// Drives one raster plot over a set of image variables
pub struct ImagePlot {
    monitors: HashMap<String, ImageMonitor>,
    order: Vec<String>,
    live_variable: String,
    color: ColorSpec,
    source: ImageSource,
}

impl std::fmt::Debug for ImagePlot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // The controller trait object behind each monitor is not `Debug`,
        // so list the monitor keys rather than the monitors themselves.
        f.debug_struct("ImagePlot")
            .field("monitors", &self.order)
            .field("order", &self.order)
            .field("live_variable", &self.live_variable)
            .field("color", &self.color)
            .field("source", &self.source)
            .finish()
    }
}

impl ImagePlot {
    /// Set up monitors, the live variable, and the data source
    ///
    /// Exactly like the striptool, the first declared variable starts
    /// live. Construction fails fast when neither `palette` nor
    /// `color_mapper` is supplied, since color rendering would otherwise be
    /// ambiguous and the problem would only surface at first draw.
    pub fn new(
        variables: Vec<ImageVariable>,
        controller: SharedController,
        palette: Option<Palette>,
        color_mapper: Option<LinearColorMapper>,
    ) -> Result<Self> {
        if variables.is_empty() {
            return Err(PvVisError::Config(
                "image plot requires at least one variable".to_string(),
            ));
        }
        let color = ColorSpec::resolve(palette, color_mapper)?;

        let mut monitors = HashMap::new();
        let mut order = Vec::new();
        for variable in variables {
            let name = variable.name.clone();
            if monitors
                .insert(
                    name.clone(),
                    ImageMonitor::new(variable, Rc::clone(&controller)),
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
            color,
            source: ImageSource::default(),
        })
    }

    /// Switch the live variable without polling
    pub fn select(&mut self, name: &str) -> Result<()> {
        if !self.monitors.contains_key(name) {
            return Err(PvVisError::InvalidSelection {
                name: name.to_string(),
            });
        }
        self.live_variable = name.to_string();
        Ok(())
    }

    /// Poll the live variable and replace the raster source
    ///
    /// An explicit `live_variable` switches first (validated like
    /// [`select`]), then the active monitor is polled. The source is only
    /// touched once the full fetch-and-orient pipeline has succeeded, and
    /// then atomically: pixels, placement, and axis labels together.
    ///
    /// [`select`]: ImagePlot::select
    pub fn update(&mut self, live_variable: Option<&str>) -> Result<()> {
        if let Some(name) = live_variable {
            self.select(name)?;
        }

        let monitor = self
            .monitors
            .get_mut(&self.live_variable)
            .ok_or_else(|| PvVisError::InvalidSelection {
                name: self.live_variable.clone(),
            })?;

        let units = monitor.axis_units();
        let (x_axis, y_axis) = monitor.axis_labels();
        let x_label = axis_label(x_axis, units.map(|u| u.0));
        let y_label = axis_label(y_axis, units.map(|u| u.1));

        let frame = monitor.poll()?;
        self.source.replace(frame, x_label, y_label);
        Ok(())
    }

    /// Name of the variable currently displayed
    pub fn live_variable(&self) -> &str {
        &self.live_variable
    }

    /// Registered variable names in declaration order, for selector UIs
    pub fn variable_names(&self) -> &[String] {
        &self.order
    }

    /// The resolved coloring choice
    pub fn color(&self) -> &ColorSpec {
        &self.color
    }

    /// The data source the plot reads
    pub fn source(&self) -> &ImageSource {
        &self.source
    }

    /// Read access to a variable's monitor
    pub fn monitor(&self, name: &str) -> Option<&ImageMonitor> {
        self.monitors.get(name)
    }
}
