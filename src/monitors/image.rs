//! Image monitor: stateless snapshot polling with reorientation
//!
//! Unlike the scalar monitor there is no history; each poll is an
//! independent snapshot of the current raster. The monitor is also the
//! single place where [`orient_for_display`] is applied; widgets and
//! rendering code must consume the returned frame as-is, or the displayed
//! image ends up mirrored.

use crate::controller::SharedController;
use crate::error::{PvVisError, Result};
use crate::types::{orient_for_display, ImageGrid, ImageVariable};

/// A render-ready raster bundled with its spatial placement
///
/// The grid is already in the plot's coordinate convention (row-major,
/// bottom-up). `x`/`y` locate the lower-left corner in axis coordinates,
/// `dw`/`dh` its size. The whole frame is always handed to the render
/// source together so the image can never pair with stale geometry.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageFrame {
    pub image: ImageGrid,
    pub x: f64,
    pub y: f64,
    pub dw: f64,
    pub dh: f64,
}

/// Wraps an image variable; stateless beyond the variable metadata
pub struct ImageMonitor {
    variable: ImageVariable,
    controller: SharedController,
}

impl ImageMonitor {
    pub fn new(variable: ImageVariable, controller: SharedController) -> Self {
        Self {
            variable,
            controller,
        }
    }

    /// The wrapped variable's metadata
    pub fn variable(&self) -> &ImageVariable {
        &self.variable
    }

    /// Labels for the geometric (x, y) axes, fixed at construction
    pub fn axis_labels(&self) -> (&str, &str) {
        (&self.variable.axis_labels.0, &self.variable.axis_labels.1)
    }

    /// Units for the geometric (x, y) axes, fixed at construction
    pub fn axis_units(&self) -> Option<(&str, &str)> {
        self.variable
            .axis_units
            .as_ref()
            .map(|(x, y)| (x.as_str(), y.as_str()))
    }

    /// Fetch the current payload and return a display-oriented frame
    ///
    /// Validates the payload shape before any transformation; a buffer
    /// that does not match its declared dimensions is surfaced as
    /// [`PvVisError::MalformedPayload`] rather than guessed at.
    pub fn poll(&mut self) -> Result<ImageFrame> {
        let payload = self.controller.borrow_mut().get_image(&self.variable.name)?;

        let expected = payload.width * payload.height;
        let actual = payload.data.len();
        let grid = ImageGrid::new(payload.width, payload.height, payload.data).ok_or_else(
            || PvVisError::MalformedPayload {
                name: self.variable.name.clone(),
                expected,
                actual,
            },
        )?;

        let image = orient_for_display(&grid);
        let e = self.variable.extents;
        Ok(ImageFrame {
            image,
            x: e.x,
            y: e.y,
            dw: e.dw,
            dh: e.dh,
        })
    }
}
