//! Core data types for pvvis
//!
//! This module contains the fundamental data structures used throughout
//! the crate for describing process variables and their payloads.
//!
//! # Main Types
//!
//! - [`ScalarVariable`] - Metadata for a scalar PV (name, optional units)
//! - [`ImageVariable`] - Metadata for an image PV (name, axis labels/units, extents)
//! - [`ImageExtents`] - Origin and size positioning a raster in axis coordinates
//! - [`ImageGrid`] - A row-major 2D grid of numeric pixel values
//!
//! # Orientation
//!
//! Image payloads arrive row-major with the origin at the top-left. Plots
//! draw rasters with the origin at the bottom-left. [`orient_for_display`]
//! is the one place where a grid is converted between the two conventions;
//! it must be applied exactly once per fetched payload. Applying it twice
//! (or not at all) mirrors/rotates the displayed image.

use serde::{Deserialize, Serialize};

/// Metadata for a scalar process variable
///
/// Immutable once constructed; owned by the monitor that wraps it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScalarVariable {
    /// Process variable name
    pub name: String,
    /// Engineering units for display (e.g., "mA", "GeV")
    #[serde(default)]
    pub units: Option<String>,
}

impl ScalarVariable {
    /// Create a new scalar variable with no units
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            units: None,
        }
    }

    /// Set the engineering units
    pub fn with_units(mut self, units: impl Into<String>) -> Self {
        self.units = Some(units.into());
        self
    }
}

/// Origin and size of a raster in axis coordinates
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ImageExtents {
    /// X coordinate of the lower-left corner
    pub x: f64,
    /// Y coordinate of the lower-left corner
    pub y: f64,
    /// Width along the x axis
    pub dw: f64,
    /// Height along the y axis
    pub dh: f64,
}

impl ImageExtents {
    pub fn new(x: f64, y: f64, dw: f64, dh: f64) -> Self {
        Self { x, y, dw, dh }
    }
}

/// Metadata for an image process variable
///
/// Immutable once constructed; owned by the monitor that wraps it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageVariable {
    /// Process variable name
    pub name: String,
    /// Labels for the geometric (x, y) axes
    pub axis_labels: (String, String),
    /// Units for the geometric (x, y) axes
    #[serde(default)]
    pub axis_units: Option<(String, String)>,
    /// Position and size of the raster in axis coordinates
    pub extents: ImageExtents,
}

impl ImageVariable {
    /// Create a new image variable with no axis units
    pub fn new(
        name: impl Into<String>,
        axis_labels: (impl Into<String>, impl Into<String>),
        extents: ImageExtents,
    ) -> Self {
        Self {
            name: name.into(),
            axis_labels: (axis_labels.0.into(), axis_labels.1.into()),
            axis_units: None,
            extents,
        }
    }

    /// Set the axis units
    pub fn with_axis_units(
        mut self,
        units: (impl Into<String>, impl Into<String>),
    ) -> Self {
        self.axis_units = Some((units.0.into(), units.1.into()));
        self
    }
}

/// A row-major 2D grid of numeric pixel values
///
/// `width` is the number of columns, `height` the number of rows, and
/// `data.len() == width * height` always holds for a constructed grid.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageGrid {
    width: usize,
    height: usize,
    data: Vec<f64>,
}

impl ImageGrid {
    /// Create a grid, checking that the buffer matches the declared shape
    pub fn new(width: usize, height: usize, data: Vec<f64>) -> Option<Self> {
        if width == 0 || height == 0 || data.len() != width * height {
            return None;
        }
        Some(Self {
            width,
            height,
            data,
        })
    }

    /// An empty placeholder grid (no rows, no columns)
    pub fn empty() -> Self {
        Self {
            width: 0,
            height: 0,
            data: Vec::new(),
        }
    }

    /// Number of columns
    pub fn width(&self) -> usize {
        self.width
    }

    /// Number of rows
    pub fn height(&self) -> usize {
        self.height
    }

    /// True for the [`ImageGrid::empty`] placeholder
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Value at (row, col)
    ///
    /// Panics if out of bounds, like slice indexing.
    pub fn get(&self, row: usize, col: usize) -> f64 {
        self.data[row * self.width + col]
    }

    /// Raw row-major buffer
    pub fn data(&self) -> &[f64] {
        &self.data
    }

    /// Minimum and maximum finite values, or None for an empty grid
    pub fn value_range(&self) -> Option<(f64, f64)> {
        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;
        for &v in &self.data {
            if v.is_finite() {
                min = min.min(v);
                max = max.max(v);
            }
        }
        if min <= max {
            Some((min, max))
        } else {
            None
        }
    }
}

/// Reorient a source-convention grid for display
///
/// Transposes the grid and then flips it vertically, turning a row-major
/// top-left-origin payload into the row-major bottom-up layout the plot
/// expects. Must be applied exactly once per fetched payload; see the
/// module docs.
pub fn orient_for_display(grid: &ImageGrid) -> ImageGrid {
    let (w, h) = (grid.width, grid.height);
    let mut data = Vec::with_capacity(w * h);
    // The output has `w` rows of `h` columns: out[r][c] = in[c][w - 1 - r].
    for row in 0..w {
        for col in 0..h {
            data.push(grid.get(col, w - 1 - row));
        }
    }
    ImageGrid {
        width: h,
        height: w,
        data,
    }
}

/// Format an axis label from a variable name and optional units
///
/// The units suffix `" (<units>)"` is appended only when units are present
/// and non-empty.
pub fn axis_label(name: &str, units: Option<&str>) -> String {
    match units {
        Some(u) if !u.is_empty() => format!("{name} ({u})"),
        _ => name.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_shape_checked() {
        assert!(ImageGrid::new(3, 2, vec![0.0; 6]).is_some());
        assert!(ImageGrid::new(3, 2, vec![0.0; 5]).is_none());
        assert!(ImageGrid::new(0, 2, vec![]).is_none());
    }

    #[test]
    fn test_grid_indexing() {
        let grid = ImageGrid::new(3, 2, vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0]).unwrap();
        assert_eq!(grid.get(0, 0), 1.0);
        assert_eq!(grid.get(0, 2), 3.0);
        assert_eq!(grid.get(1, 0), 4.0);
        assert_eq!(grid.get(1, 2), 6.0);
    }

    #[test]
    fn test_orient_pins_expected_layout() {
        // 2 rows x 3 cols:
        //   a b c      ->  transpose ->  a d   ->  flip  ->  c f
        //   d e f                        b e              b e
        //                                c f              a d
        let grid = ImageGrid::new(3, 2, vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0]).unwrap();
        let oriented = orient_for_display(&grid);
        assert_eq!(oriented.width(), 2);
        assert_eq!(oriented.height(), 3);
        assert_eq!(oriented.data(), &[3.0, 6.0, 2.0, 5.0, 1.0, 4.0]);
    }

    #[test]
    fn test_orient_twice_is_not_identity() {
        let grid = ImageGrid::new(3, 2, vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0]).unwrap();
        let once = orient_for_display(&grid);
        let twice = orient_for_display(&once);
        // Double application is a distinct (incorrect) orientation, not a
        // round-trip back to the original.
        assert_ne!(twice, grid);
        assert_ne!(twice, once);
    }

    #[test]
    fn test_value_range_skips_non_finite() {
        let grid = ImageGrid::new(2, 2, vec![1.0, f64::NAN, 3.0, -2.0]).unwrap();
        assert_eq!(grid.value_range(), Some((-2.0, 3.0)));
        assert_eq!(ImageGrid::empty().value_range(), None);
    }

    #[test]
    fn test_axis_label_formatting() {
        assert_eq!(axis_label("beam_current", Some("mA")), "beam_current (mA)");
        assert_eq!(axis_label("beam_energy", None), "beam_energy");
        assert_eq!(axis_label("beam_energy", Some("")), "beam_energy");
    }

    #[test]
    fn test_variable_builders() {
        let scalar = ScalarVariable::new("beam_current").with_units("mA");
        assert_eq!(scalar.units.as_deref(), Some("mA"));

        let image = ImageVariable::new(
            "profile",
            ("x", "y"),
            ImageExtents::new(0.0, 0.0, 0.01, 0.01),
        )
        .with_axis_units(("mm", "mm"));
        assert_eq!(image.axis_labels.0, "x");
        assert_eq!(image.axis_units.as_ref().unwrap().1, "mm");
    }
}
