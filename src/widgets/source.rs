//! Render data sources consumed by the plotting layer
//!
//! A source is the mutable container a plot reads to draw the current
//! frame. Widgets replace its contents on every successful update; a
//! failed update leaves the previous contents in place, so the plot never
//! shows a partial frame.

use crate::monitors::ImageFrame;
use crate::types::ImageGrid;

/// Data source backing a time-series plot: parallel `x`/`y` columns
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SeriesSource {
    x: Vec<f64>,
    y: Vec<f64>,
    y_label: String,
}

impl SeriesSource {
    /// Replace the series and its axis label in one step
    pub fn replace(&mut self, x: &[f64], y: &[f64], y_label: String) {
        self.x.clear();
        self.x.extend_from_slice(x);
        self.y.clear();
        self.y.extend_from_slice(y);
        self.y_label = y_label;
    }

    pub fn x(&self) -> &[f64] {
        &self.x
    }

    pub fn y(&self) -> &[f64] {
        &self.y
    }

    pub fn y_label(&self) -> &str {
        &self.y_label
    }

    pub fn len(&self) -> usize {
        self.y.len()
    }

    pub fn is_empty(&self) -> bool {
        self.y.is_empty()
    }

    /// Points in the `[x, y]` form the plotting layer consumes
    pub fn points(&self) -> Vec<[f64; 2]> {
        self.x
            .iter()
            .zip(&self.y)
            .map(|(&x, &y)| [x, y])
            .collect()
    }
}

/// Data source backing a raster plot
///
/// Always replaced as a whole: pixels, placement, and axis labels move
/// together so the plot can never show a new image against stale
/// geometry (or the reverse).
#[derive(Debug, Clone, PartialEq)]
pub struct ImageSource {
    image: ImageGrid,
    x: f64,
    y: f64,
    dw: f64,
    dh: f64,
    x_label: String,
    y_label: String,
}

impl Default for ImageSource {
    fn default() -> Self {
        Self {
            image: ImageGrid::empty(),
            x: 0.0,
            y: 0.0,
            dw: 0.0,
            dh: 0.0,
            x_label: String::new(),
            y_label: String::new(),
        }
    }
}

impl ImageSource {
    /// Atomically replace the frame and its axis labels
    pub fn replace(&mut self, frame: ImageFrame, x_label: String, y_label: String) {
        self.image = frame.image;
        self.x = frame.x;
        self.y = frame.y;
        self.dw = frame.dw;
        self.dh = frame.dh;
        self.x_label = x_label;
        self.y_label = y_label;
    }

    pub fn image(&self) -> &ImageGrid {
        &self.image
    }

    /// Lower-left corner and size in axis coordinates
    pub fn extents(&self) -> (f64, f64, f64, f64) {
        (self.x, self.y, self.dw, self.dh)
    }

    pub fn x_label(&self) -> &str {
        &self.x_label
    }

    pub fn y_label(&self) -> &str {
        &self.y_label
    }

    /// True until the first successful update lands a frame
    pub fn is_empty(&self) -> bool {
        self.image.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_series_replace() {
        let mut source = SeriesSource::default();
        source.replace(&[1.0, 2.0], &[10.0, 20.0], "beam_current (mA)".to_string());
        assert_eq!(source.points(), vec![[1.0, 10.0], [2.0, 20.0]]);
        assert_eq!(source.y_label(), "beam_current (mA)");

        // A later replace fully supersedes the previous contents.
        source.replace(&[3.0], &[30.0], "beam_energy".to_string());
        assert_eq!(source.len(), 1);
        assert_eq!(source.points(), vec![[3.0, 30.0]]);
    }

    #[test]
    fn test_image_source_starts_empty() {
        let source = ImageSource::default();
        assert!(source.is_empty());
        assert_eq!(source.extents(), (0.0, 0.0, 0.0, 0.0));
    }

    #[test]
    fn test_image_replace_is_whole_frame() {
        let mut source = ImageSource::default();
        let frame = ImageFrame {
            image: ImageGrid::new(2, 2, vec![1.0, 2.0, 3.0, 4.0]).unwrap(),
            x: -1.0,
            y: 0.5,
            dw: 2.0,
            dh: 1.0,
        };
        source.replace(frame, "x (mm)".to_string(), "y (mm)".to_string());
        assert!(!source.is_empty());
        assert_eq!(source.extents(), (-1.0, 0.5, 2.0, 1.0));
        assert_eq!(source.x_label(), "x (mm)");
        assert_eq!(source.image().get(1, 0), 3.0);
    }
}
