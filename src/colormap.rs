//! Color palettes and value-to-color mapping for raster rendering
//!
//! An image plot is constructed with either a [`Palette`] (auto-ranged per
//! frame) or a [`LinearColorMapper`] (fixed value range); supplying
//! neither is a configuration error because color rendering would be
//! ambiguous. [`ColorSpec`] is the resolved choice carried by the widget.

use crate::error::{PvVisError, Result};
use crate::types::ImageGrid;
use egui::Color32;

/// Named color gradients for raster shading
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Palette {
    Viridis,
    Inferno,
    Grays,
}

impl Palette {
    /// Look up a palette by its config name
    pub fn by_name(name: &str) -> Result<Self> {
        match name.to_ascii_lowercase().as_str() {
            "viridis" => Ok(Palette::Viridis),
            "inferno" => Ok(Palette::Inferno),
            "grays" | "greys" => Ok(Palette::Grays),
            _ => Err(PvVisError::Config(format!("unknown palette: {name}"))),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Palette::Viridis => "viridis",
            Palette::Inferno => "inferno",
            Palette::Grays => "grays",
        }
    }

    fn anchors(&self) -> &'static [[u8; 3]] {
        match self {
            Palette::Viridis => &[
                [68, 1, 84],
                [71, 44, 122],
                [59, 81, 139],
                [44, 113, 142],
                [33, 144, 141],
                [39, 173, 129],
                [92, 200, 99],
                [170, 220, 50],
                [253, 231, 37],
            ],
            Palette::Inferno => &[
                [0, 0, 4],
                [31, 12, 72],
                [85, 15, 109],
                [136, 34, 106],
                [186, 54, 85],
                [227, 89, 51],
                [249, 140, 10],
                [249, 201, 50],
                [252, 255, 164],
            ],
            Palette::Grays => &[[0, 0, 0], [255, 255, 255]],
        }
    }

    /// Color at normalized position `t` in `[0, 1]`
    ///
    /// Out-of-range input is clamped.
    pub fn color_at(&self, t: f64) -> Color32 {
        let anchors = self.anchors();
        let t = t.clamp(0.0, 1.0);
        let scaled = t * (anchors.len() - 1) as f64;
        let idx = (scaled.floor() as usize).min(anchors.len() - 2);
        let frac = scaled - idx as f64;

        let lo = anchors[idx];
        let hi = anchors[idx + 1];
        let lerp = |a: u8, b: u8| (a as f64 + (b as f64 - a as f64) * frac).round() as u8;
        Color32::from_rgb(lerp(lo[0], hi[0]), lerp(lo[1], hi[1]), lerp(lo[2], hi[2]))
    }
}

/// Maps a fixed value range onto a palette
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearColorMapper {
    palette: Palette,
    low: f64,
    high: f64,
}

impl LinearColorMapper {
    /// Create a mapper; `low` must be strictly below `high`
    pub fn new(palette: Palette, low: f64, high: f64) -> Result<Self> {
        if !(low.is_finite() && high.is_finite() && low < high) {
            return Err(PvVisError::Config(format!(
                "color mapper range must satisfy low < high, got [{low}, {high}]"
            )));
        }
        Ok(Self { palette, low, high })
    }

    pub fn palette(&self) -> Palette {
        self.palette
    }

    pub fn range(&self) -> (f64, f64) {
        (self.low, self.high)
    }

    /// Color for a raw value; values outside the range saturate
    pub fn color_for(&self, value: f64) -> Color32 {
        if !value.is_finite() {
            return Color32::TRANSPARENT;
        }
        let t = (value - self.low) / (self.high - self.low);
        self.palette.color_at(t)
    }
}

/// The resolved coloring choice of an image plot
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ColorSpec {
    /// Auto-ranged: each frame is normalized to its own min/max
    Palette(Palette),
    /// Fixed range mapping
    Mapper(LinearColorMapper),
}

impl ColorSpec {
    /// Resolve the palette-or-mapper construction rule
    ///
    /// A color mapper wins when both are given (it subsumes the palette);
    /// neither is a hard configuration error, surfaced at construction
    /// time rather than on first draw.
    pub fn resolve(
        palette: Option<Palette>,
        color_mapper: Option<LinearColorMapper>,
    ) -> Result<Self> {
        match (color_mapper, palette) {
            (Some(mapper), _) => Ok(ColorSpec::Mapper(mapper)),
            (None, Some(palette)) => Ok(ColorSpec::Palette(palette)),
            (None, None) => Err(PvVisError::Config(
                "must provide a palette or color mapper for an image plot".to_string(),
            )),
        }
    }

    /// Shade a grid into per-pixel colors, in the grid's row order
    pub fn shade(&self, grid: &ImageGrid) -> Vec<Color32> {
        match self {
            ColorSpec::Mapper(mapper) => {
                grid.data().iter().map(|&v| mapper.color_for(v)).collect()
            }
            ColorSpec::Palette(palette) => {
                let (min, max) = grid.value_range().unwrap_or((0.0, 0.0));
                let span = max - min;
                grid.data()
                    .iter()
                    .map(|&v| {
                        if !v.is_finite() {
                            Color32::TRANSPARENT
                        } else if span > 0.0 {
                            palette.color_at((v - min) / span)
                        } else {
                            // Degenerate frame: every pixel sits at the
                            // bottom of the gradient.
                            palette.color_at(0.0)
                        }
                    })
                    .collect()
            }
        }
    }
}
