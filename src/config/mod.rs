//! Configuration module for pvvis
//!
//! This module handles configuration loading:
//! - Model descriptions: which variables exist and how to display them,
//!   loaded from a YAML file
//! - Persisted UI state (last selected variables), kept in the platform
//!   data directory; see [`state`]
//!
//! # Model description format
//!
//! ```yaml
//! name: demo_model
//! tick_interval_ms: 250
//! striptool:
//!   limit: 50
//! image_plot:
//!   palette: viridis
//! scalars:
//!   - name: beam_current
//!     units: mA
//!   - name: beam_energy
//! images:
//!   - name: beam_profile
//!     axis_labels: [x, y]
//!     axis_units: [mm, mm]
//!     extents: { x: 0.0, y: 0.0, dw: 0.01, dh: 0.01 }
//! ```
//!
//! `image_plot` accepts either a bare `palette` or a `color_mapper` with a
//! fixed range:
//!
//! ```yaml
//! image_plot:
//!   color_mapper: { palette: inferno, low: 0.0, high: 255.0 }
//! ```

pub mod state;

pub use state::UiState;

use crate::colormap::{ColorSpec, LinearColorMapper, Palette};
use crate::error::{PvVisError, Result, ResultExt};
use crate::types::{ImageVariable, ScalarVariable};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;
use std::time::Duration;

/// Default widget update interval in milliseconds
pub const DEFAULT_TICK_INTERVAL_MS: u64 = 250;

fn default_tick_interval_ms() -> u64 {
    DEFAULT_TICK_INTERVAL_MS
}

/// Display options for the striptool widget
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StriptoolOptions {
    /// Maximum number of samples to render (the monitor history itself is
    /// never truncated)
    #[serde(default)]
    pub limit: Option<usize>,
}

/// A fixed-range color mapper declaration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MapperOptions {
    pub palette: String,
    pub low: f64,
    pub high: f64,
}

/// Display options for the image plot widget
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ImagePlotOptions {
    /// Auto-ranged palette name
    #[serde(default)]
    pub palette: Option<String>,
    /// Fixed-range color mapper; wins over `palette` when both are set
    #[serde(default)]
    pub color_mapper: Option<MapperOptions>,
}

/// A loaded model description: variables plus display options
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VisConfig {
    /// Model name, used for the window title
    pub name: String,

    /// Widget update interval in milliseconds
    #[serde(default = "default_tick_interval_ms")]
    pub tick_interval_ms: u64,

    #[serde(default)]
    pub striptool: StriptoolOptions,

    #[serde(default)]
    pub image_plot: ImagePlotOptions,

    /// Scalar variables to display on the striptool
    #[serde(default)]
    pub scalars: Vec<ScalarVariable>,

    /// Image variables to display on the raster plot
    #[serde(default)]
    pub images: Vec<ImageVariable>,
}

impl VisConfig {
    /// Parse and validate a model description from YAML text
    pub fn from_yaml_str(text: &str) -> Result<Self> {
        let config: VisConfig =
            serde_yaml::from_str(text).map_err(|e| PvVisError::Serialization(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load a model description from a YAML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&text)
            .with_context(|| format!("failed to load model config from {}", path.display()))
    }

    /// The widget update interval as a [`Duration`]
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }

    /// Resolve the configured coloring choice for the image plot
    ///
    /// Only meaningful when image variables are declared; the
    /// palette-or-mapper rule itself is enforced by the widget
    /// constructor.
    pub fn color_options(&self) -> Result<(Option<Palette>, Option<LinearColorMapper>)> {
        let palette = self
            .image_plot
            .palette
            .as_deref()
            .map(Palette::by_name)
            .transpose()?;
        let mapper = self
            .image_plot
            .color_mapper
            .as_ref()
            .map(|m| LinearColorMapper::new(Palette::by_name(&m.palette)?, m.low, m.high))
            .transpose()?;
        Ok((palette, mapper))
    }

    /// Resolve the coloring choice, applying the palette-or-mapper rule
    pub fn build_color_spec(&self) -> Result<ColorSpec> {
        let (palette, mapper) = self.color_options()?;
        ColorSpec::resolve(palette, mapper)
    }

    fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(PvVisError::Config("model name must not be empty".to_string()));
        }
        if self.tick_interval_ms == 0 {
            return Err(PvVisError::Config(
                "tick_interval_ms must be a positive integer".to_string(),
            ));
        }
        if self.striptool.limit == Some(0) {
            return Err(PvVisError::Config(
                "striptool limit must be a positive integer".to_string(),
            ));
        }

        // Variable names are PV names, unique across kinds.
        let mut seen = HashSet::new();
        for name in self
            .scalars
            .iter()
            .map(|v| &v.name)
            .chain(self.images.iter().map(|v| &v.name))
        {
            if name.trim().is_empty() {
                return Err(PvVisError::Config(
                    "variable names must not be empty".to_string(),
                ));
            }
            if !seen.insert(name.clone()) {
                return Err(PvVisError::Config(format!(
                    "duplicate variable name: {name}"
                )));
            }
        }

        for image in &self.images {
            if !(image.extents.dw > 0.0 && image.extents.dh > 0.0) {
                return Err(PvVisError::Config(format!(
                    "image {} extents must have positive dw/dh",
                    image.name
                )));
            }
        }

        // Surface bad palette names / mapper ranges at load time.
        self.color_options()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EXAMPLE: &str = r#"
name: demo_model
striptool:
  limit: 50
image_plot:
  palette: viridis
scalars:
  - name: beam_current
    units: mA
  - name: beam_energy
images:
  - name: beam_profile
    axis_labels: [x, y]
    axis_units: [mm, mm]
    extents: { x: 0.0, y: 0.0, dw: 0.01, dh: 0.01 }
"#;

    #[test]
    fn test_parse_example() {
        let config = VisConfig::from_yaml_str(EXAMPLE).unwrap();
        assert_eq!(config.name, "demo_model");
        assert_eq!(config.tick_interval_ms, DEFAULT_TICK_INTERVAL_MS);
        assert_eq!(config.striptool.limit, Some(50));
        assert_eq!(config.scalars.len(), 2);
        assert_eq!(config.scalars[0].units.as_deref(), Some("mA"));
        assert_eq!(config.scalars[1].units, None);
        assert_eq!(config.images[0].axis_labels.0, "x");
        assert!(matches!(
            config.build_color_spec(),
            Ok(ColorSpec::Palette(Palette::Viridis))
        ));
    }

    #[test]
    fn test_mapper_wins_over_palette() {
        let text = r#"
name: m
image_plot:
  palette: viridis
  color_mapper: { palette: inferno, low: 0.0, high: 10.0 }
"#;
        let config = VisConfig::from_yaml_str(text).unwrap();
        assert!(matches!(
            config.build_color_spec(),
            Ok(ColorSpec::Mapper(_))
        ));
    }

    #[test]
    fn test_rejects_zero_limit() {
        let text = "name: m\nstriptool:\n  limit: 0\n";
        assert!(matches!(
            VisConfig::from_yaml_str(text),
            Err(PvVisError::Config(_))
        ));
    }

    #[test]
    fn test_rejects_duplicate_names() {
        let text = r#"
name: m
scalars:
  - name: x
images:
  - name: x
    axis_labels: [u, v]
    extents: { x: 0.0, y: 0.0, dw: 1.0, dh: 1.0 }
"#;
        assert!(matches!(
            VisConfig::from_yaml_str(text),
            Err(PvVisError::Config(_))
        ));
    }

    #[test]
    fn test_rejects_unknown_palette() {
        let text = "name: m\nimage_plot:\n  palette: plasma\n";
        assert!(matches!(
            VisConfig::from_yaml_str(text),
            Err(PvVisError::Config(_))
        ));
    }

    #[test]
    fn test_rejects_bad_mapper_range() {
        let text = "name: m\nimage_plot:\n  color_mapper: { palette: grays, low: 5.0, high: 1.0 }\n";
        assert!(matches!(
            VisConfig::from_yaml_str(text),
            Err(PvVisError::Config(_))
        ));
    }

    #[test]
    fn test_rejects_non_positive_extents() {
        let text = r#"
name: m
scalars: []
images:
  - name: p
    axis_labels: [u, v]
    extents: { x: 0.0, y: 0.0, dw: 0.0, dh: 1.0 }
"#;
        assert!(matches!(
            VisConfig::from_yaml_str(text),
            Err(PvVisError::Config(_))
        ));
    }

    #[test]
    fn test_load_from_file() {
        use std::io::Write;
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(EXAMPLE.as_bytes()).unwrap();

        let config = VisConfig::load(file.path()).unwrap();
        assert_eq!(config.name, "demo_model");

        let missing = VisConfig::load(file.path().with_extension("gone"));
        assert!(matches!(missing, Err(PvVisError::Io(_))));
    }
}
