//! Persisted UI state
//!
//! A small JSON file in the platform data directory remembering which
//! variables were last selected, so a restarted viewer comes back on the
//! same PVs. History is deliberately not persisted, only the selection.
//!
//! - **Linux**: `~/.local/share/pvvis-rs/ui_state.json`
//! - **macOS**: `~/Library/Application Support/pvvis-rs/ui_state.json`
//! - **Windows**: `%APPDATA%\pvvis-rs\ui_state.json`

use crate::error::{PvVisError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Application identifier for data directories
pub const APP_ID: &str = "pvvis-rs";

/// UI state filename
pub const UI_STATE_FILE: &str = "ui_state.json";

/// Get the application data directory path
pub fn app_data_dir() -> Option<PathBuf> {
    dirs_next::data_dir().map(|p| p.join(APP_ID))
}

/// Get the path to the UI state file
pub fn ui_state_path() -> Option<PathBuf> {
    app_data_dir().map(|p| p.join(UI_STATE_FILE))
}

/// Persistent UI selections
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UiState {
    /// Version for future migration support
    #[serde(default = "default_version")]
    pub version: u32,

    /// Last live variable on the striptool
    #[serde(default)]
    pub last_scalar_variable: Option<String>,

    /// Last live variable on the image plot
    #[serde(default)]
    pub last_image_variable: Option<String>,
}

fn default_version() -> u32 {
    1
}

impl Default for UiState {
    fn default() -> Self {
        Self {
            version: 1,
            last_scalar_variable: None,
            last_image_variable: None,
        }
    }
}

impl UiState {
    /// Load the UI state from the default location, falling back to
    /// defaults when missing or unreadable
    pub fn load_or_default() -> Self {
        let Some(path) = ui_state_path() else {
            return Self::default();
        };
        match Self::load_from(&path) {
            Ok(state) => state,
            Err(e) => {
                tracing::debug!("no usable UI state at {:?}: {}", path, e);
                Self::default()
            }
        }
    }

    /// Load the UI state from a specific path
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        serde_json::from_str(&text).map_err(|e| PvVisError::Serialization(e.to_string()))
    }

    /// Save the UI state to the default location
    ///
    /// Creates the data directory if needed.
    pub fn save(&self) -> Result<()> {
        let path = ui_state_path().ok_or_else(|| {
            PvVisError::Config("could not determine app data directory".to_string())
        })?;
        if let Some(dir) = path.parent() {
            std::fs::create_dir_all(dir)?;
        }
        self.save_to(&path)
    }

    /// Save the UI state to a specific path
    pub fn save_to(&self, path: impl AsRef<Path>) -> Result<()> {
        let text = serde_json::to_string_pretty(self)
            .map_err(|e| PvVisError::Serialization(e.to_string()))?;
        std::fs::write(path, text)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(UI_STATE_FILE);

        let state = UiState {
            version: 1,
            last_scalar_variable: Some("beam_current".to_string()),
            last_image_variable: None,
        };
        state.save_to(&path).unwrap();

        let loaded = UiState::load_from(&path).unwrap();
        assert_eq!(loaded, state);
    }

    #[test]
    fn test_load_missing_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.json");
        assert!(matches!(
            UiState::load_from(&missing),
            Err(PvVisError::Io(_))
        ));
    }

    #[test]
    fn test_unknown_fields_tolerated() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(UI_STATE_FILE);
        std::fs::write(&path, r#"{"version": 1, "future_field": true}"#).unwrap();

        let loaded = UiState::load_from(&path).unwrap();
        assert_eq!(loaded, UiState::default());
    }
}
