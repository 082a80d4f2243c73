//! Application settings - persisted user preferences.
//!
//! Settings are read from a TOML file at startup. Every section has
//! defaults, so a partial file only overrides what it names.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use stain_core::{DEFAULT_PREVIEW_SIZE, DEFAULT_SAMPLE_COUNT};
use stain_persistence::{HISTORY_FILE_NAME, default_history_path, project_dirs};

// =============================================================================
// ROOT SETTINGS
// =============================================================================

/// Application settings.
///
/// Serialized to TOML and stored in the user's config directory.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Sample count defaults and sweep range.
    pub sampling: SamplingSettings,

    /// History file location.
    pub history: HistorySettings,

    /// Preview encoding for history entries.
    pub preview: PreviewSettings,
}

impl Settings {
    /// Load settings from a specific path.
    ///
    /// A missing file gives defaults. A malformed file is logged and also
    /// gives defaults.
    pub fn load_from(path: &Path) -> Self {
        let Ok(content) = std::fs::read_to_string(path) else {
            tracing::debug!("No settings file at {}", path.display());
            return Self::default();
        };
        toml::from_str(&content).unwrap_or_else(|e| {
            tracing::warn!(error = %e, "Ignoring malformed settings file {}", path.display());
            Self::default()
        })
    }

    /// Save settings to a specific path.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory {}", parent.display())
            })?;
        }

        let content = self.to_toml()?;
        std::fs::write(path, content)
            .with_context(|| format!("Failed to write settings to {}", path.display()))
    }

    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).context("Failed to serialize settings")
    }

    /// Get the default config file path.
    pub fn config_path() -> PathBuf {
        project_dirs()
            .map(|dirs| dirs.config_dir().join("settings.toml"))
            .unwrap_or_else(|| PathBuf::from("settings.toml"))
    }

    /// History file to use: the configured override, then the platform
    /// data directory, then the working directory.
    pub fn history_path(&self) -> PathBuf {
        if let Some(path) = &self.history.path {
            return path.clone();
        }
        default_history_path().unwrap_or_else(|e| {
            tracing::warn!(error = %e, "Using history file in the working directory");
            PathBuf::from(HISTORY_FILE_NAME)
        })
    }
}

// =============================================================================
// SAMPLING
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SamplingSettings {
    /// Sample count when none is given on the command line.
    pub default_points: usize,

    /// Lower end of the sweep range.
    pub min_points: usize,

    /// Upper end of the sweep range.
    pub max_points: usize,

    /// Sweep increment.
    pub step: usize,

    /// Fixed seed for reproducible runs.
    pub seed: Option<u64>,
}

impl Default for SamplingSettings {
    fn default() -> Self {
        Self {
            default_points: DEFAULT_SAMPLE_COUNT,
            min_points: 100,
            max_points: 5000,
            step: 100,
            seed: None,
        }
    }
}

// =============================================================================
// HISTORY
// =============================================================================

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HistorySettings {
    /// Override for the history file location.
    pub path: Option<PathBuf>,
}

// =============================================================================
// PREVIEW
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PreviewSettings {
    /// Longest side of the stored preview, in pixels.
    pub max_size: u32,
}

impl Default for PreviewSettings {
    fn default() -> Self {
        Self {
            max_size: DEFAULT_PREVIEW_SIZE,
        }
    }
}
