//! User settings persisted as TOML in the platform config directory.
//!
//! # Example
//!
//! ```rust
//! use dspreset::{ExportOptions, Settings};
//!
//! let mut settings = Settings::default();
//! settings.push_recent_file("/presets/Piano.dspreset");
//!
//! let options = ExportOptions::from(&settings);
//! assert_eq!(options.samples_dir, "samples");
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::ConfigError;
use crate::export::ExportOptions;
use crate::paths;
use crate::preset::DEFAULT_START_NOTE;
use crate::samples::CopyPolicy;

/// Maximum number of remembered recent files.
pub const MAX_RECENT_FILES: usize = 10;

fn default_start_note() -> u8 {
    DEFAULT_START_NOTE
}

fn default_samples_dir() -> String {
    "samples".to_string()
}

/// Persistent user settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// First note used by sequential auto-mapping.
    #[serde(default = "default_start_note")]
    pub start_note: u8,

    /// Directory, relative to an exported preset, that samples are copied into.
    #[serde(default = "default_samples_dir")]
    pub samples_dir: String,

    /// Overwrite behaviour for existing sample copies.
    #[serde(default)]
    pub copy_policy: CopyPolicy,

    /// Recently written presets, most recent first.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub recent_files: Vec<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            start_note: DEFAULT_START_NOTE,
            samples_dir: default_samples_dir(),
            copy_policy: CopyPolicy::default(),
            recent_files: Vec::new(),
        }
    }
}

impl Settings {
    /// Load settings from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content =
            std::fs::read_to_string(path).map_err(|e| ConfigError::read_file(path, e))?;
        Ok(toml::from_str(&content)?)
    }

    /// Load settings from `path`, or return defaults if the file does not exist.
    ///
    /// A file that exists but cannot be read or parsed is still an error.
    pub fn load_from_or_default(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if !path.exists() {
            debug!(path = %path.display(), "no settings file, using defaults");
            return Ok(Self::default());
        }
        Self::load(path)
    }

    /// Load the user settings file, or defaults if there is none.
    pub fn load_or_default() -> Result<Self, ConfigError> {
        Self::load_from_or_default(paths::settings_path())
    }

    /// Save to the user settings file.
    pub fn save(&self) -> Result<(), ConfigError> {
        self.save_to(paths::settings_path())
    }

    /// Save to a TOML file, creating parent directories.
    pub fn save_to(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            std::fs::create_dir_all(parent).map_err(|e| ConfigError::create_dir(parent, e))?;
        }

        let content = self.to_toml()?;
        std::fs::write(path, content).map_err(|e| ConfigError::write_file(path, e))?;
        Ok(())
    }

    /// Serialize to a TOML string.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Put `path` at the front of the recent files, dropping an older entry
    /// for the same path and anything past [`MAX_RECENT_FILES`].
    pub fn push_recent_file(&mut self, path: impl Into<PathBuf>) {
        let path = path.into();
        self.recent_files.retain(|p| *p != path);
        self.recent_files.insert(0, path);
        self.recent_files.truncate(MAX_RECENT_FILES);
    }
}

impl From<&Settings> for ExportOptions {
    fn from(settings: &Settings) -> Self {
        Self {
            samples_dir: settings.samples_dir.clone(),
            copy_policy: settings.copy_policy,
        }
    }
}
