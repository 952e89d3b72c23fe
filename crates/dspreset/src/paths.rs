//! Platform-specific paths for user settings and preset discovery.
//!
//! # Directory Structure
//!
//! - **User config**: `~/.config/dspreset/` (Linux), `~/Library/Application Support/dspreset/` (macOS), `%APPDATA%\dspreset\` (Windows)
//! - **Settings file**: `<user config>/settings.toml`
//!
//! # Example
//!
//! ```rust,no_run
//! use dspreset::paths;
//!
//! let settings = paths::settings_path();
//! println!("Settings: {:?}", settings);
//! ```

use std::path::{Path, PathBuf};

/// Application name used for directory paths.
const APP_NAME: &str = "dspreset";

/// Settings file name inside the user config directory.
const SETTINGS_FILE: &str = "settings.toml";

/// Preset file extension.
pub const PRESET_EXTENSION: &str = "dspreset";

/// Returns the user-specific configuration directory.
///
/// # Platform Paths
///
/// - Linux: `~/.config/dspreset/`
/// - macOS: `~/Library/Application Support/dspreset/`
/// - Windows: `%APPDATA%\dspreset\`
///
/// Returns a fallback path if the config directory cannot be determined.
pub fn user_config_dir() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_NAME)
}

/// Path of the user settings file.
pub fn settings_path() -> PathBuf {
    user_config_dir().join(SETTINGS_FILE)
}

/// `.dspreset` files directly inside `dir`, sorted by path.
///
/// Returns an empty vector if the directory doesn't exist or can't be read.
pub fn list_presets_in_dir(dir: &Path) -> Vec<PathBuf> {
    let Ok(entries) = std::fs::read_dir(dir) else {
        return Vec::new();
    };

    let mut presets: Vec<PathBuf> = entries
        .filter_map(Result::ok)
        .map(|entry| entry.path())
        .filter(|path| {
            path.is_file()
                && path
                    .extension()
                    .and_then(|ext| ext.to_str())
                    .is_some_and(|ext| ext.eq_ignore_ascii_case(PRESET_EXTENSION))
        })
        .collect();
    presets.sort();
    presets
}

/// Get the preset name from a file path.
///
/// # Example
///
/// ```rust
/// use dspreset::paths::preset_name_from_path;
/// use std::path::Path;
///
/// let name = preset_name_from_path(Path::new("/path/to/Felt Piano.dspreset"));
/// assert_eq!(name, Some("Felt Piano".to_string()));
/// ```
pub fn preset_name_from_path(path: &Path) -> Option<String> {
    path.file_stem()
        .and_then(|s| s.to_str())
        .map(ToString::to_string)
}
