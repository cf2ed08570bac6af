//! Persistent user preferences.
//!
//! Preferences live in a small JSON file under the platform configuration
//! directory (`~/.config/pdfmerge/preferences.json` on Linux). Missing keys
//! fall back to their defaults and unknown keys are ignored, so older and
//! newer versions can share a file.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{PdfMergeError, Result};

/// Name of the directory created under the platform config dir.
pub const APP_DIR_NAME: &str = "pdfmerge";

/// Name of the preferences file.
pub const FILE_NAME: &str = "preferences.json";

/// Environment variable that overrides the preferences location.
pub const ENV_VAR: &str = "PDFMERGE_PREFERENCES";

/// Keys accepted by [`Preferences::set`].
pub const KEYS: [&str; 4] = [
    "default-output-dir",
    "auto-open",
    "include-subfolders",
    "show-summary",
];

/// User preferences.
///
/// Stored with the same kebab-case names that [`Preferences::set`] accepts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct Preferences {
    /// Where merged files go when no better location is known.
    pub default_output_dir: Option<PathBuf>,

    /// Open the merged file once it has been written.
    pub auto_open: bool,

    /// Descend into subfolders when a folder is selected.
    pub include_subfolders: bool,

    /// Print the summary after a successful merge.
    pub show_summary: bool,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            default_output_dir: None,
            auto_open: false,
            include_subfolders: false,
            show_summary: true,
        }
    }
}

impl Preferences {
    /// Default location of the preferences file, if the platform has a
    /// configuration directory.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(APP_DIR_NAME).join(FILE_NAME))
    }

    /// Preferences file to use: `explicit` if given, else the path in
    /// [`ENV_VAR`] if set and non-empty, else [`Preferences::default_path`].
    pub fn resolve_path(explicit: Option<&Path>) -> Option<PathBuf> {
        explicit
            .map(Path::to_path_buf)
            .or_else(|| {
                std::env::var_os(ENV_VAR)
                    .filter(|value| !value.is_empty())
                    .map(PathBuf::from)
            })
            .or_else(Self::default_path)
    }

    /// Load preferences from `path`.
    ///
    /// A missing file yields the defaults.
    ///
    /// # Errors
    ///
    /// `InvalidPreferences` if the file exists but is not valid JSON for this
    /// structure; `Io` if it cannot be read.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = match std::fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "no preferences file, using defaults");
                return Ok(Self::default());
            }
            Err(err) => return Err(err.into()),
        };

        serde_json::from_str(&contents)
            .map_err(|err| PdfMergeError::invalid_preferences(path, err.to_string()))
    }

    /// Write preferences to `path`, creating parent directories as needed.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)?;
        }

        let json = serde_json::to_string_pretty(self)
            .map_err(|err| PdfMergeError::invalid_preferences(path, err.to_string()))?;
        std::fs::write(path, json + "\n")?;

        tracing::debug!(path = %path.display(), "saved preferences");
        Ok(())
    }

    /// Update a single preference by its key name.
    ///
    /// Boolean keys accept `true/false`, `yes/no`, `on/off` and `1/0`. An
    /// empty value for `default-output-dir` clears it.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "default-output-dir" => {
                let value = value.trim();
                self.default_output_dir = (!value.is_empty()).then(|| PathBuf::from(value));
            }
            "auto-open" => self.auto_open = parse_bool(key, value)?,
            "include-subfolders" => self.include_subfolders = parse_bool(key, value)?,
            "show-summary" => self.show_summary = parse_bool(key, value)?,
            _ => {
                return Err(PdfMergeError::invalid_config(format!(
                    "Unknown preference: {key}. Must be one of: {}",
                    KEYS.join(", ")
                )));
            }
        }
        Ok(())
    }

    /// The preferred output directory, if set and still present on disk.
    pub fn existing_output_dir(&self) -> Option<&Path> {
        self.default_output_dir
            .as_deref()
            .filter(|dir| dir.is_dir())
    }
}

fn parse_bool(key: &str, value: &str) -> Result<bool> {
    match value.trim().to_lowercase().as_str() {
        "true" | "yes" | "on" | "1" => Ok(true),
        "false" | "no" | "off" | "0" => Ok(false),
        _ => Err(PdfMergeError::invalid_config(format!(
            "Invalid value for {key}: {value}. Expected true or false"
        ))),
    }
}
