//! Date manager settings and their loading from YAML or JSON files

use crate::models::{DEFAULT_DATE_FORMAT, DateKind, MetadataFormat, TaskStatusSets};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Directory under the user config dir holding the settings file
const CONFIG_DIR: &str = "autodate";

/// Settings file name
const SETTINGS_FILE: &str = "settings.yaml";

/// Errors that can occur while loading settings
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("Failed to parse JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Unsupported settings file extension: {0}")]
    UnsupportedExtension(PathBuf),
    #[error("Failed to locate the user config directory")]
    NoConfigDirectory,
}

/// Per-date-kind switches, formats and markers for automatic date management
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AutoDateSettings {
    pub enabled: bool,
    pub manage_start_date: bool,
    pub manage_completed_date: bool,
    pub manage_cancelled_date: bool,
    pub start_date_format: String,
    pub completed_date_format: String,
    pub cancelled_date_format: String,
    pub start_date_marker: String,
    pub completed_date_marker: String,
    pub cancelled_date_marker: String,
}

impl Default for AutoDateSettings {
    fn default() -> Self {
        AutoDateSettings {
            enabled: false,
            manage_start_date: true,
            manage_completed_date: true,
            manage_cancelled_date: true,
            start_date_format: DEFAULT_DATE_FORMAT.to_string(),
            completed_date_format: DEFAULT_DATE_FORMAT.to_string(),
            cancelled_date_format: DEFAULT_DATE_FORMAT.to_string(),
            start_date_marker: DateKind::Start.default_marker().to_string(),
            completed_date_marker: DateKind::Completed.default_marker().to_string(),
            cancelled_date_marker: DateKind::Cancelled.default_marker().to_string(),
        }
    }
}

impl AutoDateSettings {
    /// Whether dates of this kind are managed at all
    pub fn manages(&self, kind: DateKind) -> bool {
        match kind {
            DateKind::Start => self.manage_start_date,
            DateKind::Completed => self.manage_completed_date,
            DateKind::Cancelled => self.manage_cancelled_date,
        }
    }

    /// Configured format for this kind, falling back to `YYYY-MM-DD`
    pub fn format(&self, kind: DateKind) -> &str {
        let format = match kind {
            DateKind::Start => self.start_date_format.as_str(),
            DateKind::Completed => self.completed_date_format.as_str(),
            DateKind::Cancelled => self.cancelled_date_format.as_str(),
        };
        if format.is_empty() {
            DEFAULT_DATE_FORMAT
        } else {
            format
        }
    }

    /// Configured emoji marker for this kind, falling back to the default
    pub fn marker(&self, kind: DateKind) -> &str {
        let marker = match kind {
            DateKind::Start => self.start_date_marker.as_str(),
            DateKind::Completed => self.completed_date_marker.as_str(),
            DateKind::Cancelled => self.cancelled_date_marker.as_str(),
        };
        if marker.is_empty() {
            kind.default_marker()
        } else {
            marker
        }
    }
}

/// Everything the date manager reads from the host's configuration
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    pub auto_date_manager: AutoDateSettings,
    pub prefer_metadata_format: MetadataFormat,
    pub task_statuses: TaskStatusSets,
}

impl Settings {
    /// Load settings from a `.yaml`, `.yml` or `.json` file
    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        let content = std::fs::read_to_string(path)?;
        let extension = path
            .extension()
            .map(|e| e.to_string_lossy().to_lowercase())
            .unwrap_or_default();

        let settings = match extension.as_str() {
            "yaml" | "yml" => serde_yaml::from_str(&content)?,
            "json" => serde_json::from_str(&content)?,
            _ => return Err(SettingsError::UnsupportedExtension(path.to_path_buf())),
        };

        log::debug!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// The default settings file location (`<config dir>/autodate/settings.yaml`)
    pub fn default_path() -> Result<PathBuf, SettingsError> {
        let config = dirs::config_dir().ok_or(SettingsError::NoConfigDirectory)?;
        Ok(config.join(CONFIG_DIR).join(SETTINGS_FILE))
    }

    /// Load from `path`, or from the default location when `path` is `None`.
    /// A missing default file yields default settings; a missing explicit
    /// file is an error.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, SettingsError> {
        if let Some(path) = path {
            return Self::load(path);
        }

        let default_path = Self::default_path()?;
        if default_path.exists() {
            Self::load(&default_path)
        } else {
            log::debug!(
                "No settings file at {}, using defaults",
                default_path.display()
            );
            Ok(Settings::default())
        }
    }

    pub fn uses_dataview(&self) -> bool {
        self.prefer_metadata_format == MetadataFormat::Dataview
    }
}
