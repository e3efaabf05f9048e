//! TOML-based configuration.
//!
//! Example configuration:
//! ```toml
//! [defaults]
//! source_table = "ods_orders"
//! target_table = "result"
//!
//! [output]
//! format = "pretty"  # json | pretty | text
//! ```

use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use crate::lineage::LineageGraph;

/// Environment variable naming an explicit config file.
pub const CONFIG_ENV_VAR: &str = "COLUMN_LINEAGE_CONFIG";

/// Error type for settings.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("Config file not found: {0}")]
    FileNotFound(PathBuf),

    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Root configuration structure.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct Settings {
    /// Tables used when a projection file does not name them.
    pub defaults: DefaultTables,

    /// Output configuration.
    pub output: OutputSettings,
}

/// Fallback source/target table names.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct DefaultTables {
    /// Table that unqualified column names bind to.
    pub source_table: String,

    /// Table the projected columns belong to.
    pub target_table: String,
}

impl Default for DefaultTables {
    fn default() -> Self {
        Self {
            source_table: "source".to_string(),
            target_table: "result".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct OutputSettings {
    pub format: OutputFormat,
}

/// How a lineage graph is printed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Compact JSON
    #[default]
    Json,
    /// Indented JSON
    Pretty,
    /// Nodes / edges / warnings listing
    Text,
}

impl OutputFormat {
    pub fn render(&self, graph: &LineageGraph) -> serde_json::Result<String> {
        match self {
            OutputFormat::Json => graph.to_json(),
            OutputFormat::Pretty => graph.to_json_pretty(),
            OutputFormat::Text => Ok(graph.to_string()),
        }
    }
}

impl Settings {
    /// Parse and validate settings from TOML text.
    pub fn from_toml_str(content: &str) -> Result<Self, SettingsError> {
        let settings: Settings = toml::from_str(content)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load settings from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(SettingsError::FileNotFound(path.to_path_buf()));
        }

        let content = fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Load settings from the default config file locations.
    ///
    /// Searches in order:
    /// 1. Environment variable `COLUMN_LINEAGE_CONFIG`
    /// 2. `./column-lineage.toml`
    /// 3. `~/.config/column-lineage/config.toml`
    pub fn load() -> Result<Self, SettingsError> {
        if let Ok(path) = env::var(CONFIG_ENV_VAR) {
            return Self::from_file(&path);
        }

        let local_config = PathBuf::from("column-lineage.toml");
        if local_config.exists() {
            return Self::from_file(&local_config);
        }

        if let Some(config_dir) = dirs::config_dir() {
            let user_config = config_dir.join("column-lineage").join("config.toml");
            if user_config.exists() {
                return Self::from_file(&user_config);
            }
        }

        Ok(Settings::default())
    }

    fn validate(&self) -> Result<(), SettingsError> {
        if self.defaults.source_table.trim().is_empty() {
            return Err(SettingsError::InvalidConfig(
                "defaults.source_table must not be empty".to_string(),
            ));
        }
        if self.defaults.target_table.trim().is_empty() {
            return Err(SettingsError::InvalidConfig(
                "defaults.target_table must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}
