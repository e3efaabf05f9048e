//! Configuration module.
//!
//! Handles CLI settings and projection definition files.

mod projection_file;
mod settings;

pub use projection_file::{ColumnMapping, ProjectionFile, ProjectionFileError};
pub use settings::{DefaultTables, OutputFormat, OutputSettings, Settings, SettingsError};
