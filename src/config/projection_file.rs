//! Projection definition files.
//!
//! A projection file names its tables and lists target columns in order,
//! either as TOML:
//!
//! ```toml
//! source = "ods_orders"
//! target = "result"
//!
//! [[columns]]
//! name = "user_id"
//! expr = "user_id"
//!
//! [[columns]]
//! name = "total_amt"
//! expr = "sum(amount)"
//! ```
//!
//! or as the equivalent JSON object. Both tables are optional and fall back
//! to command-line overrides or [`DefaultTables`].

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::Path;

use super::settings::DefaultTables;
use crate::lineage::{build_projection_lineage, LineageGraph, Projection};

/// Errors that can occur while loading a projection file.
#[derive(Debug, thiserror::Error)]
pub enum ProjectionFileError {
    #[error("Failed to read projection file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse projection file: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Failed to parse projection JSON: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Duplicate target column: {0}")]
    DuplicateColumn(String),

    #[error("Empty target column name at position {0}")]
    EmptyColumnName(usize),
}

/// One target column and its defining expression.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ColumnMapping {
    pub name: String,
    pub expr: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ProjectionFile {
    #[serde(default)]
    pub source: Option<String>,

    #[serde(default)]
    pub target: Option<String>,

    pub columns: Vec<ColumnMapping>,
}

impl ProjectionFile {
    pub fn from_toml_str(content: &str) -> Result<Self, ProjectionFileError> {
        let file: ProjectionFile = toml::from_str(content)?;
        file.validate()?;
        Ok(file)
    }

    pub fn from_json_str(content: &str) -> Result<Self, ProjectionFileError> {
        let file: ProjectionFile = serde_json::from_str(content)?;
        file.validate()?;
        Ok(file)
    }

    /// Load a projection file; `.json` files are read as JSON, anything
    /// else as TOML.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ProjectionFileError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)?;
        let is_json = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

        if is_json {
            Self::from_json_str(&content)
        } else {
            Self::from_toml_str(&content)
        }
    }

    fn validate(&self) -> Result<(), ProjectionFileError> {
        let mut seen = HashSet::new();
        for (position, column) in self.columns.iter().enumerate() {
            if column.name.trim().is_empty() {
                return Err(ProjectionFileError::EmptyColumnName(position));
            }
            if !seen.insert(column.name.as_str()) {
                return Err(ProjectionFileError::DuplicateColumn(column.name.clone()));
            }
        }
        Ok(())
    }

    /// The ordered column → expression mapping.
    pub fn projection(&self) -> Projection {
        self.columns
            .iter()
            .map(|c| (c.name.as_str(), c.expr.as_str()))
            .collect()
    }

    /// Source and target tables: explicit overrides first, then the file,
    /// then the configured defaults.
    pub fn resolve_tables(
        &self,
        source_override: Option<&str>,
        target_override: Option<&str>,
        defaults: &DefaultTables,
    ) -> (String, String) {
        let source = source_override
            .or(self.source.as_deref())
            .unwrap_or(&defaults.source_table);
        let target = target_override
            .or(self.target.as_deref())
            .unwrap_or(&defaults.target_table);
        (source.to_string(), target.to_string())
    }

    /// Run lineage over this file with resolved tables.
    pub fn build_lineage(
        &self,
        source_override: Option<&str>,
        target_override: Option<&str>,
        defaults: &DefaultTables,
    ) -> LineageGraph {
        let (source, target) = self.resolve_tables(source_override, target_override, defaults);
        build_projection_lineage(&source, &target, &self.projection())
    }
}
