//! Tests for loading projection files from disk.

use column_lineage::config::{DefaultTables, ProjectionFile, ProjectionFileError, Settings};
use column_lineage::lineage::DerivationType;
use std::fs;
use std::path::PathBuf;

fn temp_path(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("column-lineage-{}-{}", std::process::id(), name))
}

#[test]
fn test_load_demo_projection() {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("demos/orders.toml");
    let file = ProjectionFile::from_file(&path).unwrap();

    assert_eq!(file.columns.len(), 7);
    let graph = file.build_lineage(None, None, &DefaultTables::default());

    assert_eq!(graph.edge_count(), 8);
    assert_eq!(graph.edges_of_type(DerivationType::Agg).count(), 2);
    assert_eq!(graph.warnings().len(), 2);
}

#[test]
fn test_load_json_by_extension() {
    let path = temp_path("proj.json");
    fs::write(
        &path,
        r#"{"target": "mart", "columns": [{"name": "n", "expr": "count(id)"}]}"#,
    )
    .unwrap();

    let file = ProjectionFile::from_file(&path).unwrap();
    fs::remove_file(&path).unwrap();

    let graph = file.build_lineage(Some("events"), None, &DefaultTables::default());
    let edge = graph.edges().next().unwrap();
    assert_eq!(edge.to_string(), "events.id -> mart.n [AGG] count(id)");
}

#[test]
fn test_missing_projection_file() {
    let result = ProjectionFile::from_file(temp_path("does-not-exist.toml"));
    assert!(matches!(result, Err(ProjectionFileError::ReadError(_))));
}

#[test]
fn test_settings_defaults_feed_projection() {
    let settings = Settings::from_toml_str(
        r#"
[defaults]
source_table = "raw_events"
target_table = "events"
"#,
    )
    .unwrap();

    let file = ProjectionFile::from_toml_str("[[columns]]\nname = \"id\"\nexpr = \"id\"\n").unwrap();
    let graph = file.build_lineage(None, None, &settings.defaults);

    let edge = graph.edges().next().unwrap();
    assert_eq!(edge.to_string(), "raw_events.id -> events.id [DIRECT] id");
}
