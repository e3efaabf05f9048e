//! Integration tests for projection lineage: extraction, classification,
//! constants and warnings working together.

use column_lineage::lineage::{
    build_projection_lineage, ColumnRef, DerivationType, LineageGraph, Projection, CONST_TABLE,
};

fn edge_strings(graph: &LineageGraph) -> Vec<String> {
    graph.edges().map(|e| e.to_string()).collect()
}

fn count_warnings(graph: &LineageGraph, prefix: &str) -> usize {
    graph.warnings().iter().filter(|w| w.starts_with(prefix)).count()
}

// ============================================================================
// Scenarios
// ============================================================================

#[test]
fn test_qualified_columns_from_other_tables() {
    let graph = build_projection_lineage("default_t", "result", [("c", "t1.a + t2.b")]);

    assert!(graph
        .edges()
        .any(|e| e.from == ColumnRef::new("t1", "a") && e.to == ColumnRef::new("result", "c")));
    assert!(graph
        .edges()
        .any(|e| e.from == ColumnRef::new("t2", "b") && e.to == ColumnRef::new("result", "c")));
    assert!(graph.edges().all(|e| e.derivation == DerivationType::Derived));
    assert!(!graph.contains_node(&ColumnRef::new("default_t", "a")));
}

#[test]
fn test_constant_expression() {
    let graph = build_projection_lineage("t", "result", [("flag", "1")]);

    assert_eq!(graph.edge_count(), 1);
    let edge = graph.edges().next().unwrap();
    assert_eq!(edge.derivation, DerivationType::Unknown);
    assert_eq!(edge.from.table, CONST_TABLE);
    assert_eq!(edge.from.column, "1");
}

#[test]
fn test_array_join_type_and_warning() {
    let graph = build_projection_lineage("t", "result", [("a", "arrayJoin(arr)")]);

    assert_eq!(
        edge_strings(&graph),
        vec!["t.arr -> result.a [DERIVED_ARRAY] arrayJoin(arr)"]
    );
    assert!(graph.warnings().iter().any(|w| w.contains("ARRAY JOIN")));
}

#[test]
fn test_direct_passthrough() {
    let graph = build_projection_lineage("t", "result", [("id", "id")]);
    assert_eq!(edge_strings(&graph), vec!["t.id -> result.id [DIRECT] id"]);
}

#[test]
fn test_same_name_under_function_is_not_direct() {
    let graph = build_projection_lineage("t", "result", [("id", "UPPER(id)")]);
    assert!(graph.edges().all(|e| e.derivation == DerivationType::Derived));
}

#[test]
fn test_same_name_next_to_literal_is_not_direct() {
    let graph = build_projection_lineage("t", "r", [("id", "id 'x'"), ("k", "'' k")]);

    assert_eq!(
        edge_strings(&graph),
        vec!["t.id -> r.id [DERIVED] id 'x'", "t.k -> r.k [DERIVED] '' k"]
    );
}

// ============================================================================
// Properties
// ============================================================================

#[test]
fn test_every_literal_only_column_gets_one_constant_edge() {
    let projection = Projection::new()
        .with("one", "1")
        .with("pi", "3.14")
        .with("label", "'hello world'")
        .with("quoted", r#""sum(x)""#)
        .with("neg", "-42");

    let graph = build_projection_lineage("t", "r", &projection);

    assert_eq!(graph.edge_count(), projection.len());
    for (column, _) in &projection {
        let deps = graph.direct_dependencies(&ColumnRef::new("r", column));
        assert_eq!(deps.len(), 1, "column {column}");
        assert!(deps[0].0.is_constant());
        assert_eq!(deps[0].1, DerivationType::Unknown);
    }
}

#[test]
fn test_dict_get_warning_once_for_many_lookups() {
    let projection = Projection::new()
        .with("name", "dictGet('dim_user', 'name', user_id)")
        .with("city", "dictGet('dim_user', 'city', user_id)")
        .with("region", "DICTGET('dim_geo', 'region', geo_id)");

    let graph = build_projection_lineage("t", "r", &projection);

    assert_eq!(count_warnings(&graph, "dictGet detected"), 1);
    assert!(graph
        .edges()
        .all(|e| e.derivation == DerivationType::ExternalLineage));
}

#[test]
fn test_final_inside_literal_does_not_warn() {
    let graph = build_projection_lineage(
        "t",
        "r",
        [("tag", "dictGet('final_tag', 'name', user_id)")],
    );

    assert_eq!(count_warnings(&graph, "FINAL"), 0);
    assert_eq!(count_warnings(&graph, "dictGet"), 1);
}

#[test]
fn test_final_keyword_warns_once() {
    let projection = Projection::new()
        .with("a", "x FINAL")
        .with("b", "y final")
        .with("c", "final_score");

    let graph = build_projection_lineage("t", "r", &projection);

    assert_eq!(graph.warnings(), &["FINAL ignored for lineage".to_string()]);
    // `final_score` is an ordinary column
    assert!(graph.contains_node(&ColumnRef::new("t", "final_score")));
}

#[test]
fn test_every_edge_endpoint_is_a_node() {
    let projection = Projection::new()
        .with("a", "t1.a + b")
        .with("b", "count(c)")
        .with("c", "'x'")
        .with("d", "arrayJoin(items)");

    let graph = build_projection_lineage("src", "dst", &projection);

    for edge in graph.edges() {
        assert!(graph.contains_node(&edge.from), "missing {}", edge.from);
        assert!(graph.contains_node(&edge.to), "missing {}", edge.to);
    }
}

#[test]
fn test_shared_input_is_one_node() {
    let projection = Projection::new()
        .with("total", "sum(amount)")
        .with("biggest", "max(amount)");

    let graph = build_projection_lineage("orders", "r", &projection);

    assert_eq!(graph.node_count(), 3);
    assert_eq!(
        graph.source_columns(),
        vec![ColumnRef::new("orders", "amount")]
    );
    assert_eq!(
        graph.direct_dependents(&ColumnRef::new("orders", "amount")).len(),
        2
    );
}

#[test]
fn test_projection_order_drives_output_order() {
    let forward = build_projection_lineage("t", "r", [("a", "x"), ("b", "y")]);
    let reverse = build_projection_lineage("t", "r", [("b", "y"), ("a", "x")]);

    let forward_nodes: Vec<_> = forward.nodes().map(|n| n.to_string()).collect();
    let reverse_nodes: Vec<_> = reverse.nodes().map(|n| n.to_string()).collect();

    assert_eq!(forward_nodes, vec!["t.x", "r.a", "t.y", "r.b"]);
    assert_eq!(reverse_nodes, vec!["t.y", "r.b", "t.x", "r.a"]);
}

#[test]
fn test_malformed_expressions_degrade_gracefully() {
    let projection = Projection::new()
        .with("a", "((( a +")
        .with("b", "sum(")
        .with("c", "'unterminated")
        .with("d", "");

    let graph = build_projection_lineage("t", "r", &projection);

    let deps_a = graph.direct_dependencies(&ColumnRef::new("r", "a"));
    assert_eq!(deps_a, vec![(ColumnRef::new("t", "a"), DerivationType::Derived)]);

    // No inputs at all: constant
    let deps_b = graph.direct_dependencies(&ColumnRef::new("r", "b"));
    assert_eq!(deps_b, vec![(ColumnRef::constant("sum("), DerivationType::Unknown)]);

    // The quote never closes, so its text is scanned as code
    let deps_c = graph.direct_dependencies(&ColumnRef::new("r", "c"));
    assert_eq!(
        deps_c,
        vec![(ColumnRef::new("t", "unterminated"), DerivationType::Derived)]
    );

    let deps_d = graph.direct_dependencies(&ColumnRef::new("r", "d"));
    assert_eq!(deps_d, vec![(ColumnRef::constant(""), DerivationType::Unknown)]);
}
