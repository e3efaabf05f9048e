//! The lineage graph accumulator.
//!
//! Nodes are columns, edges are [`LineageEdge`]s. Both are deduplicated and
//! kept in insertion order, so queries and serialization are deterministic.
//! Mutation is crate-private: a graph is filled by
//! [`LineageBuilder`](super::builder::LineageBuilder) and read-only afterwards.

use std::collections::{HashMap, HashSet};

use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;
use petgraph::Direction;
use serde::{Deserialize, Serialize};

use super::types::{ColumnRef, DerivationType, LineageEdge};

// =============================================================================
// Serialization
// =============================================================================

/// A single edge in serialized format.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SerializedEdge {
    /// Source column as `table.column`
    pub from: String,
    /// Target column as `table.column`
    pub to: String,
    #[serde(rename = "type")]
    pub derivation: DerivationType,
    pub expr: String,
}

/// Serializable representation of a lineage graph.
///
/// Field order is the JSON key order: `nodes`, `edges`, `warnings`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SerializedLineage {
    pub nodes: Vec<String>,
    pub edges: Vec<SerializedEdge>,
    pub warnings: Vec<String>,
}

// =============================================================================
// Lineage Graph
// =============================================================================

/// Column-level lineage graph for one projection.
#[derive(Debug, Clone)]
pub struct LineageGraph {
    /// The underlying directed graph
    graph: DiGraph<ColumnRef, LineageEdge>,
    /// Map from ColumnRef to NodeIndex for quick lookup
    node_index: HashMap<ColumnRef, NodeIndex>,
    /// Distinct warning messages in first-raised order
    warnings: Vec<String>,
    seen_warnings: HashSet<String>,
}

impl LineageGraph {
    pub(crate) fn new() -> Self {
        Self {
            graph: DiGraph::new(),
            node_index: HashMap::new(),
            warnings: Vec::new(),
            seen_warnings: HashSet::new(),
        }
    }

    /// Get or create a node for a column reference.
    fn get_or_create_node(&mut self, col_ref: &ColumnRef) -> NodeIndex {
        if let Some(&idx) = self.node_index.get(col_ref) {
            idx
        } else {
            let idx = self.graph.add_node(col_ref.clone());
            self.node_index.insert(col_ref.clone(), idx);
            idx
        }
    }

    /// Add an edge, inserting its endpoints as nodes.
    /// Returns false if an identical edge already exists.
    pub(crate) fn add_edge(&mut self, edge: LineageEdge) -> bool {
        let from_idx = self.get_or_create_node(&edge.from);
        let to_idx = self.get_or_create_node(&edge.to);

        let edge_exists = self
            .graph
            .edges_connecting(from_idx, to_idx)
            .any(|e| e.weight() == &edge);

        if !edge_exists {
            self.graph.add_edge(from_idx, to_idx, edge);
        }
        !edge_exists
    }

    /// Add a warning unless the same text was already raised.
    pub(crate) fn add_warning(&mut self, warning: impl Into<String>) -> bool {
        let warning = warning.into();
        if self.seen_warnings.insert(warning.clone()) {
            self.warnings.push(warning);
            true
        } else {
            false
        }
    }

    // -------------------------------------------------------------------------
    // Read-only views
    // -------------------------------------------------------------------------

    /// All columns in insertion order.
    pub fn nodes(&self) -> impl Iterator<Item = &ColumnRef> + '_ {
        self.graph.node_weights()
    }

    /// All edges in insertion order.
    pub fn edges(&self) -> impl Iterator<Item = &LineageEdge> + '_ {
        self.graph.edge_weights()
    }

    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    pub fn is_empty(&self) -> bool {
        self.graph.node_count() == 0
    }

    pub fn contains_node(&self, col: &ColumnRef) -> bool {
        self.node_index.contains_key(col)
    }

    pub fn contains_edge(&self, edge: &LineageEdge) -> bool {
        match (self.node_index.get(&edge.from), self.node_index.get(&edge.to)) {
            (Some(&from), Some(&to)) => self
                .graph
                .edges_connecting(from, to)
                .any(|e| e.weight() == edge),
            _ => false,
        }
    }

    /// Edges with the given derivation type, in insertion order.
    pub fn edges_of_type(
        &self,
        derivation: DerivationType,
    ) -> impl Iterator<Item = &LineageEdge> + '_ {
        self.edges().filter(move |e| e.derivation == derivation)
    }

    // -------------------------------------------------------------------------
    // Dependency queries
    // -------------------------------------------------------------------------

    /// Columns that `col` is computed from.
    pub fn direct_dependencies(&self, col: &ColumnRef) -> Vec<(ColumnRef, DerivationType)> {
        self.neighbors(col, Direction::Incoming)
    }

    /// Columns computed from `col`.
    pub fn direct_dependents(&self, col: &ColumnRef) -> Vec<(ColumnRef, DerivationType)> {
        self.neighbors(col, Direction::Outgoing)
    }

    fn neighbors(&self, col: &ColumnRef, dir: Direction) -> Vec<(ColumnRef, DerivationType)> {
        let Some(&idx) = self.node_index.get(col) else {
            return Vec::new();
        };

        // petgraph walks adjacency newest-first; report in insertion order
        let mut edges: Vec<_> = self.graph.edges_directed(idx, dir).collect();
        edges.sort_by_key(|e| e.id());

        edges
            .into_iter()
            .map(|e| {
                let other = match dir {
                    Direction::Incoming => e.source(),
                    Direction::Outgoing => e.target(),
                };
                (self.graph[other].clone(), e.weight().derivation)
            })
            .collect()
    }

    /// Columns with no incoming edges (the projection's inputs).
    pub fn source_columns(&self) -> Vec<ColumnRef> {
        self.columns_without(Direction::Incoming)
    }

    /// Columns with no outgoing edges (the projection's outputs).
    pub fn terminal_columns(&self) -> Vec<ColumnRef> {
        self.columns_without(Direction::Outgoing)
    }

    fn columns_without(&self, dir: Direction) -> Vec<ColumnRef> {
        self.graph
            .node_indices()
            .filter(|&idx| self.graph.neighbors_directed(idx, dir).next().is_none())
            .map(|idx| self.graph[idx].clone())
            .collect()
    }

    // -------------------------------------------------------------------------
    // Serialization
    // -------------------------------------------------------------------------

    /// Convert to the ordered `nodes` / `edges` / `warnings` form.
    pub fn to_serializable(&self) -> SerializedLineage {
        SerializedLineage {
            nodes: self.nodes().map(|n| n.to_string()).collect(),
            edges: self
                .edges()
                .map(|e| SerializedEdge {
                    from: e.from.to_string(),
                    to: e.to.to_string(),
                    derivation: e.derivation,
                    expr: e.expression.clone(),
                })
                .collect(),
            warnings: self.warnings.clone(),
        }
    }

    /// Compact JSON, byte-identical for identical graphs.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(&self.to_serializable())
    }

    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(&self.to_serializable())
    }
}

/// Plain-text report listing nodes, edges and warnings.
impl std::fmt::Display for LineageGraph {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Nodes:")?;
        for node in self.nodes() {
            writeln!(f, "- {}", node)?;
        }

        writeln!(f)?;
        writeln!(f, "Edges:")?;
        for edge in self.edges() {
            writeln!(f, "- {}", edge)?;
        }

        writeln!(f)?;
        write!(f, "Warnings:")?;
        for warning in &self.warnings {
            write!(f, "\n- {}", warning)?;
        }
        Ok(())
    }
}

// =============================================================================
// Tests
// =============================================================================
