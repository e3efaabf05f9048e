//! Projection lineage orchestration.
//!
//! For every `(target column, expression)` pair, in order:
//!
//! ```text
//! expression → sanitize → warnings
//!                       → extract refs ─┬─ none → __const__ edge (UNKNOWN)
//!                                       └─ some → classify → one edge per input
//! ```

use tracing::{debug, trace};

use super::classify::{classify, detect_warnings};
use super::extract::extract_from_sanitized;
use super::graph::LineageGraph;
use super::sanitize::SanitizedExpr;
use super::types::{ColumnRef, DerivationType, LineageEdge};

/// Accumulates edges and warnings, then hands out the finished graph.
#[derive(Debug, Clone)]
pub struct LineageBuilder {
    graph: LineageGraph,
}

impl LineageBuilder {
    pub fn new() -> Self {
        Self {
            graph: LineageGraph::new(),
        }
    }

    pub fn add(
        &mut self,
        from: ColumnRef,
        to: ColumnRef,
        derivation: DerivationType,
        expression: impl Into<String>,
    ) -> &mut Self {
        self.graph
            .add_edge(LineageEdge::new(from, to, derivation, expression));
        self
    }

    pub fn warn(&mut self, warning: impl Into<String>) -> &mut Self {
        self.graph.add_warning(warning);
        self
    }

    /// Add the lineage of one target column defined by `expression`.
    pub fn add_column(
        &mut self,
        source_table: &str,
        target_table: &str,
        target_column: &str,
        expression: &str,
    ) -> &mut Self {
        let expression = expression.trim();
        let sanitized = SanitizedExpr::new(expression);
        let target = ColumnRef::new(target_table, target_column);

        for warning in detect_warnings(&sanitized) {
            debug!(column = %target, %warning, "lineage warning");
            self.warn(warning.message());
        }

        let inputs = extract_from_sanitized(&sanitized, source_table);

        if inputs.is_empty() {
            trace!(column = %target, expression, "no column inputs, treating as constant");
            return self.add(
                ColumnRef::constant(expression),
                target,
                DerivationType::Unknown,
                expression,
            );
        }

        let derivation = classify(&sanitized, &inputs, target_column);
        debug!(
            column = %target,
            %derivation,
            inputs = inputs.len(),
            "classified projection column"
        );

        for input in inputs {
            self.add(input, target.clone(), derivation, expression);
        }
        self
    }

    pub fn build(self) -> LineageGraph {
        self.graph
    }
}

impl Default for LineageBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Compute column lineage for one projection from `source_table` into
/// `target_table`.
///
/// Unqualified names bind to `source_table`. The projection's iteration
/// order determines node and edge order in the result. Never fails:
/// unrecognised text degrades to `DERIVED` or to a constant edge.
pub fn build_projection_lineage<I, K, V>(
    source_table: &str,
    target_table: &str,
    projection: I,
) -> LineageGraph
where
    I: IntoIterator<Item = (K, V)>,
    K: AsRef<str>,
    V: AsRef<str>,
{
    let mut builder = LineageBuilder::new();
    for (column, expression) in projection {
        builder.add_column(source_table, target_table, column.as_ref(), expression.as_ref());
    }

    let graph = builder.build();
    debug!(
        source = source_table,
        target = target_table,
        nodes = graph.node_count(),
        edges = graph.edge_count(),
        warnings = graph.warnings().len(),
        "built projection lineage"
    );
    graph
}
