//! Column-level lineage for a single projection.
//!
//! Given a source table, a target table and an ordered mapping from target
//! column to defining expression, derive which source columns feed which
//! target columns and how. Expressions are analysed as text, not parsed:
//! literals are blanked, references are pattern-matched, and a fixed set of
//! call markers decides the [`DerivationType`].
//!
//! # Example
//!
//! ```
//! use column_lineage::lineage::{build_projection_lineage, DerivationType};
//!
//! let graph = build_projection_lineage("orders", "result", [("total", "sum(amount)")]);
//! let edge = graph.edges().next().unwrap();
//! assert_eq!(edge.from.to_string(), "orders.amount");
//! assert_eq!(edge.derivation, DerivationType::Agg);
//! ```

pub mod builder;
pub mod classify;
pub mod extract;
pub mod graph;
pub mod keywords;
pub mod projection;
pub mod sanitize;
pub mod types;

pub use builder::{build_projection_lineage, LineageBuilder};
pub use classify::{classify, detect_warnings, LineageWarning};
pub use extract::{extract_column_names, extract_column_refs};
pub use graph::{LineageGraph, SerializedEdge, SerializedLineage};
pub use keywords::is_reserved;
pub use projection::Projection;
pub use sanitize::SanitizedExpr;
pub use types::{ColumnRef, DerivationType, LineageEdge, CONST_TABLE};
