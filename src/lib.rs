//! # Column Lineage
//!
//! Column-level data lineage for SQL-style projections.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │     Projection (source table, target table,             │
//! │     ordered target column → expression)                 │
//! └─────────────────────────────────────────────────────────┘
//!                          │
//!                          ▼ [sanitize + extract]
//! ┌─────────────────────────────────────────────────────────┐
//! │           Column references per expression              │
//! └─────────────────────────────────────────────────────────┘
//!                          │
//!                          ▼ [classify + warn]
//! ┌─────────────────────────────────────────────────────────┐
//! │     LineageGraph (nodes, typed edges, warnings)         │
//! └─────────────────────────────────────────────────────────┘
//!                          │
//!                          ▼ [serialize]
//! ┌─────────────────────────────────────────────────────────┐
//! │              JSON / text report                         │
//! └─────────────────────────────────────────────────────────┘
//! ```

pub mod config;
pub mod lineage;

/// Re-exports for convenient usage.
pub mod prelude {
    pub use crate::lineage::{
        build_projection_lineage, extract_column_refs, ColumnRef, DerivationType, LineageBuilder,
        LineageEdge, LineageGraph, LineageWarning, Projection,
    };
}

// Also export at crate root for convenience
pub use lineage::{
    build_projection_lineage, ColumnRef, DerivationType, LineageEdge, LineageGraph, Projection,
};
