//! Core lineage types: column references, derivation types and edges.

use serde::{Deserialize, Serialize};

/// Pseudo-table that roots literal/constant expressions as source nodes.
pub const CONST_TABLE: &str = "__const__";

/// A reference to a specific column in a specific table.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ColumnRef {
    /// Table name
    pub table: String,
    /// Column name
    pub column: String,
}

impl ColumnRef {
    pub fn new(table: impl Into<String>, column: impl Into<String>) -> Self {
        Self {
            table: table.into(),
            column: column.into(),
        }
    }

    /// A node under the `__const__` pseudo-table holding a literal expression.
    pub fn constant(literal: impl Into<String>) -> Self {
        Self::new(CONST_TABLE, literal)
    }

    /// Parse from "table.column" format.
    /// Returns None for invalid formats including empty table or column.
    pub fn parse(s: &str) -> Option<Self> {
        match s.split_once('.') {
            Some((table, column)) if !table.is_empty() && !column.is_empty() => {
                Some(Self::new(table, column))
            }
            _ => None,
        }
    }

    pub fn is_constant(&self) -> bool {
        self.table == CONST_TABLE
    }
}

impl std::fmt::Display for ColumnRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{}", self.table, self.column)
    }
}

/// How a target column's value is computed from its inputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DerivationType {
    /// Pure passthrough, no transformation
    Direct,

    /// Scalar transformation of one or more inputs
    Derived,

    /// Aggregate function applied
    Agg,

    /// Produced via array explosion
    DerivedArray,

    /// Looked up from an external dimension/dictionary
    ExternalLineage,

    /// No column inputs found; the value is a literal
    Unknown,
}

impl DerivationType {
    pub const ALL: [DerivationType; 6] = [
        DerivationType::Direct,
        DerivationType::Derived,
        DerivationType::Agg,
        DerivationType::DerivedArray,
        DerivationType::ExternalLineage,
        DerivationType::Unknown,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            DerivationType::Direct => "DIRECT",
            DerivationType::Derived => "DERIVED",
            DerivationType::Agg => "AGG",
            DerivationType::DerivedArray => "DERIVED_ARRAY",
            DerivationType::ExternalLineage => "EXTERNAL_LINEAGE",
            DerivationType::Unknown => "UNKNOWN",
        }
    }
}

impl std::fmt::Display for DerivationType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A dependency from one column to another.
///
/// Identity is the full tuple: the same column pair with a different
/// derivation type or expression text is a distinct edge.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LineageEdge {
    pub from: ColumnRef,
    pub to: ColumnRef,
    pub derivation: DerivationType,
    /// Trimmed source expression that defines `to`
    pub expression: String,
}

impl LineageEdge {
    pub fn new(
        from: ColumnRef,
        to: ColumnRef,
        derivation: DerivationType,
        expression: impl Into<String>,
    ) -> Self {
        Self {
            from,
            to,
            derivation,
            expression: expression.into(),
        }
    }
}

impl std::fmt::Display for LineageEdge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} -> {} [{}] {}",
            self.from, self.to, self.derivation, self.expression
        )
    }
}
