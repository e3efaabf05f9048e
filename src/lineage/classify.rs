//! Derivation-type classification and advisory warnings.
//!
//! Both work on the lower-cased sanitized text, so quoted literals never
//! trigger a match. Classification rules are tried in priority order and
//! the first match wins:
//!
//! 1. `dictget(` → [`DerivationType::ExternalLineage`]
//! 2. `arrayjoin(` → [`DerivationType::DerivedArray`]
//! 3. any aggregate call → [`DerivationType::Agg`]
//! 4. the expression is exactly the target column name → [`DerivationType::Direct`]
//! 5. otherwise → [`DerivationType::Derived`]

use std::sync::LazyLock;

use regex::Regex;

use super::sanitize::SanitizedExpr;
use super::types::{ColumnRef, DerivationType};

const DICT_GET_CALL: &str = "dictget(";
const ARRAY_JOIN_CALL: &str = "arrayjoin(";
const AGGREGATE_CALLS: &[&str] = &["sum(", "max(", "min(", "count(", "avg("];

/// `final` as a whole word, not part of a longer identifier.
static FINAL_KEYWORD: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\bfinal\b").unwrap());

/// Assign a derivation type to an expression with at least one input.
pub fn classify(expr: &SanitizedExpr, inputs: &[ColumnRef], target_column: &str) -> DerivationType {
    let lower = expr.lower();

    if lower.contains(DICT_GET_CALL) {
        return DerivationType::ExternalLineage;
    }
    if lower.contains(ARRAY_JOIN_CALL) {
        return DerivationType::DerivedArray;
    }
    if AGGREGATE_CALLS.iter().any(|call| lower.contains(call)) {
        return DerivationType::Agg;
    }
    if is_passthrough(lower, inputs, target_column) {
        return DerivationType::Direct;
    }
    DerivationType::Derived
}

/// The whole expression is the bare target column name and nothing else.
fn is_passthrough(lower: &str, inputs: &[ColumnRef], target_column: &str) -> bool {
    match inputs {
        [only] => {
            only.column.eq_ignore_ascii_case(target_column)
                && lower == target_column.to_lowercase()
        }
        _ => false,
    }
}

/// Constructs whose true lineage the heuristics cannot fully resolve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LineageWarning {
    /// Value comes from an external dictionary lookup
    DictGet,
    /// A storage-engine `FINAL` modifier that lineage ignores
    FinalIgnored,
    /// Row-multiplying array expansion
    ArrayJoin,
}

impl LineageWarning {
    pub const ALL: [LineageWarning; 3] = [
        LineageWarning::DictGet,
        LineageWarning::FinalIgnored,
        LineageWarning::ArrayJoin,
    ];

    pub fn message(&self) -> &'static str {
        match self {
            LineageWarning::DictGet => "dictGet detected: mark as EXTERNAL_LINEAGE",
            LineageWarning::FinalIgnored => "FINAL ignored for lineage",
            LineageWarning::ArrayJoin => "ARRAY JOIN detected in expression",
        }
    }

    fn applies_to(&self, expr: &SanitizedExpr) -> bool {
        match self {
            LineageWarning::DictGet => expr.lower().contains(DICT_GET_CALL),
            LineageWarning::FinalIgnored => FINAL_KEYWORD.is_match(expr.lower()),
            LineageWarning::ArrayJoin => expr.lower().contains(ARRAY_JOIN_CALL),
        }
    }
}

impl std::fmt::Display for LineageWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.message())
    }
}

/// Warnings raised by one expression, in a fixed order.
pub fn detect_warnings(expr: &SanitizedExpr) -> Vec<LineageWarning> {
    LineageWarning::ALL
        .into_iter()
        .filter(|w| w.applies_to(expr))
        .collect()
}
