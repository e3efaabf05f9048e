//! Column reference extraction from expression text.
//!
//! This is a heuristic scan, not a parser: the sanitized expression is
//! matched for `table.column` pairs first, those spans are blanked, and the
//! remaining bare identifiers are bound to a default table. Reserved words
//! (function names and control keywords) are filtered out.

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;

use super::keywords::is_reserved;
use super::sanitize::SanitizedExpr;
use super::types::ColumnRef;

/// `table.column` where both halves are identifiers.
static QUALIFIED: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b([\p{L}_][\p{L}\p{M}\p{N}_]*)\.([\p{L}_][\p{L}\p{M}\p{N}_]*)\b").unwrap()
});

/// A standalone identifier. Identifiers start with a letter or underscore,
/// so numeric literals (`1`, `2.5`, `1e5`) never match. Letters are Unicode
/// letters, matching the Unicode-aware `\b`.
static IDENTIFIER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b[\p{L}_][\p{L}\p{M}\p{N}_]*\b").unwrap());

/// Table bound to unqualified names when only column names are wanted.
const PLACEHOLDER_TABLE: &str = "__unknown__";

/// Extract all unique column references from an expression.
///
/// Unqualified names are bound to `default_table`. Results keep first-seen
/// order and are deduplicated structurally.
pub fn extract_column_refs(expression: &str, default_table: &str) -> Vec<ColumnRef> {
    extract_from_sanitized(&SanitizedExpr::new(expression), default_table)
}

/// Same as [`extract_column_refs`] for an already sanitized expression.
pub fn extract_from_sanitized(expr: &SanitizedExpr, default_table: &str) -> Vec<ColumnRef> {
    let text = expr.text();
    let mut refs = Vec::new();

    for caps in QUALIFIED.captures_iter(text) {
        let table = &caps[1];
        let column = &caps[2];
        // A reserved word on either side drops the whole pair
        if is_reserved(table) || is_reserved(column) {
            continue;
        }
        refs.push(ColumnRef::new(table, column));
    }

    let remainder = QUALIFIED.replace_all(text, " ");
    for token in IDENTIFIER.find_iter(&remainder) {
        let name = token.as_str();
        if is_reserved(name) {
            continue;
        }
        refs.push(ColumnRef::new(default_table, name));
    }

    let mut seen = HashSet::new();
    refs.retain(|r| seen.insert(r.clone()));
    refs
}

/// Extract the unique column names an expression reads, ignoring tables.
pub fn extract_column_names(expression: &str) -> Vec<String> {
    let mut seen = HashSet::new();
    extract_column_refs(expression, PLACEHOLDER_TABLE)
        .into_iter()
        .map(|r| r.column)
        .filter(|name| seen.insert(name.clone()))
        .collect()
}
