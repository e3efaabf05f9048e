//! Expression sanitization.
//!
//! Quoted literals are blanked out before any pattern matching so that text
//! inside string arguments (a dictionary name, a key that happens to read
//! `final`) is never mistaken for code.

use regex::Regex;
use std::sync::LazyLock;

/// A single- or double-quoted literal span, quotes included.
static STRING_LITERAL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"'[^']*'|"[^"]*""#).unwrap());

/// An expression with its literals removed, in original and lower case.
///
/// Computed once per expression and shared by warning detection,
/// reference extraction and classification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SanitizedExpr {
    text: String,
    lower: String,
}

impl SanitizedExpr {
    pub fn new(expression: &str) -> Self {
        let text = sanitize(expression);
        let lower = text.to_lowercase();
        Self { text, lower }
    }

    /// Sanitized text with the original casing.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Lower-cased sanitized text.
    pub fn lower(&self) -> &str {
        &self.lower
    }

    /// Case-insensitive substring test against the sanitized text.
    pub fn contains(&self, needle: &str) -> bool {
        self.lower.contains(&needle.to_lowercase())
    }
}

/// Replace each quoted literal with a single blank and strip backticks.
pub fn sanitize(expression: &str) -> String {
    STRING_LITERAL
        .replace_all(expression, " ")
        .replace('`', "")
}
