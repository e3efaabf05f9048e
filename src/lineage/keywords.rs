//! Reserved words that are never treated as column references.

/// Function names the extractor must not mistake for columns.
pub const RESERVED_FUNCTIONS: &[&str] = &[
    "sum", "max", "min", "count", "avg", "dictget", "arrayjoin", "toint64", "touint64",
];

/// Control keywords the extractor must not mistake for columns.
pub const RESERVED_KEYWORDS: &[&str] = &[
    "if", "case", "when", "then", "else", "end", "and", "or", "not", "null", "as", "final",
    "true", "false",
];

/// Case-insensitive exact match against the reserved-word table.
pub fn is_reserved(token: &str) -> bool {
    RESERVED_FUNCTIONS
        .iter()
        .chain(RESERVED_KEYWORDS)
        .any(|word| word.eq_ignore_ascii_case(token))
}
