//! Quote escaping for CQL string literals and quoted identifiers.
//!
//! None of these run implicitly; identifier rendering never escapes its input.

/// Double every single quote, for use inside a `'...'` string literal
pub fn escape_single_quotes(text: &str) -> String {
    text.replace('\'', "''")
}

/// Collapse doubled single quotes back to one
pub fn unescape_single_quotes(text: &str) -> String {
    text.replace("''", "'")
}

/// Double every double quote, for use inside a `"..."` identifier
pub fn escape_double_quotes(text: &str) -> String {
    text.replace('"', "\"\"")
}

/// Collapse doubled double quotes back to one
pub fn unescape_double_quotes(text: &str) -> String {
    text.replace("\"\"", "\"")
}

/// Render `text` as a CQL string literal: `it's` becomes `'it''s'`
pub fn single_quote_literal(text: &str) -> String {
    format!("'{}'", escape_single_quotes(text))
}

/// Wrap `text` in double quotes, escaping embedded double quotes
pub fn double_quote(text: &str) -> String {
    format!("\"{}\"", escape_double_quotes(text))
}
