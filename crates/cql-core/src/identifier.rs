//! CQL identifiers for tables, columns and user types.
//!
//! An identifier is either unquoted (case-insensitive, stored lower-cased) or
//! quoted (case-sensitive, wrapped in double quotes). Reserved keywords and
//! text containing escaped double quotes (`""`) are always quoted.

use crate::error::{CqlError, CqlResult};
use crate::keywords::is_reserved_keyword;
use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

lazy_static! {
    /// A letter followed by letters, digits or underscores
    static ref UNQUOTED_IDENTIFIER: Regex = Regex::new(r"^[a-zA-Z][a-zA-Z0-9_]*$").unwrap();

    /// A letter followed by word runs that contain at least one `""`
    static ref QUOTED_IDENTIFIER: Regex =
        Regex::new(r#"^[a-zA-Z](?:[a-zA-Z0-9_]*(?:"")+[a-zA-Z0-9_]*)+$"#).unwrap();
}

/// True if `text` can appear in CQL without quotes
pub fn is_unquoted_identifier(text: &str) -> bool {
    UNQUOTED_IDENTIFIER.is_match(text) && !is_reserved_keyword(text)
}

/// True if `text` must be quoted to appear in CQL
pub fn is_quoted_identifier(text: &str) -> bool {
    QUOTED_IDENTIFIER.is_match(text) || is_reserved_keyword(text)
}

/// A rendered CQL identifier
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CqlIdentifier {
    rendered: String,
    unquoted: String,
    quoted: bool,
}

impl CqlIdentifier {
    /// Render `text`, quoting only when the CQL grammar requires it
    pub fn new(text: &str) -> CqlResult<Self> {
        Self::render(text, false)
    }

    /// Render `text` as a quoted, case-sensitive identifier
    pub fn quoted(text: &str) -> CqlResult<Self> {
        Self::render(text, true)
    }

    /// Render `text` as an identifier.
    ///
    /// With `force_quote`, any non-blank text is wrapped in double quotes with
    /// its case preserved. Otherwise text that needs quoting is quoted, legal
    /// unquoted text is lower-cased, and anything else is rejected.
    pub fn render(text: &str, force_quote: bool) -> CqlResult<Self> {
        if text.trim().is_empty() {
            tracing::trace!(text, "rejected blank identifier");
            return Err(CqlError::InvalidIdentifier(text.to_string()));
        }

        if force_quote || is_quoted_identifier(text) {
            return Ok(Self {
                rendered: format!("\"{}\"", text),
                unquoted: text.to_string(),
                quoted: true,
            });
        }

        if is_unquoted_identifier(text) {
            let lower = text.to_lowercase();
            return Ok(Self {
                rendered: lower.clone(),
                unquoted: lower,
                quoted: false,
            });
        }

        tracing::trace!(text, "rejected identifier");
        Err(CqlError::InvalidIdentifier(text.to_string()))
    }

    /// Parse an identifier as it appears in CQL text.
    ///
    /// `"Name"` yields a quoted identifier over `Name`; anything else is
    /// rendered as with [`CqlIdentifier::new`].
    pub fn parse_cql(text: &str) -> CqlResult<Self> {
        match text
            .strip_prefix('"')
            .and_then(|s| s.strip_suffix('"'))
        {
            Some(inner) if !inner.is_empty() => Self::quoted(inner),
            _ => Self::new(text),
        }
    }

    /// The identifier as written in CQL
    pub fn to_cql(&self) -> &str {
        &self.rendered
    }

    /// Append the CQL form to a statement buffer
    pub fn write_cql(&self, buf: &mut String) {
        buf.push_str(&self.rendered);
    }

    /// The identifier without surrounding quotes.
    ///
    /// For unquoted identifiers this is the lower-cased form; for quoted ones
    /// it is the original text.
    pub fn unquoted(&self) -> &str {
        &self.unquoted
    }

    pub fn is_quoted(&self) -> bool {
        self.quoted
    }
}

impl PartialEq for CqlIdentifier {
    fn eq(&self, other: &Self) -> bool {
        self.quoted == other.quoted && self.rendered == other.rendered
    }
}

impl Eq for CqlIdentifier {}

impl Hash for CqlIdentifier {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.quoted.hash(state);
        self.rendered.hash(state);
    }
}

impl Ord for CqlIdentifier {
    /// Unquoted identifiers sort before quoted ones
    fn cmp(&self, other: &Self) -> Ordering {
        self.quoted
            .cmp(&other.quoted)
            .then_with(|| self.rendered.cmp(&other.rendered))
    }
}

impl PartialOrd for CqlIdentifier {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for CqlIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.rendered)
    }
}

impl FromStr for CqlIdentifier {
    type Err = CqlError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<&str> for CqlIdentifier {
    type Error = CqlError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<String> for CqlIdentifier {
    type Error = CqlError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse_cql(&value)
    }
}

impl From<CqlIdentifier> for String {
    fn from(identifier: CqlIdentifier) -> Self {
        identifier.rendered
    }
}

impl AsRef<str> for CqlIdentifier {
    fn as_ref(&self) -> &str {
        &self.rendered
    }
}
