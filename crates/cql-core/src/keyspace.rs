//! Keyspace names.
//!
//! Keyspaces are never quoted: a name is 1 to 48 word characters and is
//! stored lower-cased.

use crate::error::{CqlError, CqlResult};
use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

lazy_static! {
    static ref KEYSPACE_NAME: Regex = Regex::new(r"^[a-zA-Z0-9_]{1,48}$").unwrap();
}

/// True if `text` is a legal keyspace name
pub fn is_keyspace_name(text: &str) -> bool {
    KEYSPACE_NAME.is_match(text)
}

/// A validated, lower-cased keyspace name
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct KeyspaceIdentifier(String);

impl KeyspaceIdentifier {
    pub fn new(text: &str) -> CqlResult<Self> {
        if !is_keyspace_name(text) {
            tracing::trace!(text, "rejected keyspace name");
            return Err(CqlError::InvalidKeyspace(text.to_string()));
        }
        Ok(Self(text.to_lowercase()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for KeyspaceIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for KeyspaceIdentifier {
    type Err = CqlError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for KeyspaceIdentifier {
    type Error = CqlError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(&value)
    }
}

impl From<KeyspaceIdentifier> for String {
    fn from(keyspace: KeyspaceIdentifier) -> Self {
        keyspace.0
    }
}
