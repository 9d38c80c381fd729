//! CQL Core: identifiers, keywords, escaping and configuration
//!
//! Stateless building blocks shared by everything that writes CQL text:
//! identifier classification and rendering, the reserved keyword table,
//! keyspace names, string/identifier escaping and the YAML configuration.
//!
//! # Example
//!
//! ```
//! use cql_core::CqlIdentifier;
//!
//! let column = CqlIdentifier::new("UserName").unwrap();
//! assert_eq!(column.to_cql(), "username");
//!
//! let keyword = CqlIdentifier::new("Order").unwrap();
//! assert_eq!(keyword.to_cql(), "\"Order\"");
//! assert_eq!(keyword.unquoted(), "Order");
//! ```

pub mod config;
pub mod error;
pub mod escape;
pub mod identifier;
pub mod keyspace;
pub mod keywords;

pub use config::{CqlConfig, NamingConfig, TranslationConfig};
pub use error::{CqlError, CqlResult};
pub use escape::{
    double_quote, escape_double_quotes, escape_single_quotes, single_quote_literal,
    unescape_double_quotes, unescape_single_quotes,
};
pub use identifier::{is_quoted_identifier, is_unquoted_identifier, CqlIdentifier};
pub use keyspace::{is_keyspace_name, KeyspaceIdentifier};
pub use keywords::{is_reserved_keyword, reserved_keywords};

/// Crate version
pub const CQL_CORE_VERSION: &str = env!("CARGO_PKG_VERSION");
