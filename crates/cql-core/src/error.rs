//! Unified error model for identifier handling and configuration
use thiserror::Error;

/// Result alias used across `cql-core`
pub type CqlResult<T> = Result<T, CqlError>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CqlError {
    /// Text is neither a legal quoted nor a legal unquoted CQL identifier
    #[error("given string [{0}] is not a valid quoted or unquoted identifier")]
    InvalidIdentifier(String),

    /// Text is not a legal keyspace name
    #[error("given string [{0}] is not a valid keyspace name")]
    InvalidKeyspace(String),

    #[error("CONFIG/{0}")]
    Config(String),
}
