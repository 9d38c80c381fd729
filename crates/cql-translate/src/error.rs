//! Data-access errors produced by translation.
//!
//! Every [`DataAccessError`] keeps the originating [`DriverFailure`] as its
//! `source()`, carries a message, and has an [`ErrorKind`] with the payload
//! that kind needs. Kinds roll up into driver-independent
//! [`DataAccessCategory`] values.

use crate::signal::{ConsistencyLevel, DriverFailure, WriteType};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use thiserror::Error;

/// Classified error kind with its payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ErrorKind {
    Authentication {
        #[serde(skip_serializing_if = "Option::is_none")]
        host: Option<String>,
    },
    Internal,
    TypeMismatch,
    ConnectionFailure {
        host_errors: BTreeMap<String, String>,
    },
    ReadTimeout {
        consistency: ConsistencyLevel,
        received: u32,
        required: u32,
        data_retrieved: bool,
    },
    WriteTimeout {
        consistency: ConsistencyLevel,
        received: u32,
        required: u32,
        write_type: WriteType,
    },
    Truncate,
    InsufficientReplicas {
        consistency: ConsistencyLevel,
        required: u32,
        alive: u32,
    },
    TableExists {
        table: String,
    },
    KeyspaceExists {
        keyspace: String,
    },
    InvalidConfigurationInQuery,
    InvalidQuery,
    QuerySyntax,
    Unauthorized,
    TraceRetrieval,
    Uncategorized,
}

/// Coarse grouping of error kinds, independent of the driver
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DataAccessCategory {
    PermissionDenied,
    ResourceFailure,
    TypeMismatch,
    QueryTimeout,
    /// May succeed if retried without changes
    Transient,
    NonTransient,
    InvalidApiUsage,
    Uncategorized,
}

impl DataAccessCategory {
    pub fn is_transient(&self) -> bool {
        matches!(self, DataAccessCategory::QueryTimeout | DataAccessCategory::Transient)
    }
}

impl fmt::Display for DataAccessCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DataAccessCategory::PermissionDenied => "PERMISSION_DENIED",
            DataAccessCategory::ResourceFailure => "RESOURCE_FAILURE",
            DataAccessCategory::TypeMismatch => "TYPE_MISMATCH",
            DataAccessCategory::QueryTimeout => "QUERY_TIMEOUT",
            DataAccessCategory::Transient => "TRANSIENT",
            DataAccessCategory::NonTransient => "NON_TRANSIENT",
            DataAccessCategory::InvalidApiUsage => "INVALID_API_USAGE",
            DataAccessCategory::Uncategorized => "UNCATEGORIZED",
        };
        f.write_str(name)
    }
}

impl ErrorKind {
    /// Get the category this kind belongs to
    pub fn category(&self) -> DataAccessCategory {
        match self {
            ErrorKind::Authentication { .. } | ErrorKind::Unauthorized => {
                DataAccessCategory::PermissionDenied
            }
            ErrorKind::Internal | ErrorKind::ConnectionFailure { .. } => {
                DataAccessCategory::ResourceFailure
            }
            ErrorKind::TypeMismatch => DataAccessCategory::TypeMismatch,
            ErrorKind::ReadTimeout { .. } | ErrorKind::WriteTimeout { .. } => {
                DataAccessCategory::QueryTimeout
            }
            ErrorKind::Truncate
            | ErrorKind::InsufficientReplicas { .. }
            | ErrorKind::TraceRetrieval => DataAccessCategory::Transient,
            ErrorKind::TableExists { .. } | ErrorKind::KeyspaceExists { .. } => {
                DataAccessCategory::NonTransient
            }
            ErrorKind::InvalidConfigurationInQuery
            | ErrorKind::InvalidQuery
            | ErrorKind::QuerySyntax => DataAccessCategory::InvalidApiUsage,
            ErrorKind::Uncategorized => DataAccessCategory::Uncategorized,
        }
    }

    /// Name of the schema element that already exists
    pub fn element_name(&self) -> Option<&str> {
        match self {
            ErrorKind::TableExists { table } => Some(table),
            ErrorKind::KeyspaceExists { keyspace } => Some(keyspace),
            _ => None,
        }
    }

    /// Short snake_case name, as used in logs and reports
    pub fn name(&self) -> &'static str {
        match self {
            ErrorKind::Authentication { .. } => "authentication",
            ErrorKind::Internal => "internal",
            ErrorKind::TypeMismatch => "type_mismatch",
            ErrorKind::ConnectionFailure { .. } => "connection_failure",
            ErrorKind::ReadTimeout { .. } => "read_timeout",
            ErrorKind::WriteTimeout { .. } => "write_timeout",
            ErrorKind::Truncate => "truncate",
            ErrorKind::InsufficientReplicas { .. } => "insufficient_replicas",
            ErrorKind::TableExists { .. } => "table_exists",
            ErrorKind::KeyspaceExists { .. } => "keyspace_exists",
            ErrorKind::InvalidConfigurationInQuery => "invalid_configuration_in_query",
            ErrorKind::InvalidQuery => "invalid_query",
            ErrorKind::QuerySyntax => "query_syntax",
            ErrorKind::Unauthorized => "unauthorized",
            ErrorKind::TraceRetrieval => "trace_retrieval",
            ErrorKind::Uncategorized => "uncategorized",
        }
    }
}

/// A driver failure translated into a data-access error
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct DataAccessError {
    kind: ErrorKind,
    message: String,
    #[source]
    cause: DriverFailure,
}

impl DataAccessError {
    pub fn new(kind: ErrorKind, message: impl Into<String>, cause: DriverFailure) -> Self {
        Self {
            kind,
            message: message.into(),
            cause,
        }
    }

    pub fn kind(&self) -> &ErrorKind {
        &self.kind
    }

    pub fn category(&self) -> DataAccessCategory {
        self.kind.category()
    }

    pub fn is_transient(&self) -> bool {
        self.category().is_transient()
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// The original driver failure
    pub fn cause(&self) -> &DriverFailure {
        &self.cause
    }

    pub fn into_cause(self) -> DriverFailure {
        self.cause
    }

    /// Build a serializable summary of this error
    pub fn report(&self) -> ErrorReport {
        ErrorReport {
            kind: self.kind.clone(),
            category: self.category(),
            message: self.message.clone(),
            cause: self.cause.message.clone(),
            driver_kind: self.cause.kind().to_string(),
        }
    }
}

/// JSON-friendly summary of a [`DataAccessError`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorReport {
    #[serde(flatten)]
    pub kind: ErrorKind,
    pub category: DataAccessCategory,
    pub message: String,
    pub cause: String,
    pub driver_kind: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::signal::DriverSignal;
    use std::error::Error;

    #[test]
    fn test_categories() {
        assert_eq!(ErrorKind::QuerySyntax.category(), DataAccessCategory::InvalidApiUsage);
        assert_eq!(
            ErrorKind::TableExists { table: "t".into() }.category(),
            DataAccessCategory::NonTransient
        );
        assert!(ErrorKind::Truncate.category().is_transient());
        assert!(!ErrorKind::Unauthorized.category().is_transient());
    }

    #[test]
    fn test_source_is_driver_failure() {
        let cause = DriverFailure::new(DriverSignal::Syntax, "line 1:0 no viable alternative");
        let error = DataAccessError::new(ErrorKind::QuerySyntax, "bad statement", cause.clone());

        assert_eq!(error.to_string(), "bad statement");
        let source = error.source().unwrap();
        assert_eq!(source.to_string(), "line 1:0 no viable alternative");
        assert_eq!(error.into_cause(), cause);
    }

    #[test]
    fn test_report_serialization() {
        let cause = DriverFailure::already_exists("shop", "orders");
        let error = DataAccessError::new(
            ErrorKind::TableExists { table: "orders".into() },
            cause.message.clone(),
            cause,
        );

        let json = serde_json::to_value(error.report()).unwrap();
        assert_eq!(json["type"], "table_exists");
        assert_eq!(json["table"], "orders");
        assert_eq!(json["category"], "NON_TRANSIENT");
        assert_eq!(json["driver_kind"], "already_exists");
    }
}
