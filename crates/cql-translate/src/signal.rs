//! Driver failures as reported by the Cassandra client.
//!
//! A [`DriverFailure`] pairs a [`DriverSignal`] (the failure kind plus any
//! kind-specific payload) with the driver's message. Signal kinds form a
//! shallow hierarchy, see [`SignalKind::parent`].

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use thiserror::Error;

/// Consistency level reported with timeout and availability failures
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ConsistencyLevel {
    Any,
    One,
    Two,
    Three,
    Quorum,
    All,
    LocalQuorum,
    EachQuorum,
    Serial,
    LocalSerial,
    LocalOne,
}

/// The kind of write that timed out
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum WriteType {
    Simple,
    Batch,
    UnloggedBatch,
    Counter,
    BatchLog,
    Cas,
    View,
    Cdc,
}

/// A failure signal with its kind-specific payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DriverSignal {
    /// Credentials were rejected
    Authentication {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        host: Option<String>,
    },

    /// Bug or unexpected state inside the driver
    DriverInternal,

    /// A value did not match the CQL column type
    InvalidType,

    /// No coordinator could be reached
    NoHostAvailable {
        /// Error message per host address
        #[serde(default)]
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

    /// Not enough live replicas for the requested consistency
    Unavailable {
        consistency: ConsistencyLevel,
        required: u32,
        alive: u32,
    },

    /// Schema element already exists; `table` is empty for keyspaces
    AlreadyExists {
        #[serde(default)]
        keyspace: String,
        #[serde(default)]
        table: String,
    },

    /// Invalid configuration in a schema statement
    InvalidConfigurationInQuery,

    InvalidQuery,

    Syntax,

    Unauthorized,

    /// Query trace could not be fetched
    TraceRetrieval,

    /// Anything the driver reports that is not listed above
    Unrecognized { driver_kind: String },
}

/// Field-less view of [`DriverSignal`] used for rule dispatch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SignalKind {
    Authentication,
    DriverInternal,
    InvalidType,
    NoHostAvailable,
    ReadTimeout,
    WriteTimeout,
    Truncate,
    Unavailable,
    AlreadyExists,
    InvalidConfigurationInQuery,
    InvalidQuery,
    Syntax,
    Unauthorized,
    TraceRetrieval,
    Unrecognized,
}

impl SignalKind {
    /// The more general kind this one specializes, if any
    pub fn parent(self) -> Option<SignalKind> {
        match self {
            SignalKind::InvalidConfigurationInQuery => Some(SignalKind::InvalidQuery),
            _ => None,
        }
    }

    /// True if `self` is `ancestor` or specializes it
    pub fn is_a(self, ancestor: SignalKind) -> bool {
        let mut current = Some(self);
        while let Some(kind) = current {
            if kind == ancestor {
                return true;
            }
            current = kind.parent();
        }
        false
    }
}

impl DriverSignal {
    pub fn kind(&self) -> SignalKind {
        match self {
            DriverSignal::Authentication { .. } => SignalKind::Authentication,
            DriverSignal::DriverInternal => SignalKind::DriverInternal,
            DriverSignal::InvalidType => SignalKind::InvalidType,
            DriverSignal::NoHostAvailable { .. } => SignalKind::NoHostAvailable,
            DriverSignal::ReadTimeout { .. } => SignalKind::ReadTimeout,
            DriverSignal::WriteTimeout { .. } => SignalKind::WriteTimeout,
            DriverSignal::Truncate => SignalKind::Truncate,
            DriverSignal::Unavailable { .. } => SignalKind::Unavailable,
            DriverSignal::AlreadyExists { .. } => SignalKind::AlreadyExists,
            DriverSignal::InvalidConfigurationInQuery => SignalKind::InvalidConfigurationInQuery,
            DriverSignal::InvalidQuery => SignalKind::InvalidQuery,
            DriverSignal::Syntax => SignalKind::Syntax,
            DriverSignal::Unauthorized => SignalKind::Unauthorized,
            DriverSignal::TraceRetrieval => SignalKind::TraceRetrieval,
            DriverSignal::Unrecognized { .. } => SignalKind::Unrecognized,
        }
    }
}

/// A failure reported by the driver
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[error("{message}")]
pub struct DriverFailure {
    #[serde(flatten)]
    pub signal: DriverSignal,
    pub message: String,
}

impl DriverFailure {
    pub fn new(signal: DriverSignal, message: impl Into<String>) -> Self {
        Self {
            signal,
            message: message.into(),
        }
    }

    /// Failure for an existing schema element, with the driver's wording
    pub fn already_exists(keyspace: impl Into<String>, table: impl Into<String>) -> Self {
        let keyspace = keyspace.into();
        let table = table.into();
        let message = if table.is_empty() {
            format!("Keyspace {} already exists", keyspace)
        } else {
            format!("Table {}.{} already exists", keyspace, table)
        };
        Self::new(DriverSignal::AlreadyExists { keyspace, table }, message)
    }

    /// Failure the driver reported under a kind this crate does not know
    pub fn unrecognized(driver_kind: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(
            DriverSignal::Unrecognized {
                driver_kind: driver_kind.into(),
            },
            message,
        )
    }

    pub fn kind(&self) -> SignalKind {
        self.signal.kind()
    }
}

impl fmt::Display for SignalKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SignalKind::Authentication => "authentication",
            SignalKind::DriverInternal => "driver_internal",
            SignalKind::InvalidType => "invalid_type",
            SignalKind::NoHostAvailable => "no_host_available",
            SignalKind::ReadTimeout => "read_timeout",
            SignalKind::WriteTimeout => "write_timeout",
            SignalKind::Truncate => "truncate",
            SignalKind::Unavailable => "unavailable",
            SignalKind::AlreadyExists => "already_exists",
            SignalKind::InvalidConfigurationInQuery => "invalid_configuration_in_query",
            SignalKind::InvalidQuery => "invalid_query",
            SignalKind::Syntax => "syntax",
            SignalKind::Unauthorized => "unauthorized",
            SignalKind::TraceRetrieval => "trace_retrieval",
            SignalKind::Unrecognized => "unrecognized",
        };
        f.write_str(name)
    }
}
