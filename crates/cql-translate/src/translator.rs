//! Ordered translation rules.
//!
//! Rules are evaluated top to bottom and the first rule whose signal kind the
//! failure *is a* wins. Specialized kinds therefore have to appear before the
//! kinds they specialize: `invalid_configuration_in_query` precedes
//! `invalid_query`. A failure no rule claims becomes `Uncategorized`.

use crate::error::{DataAccessError, ErrorKind};
use crate::signal::{DriverFailure, DriverSignal, SignalKind};
use cql_core::{CqlConfig, TranslationConfig};
use once_cell::sync::Lazy;
use std::error::Error;
use std::sync::Arc;

type Classify = fn(&DriverSignal) -> ErrorKind;

/// A single (signal kind, classification) pair
#[derive(Clone)]
pub struct TranslationRule {
    /// Unique identifier for the rule
    pub id: &'static str,
    /// Human-readable description
    pub description: &'static str,
    /// Kind (or ancestor kind) this rule claims
    pub kind: SignalKind,
    classify: Classify,
}

impl TranslationRule {
    pub fn new(id: &'static str, kind: SignalKind, classify: Classify) -> Self {
        Self {
            id,
            description: "",
            kind,
            classify,
        }
    }

    pub fn with_description(mut self, description: &'static str) -> Self {
        self.description = description;
        self
    }

    /// True if this rule claims failures of `kind`
    pub fn applies_to(&self, kind: SignalKind) -> bool {
        kind.is_a(self.kind)
    }

    pub fn classify(&self, signal: &DriverSignal) -> ErrorKind {
        (self.classify)(signal)
    }
}

impl std::fmt::Debug for TranslationRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TranslationRule")
            .field("id", &self.id)
            .field("kind", &self.kind)
            .finish()
    }
}

/// The default rule table, in priority order
pub fn default_rules() -> Vec<TranslationRule> {
    vec![
        TranslationRule::new("authentication", SignalKind::Authentication, |signal| {
            match signal {
                DriverSignal::Authentication { host } => ErrorKind::Authentication { host: host.clone() },
                _ => ErrorKind::Authentication { host: None },
            }
        })
        .with_description("Credentials rejected by the cluster"),

        TranslationRule::new("driver_internal", SignalKind::DriverInternal, |_| ErrorKind::Internal)
            .with_description("Unexpected state inside the driver"),

        TranslationRule::new("invalid_type", SignalKind::InvalidType, |_| ErrorKind::TypeMismatch)
            .with_description("Value does not match the column type"),

        TranslationRule::new("no_host_available", SignalKind::NoHostAvailable, |signal| {
            match signal {
                DriverSignal::NoHostAvailable { host_errors } => ErrorKind::ConnectionFailure {
                    host_errors: host_errors.clone(),
                },
                _ => ErrorKind::ConnectionFailure { host_errors: Default::default() },
            }
        })
        .with_description("No coordinator reachable"),

        TranslationRule::new("read_timeout", SignalKind::ReadTimeout, |signal| match signal {
            DriverSignal::ReadTimeout { consistency, received, required, data_retrieved } => {
                ErrorKind::ReadTimeout {
                    consistency: *consistency,
                    received: *received,
                    required: *required,
                    data_retrieved: *data_retrieved,
                }
            }
            _ => ErrorKind::Uncategorized,
        })
        .with_description("Replicas did not answer a read in time"),

        TranslationRule::new("write_timeout", SignalKind::WriteTimeout, |signal| match signal {
            DriverSignal::WriteTimeout { consistency, received, required, write_type } => {
                ErrorKind::WriteTimeout {
                    consistency: *consistency,
                    received: *received,
                    required: *required,
                    write_type: *write_type,
                }
            }
            _ => ErrorKind::Uncategorized,
        })
        .with_description("Replicas did not acknowledge a write in time"),

        TranslationRule::new("truncate", SignalKind::Truncate, |_| ErrorKind::Truncate)
            .with_description("TRUNCATE failed on at least one replica"),

        TranslationRule::new("unavailable", SignalKind::Unavailable, |signal| match signal {
            DriverSignal::Unavailable { consistency, required, alive } => {
                ErrorKind::InsufficientReplicas {
                    consistency: *consistency,
                    required: *required,
                    alive: *alive,
                }
            }
            _ => ErrorKind::Uncategorized,
        })
        .with_description("Not enough live replicas for the consistency level"),

        TranslationRule::new("already_exists", SignalKind::AlreadyExists, classify_already_exists)
            .with_description("Table or keyspace already exists"),

        // Must stay ahead of invalid_query
        TranslationRule::new(
            "invalid_configuration_in_query",
            SignalKind::InvalidConfigurationInQuery,
            |_| ErrorKind::InvalidConfigurationInQuery,
        )
        .with_description("Schema statement carries invalid options"),

        TranslationRule::new("invalid_query", SignalKind::InvalidQuery, |_| ErrorKind::InvalidQuery)
            .with_description("Statement rejected as invalid"),

        TranslationRule::new("syntax", SignalKind::Syntax, |_| ErrorKind::QuerySyntax)
            .with_description("Statement could not be parsed"),

        TranslationRule::new("unauthorized", SignalKind::Unauthorized, |_| ErrorKind::Unauthorized)
            .with_description("Authenticated user lacks the permission"),

        TranslationRule::new("trace_retrieval", SignalKind::TraceRetrieval, |_| ErrorKind::TraceRetrieval)
            .with_description("Query trace not available"),
    ]
}

/// Table wins whenever the table name has text
fn classify_already_exists(signal: &DriverSignal) -> ErrorKind {
    match signal {
        DriverSignal::AlreadyExists { table, .. } if !table.trim().is_empty() => {
            ErrorKind::TableExists { table: table.clone() }
        }
        DriverSignal::AlreadyExists { keyspace, .. } => ErrorKind::KeyspaceExists {
            keyspace: keyspace.clone(),
        },
        _ => ErrorKind::Uncategorized,
    }
}

static DEFAULT_RULES: Lazy<Arc<Vec<TranslationRule>>> = Lazy::new(|| Arc::new(default_rules()));

/// Translates driver failures into [`DataAccessError`] values
#[derive(Debug, Clone)]
pub struct ExceptionTranslator {
    config: TranslationConfig,
    rules: Arc<Vec<TranslationRule>>,
}

impl Default for ExceptionTranslator {
    fn default() -> Self {
        Self::new(TranslationConfig::default())
    }
}

impl ExceptionTranslator {
    /// Create a translator with the default rule table
    pub fn new(config: TranslationConfig) -> Self {
        Self {
            config,
            rules: Arc::clone(&*DEFAULT_RULES),
        }
    }

    /// Create a translator from the translation section of a config
    pub fn from_config(config: &CqlConfig) -> Self {
        Self::new(config.translation.clone())
    }

    /// Create a translator with a custom rule table, evaluated in order
    pub fn with_rules(config: TranslationConfig, rules: Vec<TranslationRule>) -> Self {
        Self {
            config,
            rules: Arc::new(rules),
        }
    }

    pub fn rules(&self) -> &[TranslationRule] {
        &self.rules
    }

    /// Classify a signal without building an error
    pub fn classify(&self, signal: &DriverSignal) -> ErrorKind {
        let kind = signal.kind();
        self.rules
            .iter()
            .find(|rule| rule.applies_to(kind))
            .map(|rule| rule.classify(signal))
            .unwrap_or(ErrorKind::Uncategorized)
    }

    /// Translate a failure, keeping the driver message verbatim
    pub fn translate(&self, failure: DriverFailure) -> DataAccessError {
        let message = failure.message.clone();
        self.translate_with_message(failure, message)
    }

    /// Translate a failure raised while running `task`.
    ///
    /// The message reads `"{task}; CQL [{cql}]; {driver message}"`; the CQL
    /// segment is left out when `cql` is `None` or when the configuration
    /// disables it.
    pub fn translate_with_context(
        &self,
        task: &str,
        cql: Option<&str>,
        failure: DriverFailure,
    ) -> DataAccessError {
        let message = match cql {
            Some(cql) if self.config.include_cql => {
                format!("{}; CQL [{}]; {}", task, cql, failure.message)
            }
            _ => format!("{}; {}", task, failure.message),
        };
        self.translate_with_message(failure, message)
    }

    /// Translate an arbitrary error if it came from the driver.
    ///
    /// Errors that are already translated are returned as they are; anything
    /// else yields `None`.
    pub fn translate_if_possible(&self, error: &(dyn Error + 'static)) -> Option<DataAccessError> {
        if let Some(translated) = error.downcast_ref::<DataAccessError>() {
            return Some(translated.clone());
        }
        error
            .downcast_ref::<DriverFailure>()
            .map(|failure| self.translate(failure.clone()))
    }

    fn translate_with_message(&self, failure: DriverFailure, message: String) -> DataAccessError {
        let signal_kind = failure.kind();
        match self.rules.iter().find(|rule| rule.applies_to(signal_kind)) {
            Some(rule) => {
                let kind = rule.classify(&failure.signal);
                tracing::debug!(
                    rule = rule.id,
                    signal = %signal_kind,
                    classified = kind.name(),
                    "translated driver failure"
                );
                DataAccessError::new(kind, message, failure)
            }
            None => {
                tracing::warn!(
                    signal = %signal_kind,
                    driver_message = %failure.message,
                    "uncategorized driver failure"
                );
                DataAccessError::new(ErrorKind::Uncategorized, message, failure)
            }
        }
    }
}
