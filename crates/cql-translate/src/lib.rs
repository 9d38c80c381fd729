//! CQL Translate: Driver Failures to Data-Access Errors
//!
//! Maps the failures a Cassandra driver reports onto a closed set of
//! driver-independent error kinds, keeping the original failure as the cause.
//!
//! # Architecture
//!
//! ```text
//! DriverFailure → ordered rules (first match wins) → ErrorKind → DataAccessError
//!                          ↓ no match                              ↓
//!                     Uncategorized                      DataAccessCategory
//! ```
//!
//! # Example
//!
//! ```
//! use cql_translate::{translate, DriverFailure, ErrorKind};
//!
//! let failure = DriverFailure::already_exists("shop", "orders");
//! let error = translate(failure);
//!
//! assert_eq!(error.kind(), &ErrorKind::TableExists { table: "orders".to_string() });
//! assert_eq!(error.message(), "Table shop.orders already exists");
//! assert!(!error.is_transient());
//! ```

pub mod error;
pub mod signal;
pub mod translator;

pub use error::{DataAccessCategory, DataAccessError, ErrorKind, ErrorReport};
pub use signal::{ConsistencyLevel, DriverFailure, DriverSignal, SignalKind, WriteType};
pub use translator::{default_rules, ExceptionTranslator, TranslationRule};

/// Translate a failure with the default translator
pub fn translate(failure: DriverFailure) -> DataAccessError {
    ExceptionTranslator::default().translate(failure)
}

/// Translate a failure raised while running `task` on `cql`
pub fn translate_with_context(task: &str, cql: &str, failure: DriverFailure) -> DataAccessError {
    ExceptionTranslator::default().translate_with_context(task, Some(cql), failure)
}
