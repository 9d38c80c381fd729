//! Integration tests for cql-translate with the workspace configuration file.
//!
//! These tests run every signal kind through the default rule table and check
//! the resulting kind, category, message and cause.

use cql_core::CqlConfig;
use cql_translate::{
    ConsistencyLevel, DataAccessCategory, DataAccessError, DriverFailure, DriverSignal,
    ErrorKind, ExceptionTranslator, WriteType,
};
use std::collections::BTreeMap;
use std::error::Error;

/// Path to the config file relative to the workspace root
const CONFIG_PATH: &str = "config/cql.yaml";

fn config_path() -> String {
    let manifest_dir = std::env::var("CARGO_MANIFEST_DIR").unwrap();
    let workspace_root = std::path::Path::new(&manifest_dir).parent().unwrap().parent().unwrap();
    workspace_root.join(CONFIG_PATH).to_string_lossy().to_string()
}

fn init_logging() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_test_writer()
        .try_init();
}

fn translator() -> ExceptionTranslator {
    init_logging();
    let config = CqlConfig::load(&config_path()).unwrap();
    ExceptionTranslator::from_config(&config)
}

fn translate(signal: DriverSignal) -> DataAccessError {
    translator().translate(DriverFailure::new(signal, "driver says no"))
}

// =============================================================================
// Full Signal Table
// =============================================================================

#[test]
fn test_every_signal_kind() {
    let mut host_errors = BTreeMap::new();
    host_errors.insert("10.0.0.1:9042".to_string(), "Connection refused".to_string());

    let cases = vec![
        (
            DriverSignal::Authentication { host: Some("10.0.0.1:9042".to_string()) },
            ErrorKind::Authentication { host: Some("10.0.0.1:9042".to_string()) },
            DataAccessCategory::PermissionDenied,
        ),
        (DriverSignal::DriverInternal, ErrorKind::Internal, DataAccessCategory::ResourceFailure),
        (DriverSignal::InvalidType, ErrorKind::TypeMismatch, DataAccessCategory::TypeMismatch),
        (
            DriverSignal::NoHostAvailable { host_errors: host_errors.clone() },
            ErrorKind::ConnectionFailure { host_errors },
            DataAccessCategory::ResourceFailure,
        ),
        (
            DriverSignal::ReadTimeout {
                consistency: ConsistencyLevel::LocalQuorum,
                received: 1,
                required: 2,
                data_retrieved: true,
            },
            ErrorKind::ReadTimeout {
                consistency: ConsistencyLevel::LocalQuorum,
                received: 1,
                required: 2,
                data_retrieved: true,
            },
            DataAccessCategory::QueryTimeout,
        ),
        (
            DriverSignal::WriteTimeout {
                consistency: ConsistencyLevel::Quorum,
                received: 0,
                required: 2,
                write_type: WriteType::Cas,
            },
            ErrorKind::WriteTimeout {
                consistency: ConsistencyLevel::Quorum,
                received: 0,
                required: 2,
                write_type: WriteType::Cas,
            },
            DataAccessCategory::QueryTimeout,
        ),
        (DriverSignal::Truncate, ErrorKind::Truncate, DataAccessCategory::Transient),
        (
            DriverSignal::Unavailable { consistency: ConsistencyLevel::All, required: 3, alive: 1 },
            ErrorKind::InsufficientReplicas { consistency: ConsistencyLevel::All, required: 3, alive: 1 },
            DataAccessCategory::Transient,
        ),
        (
            DriverSignal::InvalidConfigurationInQuery,
            ErrorKind::InvalidConfigurationInQuery,
            DataAccessCategory::InvalidApiUsage,
        ),
        (DriverSignal::InvalidQuery, ErrorKind::InvalidQuery, DataAccessCategory::InvalidApiUsage),
        (DriverSignal::Syntax, ErrorKind::QuerySyntax, DataAccessCategory::InvalidApiUsage),
        (DriverSignal::Unauthorized, ErrorKind::Unauthorized, DataAccessCategory::PermissionDenied),
        (DriverSignal::TraceRetrieval, ErrorKind::TraceRetrieval, DataAccessCategory::Transient),
    ];

    for (signal, expected_kind, expected_category) in cases {
        let label = format!("{:?}", signal);
        let error = translate(signal);
        assert_eq!(error.kind(), &expected_kind, "Wrong kind for: {}", label);
        assert_eq!(error.category(), expected_category, "Wrong category for: {}", label);
        assert_eq!(error.message(), "driver says no");
    }
}

// =============================================================================
// Already Exists
// =============================================================================

#[test]
fn test_table_exists() {
    let error = translate(DriverSignal::AlreadyExists {
        keyspace: String::new(),
        table: "tbl".to_string(),
    });
    assert_eq!(error.kind(), &ErrorKind::TableExists { table: "tbl".to_string() });
    assert_eq!(error.kind().element_name(), Some("tbl"));
}

#[test]
fn test_keyspace_exists() {
    let error = translate(DriverSignal::AlreadyExists {
        keyspace: "ks".to_string(),
        table: String::new(),
    });
    assert_eq!(error.kind(), &ErrorKind::KeyspaceExists { keyspace: "ks".to_string() });
    assert_eq!(error.kind().element_name(), Some("ks"));
}

// =============================================================================
// Uncategorized and Causes
// =============================================================================

#[test]
fn test_unrecognized_preserves_message_and_cause() {
    let message = "Unexpected error: [weird] state; see cause (code=0x1200)";
    let failure = DriverFailure::unrecognized("BootstrappingException", message);
    let error = translator().translate(failure.clone());

    assert_eq!(error.kind(), &ErrorKind::Uncategorized);
    assert_eq!(error.category(), DataAccessCategory::Uncategorized);
    assert_eq!(error.message(), message);
    assert_eq!(error.to_string(), message);

    let source = error.source().unwrap();
    let cause = source.downcast_ref::<DriverFailure>().unwrap();
    assert_eq!(cause, &failure);
}

#[test]
fn test_translate_if_possible() {
    let translator = translator();

    let failure = DriverFailure::new(DriverSignal::Syntax, "no viable alternative");
    let translated = translator.translate_if_possible(&failure).unwrap();
    assert_eq!(translated.kind(), &ErrorKind::QuerySyntax);

    let again = translator.translate_if_possible(&translated).unwrap();
    assert_eq!(again, translated);

    let io = std::io::Error::new(std::io::ErrorKind::Other, "disk full");
    assert!(translator.translate_if_possible(&io).is_none());
}

// =============================================================================
// Contextual Messages and JSON
// =============================================================================

#[test]
fn test_context_uses_config() {
    let error = translator().translate_with_context(
        "ensureTable",
        Some("CREATE TABLE shop.orders (id uuid PRIMARY KEY)"),
        DriverFailure::already_exists("shop", "orders"),
    );

    assert_eq!(
        error.message(),
        "ensureTable; CQL [CREATE TABLE shop.orders (id uuid PRIMARY KEY)]; Table shop.orders already exists"
    );
    assert_eq!(error.cause().message, "Table shop.orders already exists");
}

#[test]
fn test_failure_from_json() {
    let json = r#"{
        "kind": "write_timeout",
        "consistency": "LOCAL_ONE",
        "received": 0,
        "required": 1,
        "write_type": "UNLOGGED_BATCH",
        "message": "Cassandra timeout during write query"
    }"#;

    let failure: DriverFailure = serde_json::from_str(json).unwrap();
    let error = translator().translate(failure);
    assert!(error.is_transient());

    let report = serde_json::to_value(error.report()).unwrap();
    assert_eq!(report["type"], "write_timeout");
    assert_eq!(report["write_type"], "UNLOGGED_BATCH");
    assert_eq!(report["category"], "QUERY_TIMEOUT");
    assert_eq!(report["message"], "Cassandra timeout during write query");
}
