//! Configuration loading.
//!
//! Supports a YAML file with two sections:
//! - `naming`: how names become identifiers (global or per-name force quoting)
//! - `translation`: how driver failures are turned into messages
//!
//! Environment variables override file values:
//! - `CQL_FORCE_QUOTE` sets `naming.force_quote`
//! - `CQL_INCLUDE_CQL` sets `translation.include_cql`

use crate::error::{CqlError, CqlResult};
use crate::identifier::CqlIdentifier;
use serde::{Deserialize, Serialize};

pub const FORCE_QUOTE_ENV: &str = "CQL_FORCE_QUOTE";
pub const INCLUDE_CQL_ENV: &str = "CQL_INCLUDE_CQL";

/// Top-level configuration file structure
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CqlConfig {
    #[serde(default)]
    pub naming: NamingConfig,
    #[serde(default)]
    pub translation: TranslationConfig,
}

/// Identifier naming policy
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamingConfig {
    /// Quote every identifier produced through this policy
    #[serde(default)]
    pub force_quote: bool,
    /// Names that are always quoted (exact, case-sensitive match)
    #[serde(default)]
    pub force_quote_names: Vec<String>,
}

/// Driver failure translation settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranslationConfig {
    /// Embed the CQL text in contextual error messages
    #[serde(default = "default_true")]
    pub include_cql: bool,
}

fn default_true() -> bool {
    true
}

impl Default for TranslationConfig {
    fn default() -> Self {
        Self { include_cql: true }
    }
}

impl NamingConfig {
    /// Render `name` under this naming policy
    pub fn identifier(&self, name: &str) -> CqlResult<CqlIdentifier> {
        let force = self.force_quote || self.force_quote_names.iter().any(|n| n == name);
        CqlIdentifier::render(name, force)
    }
}

impl CqlConfig {
    /// Load configuration from a YAML file
    pub fn load(path: &str) -> CqlResult<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| CqlError::Config(format!("Failed to read config file {}: {}", path, e)))?;
        Self::from_yaml(&content)
    }

    /// Parse configuration from YAML content
    pub fn from_yaml(yaml: &str) -> CqlResult<Self> {
        let config: CqlConfig = serde_yaml::from_str(yaml)
            .map_err(|e| CqlError::Config(format!("Failed to parse config YAML: {}", e)))?;

        for name in &config.naming.force_quote_names {
            if name.trim().is_empty() {
                return Err(CqlError::Config(
                    "force_quote_names must not contain blank entries".to_string(),
                ));
            }
        }

        Ok(config)
    }

    /// Apply overrides from the process environment
    pub fn with_env_overrides(self) -> CqlResult<Self> {
        self.with_overrides(|key| std::env::var(key).ok())
    }

    /// Apply overrides from an arbitrary variable lookup
    pub fn with_overrides<F>(mut self, lookup: F) -> CqlResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(value) = lookup(FORCE_QUOTE_ENV) {
            self.naming.force_quote = parse_flag(FORCE_QUOTE_ENV, &value)?;
        }
        if let Some(value) = lookup(INCLUDE_CQL_ENV) {
            self.translation.include_cql = parse_flag(INCLUDE_CQL_ENV, &value)?;
        }
        Ok(self)
    }
}

fn parse_flag(key: &str, value: &str) -> CqlResult<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "1" => Ok(true),
        "false" | "0" => Ok(false),
        other => Err(CqlError::Config(format!(
            "{} must be true/false/1/0, got '{}'",
            key, other
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = CqlConfig::default();
        assert!(!config.naming.force_quote);
        assert!(config.translation.include_cql);
        assert_eq!(CqlConfig::from_yaml("{}").unwrap(), config);
    }

    #[test]
    fn test_from_yaml() {
        let config = CqlConfig::from_yaml(
            r#"
naming:
  force_quote_names: [UserProfile]
translation:
  include_cql: false
"#,
        )
        .unwrap();

        assert!(!config.translation.include_cql);
        let quoted = config.naming.identifier("UserProfile").unwrap();
        assert_eq!(quoted.to_cql(), "\"UserProfile\"");
        let plain = config.naming.identifier("Orders").unwrap();
        assert_eq!(plain.to_cql(), "orders");
    }

    #[test]
    fn test_invalid_yaml() {
        assert!(matches!(
            CqlConfig::from_yaml("naming: [1, 2"),
            Err(CqlError::Config(_))
        ));
        assert!(matches!(
            CqlConfig::from_yaml("naming:\n  force_quote_names: ['  ']\n"),
            Err(CqlError::Config(_))
        ));
    }

    #[test]
    fn test_overrides() {
        let config = CqlConfig::default()
            .with_overrides(|key| match key {
                FORCE_QUOTE_ENV => Some("1".to_string()),
                INCLUDE_CQL_ENV => Some("False".to_string()),
                _ => None,
            })
            .unwrap();

        assert!(config.naming.force_quote);
        assert!(!config.translation.include_cql);
        assert_eq!(config.naming.identifier("users").unwrap().to_cql(), "\"users\"");

        let bad = CqlConfig::default().with_overrides(|_| Some("maybe".to_string()));
        assert!(bad.is_err());
    }

    #[test]
    fn test_missing_file() {
        assert!(matches!(
            CqlConfig::load("/nonexistent/cql.yaml"),
            Err(CqlError::Config(_))
        ));
    }
}
