//! Executor configuration.
//!
//! Loaded from TOML:
//!
//! ```toml
//! endpoint = "http://localhost:8529"
//! database = "_system"
//! username = "root"
//! password = "secret"
//! timeout_secs = 30
//! batch_size = 1000
//! ```

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{AqlError, AqlResult};

/// Connection settings for [`HttpExecutor`](crate::http::HttpExecutor).
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ExecutorConfig {
    /// Server base URL, used as given.
    pub endpoint: String,

    pub database: String,

    pub username: Option<String>,

    pub password: Option<String>,

    /// Per-request timeout.
    pub timeout_secs: u64,

    /// Used when a query does not set its own batch size; 0 leaves it to the server.
    pub batch_size: usize,
}

impl Default for ExecutorConfig {
    fn default() -> Self {
        Self {
            endpoint: "http://localhost:8529".to_string(),
            database: "_system".to_string(),
            username: None,
            password: None,
            timeout_secs: 30,
            batch_size: 0,
        }
    }
}

impl ExecutorConfig {
    /// Create a new configuration builder
    pub fn builder() -> ExecutorConfigBuilder {
        ExecutorConfigBuilder::default()
    }

    pub fn from_toml_str(content: &str) -> AqlResult<Self> {
        toml::from_str(content).map_err(|e| AqlError::Config(e.to_string()))
    }

    pub fn load(path: impl AsRef<Path>) -> AqlResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// `<config dir>/aql/aql.toml`
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("aql").join("aql.toml"))
    }

    /// Load from [`default_path`](Self::default_path), or defaults if there is no file.
    pub fn load_default() -> AqlResult<Self> {
        match Self::default_path() {
            Some(path) if path.exists() => Self::load(path),
            _ => Ok(Self::default()),
        }
    }
}

/// Builder for ExecutorConfig
#[derive(Debug, Default)]
pub struct ExecutorConfigBuilder {
    config: ExecutorConfig,
}

impl ExecutorConfigBuilder {
    pub fn endpoint(mut self, url: impl Into<String>) -> Self {
        self.config.endpoint = url.into();
        self
    }

    pub fn database(mut self, name: impl Into<String>) -> Self {
        self.config.database = name.into();
        self
    }

    pub fn credentials(mut self, username: impl Into<String>, password: impl Into<String>) -> Self {
        self.config.username = Some(username.into());
        self.config.password = Some(password.into());
        self
    }

    pub fn timeout_secs(mut self, secs: u64) -> Self {
        self.config.timeout_secs = secs;
        self
    }

    pub fn batch_size(mut self, n: usize) -> Self {
        self.config.batch_size = n;
        self
    }

    pub fn build(self) -> ExecutorConfig {
        self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = ExecutorConfig::from_toml_str(
            r#"
            database = "shop"
            batch_size = 250
            "#,
        )
        .unwrap();
        assert_eq!(config.database, "shop");
        assert_eq!(config.batch_size, 250);
        assert_eq!(config.endpoint, "http://localhost:8529");
        assert_eq!(config.timeout_secs, 30);
        assert!(config.username.is_none());
    }

    #[test]
    fn test_bad_toml_is_config_error() {
        let err = ExecutorConfig::from_toml_str("timeout_secs = \"soon\"").unwrap_err();
        assert!(matches!(err, AqlError::Config(_)));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = ExecutorConfig::load("/nonexistent/aql.toml").unwrap_err();
        assert!(matches!(err, AqlError::Io(_)));
    }

    #[test]
    fn test_builder() {
        let config = ExecutorConfig::builder()
            .endpoint("https://db.internal:8530")
            .database("analytics")
            .credentials("reader", "pw")
            .timeout_secs(5)
            .build();
        assert_eq!(config.endpoint, "https://db.internal:8530");
        assert_eq!(config.username.as_deref(), Some("reader"));
        assert_eq!(config.timeout_secs, 5);
        assert_eq!(config.batch_size, 0);
    }
}
