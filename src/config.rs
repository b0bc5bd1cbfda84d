//! Configuration loading and constants.
//!
//! Loads application configuration from a TOML file and applies environment
//! overrides used in deployment (`DATABASE_URL`, `DATABASE_NAME`, `PORT`).
//! `AppConfig` is the root configuration struct containing all settings.

use serde::Deserialize;
use std::path::Path;

// =============================================================================
// Default Paths and Strings
// =============================================================================

/// Default configuration file path
pub const DEFAULT_CONFIG_PATH: &str = "config/default.toml";

/// Default log filter when RUST_LOG is not set
pub const DEFAULT_LOG_FILTER: &str = "agence=debug,tower_http=info";

/// Logical collection that audit submissions are persisted to
pub const AUDIT_COLLECTION: &str = "audit";

/// Confirmation message returned to the browser after a successful submission
pub const AUDIT_CONFIRMATION_MESSAGE: &str =
    "Merci ! Votre mini audit a bien été reçu. Nous revenons vers vous rapidement.";

/// Database name used when the store URL is configured but no name is given
pub const DEFAULT_DATABASE_NAME: &str = "agence";

// =============================================================================
// Diagnostics and Error Reporting Limits
// =============================================================================

/// Maximum characters of backend error text shown by the diagnostics endpoint
pub const DIAGNOSTIC_DETAIL_MAX_CHARS: usize = 50;

/// Maximum characters of store error text surfaced in a 500 response body
pub const ERROR_DETAIL_MAX_CHARS: usize = 200;

/// Maximum collection names listed by the diagnostics endpoint
pub const DIAGNOSTIC_COLLECTION_LIMIT: usize = 10;

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// HTTP server configuration
    pub http: HttpServerConfig,
    /// Document store configuration
    #[serde(default)]
    pub store: StoreConfig,
}

/// HTTP server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct HttpServerConfig {
    pub host: String,
    pub port: u16,
}

/// Document store configuration.
///
/// Both `url` and `database` are optional so the API can run without a
/// store attached (submissions then fail with a server error and the
/// diagnostics endpoint reports the store as not configured).
#[derive(Debug, Clone, Deserialize)]
pub struct StoreConfig {
    /// Store base URL, e.g. "http://127.0.0.1:5984" or "memory://"
    pub url: Option<String>,
    /// Database namespace that collections live under
    pub database: Option<String>,
    /// Per-request timeout for store calls in seconds
    #[serde(default = "StoreConfig::default_timeout")]
    pub timeout_seconds: u64,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            url: None,
            database: None,
            timeout_seconds: Self::default_timeout(),
        }
    }
}

impl StoreConfig {
    fn default_timeout() -> u64 {
        10
    }

    /// Whether a store backend has been configured at all
    pub fn is_configured(&self) -> bool {
        self.url.is_some()
    }

    /// Effective database name (falls back to the default namespace)
    pub fn database_name(&self) -> String {
        self.database
            .clone()
            .unwrap_or_else(|| DEFAULT_DATABASE_NAME.to_string())
    }
}

impl AppConfig {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        let mut config: AppConfig = toml::from_str(&contents)?;

        config.apply_env_overrides(
            std::env::var("DATABASE_URL").ok(),
            std::env::var("DATABASE_NAME").ok(),
            std::env::var("PORT").ok(),
        )?;

        Ok(config)
    }

    /// Apply deployment environment overrides on top of the file values.
    fn apply_env_overrides(
        &mut self,
        database_url: Option<String>,
        database_name: Option<String>,
        port: Option<String>,
    ) -> Result<(), ConfigError> {
        if let Some(url) = database_url {
            self.store.url = Some(url);
        }
        if let Some(name) = database_name {
            self.store.database = Some(name);
        }
        if let Some(port) = port {
            self.http.port = port.parse().map_err(|_| {
                ConfigError::Validation(format!("PORT is not a valid port number: {port}"))
            })?;
        }
        Ok(())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("Configuration error: {0}")]
    Validation(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn parse(toml: &str) -> AppConfig {
        toml::from_str(toml).expect("config should parse")
    }

    #[test]
    fn store_section_is_optional() {
        let config = parse("[http]\nhost = \"127.0.0.1\"\nport = 8000\n");
        assert!(!config.store.is_configured());
        assert_eq!(config.store.timeout_seconds, 10);
        assert_eq!(config.store.database_name(), DEFAULT_DATABASE_NAME);
    }

    #[test]
    fn store_section_parses() {
        let config = parse(
            "[http]\nhost = \"0.0.0.0\"\nport = 8000\n\
             [store]\nurl = \"http://127.0.0.1:5984\"\ndatabase = \"leads\"\ntimeout_seconds = 3\n",
        );
        assert!(config.store.is_configured());
        assert_eq!(config.store.database_name(), "leads");
        assert_eq!(config.store.timeout_seconds, 3);
    }

    #[test]
    fn env_overrides_replace_file_values() {
        let mut config = parse("[http]\nhost = \"0.0.0.0\"\nport = 8000\n");
        config
            .apply_env_overrides(
                Some("http://store:5984".to_string()),
                Some("prod".to_string()),
                Some("9090".to_string()),
            )
            .unwrap();
        assert_eq!(config.store.url.as_deref(), Some("http://store:5984"));
        assert_eq!(config.store.database.as_deref(), Some("prod"));
        assert_eq!(config.http.port, 9090);
    }

    #[test]
    fn invalid_port_override_is_rejected() {
        let mut config = parse("[http]\nhost = \"0.0.0.0\"\nport = 8000\n");
        let err = config
            .apply_env_overrides(None, None, Some("not-a-port".to_string()))
            .unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));
    }

    #[test]
    fn load_reads_a_toml_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "[http]\nhost = \"127.0.0.1\"\nport = 8123\n").unwrap();
        let config = AppConfig::load(file.path()).unwrap();
        assert_eq!(config.http.host, "127.0.0.1");
        // PORT from the surrounding environment would override the file value.
        if std::env::var("PORT").is_err() {
            assert_eq!(config.http.port, 8123);
        }
    }
}
