//! Server configuration.
//!
//! Every field has a default, so an empty file (or no file at all) runs the
//! service on the built-in taxonomy and static tables.
//!
//! ```toml
//! bind = "0.0.0.0:8080"
//! cache_ttl_hours = 24
//! adapter_timeout_secs = 10
//! taxonomy_path = "config/taxonomy.toml"
//!
//! [[sources]]
//! kind = "static"
//! provider = "who"
//! ```

use std::{
    net::SocketAddr,
    path::{Path, PathBuf},
    time::Duration,
};

use serde::{Deserialize, Serialize};

use wellness_contracts::error::{WellnessError, WellnessResult};
use wellness_sources::SourceConfig;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ServerConfig {
    pub bind: String,
    pub cache_ttl_hours: u32,
    pub adapter_timeout_secs: u64,
    /// Custom taxonomy file; the built-in one is used when unset.
    pub taxonomy_path: Option<PathBuf>,
    /// Empty means the five built-in static tables.
    pub sources: Vec<SourceConfig>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: "127.0.0.1:8080".to_string(),
            cache_ttl_hours: 24,
            adapter_timeout_secs: 10,
            taxonomy_path: None,
            sources: Vec::new(),
        }
    }
}

impl ServerConfig {
    pub fn from_toml_str(s: &str) -> WellnessResult<Self> {
        let config: ServerConfig = toml::from_str(s).map_err(|e| WellnessError::ConfigError {
            reason: format!("failed to parse server config: {}", e),
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> WellnessResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| WellnessError::ConfigError {
            reason: format!("failed to read config file '{}': {}", path.display(), e),
        })?;
        Self::from_toml_str(&contents)
    }

    /// Load from `path` if given, otherwise use the defaults.
    pub fn load(path: Option<&Path>) -> WellnessResult<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => Ok(Self::default()),
        }
    }

    fn validate(&self) -> WellnessResult<()> {
        if self.cache_ttl_hours == 0 {
            return Err(WellnessError::ConfigError {
                reason: "cache_ttl_hours must be at least 1".to_string(),
            });
        }
        if self.adapter_timeout_secs == 0 {
            return Err(WellnessError::ConfigError {
                reason: "adapter_timeout_secs must be at least 1".to_string(),
            });
        }
        self.bind_addr().map(|_| ())
    }

    pub fn bind_addr(&self) -> WellnessResult<SocketAddr> {
        self.bind.parse().map_err(|e| WellnessError::ConfigError {
            reason: format!("invalid bind address '{}': {}", self.bind, e),
        })
    }

    pub fn cache_ttl(&self) -> chrono::Duration {
        chrono::Duration::hours(i64::from(self.cache_ttl_hours))
    }

    pub fn adapter_timeout(&self) -> Duration {
        Duration::from_secs(self.adapter_timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use wellness_contracts::provider::Provider;

    use super::*;

    #[test]
    fn empty_document_gives_defaults() {
        let config = ServerConfig::from_toml_str("").unwrap();
        assert_eq!(config, ServerConfig::default());
        assert_eq!(config.cache_ttl(), chrono::Duration::hours(24));
        assert_eq!(config.adapter_timeout(), Duration::from_secs(10));
        assert_eq!(config.bind_addr().unwrap().port(), 8080);
    }

    #[test]
    fn partial_document_keeps_other_defaults() {
        let config = ServerConfig::from_toml_str(
            r#"
            cache_ttl_hours = 6

            [[sources]]
            kind = "static"
            provider = "un"
            "#,
        )
        .unwrap();
        assert_eq!(config.cache_ttl_hours, 6);
        assert_eq!(config.adapter_timeout_secs, 10);
        assert_eq!(config.sources, vec![SourceConfig::Static { provider: Provider::Un }]);
    }

    #[test]
    fn zero_ttl_is_rejected() {
        match ServerConfig::from_toml_str("cache_ttl_hours = 0") {
            Err(WellnessError::ConfigError { reason }) => assert!(reason.contains("cache_ttl_hours")),
            other => panic!("expected ConfigError, got {:?}", other),
        }
    }

    #[test]
    fn bad_bind_address_is_rejected() {
        assert!(matches!(
            ServerConfig::from_toml_str("bind = \"localhost\""),
            Err(WellnessError::ConfigError { .. })
        ));
    }

    #[test]
    fn unknown_keys_are_rejected() {
        assert!(matches!(
            ServerConfig::from_toml_str("cache_ttl = 24"),
            Err(WellnessError::ConfigError { .. })
        ));
    }

    #[test]
    fn missing_file_is_config_error() {
        assert!(matches!(
            ServerConfig::load(Some(Path::new("/nonexistent/wellness.toml"))),
            Err(WellnessError::ConfigError { .. })
        ));
        assert!(ServerConfig::load(None).is_ok());
    }
}
