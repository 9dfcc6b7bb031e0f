//! API configuration

use serde::Deserialize;

use core_kernel::CoreError;

/// API configuration
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Server host
    pub host: String,
    /// Server port
    pub port: u16,
    /// Database URL
    pub database_url: String,
    /// Log level
    pub log_level: String,
    /// CSV emission fee schedule; the database table is used when unset
    pub schedule_path: Option<String>,
    /// Maximum database connections
    pub max_connections: u32,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            database_url: "postgres://localhost/rating".to_string(),
            log_level: "info".to_string(),
            schedule_path: None,
            max_connections: 10,
        }
    }
}

impl ApiConfig {
    /// Loads configuration from `API_`-prefixed environment variables
    pub fn from_env() -> Result<Self, config::ConfigError> {
        config::Config::builder()
            .add_source(config::Environment::with_prefix("API"))
            .build()?
            .try_deserialize()
    }

    /// Builds configuration variable by variable, ignoring unparsable values
    ///
    /// `DATABASE_URL` and `RUST_LOG` are honoured when the `API_` variants
    /// are missing.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        Self {
            host: lookup("API_HOST").unwrap_or(defaults.host),
            port: lookup("API_PORT")
                .and_then(|p| p.parse().ok())
                .unwrap_or(defaults.port),
            database_url: lookup("DATABASE_URL")
                .or_else(|| lookup("API_DATABASE_URL"))
                .unwrap_or(defaults.database_url),
            log_level: lookup("API_LOG_LEVEL")
                .or_else(|| lookup("RUST_LOG"))
                .unwrap_or(defaults.log_level),
            schedule_path: lookup("API_SCHEDULE_PATH").filter(|p| !p.trim().is_empty()),
            max_connections: lookup("API_MAX_CONNECTIONS")
                .and_then(|n| n.parse().ok())
                .unwrap_or(defaults.max_connections),
        }
    }

    /// Checks values the server cannot start without
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.database_url.trim().is_empty() {
            return Err(CoreError::configuration("database URL is empty"));
        }
        if self.max_connections == 0 {
            return Err(CoreError::configuration("max_connections must be at least 1"));
        }
        if self.schedule_path.as_deref().is_some_and(|p| !p.ends_with(".csv")) {
            return Err(CoreError::configuration("schedule path must point to a .csv file"));
        }
        Ok(())
    }

    /// Returns the server address
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_defaults() {
        let config = ApiConfig::default();
        assert_eq!(config.server_addr(), "0.0.0.0:8080");
        assert!(config.schedule_path.is_none());
    }

    #[test]
    fn test_from_lookup() {
        let vars: HashMap<&str, &str> = [
            ("API_PORT", "9090"),
            ("DATABASE_URL", "postgres://db/rating"),
            ("API_SCHEDULE_PATH", "deremi.csv"),
            ("API_MAX_CONNECTIONS", "not-a-number"),
        ]
        .into_iter()
        .collect();

        let config = ApiConfig::from_lookup(|k| vars.get(k).map(|v| v.to_string()));

        assert_eq!(config.port, 9090);
        assert_eq!(config.database_url, "postgres://db/rating");
        assert_eq!(config.schedule_path.as_deref(), Some("deremi.csv"));
        assert_eq!(config.max_connections, 10);
        assert_eq!(config.host, "0.0.0.0");
    }

    #[test]
    fn test_validate() {
        assert!(ApiConfig::default().validate().is_ok());

        let pool_less = ApiConfig {
            max_connections: 0,
            ..ApiConfig::default()
        };
        assert!(matches!(pool_less.validate(), Err(CoreError::Configuration(_))));

        let wrong_schedule = ApiConfig {
            schedule_path: Some("deremi.xls".to_string()),
            ..ApiConfig::default()
        };
        assert!(wrong_schedule.validate().is_err());
    }
}
