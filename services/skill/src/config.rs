//! Service configuration, loaded once at startup from the environment.

use std::env;
use std::net::SocketAddr;

use tracing::Level;

/// A custom error type for configuration loading failures.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for environment variable {0}: {1}")]
    InvalidValue(String, String),
    #[error("Invalid log level provided for RUST_LOG: {0}")]
    InvalidLogLevel(String),
}

/// Holds all configuration loaded from the environment.
#[derive(Debug, Clone)]
pub struct Config {
    pub bind_address: SocketAddr,
    pub log_level: Level,
    /// When set, requests addressed to any other application are rejected.
    pub application_id: Option<String>,
}

impl Config {
    /// Loads configuration from environment variables.
    ///
    /// *   `BIND_ADDRESS`: (Optional) The address the HTTP server binds to. Defaults to "0.0.0.0:3000".
    /// *   `RUST_LOG`: (Optional) The logging level. Defaults to "INFO".
    /// *   `SKILL_APPLICATION_ID`: (Optional) The only application id this skill answers.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file. This is useful for local development and is ignored if not present.
        dotenvy::dotenv().ok();
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Builds the configuration from any variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let bind_address_str = lookup("BIND_ADDRESS").unwrap_or_else(|| "0.0.0.0:3000".to_string());
        let bind_address = bind_address_str
            .parse::<SocketAddr>()
            .map_err(|e| ConfigError::InvalidValue("BIND_ADDRESS".to_string(), e.to_string()))?;

        let log_level_str = lookup("RUST_LOG").unwrap_or_else(|| "INFO".to_string());
        let log_level = log_level_str
            .parse::<Level>()
            .map_err(|_| ConfigError::InvalidLogLevel(log_level_str))?;

        let application_id = lookup("SKILL_APPLICATION_ID").filter(|id| !id.trim().is_empty());

        Ok(Self {
            bind_address,
            log_level,
            application_id,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn vars(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_defaults_when_nothing_is_set() {
        let config = Config::from_lookup(|_| None).unwrap();

        assert_eq!(config.bind_address.to_string(), "0.0.0.0:3000");
        assert_eq!(config.log_level, Level::INFO);
        assert_eq!(config.application_id, None);
    }

    #[test]
    fn test_reads_every_variable() {
        let env = vars(&[
            ("BIND_ADDRESS", "127.0.0.1:8080"),
            ("RUST_LOG", "debug"),
            ("SKILL_APPLICATION_ID", "amzn1.ask.skill.test"),
        ]);

        let config = Config::from_lookup(|name| env.get(name).cloned()).unwrap();

        assert_eq!(config.bind_address.port(), 8080);
        assert_eq!(config.log_level, Level::DEBUG);
        assert_eq!(config.application_id.as_deref(), Some("amzn1.ask.skill.test"));
    }

    #[test]
    fn test_rejects_bad_values() {
        let env = vars(&[("BIND_ADDRESS", "not-an-address")]);
        let result = Config::from_lookup(|name| env.get(name).cloned());
        assert!(matches!(
            result,
            Err(ConfigError::InvalidValue(name, _)) if name == "BIND_ADDRESS"
        ));

        let env = vars(&[("RUST_LOG", "chatty")]);
        let result = Config::from_lookup(|name| env.get(name).cloned());
        assert!(matches!(result, Err(ConfigError::InvalidLogLevel(level)) if level == "chatty"));
    }

    #[test]
    fn test_blank_application_id_means_unchecked() {
        let env = vars(&[("SKILL_APPLICATION_ID", "  ")]);

        let config = Config::from_lookup(|name| env.get(name).cloned()).unwrap();

        assert_eq!(config.application_id, None);
    }
}
