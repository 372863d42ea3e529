//! Configuration for the SMS relay.

use anyhow::{Context, Result};
use beem_client::{BeemClient, BeemError, DEFAULT_BASE_URL};
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use std::collections::HashMap;

/// Relay configuration, read once at startup.
///
/// Field names map onto environment variables (`PORT`, `BEEM_API_KEY`, ...).
#[derive(Debug, Deserialize)]
pub struct Config {
    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,

    /// Server listen address
    #[serde(default = "default_listen_addr")]
    pub listen_addr: String,

    /// Basic-auth username for Beem
    #[serde(default)]
    pub beem_api_key: Option<SecretString>,

    /// Basic-auth password for Beem
    #[serde(default)]
    pub beem_secret_key: Option<SecretString>,

    /// Sender id shown to recipients
    #[serde(default = "default_source_addr")]
    pub beem_source_addr: String,

    /// Beem API base URL
    #[serde(default = "default_beem_api_url")]
    pub beem_api_url: String,

    /// Log level, used when RUST_LOG is unset
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_port() -> u16 {
    4000
}

fn default_listen_addr() -> String {
    "0.0.0.0".into()
}

fn default_source_addr() -> String {
    "UKSS".into()
}

fn default_beem_api_url() -> String {
    DEFAULT_BASE_URL.into()
}

fn default_log_level() -> String {
    "info".into()
}

impl Config {
    /// Load configuration from environment variables.
    pub fn load() -> Result<Self> {
        // Load .env file if present
        dotenvy::dotenv().ok();

        Self::build(config::Environment::default())
    }

    /// Build configuration from an explicit set of variables instead of the
    /// process environment.
    pub fn from_env(vars: HashMap<String, String>) -> Result<Self> {
        Self::build(config::Environment::default().source(Some(vars)))
    }

    fn build(env: config::Environment) -> Result<Self> {
        let config = config::Config::builder()
            // Empty variables fall back to the defaults, like unset ones.
            .add_source(env.try_parsing(false).ignore_empty(true))
            .build()
            .context("Failed to build configuration")?;

        config
            .try_deserialize()
            .context("Failed to deserialize configuration")
    }

    /// Whether both Beem credentials are set and non-empty.
    pub fn has_credentials(&self) -> bool {
        let present = |s: &Option<SecretString>| {
            s.as_ref()
                .map(|s| !s.expose_secret().is_empty())
                .unwrap_or(false)
        };
        present(&self.beem_api_key) && present(&self.beem_secret_key)
    }

    /// Build the Beem client. Missing credentials become empty strings, so
    /// the failure surfaces as a provider-side auth error at send time.
    pub fn beem_client(&self) -> Result<BeemClient, BeemError> {
        let secret = |s: &Option<SecretString>| {
            SecretString::new(
                s.as_ref()
                    .map(|s| s.expose_secret().clone())
                    .unwrap_or_default(),
            )
        };

        BeemClient::new(
            &self.beem_api_url,
            secret(&self.beem_api_key),
            secret(&self.beem_secret_key),
            &self.beem_source_addr,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vars(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_defaults() {
        let config = Config::from_env(HashMap::new()).unwrap();

        assert_eq!(config.port, 4000);
        assert_eq!(config.listen_addr, "0.0.0.0");
        assert_eq!(config.beem_source_addr, "UKSS");
        assert_eq!(config.beem_api_url, "https://apisms.beem.africa");
        assert_eq!(config.log_level, "info");
        assert!(config.beem_api_key.is_none());
        assert!(!config.has_credentials());
    }

    #[test]
    fn test_reads_environment_names() {
        let config = Config::from_env(vars(&[
            ("PORT", "8080"),
            ("BEEM_API_KEY", "key"),
            ("BEEM_SECRET_KEY", "secret"),
            ("BEEM_SOURCE_ADDR", "SCHOOL"),
        ]))
        .unwrap();

        assert_eq!(config.port, 8080);
        assert_eq!(config.beem_source_addr, "SCHOOL");
        assert!(config.has_credentials());
    }

    #[test]
    fn test_empty_credential_counts_as_missing() {
        let config = Config::from_env(vars(&[
            ("BEEM_API_KEY", "key"),
            ("BEEM_SECRET_KEY", ""),
        ]))
        .unwrap();

        assert!(!config.has_credentials());
    }

    #[test]
    fn test_empty_variables_use_defaults() {
        let config = Config::from_env(vars(&[
            ("PORT", ""),
            ("BEEM_SOURCE_ADDR", ""),
            ("BEEM_API_URL", ""),
        ]))
        .unwrap();

        assert_eq!(config.port, 4000);
        assert_eq!(config.beem_source_addr, "UKSS");
        assert_eq!(config.beem_api_url, "https://apisms.beem.africa");
    }

    #[test]
    fn test_debug_redacts_credentials() {
        let config = Config::from_env(vars(&[
            ("BEEM_API_KEY", "super-secret-key"),
            ("BEEM_SECRET_KEY", "super-secret-value"),
        ]))
        .unwrap();

        let debug = format!("{:?}", config);
        assert!(!debug.contains("super-secret-key"));
        assert!(!debug.contains("super-secret-value"));
    }

    #[test]
    fn test_client_without_credentials() {
        let config = Config::from_env(HashMap::new()).unwrap();
        let client = config.beem_client().unwrap();

        assert_eq!(client.authorization(), "Basic Og==");
        assert_eq!(client.source_addr(), "UKSS");
    }
}
