//! Configuration module for the carrier vetting proxy.
//!
//! Loads configuration from YAML files and environment variables.

use std::path::PathBuf;

use config::{Config as ConfigLoader, ConfigError, Environment, File};
use serde::Deserialize;

/// Production host of the vetting provider.
pub const PRODUCTION_HOST: &str = "https://highway.com";
/// Staging host of the vetting provider.
pub const STAGING_HOST: &str = "https://staging.highway.com";

/// Root configuration structure.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub upstream: UpstreamConfig,
    pub auth: AuthConfig,
    #[serde(default)]
    pub conditions: ConditionsConfig,
}

/// Server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

/// Vetting provider configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct UpstreamConfig {
    /// Bearer token issued by the provider.
    #[serde(default)]
    pub api_token: String,
    /// Target the staging environment instead of production.
    #[serde(default)]
    pub staging: bool,
    /// Explicit host override (local stubs, tests).
    #[serde(default)]
    pub base_url: Option<String>,
}

impl UpstreamConfig {
    /// Host the client should talk to.
    pub fn host(&self) -> &str {
        match self.base_url.as_deref() {
            Some(url) if !url.trim().is_empty() => url.trim_end_matches('/'),
            _ if self.staging => STAGING_HOST,
            _ => PRODUCTION_HOST,
        }
    }

    /// Label of the selected environment, for logs and health output.
    pub fn environment(&self) -> &'static str {
        if self.staging {
            "staging"
        } else {
            "production"
        }
    }
}

/// Inbound authentication configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthConfig {
    /// Bearer credential callers must present.
    #[serde(default)]
    pub api_key: String,
}

/// Location of the condition table.
#[derive(Debug, Clone, Deserialize)]
pub struct ConditionsConfig {
    pub path: PathBuf,
}

impl Default for ConditionsConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("config/conditions.json"),
        }
    }
}

impl Config {
    /// Load configuration from files and environment.
    ///
    /// Priority (highest to lowest):
    /// 1. Environment variables (VETTING__*)
    /// 2. config/local.yaml (if exists)
    /// 3. config/default.yaml
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_with_env(env_source())
    }

    fn load_with_env(env: Environment) -> Result<Self, ConfigError> {
        // Env values stay strings: secrets must not be reparsed as numbers.
        let config = ConfigLoader::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            .add_source(env)
            .build()?;

        let config: Config = config.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Reject configurations that cannot serve a single request.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.upstream.api_token.trim().is_empty() {
            return Err(ConfigError::Message(
                "upstream.api_token must be set (VETTING__UPSTREAM__API_TOKEN)".to_string(),
            ));
        }
        if self.auth.api_key.trim().is_empty() {
            return Err(ConfigError::Message(
                "auth.api_key must be set (VETTING__AUTH__API_KEY)".to_string(),
            ));
        }
        Ok(())
    }
}

fn env_source() -> Environment {
    Environment::with_prefix("VETTING")
        .prefix_separator("__")
        .separator("__")
}
