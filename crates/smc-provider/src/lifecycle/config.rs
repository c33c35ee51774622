//! Provider configuration: where the SMC API lives and how to authenticate.

use serde::Deserialize;
use std::fmt;
use thiserror::Error;

pub const HOSTNAME_ENV: &str = "SMC_HOSTNAME";
pub const API_KEY_ENV: &str = "SMC_API_KEY";

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("missing SMC hostname: set `hostname` or the SMC_HOSTNAME environment variable")]
    MissingHostname,
    #[error("missing SMC API key: set `api_key` or the SMC_API_KEY environment variable")]
    MissingApiKey,
    #[error("could not create the SMC client: {0}")]
    Client(String),
}

/// Settings as the host supplies them. Either value may be left to the environment.
#[derive(Clone, Default, Deserialize)]
pub struct ProviderConfig {
    pub hostname: Option<String>,
    pub api_key: Option<String>,
}

/// Settings after resolution, both guaranteed non-empty.
#[derive(Clone, PartialEq, Eq)]
pub struct ResolvedConfig {
    pub hostname: String,
    pub api_key: String,
}

impl ProviderConfig {
    /// Resolves against the process environment.
    pub fn resolve(&self) -> Result<ResolvedConfig, ConfigError> {
        self.resolve_with(|key| std::env::var(key).ok())
    }

    /// Resolves with `lookup` standing in for the environment.
    ///
    /// An explicit value wins over the environment, even when it is empty;
    /// an empty result is reported as missing.
    pub fn resolve_with<F>(&self, lookup: F) -> Result<ResolvedConfig, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let hostname = self
            .hostname
            .clone()
            .or_else(|| lookup(HOSTNAME_ENV))
            .filter(|value| !value.is_empty())
            .ok_or(ConfigError::MissingHostname)?;
        let api_key = self
            .api_key
            .clone()
            .or_else(|| lookup(API_KEY_ENV))
            .filter(|value| !value.is_empty())
            .ok_or(ConfigError::MissingApiKey)?;

        Ok(ResolvedConfig { hostname, api_key })
    }
}

impl fmt::Debug for ProviderConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProviderConfig")
            .field("hostname", &self.hostname)
            .field("api_key", &self.api_key.as_ref().map(|_| "***"))
            .finish()
    }
}

impl fmt::Debug for ResolvedConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResolvedConfig")
            .field("hostname", &self.hostname)
            .field("api_key", &"***")
            .finish()
    }
}
