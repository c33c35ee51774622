//! # Provider Bootstrap
//!
//! This module turns configuration into a wired-up provider: one transport,
//! one shared [`AccountClient`], and the two consumers built on it.
//!
//! ## Wiring
//!
//! ```text
//! ProviderConfig ──resolve──▶ HttpTransport ──▶ ResourceClient<Account>
//!                                                      │
//!                                                AccountClient
//!                                               ┌──────┴──────┐
//!                                       AccountResource  AccountsSource
//! ```
//!
//! [`SmcProvider::with_transport`] builds the same graph over any
//! [`Transport`], which is how tests substitute
//! [`MockTransport`](resource_framework::mock::MockTransport).
//!
//! ## Configuration
//!
//! The hostname and API key come from [`ProviderConfig`]; unset values fall
//! back to `SMC_HOSTNAME` and `SMC_API_KEY`. See [`ProviderConfig::resolve`].

pub mod config;

pub use config::*;

use crate::account_resource::{AccountError, AccountResource};
use crate::accounts_source::AccountsSource;
use crate::clients::AccountClient;
use resource_framework::{HttpTransport, ResourceClient, Transport};
use std::sync::Arc;
use tracing::info;

/// Entry point handed to the host runtime.
#[derive(Clone)]
pub struct SmcProvider {
    pub accounts: AccountResource,
    pub accounts_source: AccountsSource,
}

impl SmcProvider {
    /// Resolves `config` and connects over HTTP.
    pub fn configure(config: &ProviderConfig) -> Result<Self, AccountError> {
        let resolved = config.resolve()?;
        let transport = HttpTransport::new(&resolved.hostname, &resolved.api_key)
            .map_err(|e| ConfigError::Client(e.to_string()))?;

        info!(hostname = %resolved.hostname, "Configured SMC client");
        Ok(Self::with_transport(Arc::new(transport)))
    }

    pub fn with_transport(transport: Arc<dyn Transport>) -> Self {
        let client = AccountClient::new(ResourceClient::new(transport));
        Self {
            accounts: AccountResource::new(client.clone()),
            accounts_source: AccountsSource::new(client),
        }
    }
}
