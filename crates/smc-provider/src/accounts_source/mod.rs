//! # Accounts Source
//!
//! Read-only access to SMC accounts: the whole collection at once, or a single
//! account looked up by its human-facing identifier.
//!
//! The API returns the entire collection in one answer, so [`AccountsSource::list_all`]
//! materializes everything. An empty collection is an error: the API signals
//! "nothing found" that way rather than with an empty success.
//!
//! Records produced here never carry `password` or `last_updated`.

use crate::account_resource::{project, AccountError, Failure};
use crate::clients::AccountClient;
use crate::model::Account;
use resource_framework::{CancellationToken, EntityClient};
use tracing::{info, instrument};

#[derive(Clone)]
pub struct AccountsSource {
    client: AccountClient,
}

impl AccountsSource {
    pub fn new(client: AccountClient) -> Self {
        Self { client }
    }

    /// Every account, projected in the order the API listed them.
    #[instrument(skip(self, cancel))]
    pub async fn list_all(&self, cancel: &CancellationToken) -> Result<Vec<Account>, AccountError> {
        let accounts = self
            .client
            .fetch_all(cancel)
            .await?
            .into_iter()
            .map(project)
            .collect::<Result<Vec<_>, _>>()?;

        info!(count = accounts.len(), "Accounts listed");
        Ok(accounts)
    }

    /// The account whose identifier is `identifier` (`GET /accounts/{identifier}`).
    #[instrument(skip(self, cancel))]
    pub async fn find(
        &self,
        identifier: &str,
        cancel: &CancellationToken,
    ) -> Result<Account, AccountError> {
        let identifier = identifier.to_string();
        let found = self
            .client
            .fetch(&identifier, cancel)
            .await
            .map_err(|e| e.into_lookup(&identifier))?;
        let Some(wire) = found else {
            return Err(AccountError::Lookup {
                identifier,
                cause: Failure::NoResult,
            });
        };

        let account = project(wire)?;
        info!(uuid = ?account.uuid, "Account found");
        Ok(account)
    }
}
