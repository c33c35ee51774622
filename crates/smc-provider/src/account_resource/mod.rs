//! # Account Resource
//!
//! This module implements the lifecycle of a single SMC account: Create, Read,
//! Update, Delete and Import against the `/accounts` collection.
//!
//! ## Overview
//!
//! [`AccountResource`] is stateless. Each operation takes the caller's record
//! and a cancellation token, issues exactly one request, and returns a new
//! reconciled record or an [`AccountError`]. The caller's record is never
//! mutated, so a failed operation leaves it exactly as it was.
//!
//! Reconciliation treats the API as authoritative for every attribute except:
//!
//! - `password`: the API never returns it, so the caller's value is kept.
//! - `last_updated`: stamped on Create and Update, carried forward on Read.
//!
//! ## Structure
//!
//! - [`entity`] - [`RemoteEntity`](resource_framework::RemoteEntity) implementation and field mapping
//! - [`error`] - [`AccountError`] and its host-facing [`Diagnostic`]
//! - [`validation`] - checks run before any request
//! - [`state`] - [`ManagedAccount`], the per-instance state machine
//!
//! ## Usage
//!
//! ```rust,no_run
//! use smc_provider::account_resource::AccountResource;
//! use smc_provider::lifecycle::{ProviderConfig, SmcProvider};
//! use smc_provider::model::{Account, AccountKind};
//! use resource_framework::CancellationToken;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let provider = SmcProvider::configure(&ProviderConfig::default())?;
//!     let cancel = CancellationToken::new();
//!
//!     let created = provider
//!         .accounts
//!         .create(&Account::new("jdoe", AccountKind::User), &cancel)
//!         .await?;
//!     let refreshed = provider.accounts.read(&created, &cancel).await?;
//!     provider.accounts.delete(&refreshed, &cancel).await?;
//!
//!     let imported = AccountResource::import("75532250-c878-42f1-8871-bafa68e944d4");
//!     let _complete = provider.accounts.read(&imported, &cancel).await?;
//!     Ok(())
//! }
//! ```

pub mod entity;
pub mod error;
pub mod state;
pub mod validation;

pub use entity::{project, serialize};
pub use error::*;
pub use state::*;

use crate::clients::AccountClient;
use crate::model::Account;
use chrono::{SecondsFormat, Utc};
use resource_framework::{CancellationToken, EntityClient, RemoteEntity};
use tracing::{info, instrument, warn};

/// Lifecycle controller for SMC accounts.
#[derive(Clone)]
pub struct AccountResource {
    client: AccountClient,
}

impl AccountResource {
    pub fn new(client: AccountClient) -> Self {
        Self { client }
    }

    /// Creates the account described by `desired`.
    ///
    /// Succeeds only on HTTP 201 with a non-null `result` carrying a uuid.
    /// Failures name the desired identifier, since no uuid exists yet.
    #[instrument(skip(self, desired, cancel), fields(identifier = ?desired.identifier))]
    pub async fn create(
        &self,
        desired: &Account,
        cancel: &CancellationToken,
    ) -> Result<Account, AccountError> {
        desired.validate()?;
        let identifier = desired.identifier.as_deref();

        let wire = self
            .client
            .create_account(&desired.to_payload(), cancel)
            .await
            .map_err(|e| e.or_id(identifier))
            .inspect_err(|e| warn!(error = %e, "Account creation failed"))?;
        let projected = Account::from_wire(wire).map_err(|e| e.or_id(identifier))?;
        let account = reconcile(projected, desired, Some(stamp()));

        info!(uuid = ?account.uuid, "Account created");
        Ok(account)
    }

    /// Refreshes `prior` from the API.
    ///
    /// A `null` answer for a known uuid is reported as [`AccountError::Vanished`].
    #[instrument(skip(self, prior, cancel), fields(uuid = ?prior.uuid))]
    pub async fn read(
        &self,
        prior: &Account,
        cancel: &CancellationToken,
    ) -> Result<Account, AccountError> {
        let uuid = validation::require_uuid(prior)?;

        let Some(wire) = self.client.fetch(uuid, cancel).await? else {
            warn!("Account vanished upstream");
            return Err(AccountError::Vanished { uuid: uuid.clone() });
        };
        let projected = same_identity(uuid, Account::from_wire(wire)?)?;
        let account = reconcile(projected, prior, prior.last_updated.clone());

        info!("Account read");
        Ok(account)
    }

    /// Pushes every attribute `desired` sets to the account it identifies.
    #[instrument(skip(self, desired, cancel), fields(uuid = ?desired.uuid))]
    pub async fn update(
        &self,
        desired: &Account,
        cancel: &CancellationToken,
    ) -> Result<Account, AccountError> {
        let uuid = validation::require_uuid(desired)?;
        desired.validate()?;

        let wire = self
            .client
            .update_account(uuid, &desired.to_payload(), cancel)
            .await
            .inspect_err(|e| warn!(error = %e, "Account update failed"))?;
        let projected = same_identity(uuid, Account::from_wire(wire)?)?;
        let account = reconcile(projected, desired, Some(stamp()));

        info!("Account updated");
        Ok(account)
    }

    /// Destroys the account identified by `prior`.
    #[instrument(skip(self, prior, cancel), fields(uuid = ?prior.uuid))]
    pub async fn delete(
        &self,
        prior: &Account,
        cancel: &CancellationToken,
    ) -> Result<(), AccountError> {
        let uuid = validation::require_uuid(prior)?;

        self.client
            .remove(uuid, cancel)
            .await
            .inspect_err(|e| warn!(error = %e, "Account deletion failed"))?;

        info!("Account deleted");
        Ok(())
    }

    /// A record carrying only `uuid`; complete it with [`AccountResource::read`].
    pub fn import(uuid: impl Into<String>) -> Account {
        Account::with_uuid(uuid)
    }
}

fn reconcile(mut projected: Account, source: &Account, last_updated: Option<String>) -> Account {
    projected.password = source.password.clone();
    projected.last_updated = last_updated;
    projected
}

fn same_identity(expected: &str, projected: Account) -> Result<Account, AccountError> {
    match projected.uuid.as_deref() {
        Some(uuid) if uuid == expected => Ok(projected),
        other => Err(AccountError::Mapping {
            id: Some(expected.to_string()),
            detail: format!("the API answered with uuid {}", other.unwrap_or("<none>")),
        }),
    }
}

fn stamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reconcile_keeps_password_and_given_marker() {
        let desired = Account {
            password: Some("$2a$hash".into()),
            name: Some("planned".into()),
            ..Account::with_uuid("u-1")
        };
        let projected = Account {
            name: Some("remote".into()),
            ..Account::with_uuid("u-1")
        };

        let account = reconcile(projected, &desired, Some("marker".into()));
        assert_eq!(account.password.as_deref(), Some("$2a$hash"));
        assert_eq!(account.name.as_deref(), Some("remote"));
        assert_eq!(account.last_updated.as_deref(), Some("marker"));
    }

    #[test]
    fn test_identity_guard_rejects_a_different_uuid() {
        assert!(same_identity("u-1", Account::with_uuid("u-1")).is_ok());
        let err = same_identity("u-1", Account::with_uuid("u-2")).unwrap_err();
        assert!(matches!(err, AccountError::Mapping { .. }));
        assert_eq!(err.id(), Some("u-1"));
    }

    #[test]
    fn test_stamp_is_rfc3339() {
        let marker = stamp();
        assert!(chrono::DateTime::parse_from_rfc3339(&marker).is_ok());
        assert!(marker.ends_with('Z'));
    }
}
