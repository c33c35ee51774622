//! # Account Client
//!
//! Provides a high-level API for the `/accounts` collection.
//! It wraps a `ResourceClient<Account>` and exposes domain-specific methods.
use crate::account_resource::AccountError;
use crate::model::{Account, AccountPayload, AccountWire};
use async_trait::async_trait;
use resource_framework::{CancellationToken, EntityClient, FrameworkError, ResourceClient};
use tracing::{debug, instrument};

/// Client for the SMC accounts API.
#[derive(Clone)]
pub struct AccountClient {
    inner: ResourceClient<Account>,
}

impl AccountClient {
    pub fn new(inner: ResourceClient<Account>) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl EntityClient<Account> for AccountClient {
    type Error = AccountError;

    fn inner(&self) -> &ResourceClient<Account> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        AccountError::from(e)
    }
}

impl AccountClient {
    // Create and update carry a payload, so they are not part of the shared trait.

    #[instrument(skip(self, payload, cancel))]
    pub async fn create_account(
        &self,
        payload: &AccountPayload,
        cancel: &CancellationToken,
    ) -> Result<AccountWire, AccountError> {
        debug!("Sending request");
        self.inner.create(payload, cancel).await.map_err(Self::map_error)
    }

    #[instrument(skip(self, payload, cancel))]
    pub async fn update_account(
        &self,
        uuid: &String,
        payload: &AccountPayload,
        cancel: &CancellationToken,
    ) -> Result<AccountWire, AccountError> {
        debug!("Sending request");
        self.inner
            .update(uuid, payload, cancel)
            .await
            .map_err(Self::map_error)
    }
}
