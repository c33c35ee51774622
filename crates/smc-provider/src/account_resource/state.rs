//! Per-instance lifecycle state for a managed account.
//!
//! | Operation | Allowed from | On success |
//! |-----------|--------------|------------|
//! | import | (new instance) | Planned |
//! | create | Absent, Tainted | Present |
//! | read | Planned, Present | Present |
//! | update | Present | Present |
//! | delete | Present | Absent |
//!
//! Any other transition fails with
//! [`AccountError::InvalidTransition`] before any request is sent.

use super::{AccountError, AccountResource};
use crate::model::Account;
use resource_framework::{CancellationToken, Operation};
use std::fmt;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LifecycleState {
    /// Not known to exist remotely.
    Absent,
    /// Imported by uuid, waiting for its first read.
    Planned,
    /// Exists remotely and the record reflects it.
    Present,
    /// The API accepted a create but answered without an identity.
    Tainted,
}

impl fmt::Display for LifecycleState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            LifecycleState::Absent => "absent",
            LifecycleState::Planned => "planned",
            LifecycleState::Present => "present",
            LifecycleState::Tainted => "tainted",
        };
        f.write_str(name)
    }
}

/// One account instance driven through the lifecycle.
///
/// The record and state only change when an operation succeeds, with one
/// exception: a create that fails with a mapping error moves the instance to
/// [`LifecycleState::Tainted`] (the record stays as planned).
#[derive(Debug, Clone)]
pub struct ManagedAccount {
    state: LifecycleState,
    record: Account,
}

impl ManagedAccount {
    /// A desired account that does not exist yet.
    pub fn new(desired: Account) -> Self {
        Self {
            state: LifecycleState::Absent,
            record: desired,
        }
    }

    /// An existing remote account known only by its uuid.
    pub fn imported(uuid: impl Into<String>) -> Self {
        Self {
            state: LifecycleState::Planned,
            record: AccountResource::import(uuid),
        }
    }

    pub fn state(&self) -> LifecycleState {
        self.state
    }

    pub fn record(&self) -> &Account {
        &self.record
    }

    pub fn into_record(self) -> Account {
        self.record
    }

    pub async fn create(
        &mut self,
        resource: &AccountResource,
        cancel: &CancellationToken,
    ) -> Result<(), AccountError> {
        self.allow(Operation::Create, &[LifecycleState::Absent, LifecycleState::Tainted])?;

        match resource.create(&self.record, cancel).await {
            Ok(record) => {
                self.enter(LifecycleState::Present, record);
                Ok(())
            }
            Err(e @ AccountError::Mapping { .. }) => {
                debug!(from = %self.state, "Create answered without identity, tainting");
                self.state = LifecycleState::Tainted;
                Err(e)
            }
            Err(e) => Err(e),
        }
    }

    pub async fn read(
        &mut self,
        resource: &AccountResource,
        cancel: &CancellationToken,
    ) -> Result<(), AccountError> {
        self.allow(Operation::Read, &[LifecycleState::Planned, LifecycleState::Present])?;

        let record = resource.read(&self.record, cancel).await?;
        self.enter(LifecycleState::Present, record);
        Ok(())
    }

    /// Applies `desired`. Its uuid defaults to the current one when unset and
    /// must match it otherwise; a mismatch fails before any request is sent.
    pub async fn update(
        &mut self,
        resource: &AccountResource,
        mut desired: Account,
        cancel: &CancellationToken,
    ) -> Result<(), AccountError> {
        self.allow(Operation::Update, &[LifecycleState::Present])?;

        if let (Some(wanted), Some(current)) = (&desired.uuid, &self.record.uuid) {
            if wanted != current {
                return Err(AccountError::Validation {
                    field: "uuid",
                    detail: format!("cannot change the uuid of account {current} to {wanted}"),
                });
            }
        }
        if desired.uuid.is_none() {
            desired.uuid = self.record.uuid.clone();
        }
        let record = resource.update(&desired, cancel).await?;
        self.enter(LifecycleState::Present, record);
        Ok(())
    }

    pub async fn delete(
        &mut self,
        resource: &AccountResource,
        cancel: &CancellationToken,
    ) -> Result<(), AccountError> {
        self.allow(Operation::Delete, &[LifecycleState::Present])?;

        resource.delete(&self.record, cancel).await?;
        self.enter(LifecycleState::Absent, Account::default());
        Ok(())
    }

    fn allow(&self, operation: Operation, from: &[LifecycleState]) -> Result<(), AccountError> {
        if from.contains(&self.state) {
            Ok(())
        } else {
            Err(AccountError::InvalidTransition {
                operation,
                state: self.state,
            })
        }
    }

    fn enter(&mut self, state: LifecycleState, record: Account) {
        debug!(from = %self.state, to = %state, "Lifecycle transition");
        self.state = state;
        self.record = record;
    }
}
