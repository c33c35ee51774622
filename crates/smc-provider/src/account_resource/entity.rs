//! [`RemoteEntity`] implementation and field mapping for [`Account`].
//!
//! [`project`] turns an API object into a record and [`serialize`] builds the
//! request payload from a record. Both are pure.

use super::error::AccountError;
use super::validation;
use crate::model::{Account, AccountPayload, AccountWire};
use resource_framework::RemoteEntity;

impl RemoteEntity for Account {
    type Id = String;
    type Wire = AccountWire;
    type Payload = AccountPayload;
    type Error = AccountError;

    const COLLECTION: &'static str = "/accounts";

    fn remote_id(&self) -> Option<&String> {
        self.uuid.as_ref()
    }

    fn validate(&self) -> Result<(), AccountError> {
        validation::validate(self)
    }

    fn to_payload(&self) -> AccountPayload {
        serialize(self)
    }

    fn from_wire(wire: AccountWire) -> Result<Self, AccountError> {
        project(wire)
    }
}

/// Projects an API object into a fresh record.
///
/// Missing and `null` keys leave the attribute unset; an empty list stays an
/// empty list. List order is kept as the API sent it. An object without a
/// `uuid` is rejected.
pub fn project(wire: AccountWire) -> Result<Account, AccountError> {
    let identifier = wire.identifier.present();
    let uuid = wire
        .uuid
        .present()
        .filter(|uuid| !uuid.is_empty())
        .ok_or_else(|| AccountError::Mapping {
            id: identifier.clone(),
            detail: "the API returned an account without a uuid".into(),
        })?;

    Ok(Account {
        uuid: Some(uuid),
        identifier,
        kind: wire.kind.present(),
        name: wire.name.present(),
        description: wire.description.present(),
        dn: wire.dn.present(),
        email: wire.email.present(),
        local_auth: wire.local_auth.present(),
        folders: wire.folders.present(),
        permissions: wire.permissions.present(),
        password: None,
        last_updated: None,
    })
}

/// Builds the create/update payload from the attributes `account` has set.
pub fn serialize(account: &Account) -> AccountPayload {
    AccountPayload {
        identifier: account.identifier.clone(),
        kind: account.kind.clone(),
        name: account.name.clone(),
        description: account.description.clone(),
        dn: account.dn.clone(),
        email: account.email.clone(),
        local_auth: account.local_auth,
        folders: account.folders.clone(),
        permissions: account.permissions.clone(),
        password: account.password.clone(),
    }
}
