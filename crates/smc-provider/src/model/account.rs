use resource_framework::Field;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// An SMC account (user or group identity) as the caller holds it.
///
/// Every attribute is independently optional: `None` means "unset", while
/// `Some(String::new())` and `Some(vec![])` are set values. The record is
/// serde-serializable so the host can persist it between runs.
///
/// # Equality
/// `PartialEq` ignores `last_updated` and compares `folders` and
/// `permissions` as multisets. Use [`Account::drift`] to see which attributes
/// differ.
#[derive(Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    pub uuid: Option<String>,
    pub identifier: Option<String>,
    pub kind: Option<String>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub dn: Option<String>,
    pub email: Option<String>,
    pub local_auth: Option<bool>,
    pub folders: Option<Vec<String>>,
    pub permissions: Option<Vec<String>>,
    /// Pre-hashed credential. Written on create/update, never read back.
    pub password: Option<String>,
    /// RFC 3339 marker of the last successful create/update.
    pub last_updated: Option<String>,
}

impl Account {
    /// An empty record with only `identifier` and `kind` set.
    pub fn new(identifier: impl Into<String>, kind: AccountKind) -> Self {
        Self {
            identifier: Some(identifier.into()),
            kind: Some(kind.to_string()),
            ..Default::default()
        }
    }

    /// A record carrying nothing but a remote identity.
    pub fn with_uuid(uuid: impl Into<String>) -> Self {
        Self {
            uuid: Some(uuid.into()),
            ..Default::default()
        }
    }

    /// Names of the attributes that differ between `self` and `other`.
    ///
    /// Follows the same rules as `PartialEq`: `last_updated` is never reported
    /// and list order does not matter.
    pub fn drift(&self, other: &Account) -> Vec<&'static str> {
        let mut changed = Vec::new();
        let mut check = |name: &'static str, same: bool| {
            if !same {
                changed.push(name);
            }
        };

        check("uuid", self.uuid == other.uuid);
        check("identifier", self.identifier == other.identifier);
        check("kind", self.kind == other.kind);
        check("name", self.name == other.name);
        check("description", self.description == other.description);
        check("dn", self.dn == other.dn);
        check("email", self.email == other.email);
        check("localAuth", self.local_auth == other.local_auth);
        check("folders", same_multiset(&self.folders, &other.folders));
        check("permissions", same_multiset(&self.permissions, &other.permissions));
        check("password", self.password == other.password);

        changed
    }
}

fn same_multiset(left: &Option<Vec<String>>, right: &Option<Vec<String>>) -> bool {
    match (left, right) {
        (None, None) => true,
        (Some(left), Some(right)) => {
            if left.len() != right.len() {
                return false;
            }
            let mut left: Vec<&String> = left.iter().collect();
            let mut right: Vec<&String> = right.iter().collect();
            left.sort();
            right.sort();
            left == right
        }
        _ => false,
    }
}

impl PartialEq for Account {
    fn eq(&self, other: &Self) -> bool {
        self.drift(other).is_empty()
    }
}

impl fmt::Debug for Account {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Account")
            .field("uuid", &self.uuid)
            .field("identifier", &self.identifier)
            .field("kind", &self.kind)
            .field("name", &self.name)
            .field("description", &self.description)
            .field("dn", &self.dn)
            .field("email", &self.email)
            .field("local_auth", &self.local_auth)
            .field("folders", &self.folders)
            .field("permissions", &self.permissions)
            .field("password", &self.password.as_ref().map(|_| "***"))
            .field("last_updated", &self.last_updated)
            .finish()
    }
}

/// An account object as the SMC API returns it.
///
/// Every key may be missing or `null`; see [`Field`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountWire {
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub uuid: Field<String>,
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub identifier: Field<String>,
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub kind: Field<String>,
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub name: Field<String>,
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub description: Field<String>,
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub dn: Field<String>,
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub email: Field<String>,
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub local_auth: Field<bool>,
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub folders: Field<Vec<String>>,
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub permissions: Field<Vec<String>>,
}

/// The wire view the remote would return for `account`.
///
/// Unset attributes become absent keys. `password` and `last_updated` have
/// no wire counterpart.
impl From<&Account> for AccountWire {
    fn from(account: &Account) -> Self {
        fn field<T: Clone>(value: &Option<T>) -> Field<T> {
            value.clone().map_or(Field::Absent, Field::Present)
        }

        Self {
            uuid: field(&account.uuid),
            identifier: field(&account.identifier),
            kind: field(&account.kind),
            name: field(&account.name),
            description: field(&account.description),
            dn: field(&account.dn),
            email: field(&account.email),
            local_auth: field(&account.local_auth),
            folders: field(&account.folders),
            permissions: field(&account.permissions),
        }
    }
}

/// Request body for `POST /accounts` and `PUT /accounts/{uuid}`.
///
/// Only attributes the record has set are emitted. The identity travels in
/// the path, never in the body.
#[derive(Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountPayload {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub identifier: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dn: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub local_auth: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub folders: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub permissions: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}

impl fmt::Debug for AccountPayload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AccountPayload")
            .field("identifier", &self.identifier)
            .field("kind", &self.kind)
            .field("name", &self.name)
            .field("description", &self.description)
            .field("dn", &self.dn)
            .field("email", &self.email)
            .field("local_auth", &self.local_auth)
            .field("folders", &self.folders)
            .field("permissions", &self.permissions)
            .field("password", &self.password.as_ref().map(|_| "***"))
            .finish()
    }
}

/// Raised when a string is not one of an enum's accepted values.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{value:?} is not one of {allowed}")]
pub struct UnknownVariant {
    pub value: String,
    pub allowed: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AccountKind {
    User,
    Group,
}

impl AccountKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            AccountKind::User => "user",
            AccountKind::Group => "group",
        }
    }
}

impl fmt::Display for AccountKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AccountKind {
    type Err = UnknownVariant;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "user" => Ok(AccountKind::User),
            "group" => Ok(AccountKind::Group),
            _ => Err(UnknownVariant {
                value: value.to_string(),
                allowed: "user, group",
            }),
        }
    }
}

/// Interfaces an account may be granted access to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Permission {
    Smc,
    Sns,
    Console,
    Ssh,
    Api,
}

impl Permission {
    pub fn as_str(&self) -> &'static str {
        match self {
            Permission::Smc => "smc",
            Permission::Sns => "sns",
            Permission::Console => "console",
            Permission::Ssh => "ssh",
            Permission::Api => "api",
        }
    }
}

impl fmt::Display for Permission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Permission {
    type Err = UnknownVariant;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "smc" => Ok(Permission::Smc),
            "sns" => Ok(Permission::Sns),
            "console" => Ok(Permission::Console),
            "ssh" => Ok(Permission::Ssh),
            "api" => Ok(Permission::Api),
            _ => Err(UnknownVariant {
                value: value.to_string(),
                allowed: "smc, sns, console, ssh, api",
            }),
        }
    }
}
