//! Local checks run before any request leaves the process.

use super::error::AccountError;
use crate::model::{Account, AccountKind, Permission};
use once_cell::sync::Lazy;
use regex::Regex;

/// Shape of a bcrypt hash: `$2a$`, `$2b$` or `$2y$` followed by cost, salt and digest.
static BCRYPT_HASH: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\$2[ayb]\$.{56}$").expect("BCRYPT_HASH should compile - this is a bug"));

/// Rejects unknown `kind`/`permissions` values and passwords that are not bcrypt hashes.
pub fn validate(account: &Account) -> Result<(), AccountError> {
    if let Some(kind) = &account.kind {
        kind.parse::<AccountKind>()
            .map_err(|e| AccountError::Validation {
                field: "kind",
                detail: e.to_string(),
            })?;
    }

    for permission in account.permissions.iter().flatten() {
        permission
            .parse::<Permission>()
            .map_err(|e| AccountError::Validation {
                field: "permissions",
                detail: e.to_string(),
            })?;
    }

    if let Some(password) = &account.password {
        if !BCRYPT_HASH.is_match(password) {
            return Err(AccountError::Validation {
                field: "password",
                detail: "must be a bcrypt hash ($2a$, $2b$ or $2y$ followed by 56 characters)".into(),
            });
        }
    }

    Ok(())
}

/// The record's uuid, or a validation error when it was never assigned.
pub fn require_uuid(account: &Account) -> Result<&String, AccountError> {
    account
        .uuid
        .as_ref()
        .filter(|uuid| !uuid.is_empty())
        .ok_or_else(|| AccountError::Validation {
            field: "uuid",
            detail: "the account has no uuid assigned".into(),
        })
}
