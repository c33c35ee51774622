//! Error types for SMC account operations.

use super::state::LifecycleState;
use crate::lifecycle::ConfigError;
use resource_framework::{FrameworkError, Operation};
use thiserror::Error;

/// Why a remote exchange did not succeed.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum Failure {
    #[error("HTTP status code {0} returned")]
    Status(u16),
    #[error("no result returned")]
    NoResult,
    #[error("the API reported the request as unsuccessful")]
    Unsuccessful,
    #[error("an empty result was returned")]
    Empty,
    #[error("{0}")]
    Transport(String),
}

/// Errors that can occur while managing SMC accounts.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AccountError {
    /// Hostname or API key could not be resolved.
    #[error("configuration error: {0}")]
    Configuration(#[from] ConfigError),

    /// The local record violates an invariant. No request was sent.
    #[error("invalid {field}: {detail}")]
    Validation { field: &'static str, detail: String },

    /// The remote answered with a payload that cannot become a record.
    #[error("unexpected account payload for {}: {detail}", display_id(.id))]
    Mapping { id: Option<String>, detail: String },

    #[error("could not create account {}: {cause}", display_id(.id))]
    Create { id: Option<String>, cause: Failure },

    #[error("could not read account {}: {cause}", display_id(.id))]
    Read { id: Option<String>, cause: Failure },

    #[error("could not update account {}: {cause}", display_id(.id))]
    Update { id: Option<String>, cause: Failure },

    #[error("could not delete account {}: {cause}", display_id(.id))]
    Delete { id: Option<String>, cause: Failure },

    #[error("could not list accounts: {cause}")]
    List { cause: Failure },

    /// A lookup by identifier through the accounts data source failed.
    #[error("could not look up account {identifier}: {cause}")]
    Lookup { identifier: String, cause: Failure },

    /// A read found nothing where an account with this uuid used to be.
    #[error("account {uuid} no longer exists upstream")]
    Vanished { uuid: String },

    #[error("{operation} of account {} was cancelled", display_id(.id))]
    Cancelled { operation: Operation, id: Option<String> },

    #[error("cannot {operation} an account that is {state}")]
    InvalidTransition {
        operation: Operation,
        state: LifecycleState,
    },
}

fn display_id(id: &Option<String>) -> &str {
    id.as_deref().unwrap_or("<unassigned>")
}

/// Taxonomy used by the host runtime to classify a failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Configuration,
    Validation,
    Mapping,
    Create,
    Read,
    Update,
    Delete,
    List,
    Cancelled,
    InvalidTransition,
}

/// A failure rendered for the host: a short summary plus detail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub kind: ErrorKind,
    pub summary: String,
    pub detail: String,
    pub id: Option<String>,
}

impl AccountError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            AccountError::Configuration(_) => ErrorKind::Configuration,
            AccountError::Validation { .. } => ErrorKind::Validation,
            AccountError::Mapping { .. } => ErrorKind::Mapping,
            AccountError::Create { .. } => ErrorKind::Create,
            AccountError::Read { .. } | AccountError::Lookup { .. } | AccountError::Vanished { .. } => {
                ErrorKind::Read
            }
            AccountError::Update { .. } => ErrorKind::Update,
            AccountError::Delete { .. } => ErrorKind::Delete,
            AccountError::List { .. } => ErrorKind::List,
            AccountError::Cancelled { .. } => ErrorKind::Cancelled,
            AccountError::InvalidTransition { .. } => ErrorKind::InvalidTransition,
        }
    }

    /// The identifier involved, when one is known.
    pub fn id(&self) -> Option<&str> {
        match self {
            AccountError::Mapping { id, .. }
            | AccountError::Create { id, .. }
            | AccountError::Read { id, .. }
            | AccountError::Update { id, .. }
            | AccountError::Delete { id, .. }
            | AccountError::Cancelled { id, .. } => id.as_deref(),
            AccountError::Vanished { uuid } => Some(uuid),
            AccountError::Lookup { identifier, .. } => Some(identifier),
            _ => None,
        }
    }

    /// The HTTP status behind the failure, if the remote answered with one.
    pub fn status(&self) -> Option<u16> {
        match self.cause() {
            Some(Failure::Status(status)) => Some(*status),
            _ => None,
        }
    }

    fn cause(&self) -> Option<&Failure> {
        match self {
            AccountError::Create { cause, .. }
            | AccountError::Read { cause, .. }
            | AccountError::Update { cause, .. }
            | AccountError::Delete { cause, .. }
            | AccountError::Lookup { cause, .. }
            | AccountError::List { cause } => Some(cause),
            _ => None,
        }
    }

    /// Fills in `fallback` where the error names no account yet.
    pub fn or_id(self, fallback: Option<&str>) -> Self {
        let fill = |id: Option<String>| id.or_else(|| fallback.map(str::to_string));
        match self {
            AccountError::Create { id, cause } => AccountError::Create { id: fill(id), cause },
            AccountError::Mapping { id, detail } => AccountError::Mapping { id: fill(id), detail },
            AccountError::Cancelled { operation, id } => AccountError::Cancelled {
                operation,
                id: fill(id),
            },
            other => other,
        }
    }

    /// Recasts a read failure from `GET /accounts/{identifier}` as a lookup.
    pub(crate) fn into_lookup(self, identifier: &str) -> Self {
        match self {
            AccountError::Read { cause, .. } => AccountError::Lookup {
                identifier: identifier.to_string(),
                cause,
            },
            other => other,
        }
    }

    pub fn diagnostic(&self) -> Diagnostic {
        let summary = match (self, self.cause()) {
            (AccountError::Configuration(_), _) => "Unable to Create SMC Client",
            (AccountError::Validation { .. }, _) => "Invalid SMC Account Configuration",
            (AccountError::Mapping { .. }, _) => "Unexpected SMC Account Data",
            (AccountError::Create { .. }, Some(Failure::Status(_))) => "HTTP Error Creating the SMC Account",
            (AccountError::Create { .. }, Some(Failure::NoResult)) => {
                "No results Reading response after creating the SMC Account"
            }
            (AccountError::Create { .. }, _) => "Error Creating the SMC Account",
            (AccountError::Read { .. }, Some(Failure::Status(_))) => "HTTP Error Reading the SMC Account",
            (AccountError::Read { .. }, Some(Failure::NoResult)) | (AccountError::Vanished { .. }, _) => {
                "No result Reading the SMC Account"
            }
            (AccountError::Read { .. }, _) => "Error Reading the SMC Account",
            (AccountError::Update { .. }, Some(Failure::Status(_))) => "HTTP Error Updating the SMC Account",
            (AccountError::Update { .. }, Some(Failure::NoResult)) => {
                "No results Reading response after updating the SMC Account"
            }
            (AccountError::Update { .. }, _) => "Error Updating the SMC Account",
            (AccountError::Delete { .. }, Some(Failure::Status(_))) => "HTTP Error Deleting the SMC Account",
            (AccountError::Delete { .. }, Some(Failure::NoResult)) => {
                "No results Reading response after deleting the SMC Account"
            }
            (AccountError::Delete { .. }, _) => "Error Deleting the SMC Account",
            (AccountError::Lookup { .. }, Some(Failure::Status(_))) => "HTTP Error Reading SMC Account",
            (AccountError::Lookup { .. }, Some(Failure::NoResult)) => "No results Reading SMC Account",
            (AccountError::Lookup { .. }, _) => "Error Reading SMC Account",
            (AccountError::List { .. }, Some(Failure::Status(_))) => "HTTP Error Reading SMC Accounts",
            (AccountError::List { .. }, Some(Failure::Transport(_))) => "Error Reading SMC Accounts",
            (AccountError::List { .. }, _) => "No results Reading SMC Accounts",
            (AccountError::Cancelled { .. }, _) => "SMC Account Operation Cancelled",
            (AccountError::InvalidTransition { .. }, _) => "Invalid SMC Account Lifecycle Transition",
        };

        Diagnostic {
            kind: self.kind(),
            summary: summary.to_string(),
            detail: self.to_string(),
            id: self.id().map(str::to_string),
        }
    }
}

impl From<FrameworkError> for AccountError {
    fn from(e: FrameworkError) -> Self {
        let operation = e.operation();
        let id = e.id().map(str::to_string);
        let cause = match e {
            FrameworkError::UnexpectedStatus { status, .. } => Failure::Status(status),
            FrameworkError::MissingResult { .. } => Failure::NoResult,
            FrameworkError::Unsuccessful { .. } => Failure::Unsuccessful,
            FrameworkError::EmptyCollection { .. } => Failure::Empty,
            FrameworkError::Transport { source, .. } => Failure::Transport(source.to_string()),
            FrameworkError::Decode { source, .. } => {
                return AccountError::Mapping {
                    id,
                    detail: source.to_string(),
                }
            }
            FrameworkError::Encode { source, .. } => {
                return AccountError::Mapping {
                    id,
                    detail: format!("could not encode the account payload: {source}"),
                }
            }
            FrameworkError::Cancelled { .. } => return AccountError::Cancelled { operation, id },
        };

        match operation {
            Operation::Create => AccountError::Create { id, cause },
            Operation::Read => AccountError::Read { id, cause },
            Operation::Update => AccountError::Update { id, cause },
            Operation::Delete => AccountError::Delete { id, cause },
            Operation::List => AccountError::List { cause },
        }
    }
}
