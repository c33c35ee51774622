//! # Framework Errors
//!
//! This module defines the common error types used by the generic client and
//! the transports. Each failure names the [`Operation`] that was attempted so
//! resource crates can classify it without re-inspecting the exchange.

use std::fmt;

/// The remote operation a request belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    Create,
    Read,
    Update,
    Delete,
    List,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Operation::Create => "create",
            Operation::Read => "read",
            Operation::Update => "update",
            Operation::Delete => "delete",
            Operation::List => "list",
        };
        f.write_str(name)
    }
}

/// Failures raised by a [`Transport`](crate::Transport) before any HTTP status is known.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("invalid client configuration: {0}")]
    Config(String),
    #[error("simulated transport failure: {0}")]
    Simulated(String),
}

/// Errors produced while exchanging an entity with the remote collection.
#[derive(Debug, thiserror::Error)]
pub enum FrameworkError {
    #[error("{operation} failed before a response was received: {source}")]
    Transport {
        operation: Operation,
        id: Option<String>,
        #[source]
        source: TransportError,
    },
    #[error("{operation} returned HTTP status {status}")]
    UnexpectedStatus {
        operation: Operation,
        id: Option<String>,
        status: u16,
    },
    #[error("{operation} returned no result")]
    MissingResult {
        operation: Operation,
        id: Option<String>,
    },
    #[error("{operation} was reported as unsuccessful by the remote")]
    Unsuccessful { operation: Operation },
    #[error("{operation} returned an empty collection")]
    EmptyCollection { operation: Operation },
    #[error("{operation} returned a malformed body: {source}")]
    Decode {
        operation: Operation,
        id: Option<String>,
        #[source]
        source: serde_json::Error,
    },
    #[error("{operation} request body could not be encoded: {source}")]
    Encode {
        operation: Operation,
        #[source]
        source: serde_json::Error,
    },
    #[error("{operation} was cancelled")]
    Cancelled {
        operation: Operation,
        id: Option<String>,
    },
}

impl FrameworkError {
    /// The operation that failed.
    pub fn operation(&self) -> Operation {
        match self {
            FrameworkError::Transport { operation, .. }
            | FrameworkError::UnexpectedStatus { operation, .. }
            | FrameworkError::MissingResult { operation, .. }
            | FrameworkError::Unsuccessful { operation }
            | FrameworkError::EmptyCollection { operation }
            | FrameworkError::Decode { operation, .. }
            | FrameworkError::Encode { operation, .. }
            | FrameworkError::Cancelled { operation, .. } => *operation,
        }
    }

    /// The identifier the failed request targeted, if any.
    pub fn id(&self) -> Option<&str> {
        match self {
            FrameworkError::Transport { id, .. }
            | FrameworkError::UnexpectedStatus { id, .. }
            | FrameworkError::MissingResult { id, .. }
            | FrameworkError::Decode { id, .. }
            | FrameworkError::Cancelled { id, .. } => id.as_deref(),
            _ => None,
        }
    }

    /// The HTTP status the remote answered with, when that is what failed.
    pub fn status(&self) -> Option<u16> {
        match self {
            FrameworkError::UnexpectedStatus { status, .. } => Some(*status),
            _ => None,
        }
    }
}
