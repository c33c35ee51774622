//! # Generic Messages
//!
//! This module defines the request and response types exchanged between the
//! [`ResourceClient`](crate::ResourceClient) and a [`Transport`](crate::Transport),
//! plus the `{result, success}` envelope the remote wraps most answers in.

use crate::error::{FrameworkError, Operation};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::fmt;

/// HTTP verbs used by the CRUD + List pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let verb = match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Delete => "DELETE",
        };
        f.write_str(verb)
    }
}

impl From<Method> for reqwest::Method {
    fn from(method: Method) -> Self {
        match method {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
            Method::Put => reqwest::Method::PUT,
            Method::Delete => reqwest::Method::DELETE,
        }
    }
}

/// One outbound call against the remote collection.
///
/// # The CRUD Pattern
/// Every lifecycle operation maps onto exactly one request:
///
/// - **Create**: `POST {collection}` with a payload.
/// - **Read**: `GET {collection}/{id}`.
/// - **Update**: `PUT {collection}/{id}` with a payload.
/// - **Delete**: `DELETE {collection}/{id}`.
/// - **List**: `GET {collection}`.
#[derive(Debug, Clone, PartialEq)]
pub struct ResourceRequest {
    pub method: Method,
    pub path: String,
    pub body: Option<serde_json::Value>,
}

impl ResourceRequest {
    pub fn get(path: impl Into<String>) -> Self {
        Self {
            method: Method::Get,
            path: path.into(),
            body: None,
        }
    }

    pub fn post(path: impl Into<String>, body: serde_json::Value) -> Self {
        Self {
            method: Method::Post,
            path: path.into(),
            body: Some(body),
        }
    }

    pub fn put(path: impl Into<String>, body: serde_json::Value) -> Self {
        Self {
            method: Method::Put,
            path: path.into(),
            body: Some(body),
        }
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self {
            method: Method::Delete,
            path: path.into(),
            body: None,
        }
    }
}

/// Status line and raw body of a remote answer.
#[derive(Debug, Clone, PartialEq)]
pub struct TransportResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

impl TransportResponse {
    pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// Decodes the body. An empty body and a literal `null` both yield `None`.
    pub fn decode<D: DeserializeOwned>(
        &self,
        operation: Operation,
        id: Option<String>,
    ) -> Result<Option<D>, FrameworkError> {
        if self.body.iter().all(u8::is_ascii_whitespace) {
            return Ok(None);
        }
        serde_json::from_slice::<Option<D>>(&self.body).map_err(|source| FrameworkError::Decode {
            operation,
            id,
            source,
        })
    }
}

/// Wrapper returned by the mutating and listing endpoints.
#[derive(Debug, Clone, Deserialize)]
pub struct Envelope<T> {
    pub result: Option<T>,
    pub success: Option<bool>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_treats_blank_and_null_bodies_as_none() {
        let blank = TransportResponse::new(200, "  \n");
        let null = TransportResponse::new(200, "null");
        assert!(blank.decode::<u32>(Operation::Read, None).unwrap().is_none());
        assert!(null.decode::<u32>(Operation::Read, None).unwrap().is_none());
    }

    #[test]
    fn test_decode_reports_malformed_body() {
        let garbage = TransportResponse::new(200, "{not json");
        let err = garbage
            .decode::<u32>(Operation::Read, Some("abc".into()))
            .unwrap_err();
        assert!(matches!(err, FrameworkError::Decode { operation: Operation::Read, .. }));
        assert_eq!(err.id(), Some("abc"));
    }

    #[test]
    fn test_envelope_tolerates_missing_keys() {
        let envelope: Envelope<u32> = serde_json::from_str("{}").unwrap();
        assert!(envelope.result.is_none());
        assert!(envelope.success.is_none());
    }
}
