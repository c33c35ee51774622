//! # Transport Seam
//!
//! A [`Transport`] moves one [`ResourceRequest`] to the remote and hands back
//! the raw [`TransportResponse`]. It knows nothing about entities, envelopes,
//! or which status codes count as success; that classification lives in
//! [`ResourceClient`](crate::ResourceClient).
//!
//! [`HttpTransport`] is the production implementation over `reqwest`. Tests
//! use [`MockTransport`](crate::mock::MockTransport) instead.

use crate::error::TransportError;
use crate::message::{ResourceRequest, TransportResponse};
use async_trait::async_trait;
use reqwest::header::{HeaderValue, ACCEPT};
use std::fmt;
use std::time::Duration;
use tracing::debug;

/// Sends requests to the remote API.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, request: ResourceRequest) -> Result<TransportResponse, TransportError>;
}

/// Bearer-authenticated JSON transport over HTTP(S).
#[derive(Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl HttpTransport {
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Result<Self, TransportError> {
        Self::build(base_url.into(), api_key.into(), None)
    }

    /// Same as [`HttpTransport::new`], with a per-request timeout.
    pub fn with_timeout(
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, TransportError> {
        Self::build(base_url.into(), api_key.into(), Some(timeout))
    }

    fn build(base_url: String, api_key: String, timeout: Option<Duration>) -> Result<Self, TransportError> {
        let base_url = base_url.trim_end_matches('/').to_string();
        if base_url.is_empty() {
            return Err(TransportError::Config("base URL is empty".into()));
        }
        if api_key.is_empty() {
            return Err(TransportError::Config("API key is empty".into()));
        }

        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            client: builder.build()?,
            base_url,
            api_key,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }
}

impl fmt::Debug for HttpTransport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpTransport")
            .field("base_url", &self.base_url)
            .field("api_key", &"***")
            .finish()
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(&self, request: ResourceRequest) -> Result<TransportResponse, TransportError> {
        let url = self.url(&request.path);
        debug!(method = %request.method, %url, "Dispatching request");

        let mut builder = self
            .client
            .request(request.method.into(), &url)
            .bearer_auth(&self.api_key)
            .header(ACCEPT, HeaderValue::from_static("application/json"));
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = builder.send().await?;
        let status = response.status().as_u16();
        let body = response.bytes().await?;
        debug!(status, bytes = body.len(), "Received response");

        Ok(TransportResponse::new(status, body.to_vec()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_joins_without_double_slash() {
        let transport = HttpTransport::new("https://smc.example.com/", "key").unwrap();
        assert_eq!(transport.base_url(), "https://smc.example.com");
        assert_eq!(
            transport.url("/accounts/abc"),
            "https://smc.example.com/accounts/abc"
        );
    }

    #[test]
    fn test_debug_masks_api_key() {
        let transport = HttpTransport::new("https://smc.example.com", "super-secret").unwrap();
        let rendered = format!("{transport:?}");
        assert!(!rendered.contains("super-secret"));
        assert!(rendered.contains("***"));
    }

    #[test]
    fn test_rejects_empty_settings() {
        assert!(matches!(
            HttpTransport::new("", "key"),
            Err(TransportError::Config(_))
        ));
        assert!(matches!(
            HttpTransport::new("https://smc.example.com", ""),
            Err(TransportError::Config(_))
        ));
    }
}
