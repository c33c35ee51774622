//! # Mock Transport & Testing Guide
//!
//! [`MockTransport`] implements the same [`Transport`] contract as
//! [`HttpTransport`](crate::HttpTransport) but answers from an in-memory FIFO
//! queue of expectations. Each test builds its own instance, so there is no
//! process-wide state shared between tests.
//!
//! ## When to use MockTransport vs wiremock
//!
//! | Feature | MockTransport | wiremock + HttpTransport |
//! |---------|---------------|--------------------------|
//! | **Speed** | Instant (in-memory) | Fast (local socket) |
//! | **Ordering** | Strict FIFO, asserts method + path | Matcher based |
//! | **Failure injection** | `fail`, `hang` | Status codes, delays |
//! | **Use Case** | Controller and mapper logic | Headers, URLs, full stack |
//!
//! ## Example
//!
//! ```rust
//! use resource_framework::mock::MockTransport;
//! use resource_framework::{Method, ResourceRequest, Transport};
//! use serde_json::json;
//!
//! #[tokio::main]
//! async fn main() {
//!     let mock = MockTransport::new();
//!     mock.expect(Method::Get, "/tags/1")
//!         .respond_json(200, json!({ "id": "1" }));
//!     mock.expect(Method::Delete, "/tags/1").respond_status(404);
//!
//!     let transport = mock.transport();
//!     let first = transport.send(ResourceRequest::get("/tags/1")).await.unwrap();
//!     assert_eq!(first.status, 200);
//!     let second = transport.send(ResourceRequest::delete("/tags/1")).await.unwrap();
//!     assert_eq!(second.status, 404);
//!
//!     assert_eq!(mock.request_count(), 2);
//!     mock.verify();
//! }
//! ```

use crate::error::TransportError;
use crate::message::{Method, ResourceRequest, TransportResponse};
use crate::transport::Transport;
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

// =============================================================================
// EXPECTATION BUILDER API
// =============================================================================

enum Reply {
    Respond(TransportResponse),
    Fail(String),
    Hang,
}

/// An expected request and the reply it receives.
struct Expectation {
    method: Method,
    path: String,
    reply: Reply,
}

#[derive(Default)]
struct MockState {
    expectations: VecDeque<Expectation>,
    requests: Vec<ResourceRequest>,
}

/// A scripted transport with expectation tracking for fluent testing.
///
/// Requests are matched strictly in the order the expectations were queued.
/// A request that does not match the head of the queue (or arrives when the
/// queue is empty) panics with both sides printed.
#[derive(Clone, Default)]
pub struct MockTransport {
    state: Arc<Mutex<MockState>>,
}

impl MockTransport {
    /// Creates a new mock with no expectations.
    pub fn new() -> Self {
        Self::default()
    }

    /// A shareable handle for wiring into clients.
    pub fn transport(&self) -> Arc<dyn Transport> {
        Arc::new(self.clone())
    }

    /// Queues an expectation for the next request.
    pub fn expect(&self, method: Method, path: impl Into<String>) -> ExpectationBuilder {
        ExpectationBuilder {
            method,
            path: path.into(),
            state: Arc::clone(&self.state),
        }
    }

    /// Every request received so far, in arrival order.
    pub fn requests(&self) -> Vec<ResourceRequest> {
        self.lock().requests.clone()
    }

    pub fn request_count(&self) -> usize {
        self.lock().requests.len()
    }

    /// Verifies that all expectations were met.
    pub fn verify(&self) {
        let state = self.lock();
        if !state.expectations.is_empty() {
            let pending: Vec<String> = state
                .expectations
                .iter()
                .map(|e| format!("{} {}", e.method, e.path))
                .collect();
            panic!(
                "Not all expectations were met. {} remaining: {:?}",
                pending.len(),
                pending
            );
        }
    }

    fn lock(&self) -> MutexGuard<'_, MockState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn send(&self, request: ResourceRequest) -> Result<TransportResponse, TransportError> {
        let expectation = {
            let mut state = self.lock();
            state.requests.push(request.clone());
            state.expectations.pop_front()
        };

        let Some(expectation) = expectation else {
            panic!("Unexpected request {} {}: no expectations left", request.method, request.path);
        };
        if expectation.method != request.method || expectation.path != request.path {
            panic!(
                "Expectation mismatch: expected {} {}, got {} {}",
                expectation.method, expectation.path, request.method, request.path
            );
        }

        match expectation.reply {
            Reply::Respond(response) => Ok(response),
            Reply::Fail(reason) => Err(TransportError::Simulated(reason)),
            Reply::Hang => std::future::pending().await,
        }
    }
}

/// Builder that completes an expectation with its reply.
pub struct ExpectationBuilder {
    method: Method,
    path: String,
    state: Arc<Mutex<MockState>>,
}

impl ExpectationBuilder {
    /// Replies with `status` and the JSON-encoded `body`.
    pub fn respond_json(self, status: u16, body: serde_json::Value) {
        let bytes = body.to_string().into_bytes();
        self.push(Reply::Respond(TransportResponse::new(status, bytes)));
    }

    /// Replies with `status` and an empty body.
    pub fn respond_status(self, status: u16) {
        self.push(Reply::Respond(TransportResponse::new(status, Vec::new())));
    }

    /// Replies with `status` and a literal `null` body.
    pub fn respond_null(self, status: u16) {
        self.push(Reply::Respond(TransportResponse::new(status, "null")));
    }

    /// Replies with `status` and raw bytes, for malformed-body cases.
    pub fn respond_raw(self, status: u16, body: impl Into<Vec<u8>>) {
        self.push(Reply::Respond(TransportResponse::new(status, body)));
    }

    /// Fails before any status is received.
    pub fn fail(self, reason: impl Into<String>) {
        self.push(Reply::Fail(reason.into()));
    }

    /// Never answers; pair with a cancellation token.
    pub fn hang(self) {
        self.push(Reply::Hang);
    }

    fn push(self, reply: Reply) {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        state.expectations.push_back(Expectation {
            method: self.method,
            path: self.path,
            reply,
        });
    }
}
