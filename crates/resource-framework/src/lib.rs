//! # Resource Framework
//!
//! This crate provides the building blocks for reconciling locally owned
//! records with a remote REST collection. It implements a
//! **Resource-Oriented Architecture (ROA)** client: every resource type gets
//! the same Create, Read, Update, Delete and List exchanges, the same status
//! classification, and the same error taxonomy.
//!
//! ## Architecture Overview
//!
//! The framework separates concerns into three layers:
//!
//! 1. **Entity Layer** ([`RemoteEntity`]) - the record, its wire and payload
//!    shapes, and the mapping between them
//! 2. **Exchange Layer** ([`ResourceClient`], [`EntityClient`]) - request
//!    building, status and envelope checks, cancellation
//! 3. **Transport Layer** ([`Transport`]) - moving bytes to the remote
//!    ([`HttpTransport`] in production, [`mock::MockTransport`] in tests)
//!
//! Entities never see HTTP, and transports never see entities.
//!
//! ## Exchange Rules
//!
//! | Operation | Request | Success | Body |
//! |-----------|---------|---------|------|
//! | create | `POST {COLLECTION}` | 201 | `{result}` must be non-null |
//! | get | `GET {COLLECTION}/{id}` | 200 | bare object, `null` means none |
//! | update | `PUT {COLLECTION}/{id}` | 200 | `{result}` must be non-null |
//! | delete | `DELETE {COLLECTION}/{id}` | 200 | `{result}` must be non-null |
//! | list | `GET {COLLECTION}` | 200 | `success: true`, non-empty `result` |
//!
//! Each operation issues exactly one request. There are no retries and no
//! timeouts at this layer; [`HttpTransport::with_timeout`] is where a timeout
//! belongs.
//!
//! ## Field Presence
//!
//! Remote objects distinguish a missing key from an explicit `null`. Wire
//! shapes use [`Field`] for every optional attribute so the mapper can tell
//! `Absent`, `Null` and `Present(value)` apart.
//!
//! ## Testing
//!
//! The [`mock`] module provides a scripted, per-test [`mock::MockTransport`].
//! End-to-end tests run [`HttpTransport`] against a `wiremock` server.

pub mod client;
pub mod client_trait;
pub mod entity;
pub mod error;
pub mod field;
pub mod message;
pub mod mock;
pub mod tracing;
pub mod transport;

// Re-export core types for convenience
pub use client::ResourceClient;
pub use client_trait::EntityClient;
pub use entity::RemoteEntity;
pub use error::{FrameworkError, Operation, TransportError};
pub use field::Field;
pub use message::{Envelope, Method, ResourceRequest, TransportResponse};
pub use transport::{HttpTransport, Transport};

// Consumers take cancellation tokens in their own signatures.
pub use tokio_util::sync::CancellationToken;
