//! # Generic Client
//!
//! This module defines the generic client for exchanging entities with a
//! remote REST collection.

use crate::entity::RemoteEntity;
use crate::error::{FrameworkError, Operation};
use crate::message::{Envelope, ResourceRequest, TransportResponse};
use crate::transport::Transport;
use std::marker::PhantomData;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, instrument, warn};

/// ## ResourceClient
///
/// The `ResourceClient<T>` provides a type-safe, async API for the CRUD + List
/// exchanges of one remote collection. It builds each request from
/// [`RemoteEntity::COLLECTION`], hands it to the shared [`Transport`], and
/// classifies the answer: the expected status is checked first, then the body
/// is decoded into `T::Wire` (unwrapping the `{result, success}` envelope where
/// the remote uses one).
///
/// * **Cloneable** – holds only an `Arc` to the transport.
/// * **Cancellable** – every call takes a `CancellationToken`; a cancelled
///   token aborts the in-flight request and yields [`FrameworkError::Cancelled`].
/// * **One call per operation** – no retries, no internal timeouts.
pub struct ResourceClient<T: RemoteEntity> {
    transport: Arc<dyn Transport>,
    _entity: PhantomData<fn() -> T>,
}

impl<T: RemoteEntity> Clone for ResourceClient<T> {
    fn clone(&self) -> Self {
        Self {
            transport: Arc::clone(&self.transport),
            _entity: PhantomData,
        }
    }
}

impl<T: RemoteEntity> ResourceClient<T> {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self {
            transport,
            _entity: PhantomData,
        }
    }

    /// `POST {COLLECTION}`; expects 201 and a non-null `result`.
    #[instrument(skip(self, payload, cancel), fields(collection = T::COLLECTION))]
    pub async fn create(
        &self,
        payload: &T::Payload,
        cancel: &CancellationToken,
    ) -> Result<T::Wire, FrameworkError> {
        let operation = Operation::Create;
        let body = encode(operation, payload)?;
        let response = self
            .exchange(operation, None, ResourceRequest::post(T::COLLECTION, body), cancel)
            .await?;
        expect_status(&response, 201, operation, None)?;
        unwrap_result(&response, operation, None)
    }

    /// `GET {COLLECTION}/{id}`; expects 200. A null or empty body yields `None`.
    #[instrument(skip(self, cancel), fields(collection = T::COLLECTION))]
    pub async fn get(
        &self,
        id: &T::Id,
        cancel: &CancellationToken,
    ) -> Result<Option<T::Wire>, FrameworkError> {
        let operation = Operation::Read;
        let id = id.to_string();
        let response = self
            .exchange(operation, Some(id.clone()), ResourceRequest::get(item_path::<T>(&id)), cancel)
            .await?;
        expect_status(&response, 200, operation, Some(&id))?;
        response.decode(operation, Some(id))
    }

    /// `PUT {COLLECTION}/{id}`; expects 200 and a non-null `result`.
    #[instrument(skip(self, payload, cancel), fields(collection = T::COLLECTION))]
    pub async fn update(
        &self,
        id: &T::Id,
        payload: &T::Payload,
        cancel: &CancellationToken,
    ) -> Result<T::Wire, FrameworkError> {
        let operation = Operation::Update;
        let id = id.to_string();
        let body = encode(operation, payload)?;
        let response = self
            .exchange(
                operation,
                Some(id.clone()),
                ResourceRequest::put(item_path::<T>(&id), body),
                cancel,
            )
            .await?;
        expect_status(&response, 200, operation, Some(&id))?;
        unwrap_result(&response, operation, Some(id))
    }

    /// `DELETE {COLLECTION}/{id}`; expects 200 and a non-null `result`.
    #[instrument(skip(self, cancel), fields(collection = T::COLLECTION))]
    pub async fn delete(
        &self,
        id: &T::Id,
        cancel: &CancellationToken,
    ) -> Result<T::Wire, FrameworkError> {
        let operation = Operation::Delete;
        let id = id.to_string();
        let response = self
            .exchange(operation, Some(id.clone()), ResourceRequest::delete(item_path::<T>(&id)), cancel)
            .await?;
        expect_status(&response, 200, operation, Some(&id))?;
        unwrap_result(&response, operation, Some(id))
    }

    /// `GET {COLLECTION}`; expects 200 with `success: true` and a non-empty `result`.
    #[instrument(skip(self, cancel), fields(collection = T::COLLECTION))]
    pub async fn list(&self, cancel: &CancellationToken) -> Result<Vec<T::Wire>, FrameworkError> {
        let operation = Operation::List;
        let response = self
            .exchange(operation, None, ResourceRequest::get(T::COLLECTION), cancel)
            .await?;
        expect_status(&response, 200, operation, None)?;

        let envelope: Envelope<Vec<T::Wire>> = response
            .decode(operation, None)?
            .ok_or(FrameworkError::MissingResult { operation, id: None })?;
        if envelope.success != Some(true) {
            warn!("Remote flagged the listing as unsuccessful");
            return Err(FrameworkError::Unsuccessful { operation });
        }
        let items = envelope
            .result
            .ok_or(FrameworkError::MissingResult { operation, id: None })?;
        if items.is_empty() {
            return Err(FrameworkError::EmptyCollection { operation });
        }

        debug!(count = items.len(), "Listed collection");
        Ok(items)
    }

    async fn exchange(
        &self,
        operation: Operation,
        id: Option<String>,
        request: ResourceRequest,
        cancel: &CancellationToken,
    ) -> Result<TransportResponse, FrameworkError> {
        if cancel.is_cancelled() {
            debug!(%operation, "Cancelled before dispatch");
            return Err(FrameworkError::Cancelled { operation, id });
        }

        debug!(method = %request.method, path = %request.path, "Sending request");
        let outcome = tokio::select! {
            biased;
            _ = cancel.cancelled() => None,
            result = self.transport.send(request) => Some(result),
        };

        match outcome {
            None => {
                warn!(%operation, "Cancelled while in flight");
                Err(FrameworkError::Cancelled { operation, id })
            }
            Some(Ok(response)) => Ok(response),
            Some(Err(source)) => {
                warn!(%operation, error = %source, "Transport failure");
                Err(FrameworkError::Transport {
                    operation,
                    id,
                    source,
                })
            }
        }
    }
}

/// The id is percent-encoded so it always addresses exactly one segment.
fn item_path<T: RemoteEntity>(id: &str) -> String {
    format!("{}/{}", T::COLLECTION, urlencoding::encode(id))
}

fn encode<P: serde::Serialize>(
    operation: Operation,
    payload: &P,
) -> Result<serde_json::Value, FrameworkError> {
    serde_json::to_value(payload).map_err(|source| FrameworkError::Encode { operation, source })
}

fn expect_status(
    response: &TransportResponse,
    expected: u16,
    operation: Operation,
    id: Option<&str>,
) -> Result<(), FrameworkError> {
    if response.status == expected {
        return Ok(());
    }
    warn!(%operation, status = response.status, expected, "Unexpected status");
    Err(FrameworkError::UnexpectedStatus {
        operation,
        id: id.map(str::to_string),
        status: response.status,
    })
}

fn unwrap_result<W: serde::de::DeserializeOwned>(
    response: &TransportResponse,
    operation: Operation,
    id: Option<String>,
) -> Result<W, FrameworkError> {
    let envelope: Option<Envelope<W>> = response.decode(operation, id.clone())?;
    envelope
        .and_then(|envelope| envelope.result)
        .ok_or(FrameworkError::MissingResult { operation, id })
}
