//! # EntityClient Trait
//!
//! Provides a common interface for resource-specific clients, adding default
//! `fetch`, `remove` and `fetch_all` methods built on top of a generic
//! `ResourceClient`.
use crate::{FrameworkError, RemoteEntity, ResourceClient};
use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

/// Trait for resource-specific clients to inherit the standard exchanges.
///
/// Implementors supply the inner [`ResourceClient`] and a mapping from
/// [`FrameworkError`] into their own error type. The provided methods return
/// raw wire objects; projecting them into records stays with the caller.
///
/// # Example
///
/// ```rust
/// use resource_framework::{EntityClient, FrameworkError, RemoteEntity, ResourceClient};
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Clone, Debug)]
/// struct Tag { id: Option<String>, label: String }
/// #[derive(Debug, Deserialize)] struct TagWire { id: String, label: String }
/// #[derive(Debug, Serialize)] struct TagPayload { label: String }
/// #[derive(Debug, thiserror::Error)] #[error("tag error: {0}")] struct TagError(String);
///
/// impl RemoteEntity for Tag {
///     type Id = String;
///     type Wire = TagWire;
///     type Payload = TagPayload;
///     type Error = TagError;
///     const COLLECTION: &'static str = "/tags";
///
///     fn remote_id(&self) -> Option<&String> { self.id.as_ref() }
///     fn to_payload(&self) -> TagPayload { TagPayload { label: self.label.clone() } }
///     fn from_wire(wire: TagWire) -> Result<Self, TagError> {
///         Ok(Self { id: Some(wire.id), label: wire.label })
///     }
/// }
///
/// struct TagClient { inner: ResourceClient<Tag> }
///
/// impl EntityClient<Tag> for TagClient {
///     type Error = TagError;
///
///     fn inner(&self) -> &ResourceClient<Tag> { &self.inner }
///
///     fn map_error(e: FrameworkError) -> TagError { TagError(e.to_string()) }
/// }
/// ```
#[async_trait]
pub trait EntityClient<T: RemoteEntity>: Send + Sync {
    /// The resource-specific error type.
    type Error: Send + Sync;

    /// Access the inner generic ResourceClient.
    fn inner(&self) -> &ResourceClient<T>;

    /// Map framework errors to the specific resource error type.
    fn map_error(e: FrameworkError) -> Self::Error;

    /// Fetch one remote object by id.
    #[tracing::instrument(skip(self, cancel))]
    async fn fetch(
        &self,
        id: &T::Id,
        cancel: &CancellationToken,
    ) -> Result<Option<T::Wire>, Self::Error> {
        tracing::debug!("Sending request");
        self.inner().get(id, cancel).await.map_err(Self::map_error)
    }

    /// Delete one remote object by id, returning the remote's last view of it.
    #[tracing::instrument(skip(self, cancel))]
    async fn remove(&self, id: &T::Id, cancel: &CancellationToken) -> Result<T::Wire, Self::Error> {
        tracing::debug!("Sending request");
        self.inner().delete(id, cancel).await.map_err(Self::map_error)
    }

    /// List the whole remote collection.
    #[tracing::instrument(skip(self, cancel))]
    async fn fetch_all(&self, cancel: &CancellationToken) -> Result<Vec<T::Wire>, Self::Error> {
        tracing::debug!("Sending request");
        self.inner().list(cancel).await.map_err(Self::map_error)
    }
}
