//! # RemoteEntity Trait
//!
//! The `RemoteEntity` trait defines the contract a locally owned record must
//! implement to be reconciled against one remote REST collection. It names the
//! identifier type, the wire shape the remote answers with, the payload shape
//! sent on create/update, and the entity's own error type.
//!
//! # Architecture Note
//! The generic [`ResourceClient`](crate::ResourceClient) only moves wire
//! objects in and out of the collection. Turning a wire object into a record
//! (and back) is the entity's business, expressed through
//! [`RemoteEntity::from_wire`] and [`RemoteEntity::to_payload`]. A record type
//! therefore cannot be sent another resource's payload: the associated types
//! pin every exchange to one collection.
//!
//! # Provided Methods
//! [`RemoteEntity::validate`] defaults to accepting everything. Override it to
//! reject records before any request leaves the process.

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fmt::{Debug, Display};

/// Trait that a local record implements to be managed against a remote collection.
pub trait RemoteEntity: Clone + Send + Sync + 'static {
    /// Identifier assigned by the remote system (e.g. a uuid string).
    type Id: Clone + Send + Sync + Display + Debug;

    /// Shape of one object as the remote returns it.
    type Wire: DeserializeOwned + Send + Sync + Debug;

    /// Shape sent to the remote on create and update.
    type Payload: Serialize + Send + Sync + Debug;

    /// The error type for this entity.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Path of the remote collection, e.g. `/accounts`.
    const COLLECTION: &'static str;

    /// The identifier, once the remote has assigned one.
    fn remote_id(&self) -> Option<&Self::Id>;

    /// Reject records that violate local invariants. Runs before any request.
    fn validate(&self) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Build the request payload from the fields the record has set.
    fn to_payload(&self) -> Self::Payload;

    /// Project a remote object into a fresh record.
    fn from_wire(wire: Self::Wire) -> Result<Self, Self::Error>;
}
