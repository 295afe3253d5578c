//! Persistence gateway for a remote collection.

use async_trait::async_trait;
use mockall::automock;

use crate::{entity::Entity, error::GatewayError};

/// The remote side of a collection: one REST resource.
///
/// Implementations live next to the HTTP client; the store and editor only
/// ever talk to this trait. Calls are never retried here — a failure is
/// surfaced once to the caller and that is the end of it.
#[automock]
#[async_trait]
pub trait CollectionGateway<T: Entity>: Send + Sync {
    /// Fetch the full collection.
    async fn list(&self) -> Result<Vec<T>, GatewayError>;

    /// Persist the full updated record, returning the server's copy.
    async fn update(&self, record: T) -> Result<T, GatewayError>;

    /// Remove the record with the given id.
    async fn delete(&self, id: T::Id) -> Result<(), GatewayError>;
}
