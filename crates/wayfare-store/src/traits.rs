use async_trait::async_trait;
use bytes::Bytes;
use wayfare_types::{BlobHandle, DocumentId, Fields, Filter};

use crate::error::Result;
use crate::subscription::Subscription;

/// Document database with live equality queries.
///
/// Documents are grouped into named collections and never updated in place:
/// they are created with store-assigned id and `createdAt`, and later deleted.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Stores a new document and returns its id.
    async fn create(&self, collection: &str, fields: Fields) -> Result<DocumentId>;

    /// Deletes a document. Deleting an id that does not exist succeeds.
    async fn delete(&self, collection: &str, id: &DocumentId) -> Result<()>;

    /// Opens a live query on `collection` for documents matching `filter`.
    ///
    /// The first snapshot is the current matching set. Every later snapshot
    /// replaces the previous one entirely. Backends that refresh in the
    /// background must be called from within a tokio runtime.
    fn subscribe(&self, collection: &str, filter: Filter) -> Result<Subscription>;
}

/// Object storage that hands out fetchable URLs.
#[async_trait]
pub trait BlobStore: Send + Sync {
    /// Writes `bytes` at `path`, replacing whatever was there.
    async fn store(&self, path: &str, bytes: Bytes) -> Result<BlobHandle>;

    /// Public URL for a stored blob.
    ///
    /// Returns `Error::NotFound` if nothing is stored at the handle's path.
    async fn resolve_url(&self, handle: &BlobHandle) -> Result<String>;
}
