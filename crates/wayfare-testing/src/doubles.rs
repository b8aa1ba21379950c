//! Store doubles with call recording and failure injection.
//!
//! Both wrap the in-memory backends, so live queries behave exactly as they
//! do there; the wrappers only log each call and can be told to fail.

use std::collections::HashSet;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use bytes::Bytes;
use wayfare_store::{
    BlobStore, DocumentStore, Error, MemoryBlobStore, MemoryDocumentStore, Result, Subscription,
};
use wayfare_types::{BlobHandle, DocumentId, Fields, Filter};

/// Record of a document store call.
#[derive(Debug, Clone, PartialEq)]
pub enum DocumentOp {
    Create { collection: String, fields: Fields },
    Delete { collection: String, id: DocumentId },
    Subscribe { collection: String, filter: Filter },
}

#[derive(Debug, Default)]
struct DocumentFaults {
    create: HashSet<String>,
    delete: HashSet<String>,
    subscribe: HashSet<String>,
}

/// Memory document store that records calls and can fail per collection.
#[derive(Clone, Default)]
pub struct RecordingDocumentStore {
    inner: MemoryDocumentStore,
    ops: Arc<Mutex<Vec<DocumentOp>>>,
    faults: Arc<Mutex<DocumentFaults>>,
}

impl RecordingDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// The backing store, for seeding documents or pushing listener errors.
    pub fn memory(&self) -> &MemoryDocumentStore {
        &self.inner
    }

    pub fn operations(&self) -> Vec<DocumentOp> {
        self.ops.lock().unwrap().clone()
    }

    pub fn creates(&self) -> Vec<(String, Fields)> {
        self.operations()
            .into_iter()
            .filter_map(|op| match op {
                DocumentOp::Create { collection, fields } => Some((collection, fields)),
                _ => None,
            })
            .collect()
    }

    pub fn deletes(&self) -> Vec<(String, DocumentId)> {
        self.operations()
            .into_iter()
            .filter_map(|op| match op {
                DocumentOp::Delete { collection, id } => Some((collection, id)),
                _ => None,
            })
            .collect()
    }

    pub fn subscribe_count(&self) -> usize {
        self.operations()
            .iter()
            .filter(|op| matches!(op, DocumentOp::Subscribe { .. }))
            .count()
    }

    pub fn fail_creates(&self, collection: &str) {
        self.faults.lock().unwrap().create.insert(collection.to_string());
    }

    pub fn fail_deletes(&self, collection: &str) {
        self.faults.lock().unwrap().delete.insert(collection.to_string());
    }

    pub fn fail_subscribes(&self, collection: &str) {
        self.faults
            .lock()
            .unwrap()
            .subscribe
            .insert(collection.to_string());
    }

    pub fn heal(&self) {
        *self.faults.lock().unwrap() = DocumentFaults::default();
    }

    fn record(&self, op: DocumentOp) {
        self.ops.lock().unwrap().push(op);
    }

    fn injected(kind: &str, collection: &str) -> Error {
        Error::Unavailable(format!("injected {} failure on '{}'", kind, collection))
    }
}

#[async_trait]
impl DocumentStore for RecordingDocumentStore {
    async fn create(&self, collection: &str, fields: Fields) -> Result<DocumentId> {
        self.record(DocumentOp::Create {
            collection: collection.to_string(),
            fields: fields.clone(),
        });
        if self.faults.lock().unwrap().create.contains(collection) {
            return Err(Self::injected("create", collection));
        }
        self.inner.create(collection, fields).await
    }

    async fn delete(&self, collection: &str, id: &DocumentId) -> Result<()> {
        self.record(DocumentOp::Delete {
            collection: collection.to_string(),
            id: id.clone(),
        });
        if self.faults.lock().unwrap().delete.contains(collection) {
            return Err(Self::injected("delete", collection));
        }
        self.inner.delete(collection, id).await
    }

    fn subscribe(&self, collection: &str, filter: Filter) -> Result<Subscription> {
        self.record(DocumentOp::Subscribe {
            collection: collection.to_string(),
            filter: filter.clone(),
        });
        if self.faults.lock().unwrap().subscribe.contains(collection) {
            return Err(Self::injected("subscribe", collection));
        }
        self.inner.subscribe(collection, filter)
    }
}

/// Record of a blob store call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BlobOp {
    Store { path: String, size: usize },
    ResolveUrl { path: String },
}

#[derive(Debug, Default)]
struct BlobFaults {
    store: bool,
    resolve: bool,
}

/// Memory blob store that records calls and can fail either step.
#[derive(Clone, Default)]
pub struct RecordingBlobStore {
    inner: MemoryBlobStore,
    ops: Arc<Mutex<Vec<BlobOp>>>,
    faults: Arc<Mutex<BlobFaults>>,
}

impl RecordingBlobStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn memory(&self) -> &MemoryBlobStore {
        &self.inner
    }

    pub fn operations(&self) -> Vec<BlobOp> {
        self.ops.lock().unwrap().clone()
    }

    pub fn fail_stores(&self) {
        self.faults.lock().unwrap().store = true;
    }

    pub fn fail_resolves(&self) {
        self.faults.lock().unwrap().resolve = true;
    }

    fn record(&self, op: BlobOp) {
        self.ops.lock().unwrap().push(op);
    }
}

#[async_trait]
impl BlobStore for RecordingBlobStore {
    async fn store(&self, path: &str, bytes: Bytes) -> Result<BlobHandle> {
        self.record(BlobOp::Store {
            path: path.to_string(),
            size: bytes.len(),
        });
        if self.faults.lock().unwrap().store {
            return Err(Error::Unavailable(format!("injected store failure on '{}'", path)));
        }
        self.inner.store(path, bytes).await
    }

    async fn resolve_url(&self, handle: &BlobHandle) -> Result<String> {
        self.record(BlobOp::ResolveUrl {
            path: handle.path.clone(),
        });
        if self.faults.lock().unwrap().resolve {
            return Err(Error::Unavailable(format!(
                "injected resolve failure on '{}'",
                handle.path
            )));
        }
        self.inner.resolve_url(handle).await
    }
}
