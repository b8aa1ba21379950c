use std::collections::HashMap;
use std::sync::{Arc, Mutex, RwLock, Weak};

use async_trait::async_trait;
use bytes::Bytes;
use chrono::Utc;
use tokio::sync::mpsc::{UnboundedSender, unbounded_channel};
use wayfare_types::{BlobHandle, Document, DocumentId, Fields, Filter};

use crate::error::{Error, Result, poisoned};
use crate::subscription::{Snapshot, Subscription};
use crate::traits::{BlobStore, DocumentStore};

struct Listener {
    id: u64,
    collection: String,
    filter: Filter,
    tx: UnboundedSender<Result<Snapshot>>,
}

#[derive(Default)]
struct Inner {
    /// (collection, document) in insertion order
    documents: Vec<(String, Document)>,
    listeners: Vec<Listener>,
    next_listener: u64,
}

impl Inner {
    fn snapshot(&self, collection: &str, filter: &Filter) -> Snapshot {
        self.documents
            .iter()
            .filter(|(c, doc)| c == collection && filter.matches(&doc.fields))
            .map(|(_, doc)| doc.clone())
            .collect()
    }

    /// Pushes a fresh snapshot to every listener whose query covers `fields`.
    fn notify(&mut self, collection: &str, fields: &Fields) {
        let snapshots: Vec<(u64, Snapshot)> = self
            .listeners
            .iter()
            .filter(|l| l.collection == collection && l.filter.matches(fields))
            .map(|l| (l.id, self.snapshot(&l.collection, &l.filter)))
            .collect();

        for (id, snapshot) in snapshots {
            if let Some(listener) = self.listeners.iter().find(|l| l.id == id) {
                let _ = listener.tx.send(Ok(snapshot));
            }
        }
        self.listeners.retain(|l| !l.tx.is_closed());
    }
}

/// In-process document store.
///
/// Snapshots are pushed synchronously from inside `create`/`delete`, so a
/// subscriber sees the change as soon as the write call returns.
#[derive(Clone, Default)]
pub struct MemoryDocumentStore {
    inner: Arc<Mutex<Inner>>,
}

impl MemoryDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a document with a caller-chosen id, notifying live queries.
    pub fn insert_with_id(&self, collection: &str, id: DocumentId, fields: Fields) -> Result<()> {
        let mut inner = self.inner.lock().map_err(|_| poisoned())?;
        if inner.documents.iter().any(|(_, d)| d.id == id) {
            return Err(Error::InvalidInput(format!("document {} already exists", id)));
        }
        let doc = Document {
            id,
            created_at: Utc::now(),
            fields: fields.clone(),
        };
        inner.documents.push((collection.to_string(), doc));
        inner.notify(collection, &fields);
        Ok(())
    }

    /// Current contents of a query, without subscribing.
    pub fn query(&self, collection: &str, filter: &Filter) -> Result<Snapshot> {
        let inner = self.inner.lock().map_err(|_| poisoned())?;
        Ok(inner.snapshot(collection, filter))
    }

    /// Number of live queries still registered.
    pub fn listener_count(&self) -> usize {
        self.inner.lock().map(|i| i.listeners.len()).unwrap_or(0)
    }

    /// Delivers an error to every live query on `collection`, as a backend
    /// would when a listener is revoked or the connection drops.
    pub fn fail_listeners(&self, collection: &str, reason: &str) {
        if let Ok(inner) = self.inner.lock() {
            for listener in inner.listeners.iter().filter(|l| l.collection == collection) {
                let _ = listener
                    .tx
                    .send(Err(Error::Unavailable(reason.to_string())));
            }
        }
    }

    /// Ends every live query on `collection` by dropping its sender, as a
    /// backend would when it shuts a listener down for good.
    pub fn close_listeners(&self, collection: &str) {
        if let Ok(mut inner) = self.inner.lock() {
            inner.listeners.retain(|l| l.collection != collection);
        }
    }
}

fn remove_listener(inner: &Weak<Mutex<Inner>>, id: u64) {
    if let Some(inner) = inner.upgrade()
        && let Ok(mut inner) = inner.lock()
    {
        inner.listeners.retain(|l| l.id != id);
    }
}

#[async_trait]
impl DocumentStore for MemoryDocumentStore {
    async fn create(&self, collection: &str, fields: Fields) -> Result<DocumentId> {
        let id = DocumentId::generate();
        self.insert_with_id(collection, id.clone(), fields)?;
        Ok(id)
    }

    async fn delete(&self, collection: &str, id: &DocumentId) -> Result<()> {
        let mut inner = self.inner.lock().map_err(|_| poisoned())?;
        let Some(pos) = inner
            .documents
            .iter()
            .position(|(c, d)| c == collection && &d.id == id)
        else {
            return Ok(());
        };
        let (_, removed) = inner.documents.remove(pos);
        inner.notify(collection, &removed.fields);
        Ok(())
    }

    fn subscribe(&self, collection: &str, filter: Filter) -> Result<Subscription> {
        let (tx, rx) = unbounded_channel();
        let id = {
            let mut inner = self.inner.lock().map_err(|_| poisoned())?;
            let id = inner.next_listener;
            inner.next_listener += 1;
            let _ = tx.send(Ok(inner.snapshot(collection, &filter)));
            inner.listeners.push(Listener {
                id,
                collection: collection.to_string(),
                filter: filter.clone(),
                tx,
            });
            id
        };

        let weak = Arc::downgrade(&self.inner);
        Ok(Subscription::new(collection, filter, rx, move || {
            remove_listener(&weak, id)
        }))
    }
}

/// In-process blob store. URLs have the form `memory://{path}`.
#[derive(Debug, Clone, Default)]
pub struct MemoryBlobStore {
    objects: Arc<RwLock<HashMap<String, Bytes>>>,
}

impl MemoryBlobStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, path: &str) -> Option<Bytes> {
        self.objects.read().ok()?.get(path).cloned()
    }

    pub fn paths(&self) -> Vec<String> {
        let mut paths: Vec<String> = self
            .objects
            .read()
            .map(|o| o.keys().cloned().collect())
            .unwrap_or_default();
        paths.sort();
        paths
    }
}

#[async_trait]
impl BlobStore for MemoryBlobStore {
    async fn store(&self, path: &str, bytes: Bytes) -> Result<BlobHandle> {
        let mut objects = self.objects.write().map_err(|_| poisoned())?;
        objects.insert(path.to_string(), bytes);
        Ok(BlobHandle {
            path: path.to_string(),
        })
    }

    async fn resolve_url(&self, handle: &BlobHandle) -> Result<String> {
        let objects = self.objects.read().map_err(|_| poisoned())?;
        if !objects.contains_key(&handle.path) {
            return Err(Error::NotFound(format!("blob not found: {}", handle.path)));
        }
        Ok(format!("memory://{}", handle.path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wayfare_types::COMMENTS;

    fn comment(country: &str, text: &str) -> Fields {
        json!({"countryId": country, "text": text})
            .as_object()
            .cloned()
            .unwrap()
    }

    fn texts(snapshot: &Snapshot) -> Vec<&str> {
        snapshot
            .iter()
            .map(|d| d.str_field("text").unwrap())
            .collect()
    }

    #[tokio::test]
    async fn test_subscribe_emits_current_contents_first() {
        let store = MemoryDocumentStore::new();
        store.create(COMMENTS, comment("thailand", "one")).await.unwrap();
        store.create(COMMENTS, comment("france", "other")).await.unwrap();

        let mut sub = store
            .subscribe(COMMENTS, Filter::eq("countryId", "thailand"))
            .unwrap();
        let first = sub.try_next().unwrap().unwrap();
        assert_eq!(texts(&first), vec!["one"]);
        assert!(sub.try_next().is_none());
    }

    #[tokio::test]
    async fn test_create_pushes_full_snapshot_in_insertion_order() {
        let store = MemoryDocumentStore::new();
        let mut sub = store
            .subscribe(COMMENTS, Filter::eq("countryId", "thailand"))
            .unwrap();
        sub.try_next();

        store.create(COMMENTS, comment("thailand", "a")).await.unwrap();
        store.create(COMMENTS, comment("thailand", "b")).await.unwrap();

        assert_eq!(texts(&sub.try_next().unwrap().unwrap()), vec!["a"]);
        assert_eq!(texts(&sub.try_next().unwrap().unwrap()), vec!["a", "b"]);
    }

    #[tokio::test]
    async fn test_unrelated_writes_do_not_emit() {
        let store = MemoryDocumentStore::new();
        let mut sub = store
            .subscribe(COMMENTS, Filter::eq("countryId", "thailand"))
            .unwrap();
        sub.try_next();

        store.create(COMMENTS, comment("france", "x")).await.unwrap();
        store.create("media", comment("thailand", "x")).await.unwrap();
        assert!(sub.try_next().is_none());
    }

    #[tokio::test]
    async fn test_delete_emits_and_missing_delete_is_ok() {
        let store = MemoryDocumentStore::new();
        store
            .insert_with_id(COMMENTS, DocumentId::from("c1"), comment("thailand", "bye"))
            .unwrap();
        let mut sub = store
            .subscribe(COMMENTS, Filter::eq("countryId", "thailand"))
            .unwrap();
        assert_eq!(sub.try_next().unwrap().unwrap().len(), 1);

        store.delete(COMMENTS, &DocumentId::from("c1")).await.unwrap();
        assert!(sub.try_next().unwrap().unwrap().is_empty());

        store.delete(COMMENTS, &DocumentId::from("c1")).await.unwrap();
        assert!(sub.try_next().is_none());
    }

    #[tokio::test]
    async fn test_dropping_subscription_unregisters_listener() {
        let store = MemoryDocumentStore::new();
        let sub = store
            .subscribe(COMMENTS, Filter::eq("countryId", "thailand"))
            .unwrap();
        assert_eq!(store.listener_count(), 1);
        drop(sub);
        assert_eq!(store.listener_count(), 0);
    }

    #[tokio::test]
    async fn test_close_listeners_ends_the_feed() {
        let store = MemoryDocumentStore::new();
        let mut sub = store
            .subscribe(COMMENTS, Filter::eq("countryId", "thailand"))
            .unwrap();
        let mut media = store.subscribe("media", Filter::eq("countryId", "thailand")).unwrap();
        sub.try_next();
        media.try_next();

        store.close_listeners(COMMENTS);
        assert_eq!(store.listener_count(), 1);
        assert!(sub.try_poll_next().is_ready());
        assert!(media.try_poll_next().is_pending());
    }

    #[tokio::test]
    async fn test_blob_overwrite_and_resolve() {
        let blobs = MemoryBlobStore::new();
        let handle = blobs
            .store("media/thailand/a.jpg", Bytes::from_static(b"one"))
            .await
            .unwrap();
        blobs
            .store("media/thailand/a.jpg", Bytes::from_static(b"two"))
            .await
            .unwrap();

        assert_eq!(blobs.paths(), vec!["media/thailand/a.jpg".to_string()]);
        assert_eq!(blobs.get("media/thailand/a.jpg").unwrap(), "two");
        assert_eq!(
            blobs.resolve_url(&handle).await.unwrap(),
            "memory://media/thailand/a.jpg"
        );
    }

    #[tokio::test]
    async fn test_resolve_missing_blob() {
        let blobs = MemoryBlobStore::new();
        let err = blobs
            .resolve_url(&BlobHandle {
                path: "nope".to_string(),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, Error::NotFound(_)));
    }
}
