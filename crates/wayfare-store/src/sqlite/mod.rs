mod queries;
mod schema;

use std::path::Path;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use notify::{Event, EventKind, PollWatcher, RecursiveMode, Watcher};
use rusqlite::Connection;
use tokio::sync::broadcast::{self, error::RecvError};
use tokio::sync::mpsc::unbounded_channel;
use wayfare_types::{Document, DocumentId, Fields, Filter};

use crate::error::{Error, Result, poisoned};
use crate::subscription::{Snapshot, Subscription};
use crate::traits::DocumentStore;

const CHANGE_CAPACITY: usize = 64;

/// What a live query should re-check after.
#[derive(Debug, Clone)]
enum Change {
    /// Written through this store instance
    Collection(String),
    /// Database file changed on disk, possibly by another process
    External,
}

/// Document store kept in a SQLite file.
///
/// Each live query runs as a tokio task that re-reads its result set whenever a
/// write lands in its collection, or when the database file is modified by
/// another process, and only emits when the set actually changed.
pub struct SqliteDocumentStore {
    conn: Arc<Mutex<Connection>>,
    changes: broadcast::Sender<Change>,
    _watcher: Option<PollWatcher>,
}

impl SqliteDocumentStore {
    /// Opens (or creates) the database at `db_path` and watches it for
    /// external writes every `poll_interval`.
    pub fn open(db_path: &Path, poll_interval: Duration) -> Result<Self> {
        if let Some(parent) = db_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let conn = Connection::open(db_path)?;
        conn.busy_timeout(Duration::from_secs(5))?;
        schema::init_schema(&conn)?;

        let (changes, _) = broadcast::channel(CHANGE_CAPACITY);
        let watcher = watch_file(db_path, poll_interval, changes.clone())?;

        tracing::debug!(path = %db_path.display(), "opened document database");

        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
            changes,
            _watcher: Some(watcher),
        })
    }

    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        schema::init_schema(&conn)?;
        let (changes, _) = broadcast::channel(CHANGE_CAPACITY);

        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
            changes,
            _watcher: None,
        })
    }

    /// Current contents of a query, without subscribing.
    pub fn query(&self, collection: &str, filter: &Filter) -> Result<Snapshot> {
        load(&self.conn, collection, filter)
    }
}

fn load(conn: &Mutex<Connection>, collection: &str, filter: &Filter) -> Result<Snapshot> {
    let conn = conn.lock().map_err(|_| poisoned())?;
    queries::select(&conn, collection, filter)
}

fn watch_file(
    path: &Path,
    interval: Duration,
    tx: broadcast::Sender<Change>,
) -> Result<PollWatcher> {
    let config = notify::Config::default()
        .with_poll_interval(interval)
        .with_compare_contents(true);

    let mut watcher = PollWatcher::new(
        move |res: notify::Result<Event>| {
            if let Ok(event) = res
                && matches!(event.kind, EventKind::Modify(_) | EventKind::Create(_))
            {
                let _ = tx.send(Change::External);
            }
        },
        config,
    )?;

    watcher.watch(path, RecursiveMode::NonRecursive)?;
    Ok(watcher)
}

#[async_trait]
impl DocumentStore for SqliteDocumentStore {
    async fn create(&self, collection: &str, fields: Fields) -> Result<DocumentId> {
        let doc = Document {
            id: DocumentId::generate(),
            created_at: Utc::now(),
            fields,
        };
        {
            let conn = self.conn.lock().map_err(|_| poisoned())?;
            queries::insert(&conn, collection, &doc)?;
        }
        let _ = self.changes.send(Change::Collection(collection.to_string()));
        Ok(doc.id)
    }

    async fn delete(&self, collection: &str, id: &DocumentId) -> Result<()> {
        let removed = {
            let conn = self.conn.lock().map_err(|_| poisoned())?;
            queries::delete(&conn, collection, id)?
        };
        if removed > 0 {
            let _ = self.changes.send(Change::Collection(collection.to_string()));
        }
        Ok(())
    }

    fn subscribe(&self, collection: &str, filter: Filter) -> Result<Subscription> {
        let runtime = tokio::runtime::Handle::try_current().map_err(|_| {
            Error::Unavailable("live queries must be opened inside a tokio runtime".to_string())
        })?;

        let (tx, rx) = unbounded_channel();
        let mut changes = self.changes.subscribe();
        let conn = Arc::clone(&self.conn);
        let target = collection.to_string();
        let query = filter.clone();

        let task = runtime.spawn(async move {
            let mut last: Option<Snapshot> = None;
            loop {
                match load(&conn, &target, &query) {
                    Ok(snapshot) => {
                        if last.as_ref() != Some(&snapshot) {
                            if tx.send(Ok(snapshot.clone())).is_err() {
                                return;
                            }
                            last = Some(snapshot);
                        }
                    }
                    Err(err) => {
                        tracing::warn!(collection = %target, error = %err, "live query refresh failed");
                        if tx.send(Err(err)).is_err() {
                            return;
                        }
                        // The next good load must be delivered even if it equals the last one.
                        last = None;
                    }
                }

                loop {
                    match changes.recv().await {
                        Ok(Change::Collection(c)) if c != target => continue,
                        Ok(_) | Err(RecvError::Lagged(_)) => break,
                        Err(RecvError::Closed) => return,
                    }
                }
            }
        });

        Ok(Subscription::new(collection, filter, rx, move || task.abort()))
    }
}
