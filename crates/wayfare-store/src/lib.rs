//! Clients for the two remote collaborators of the explorer: a document store
//! with live equality queries and a blob store that hands out public URLs.
//!
//! Backends:
//! - [`MemoryDocumentStore`] / [`MemoryBlobStore`]: in-process, for tests and
//!   ephemeral sessions
//! - [`SqliteDocumentStore`]: documents in a SQLite file, live queries refreshed
//!   on local writes and on writes by other processes
//! - [`FsBlobStore`]: blobs as files under a root directory

mod error;
mod fs_blob;
mod memory;
mod sqlite;
mod subscription;
mod traits;

pub use error::{Error, Result};
pub use fs_blob::FsBlobStore;
pub use memory::{MemoryBlobStore, MemoryDocumentStore};
pub use sqlite::SqliteDocumentStore;
pub use subscription::{Snapshot, Subscription};
pub use traits::{BlobStore, DocumentStore};
