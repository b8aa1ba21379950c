//! Live view-model layer.
//!
//! [`DetailViewModel`] mirrors two live queries (comments and media for one
//! country) into local state and turns user intents into store calls. State
//! only ever changes from store snapshots; intents never patch it locally.
//! [`Workspace`] wires the catalog and the stores together from a data
//! directory and its `config.toml`.

pub mod config;
pub mod detail;
pub mod error;
pub mod workspace;

pub use config::{BlobConfig, Config, resolve_data_dir};
pub use detail::{DetailViewModel, Feed, FeedStatus, FeedUpdate, Page, Services};
pub use error::{Error, Result};
pub use workspace::Workspace;
