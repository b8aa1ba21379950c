//! Testing infrastructure for wayfare tests.
//!
//! This crate provides utilities for writing view-model and store tests:
//! - `TestWorld`: fluent setup of a catalog plus in-memory stores
//! - `doubles`: store wrappers that record calls and inject failures
//! - `fixtures`: sample uploads and seeded documents
//! - `assertions`: readable checks on view-model state

pub mod assertions;
pub mod doubles;
pub mod fixtures;
pub mod world;

pub use doubles::{BlobOp, DocumentOp, RecordingBlobStore, RecordingDocumentStore};
pub use world::TestWorld;

/// Initialize test logging (call once per test module).
pub fn init_test_logging() {
    use tracing_subscriber::{EnvFilter, fmt};

    let _ = fmt()
        .with_env_filter(
            EnvFilter::from_default_env()
                .add_directive("wayfare=debug".parse().expect("valid directive")),
        )
        .with_test_writer()
        .try_init();
}
