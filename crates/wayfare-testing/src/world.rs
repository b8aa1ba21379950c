//! TestWorld pattern for declarative view-model test setup.
//!
//! Provides a fluent interface for:
//! - Choosing a catalog (embedded by default)
//! - Seeding comments and media with known ids
//! - Opening detail view-models against recording stores

use std::sync::Arc;

use anyhow::Result;
use wayfare_catalog::Catalog;
use wayfare_runtime::{Config, DetailViewModel, Services, Workspace};
use wayfare_types::{COMMENTS, CountryId, DocumentId, MEDIA};

use crate::doubles::{RecordingBlobStore, RecordingDocumentStore};
use crate::fixtures::{comment_fields, media_fields};

/// Declarative test environment builder.
///
/// # Example
/// ```no_run
/// use wayfare_testing::TestWorld;
///
/// # async fn demo() -> anyhow::Result<()> {
/// let world = TestWorld::new().with_comment("c1", "thailand", "Great trip!");
/// let mut vm = world.open("thailand")?;
/// vm.drain();
/// assert_eq!(vm.comments().len(), 1);
/// # Ok(())
/// # }
/// ```
pub struct TestWorld {
    catalog: Arc<Catalog>,
    documents: RecordingDocumentStore,
    blobs: RecordingBlobStore,
}

impl Default for TestWorld {
    fn default() -> Self {
        Self::new()
    }
}

impl TestWorld {
    /// Embedded catalog, empty stores.
    pub fn new() -> Self {
        let catalog = Catalog::embedded().expect("embedded catalog is valid");
        Self::with_catalog(catalog)
    }

    pub fn with_catalog(catalog: Catalog) -> Self {
        Self {
            catalog: Arc::new(catalog),
            documents: RecordingDocumentStore::new(),
            blobs: RecordingBlobStore::new(),
        }
    }

    /// Seed a comment with a fixed id. Seeding is not recorded as an operation.
    pub fn with_comment(self, id: &str, country: &str, text: &str) -> Self {
        self.documents
            .memory()
            .insert_with_id(COMMENTS, DocumentId::from(id), comment_fields(country, text))
            .expect("Failed to seed comment");
        self
    }

    /// Seed a media record with a fixed id (no blob is stored).
    pub fn with_media(self, id: &str, country: &str, url: &str) -> Self {
        self.documents
            .memory()
            .insert_with_id(MEDIA, DocumentId::from(id), media_fields(country, url))
            .expect("Failed to seed media");
        self
    }

    pub fn documents(&self) -> &RecordingDocumentStore {
        &self.documents
    }

    pub fn blobs(&self) -> &RecordingBlobStore {
        &self.blobs
    }

    pub fn catalog(&self) -> Arc<Catalog> {
        Arc::clone(&self.catalog)
    }

    pub fn services(&self) -> Services {
        Services {
            documents: Arc::new(self.documents.clone()),
            blobs: Arc::new(self.blobs.clone()),
        }
    }

    /// View-model with the route parameter not resolved yet.
    pub fn loading(&self) -> DetailViewModel {
        DetailViewModel::new(self.catalog(), self.services())
    }

    /// View-model navigated to `country`.
    pub fn open(&self, country: &str) -> Result<DetailViewModel> {
        Ok(DetailViewModel::open(
            self.catalog(),
            self.services(),
            CountryId::from(country),
        )?)
    }

    /// Workspace sharing this world's catalog and stores.
    pub fn workspace(&self, config: Config) -> Workspace {
        Workspace::with_services((*self.catalog).clone(), self.services(), config)
    }
}
