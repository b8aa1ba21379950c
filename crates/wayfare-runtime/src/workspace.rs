use std::path::{Path, PathBuf};
use std::sync::Arc;

use wayfare_catalog::Catalog;
use wayfare_store::{FsBlobStore, MemoryBlobStore, MemoryDocumentStore, SqliteDocumentStore};
use wayfare_types::CountryId;

use crate::config::Config;
use crate::detail::{DetailViewModel, Services};
use crate::Result;

const DOCUMENTS_DB: &str = "documents.db";
const BLOBS_DIR: &str = "blobs";

/// Catalog, stores and config for one data directory.
pub struct Workspace {
    catalog: Arc<Catalog>,
    services: Services,
    config: Config,
    data_dir: Option<PathBuf>,
}

impl Workspace {
    /// Opens the persistent workspace in `data_dir`.
    ///
    /// Documents live in `documents.db`, blobs under `blobs/`, settings in
    /// `config.toml` (defaults when absent).
    pub fn open(data_dir: &Path) -> Result<Self> {
        let config = Config::load_from(&Config::path_in(data_dir))?;
        let catalog = load_catalog(&config, Some(data_dir))?;

        let documents =
            SqliteDocumentStore::open(&data_dir.join(DOCUMENTS_DB), config.poll_interval())?;
        let blobs = FsBlobStore::new(
            data_dir.join(BLOBS_DIR),
            config.blobs.public_base_url.clone(),
        );

        tracing::info!(data_dir = %data_dir.display(), countries = catalog.len(), "workspace opened");

        Ok(Self {
            catalog: Arc::new(catalog),
            services: Services {
                documents: Arc::new(documents),
                blobs: Arc::new(blobs),
            },
            config,
            data_dir: Some(data_dir.to_path_buf()),
        })
    }

    /// Workspace held entirely in memory; nothing survives the process.
    pub fn ephemeral(config: Config) -> Result<Self> {
        let catalog = load_catalog(&config, None)?;
        Ok(Self::with_services(
            catalog,
            Services {
                documents: Arc::new(MemoryDocumentStore::new()),
                blobs: Arc::new(MemoryBlobStore::new()),
            },
            config,
        ))
    }

    pub fn with_services(catalog: Catalog, services: Services, config: Config) -> Self {
        Self {
            catalog: Arc::new(catalog),
            services,
            config,
            data_dir: None,
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn services(&self) -> &Services {
        &self.services
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn data_dir(&self) -> Option<&Path> {
        self.data_dir.as_deref()
    }

    /// Detail view-model following `id` (`None` while the route is unresolved).
    pub fn detail(&self, id: Option<CountryId>) -> Result<DetailViewModel> {
        let mut vm = DetailViewModel::new(Arc::clone(&self.catalog), self.services.clone());
        vm.navigate(id)?;
        Ok(vm)
    }
}

fn load_catalog(config: &Config, data_dir: Option<&Path>) -> Result<Catalog> {
    let path = match data_dir {
        Some(dir) => config.catalog_path_in(dir),
        None => config.catalog_path.clone(),
    };
    let catalog = match path {
        Some(path) => {
            tracing::debug!(path = %path.display(), "loading catalog override");
            Catalog::load_from(&path)?
        }
        None => Catalog::embedded()?,
    };
    Ok(catalog)
}
