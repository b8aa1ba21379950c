use std::path::{Component, Path, PathBuf};

use async_trait::async_trait;
use bytes::Bytes;
use wayfare_types::BlobHandle;

use crate::error::{Error, Result};
use crate::traits::BlobStore;

/// Blob store backed by a directory.
///
/// URLs are `{public_base_url}/{path}` when a base URL is configured (for a
/// directory served by a web server), otherwise `file://` URLs.
#[derive(Debug, Clone)]
pub struct FsBlobStore {
    root: PathBuf,
    public_base_url: Option<String>,
}

impl FsBlobStore {
    pub fn new(root: impl Into<PathBuf>, public_base_url: Option<String>) -> Self {
        Self {
            root: root.into(),
            public_base_url,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn local_path(&self, path: &str) -> Result<PathBuf> {
        let relative = Path::new(path);
        let safe = !path.is_empty()
            && relative
                .components()
                .all(|c| matches!(c, Component::Normal(_)));
        if !safe {
            return Err(Error::InvalidInput(format!("unsafe blob path '{}'", path)));
        }
        Ok(self.root.join(relative))
    }
}

#[async_trait]
impl BlobStore for FsBlobStore {
    async fn store(&self, path: &str, bytes: Bytes) -> Result<BlobHandle> {
        let target = self.local_path(path)?;
        if let Some(parent) = target.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(&target, &bytes).await?;
        tracing::debug!(path, size = bytes.len(), "stored blob");

        Ok(BlobHandle {
            path: path.to_string(),
        })
    }

    async fn resolve_url(&self, handle: &BlobHandle) -> Result<String> {
        let target = self.local_path(&handle.path)?;
        if !tokio::fs::try_exists(&target).await? {
            return Err(Error::NotFound(format!("blob not found: {}", handle.path)));
        }

        match &self.public_base_url {
            Some(base) => Ok(format!("{}/{}", base.trim_end_matches('/'), handle.path)),
            None => {
                let absolute = std::path::absolute(&target)?;
                Ok(format!("file://{}", absolute.display()))
            }
        }
    }
}
