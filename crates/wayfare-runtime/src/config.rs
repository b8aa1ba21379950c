use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Resolve the data directory based on priority:
/// 1. Explicit path (with tilde expansion)
/// 2. WAYFARE_PATH environment variable (with tilde expansion)
/// 3. XDG data directory
/// 4. ~/.wayfare (fallback for systems without XDG)
pub fn resolve_data_dir(explicit_path: Option<&str>) -> Result<PathBuf> {
    if let Some(path) = explicit_path {
        return Ok(expand_tilde(path));
    }

    if let Ok(env_path) = std::env::var("WAYFARE_PATH") {
        return Ok(expand_tilde(&env_path));
    }

    if let Some(data_dir) = dirs::data_dir() {
        return Ok(data_dir.join("wayfare"));
    }

    if let Some(home) = std::env::var_os("HOME") {
        return Ok(PathBuf::from(home).join(".wayfare"));
    }

    Err(Error::Config(
        "Could not determine data directory: no HOME directory or XDG data directory found"
            .to_string(),
    ))
}

/// Expand tilde (~) in paths to the user's home directory
fn expand_tilde(path: &str) -> PathBuf {
    if let Some(stripped) = path.strip_prefix("~/")
        && let Some(home) = std::env::var_os("HOME")
    {
        return PathBuf::from(home).join(stripped);
    }
    PathBuf::from(path)
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlobConfig {
    /// Base URL under which the blob directory is served. `file://` URLs when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub public_base_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Replacement catalog JSON; relative paths resolve against the data directory.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub catalog_path: Option<PathBuf>,

    /// How often the document database file is checked for writes by other processes
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,

    /// Lines shown in the sponsored block of a country page
    #[serde(default = "default_sponsored_links")]
    pub sponsored_links: Vec<String>,

    #[serde(default)]
    pub blobs: BlobConfig,
}

fn default_poll_interval_ms() -> u64 {
    500
}

fn default_sponsored_links() -> Vec<String> {
    vec!["[Affiliate ad goes here]".to_string()]
}

impl Default for Config {
    fn default() -> Self {
        Self {
            catalog_path: None,
            poll_interval_ms: default_poll_interval_ms(),
            sponsored_links: default_sponsored_links(),
            blobs: BlobConfig::default(),
        }
    }
}

impl Config {
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn path_in(data_dir: &Path) -> PathBuf {
        data_dir.join("config.toml")
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms.max(10))
    }

    /// Catalog override resolved against `data_dir`.
    pub fn catalog_path_in(&self, data_dir: &Path) -> Option<PathBuf> {
        self.catalog_path.as_ref().map(|p| {
            if p.is_absolute() {
                p.clone()
            } else {
                data_dir.join(p)
            }
        })
    }
}
