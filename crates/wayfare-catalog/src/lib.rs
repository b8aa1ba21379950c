//! Read-only country catalog.
//!
//! The catalog is a fixed, ordered table loaded once at startup, either from the
//! copy embedded in the binary or from a JSON file with the same shape.

use serde::Deserialize;
use std::collections::HashMap;
use std::fmt;
use std::path::Path;

use wayfare_types::{Country, CountryId};

const EMBEDDED: &str = include_str!("../data/countries.json");

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug)]
pub enum Error {
    Io(std::io::Error),
    Json(serde_json::Error),
    /// Table parsed but breaks a catalog rule (empty or duplicate id)
    Invalid(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Io(err) => write!(f, "IO error: {}", err),
            Error::Json(err) => write!(f, "Catalog JSON error: {}", err),
            Error::Invalid(msg) => write!(f, "Invalid catalog: {}", msg),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io(err) => Some(err),
            Error::Json(err) => Some(err),
            Error::Invalid(_) => None,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err)
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Json(err)
    }
}

#[derive(Deserialize)]
struct CatalogEntry {
    id: CountryId,
    #[serde(flatten)]
    country: Country,
}

/// Immutable CountryId → Country table that keeps its source order.
#[derive(Debug, Clone)]
pub struct Catalog {
    entries: Vec<(CountryId, Country)>,
    index: HashMap<CountryId, usize>,
}

impl Catalog {
    /// The table shipped with the binary.
    pub fn embedded() -> Result<Self> {
        Self::from_json(EMBEDDED)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    pub fn from_json(content: &str) -> Result<Self> {
        let raw: Vec<CatalogEntry> = serde_json::from_str(content)?;
        Self::from_entries(raw.into_iter().map(|e| (e.id, e.country)).collect())
    }

    pub fn from_entries(entries: Vec<(CountryId, Country)>) -> Result<Self> {
        let mut index = HashMap::with_capacity(entries.len());
        for (pos, (id, _)) in entries.iter().enumerate() {
            if id.as_str().trim().is_empty() {
                return Err(Error::Invalid(format!("entry {} has an empty id", pos)));
            }
            if index.insert(id.clone(), pos).is_some() {
                return Err(Error::Invalid(format!("duplicate id '{}'", id)));
            }
        }
        Ok(Self { entries, index })
    }

    pub fn lookup(&self, id: &CountryId) -> Option<&Country> {
        self.index.get(id).map(|&pos| &self.entries[pos].1)
    }

    /// Entries in catalog order.
    pub fn entries(&self) -> impl Iterator<Item = (&CountryId, &Country)> {
        self.entries.iter().map(|(id, country)| (id, country))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
