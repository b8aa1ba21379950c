use std::fmt;

/// Result type for wayfare-store operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur talking to a document or blob store
#[derive(Debug)]
pub enum Error {
    /// SQLite operation failed
    Database(rusqlite::Error),

    /// IO operation failed
    Io(std::io::Error),

    /// Stored fields could not be (de)serialized
    Json(serde_json::Error),

    /// Change watcher could not be started
    Watch(notify::Error),

    /// Object or document does not exist
    NotFound(String),

    /// Caller passed something the store cannot accept (bad path, bad field name)
    InvalidInput(String),

    /// Store could not serve the request (poisoned lock, closed feed, injected fault)
    Unavailable(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Database(err) => write!(f, "Database error: {}", err),
            Error::Io(err) => write!(f, "IO error: {}", err),
            Error::Json(err) => write!(f, "Document encoding error: {}", err),
            Error::Watch(err) => write!(f, "Change watcher error: {}", err),
            Error::NotFound(msg) => write!(f, "Not found: {}", msg),
            Error::InvalidInput(msg) => write!(f, "Invalid input: {}", msg),
            Error::Unavailable(msg) => write!(f, "Store unavailable: {}", msg),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Database(err) => Some(err),
            Error::Io(err) => Some(err),
            Error::Json(err) => Some(err),
            Error::Watch(err) => Some(err),
            Error::NotFound(_) | Error::InvalidInput(_) | Error::Unavailable(_) => None,
        }
    }
}

impl From<rusqlite::Error> for Error {
    fn from(err: rusqlite::Error) -> Self {
        Error::Database(err)
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

impl From<notify::Error> for Error {
    fn from(err: notify::Error) -> Self {
        Error::Watch(err)
    }
}

pub(crate) fn poisoned() -> Error {
    Error::Unavailable("lock poisoned".to_string())
}
