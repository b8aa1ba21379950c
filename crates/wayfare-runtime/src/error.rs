use std::fmt;

/// Result type for wayfare-runtime operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur in the runtime layer
#[derive(Debug)]
pub enum Error {
    /// Document or blob store call failed
    Store(wayfare_store::Error),

    /// Catalog could not be loaded
    Catalog(wayfare_catalog::Error),

    /// IO operation failed
    Io(std::io::Error),

    /// Configuration error
    Config(String),

    /// Intent issued while no catalog country is selected
    NoCountry(String),

    /// Intent rejected before reaching a store
    InvalidInput(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Store(err) => write!(f, "{}", err),
            Error::Catalog(err) => write!(f, "{}", err),
            Error::Io(err) => write!(f, "IO error: {}", err),
            Error::Config(msg) => write!(f, "Configuration error: {}", msg),
            Error::NoCountry(msg) => write!(f, "No country selected: {}", msg),
            Error::InvalidInput(msg) => write!(f, "Invalid input: {}", msg),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Store(err) => Some(err),
            Error::Catalog(err) => Some(err),
            Error::Io(err) => Some(err),
            Error::Config(_) | Error::NoCountry(_) | Error::InvalidInput(_) => None,
        }
    }
}

impl From<wayfare_store::Error> for Error {
    fn from(err: wayfare_store::Error) -> Self {
        Error::Store(err)
    }
}

impl From<wayfare_catalog::Error> for Error {
    fn from(err: wayfare_catalog::Error) -> Self {
        Error::Catalog(err)
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err)
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for Error {
    fn from(err: toml::ser::Error) -> Self {
        Error::Config(err.to_string())
    }
}
