use std::fmt;

/// Result type for itemview-runtime operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur in the runtime layer
#[derive(Debug)]
pub enum Error {
    /// Preference storage could not be opened
    Core(itemview_core::Error),

    /// Warehouse API call failed
    Api(itemview_client::Error),

    /// IO operation failed
    Io(std::io::Error),

    /// Configuration error
    Config(String),

    /// Warehouse is not part of the loaded list
    UnknownWarehouse(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Core(err) => write!(f, "Storage error: {}", err),
            Error::Api(err) => write!(f, "API error: {}", err),
            Error::Io(err) => write!(f, "IO error: {}", err),
            Error::Config(msg) => write!(f, "Configuration error: {}", msg),
            Error::UnknownWarehouse(name) => write!(f, "Unknown warehouse: {}", name),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Core(err) => Some(err),
            Error::Api(err) => Some(err),
            Error::Io(err) => Some(err),
            Error::Config(_) | Error::UnknownWarehouse(_) => None,
        }
    }
}

impl From<itemview_core::Error> for Error {
    fn from(err: itemview_core::Error) -> Self {
        Error::Core(err)
    }
}

impl From<itemview_client::Error> for Error {
    fn from(err: itemview_client::Error) -> Self {
        Error::Api(err)
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
