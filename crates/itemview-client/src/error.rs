use std::fmt;

/// Result type for itemview-client operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur when talking to the warehouse API
#[derive(Debug)]
pub enum Error {
    /// Transport failure or undecodable body
    Http(reqwest::Error),

    /// Server answered with a non-2xx status
    Status { status: u16, url: String },

    /// Request could not be built from the given input
    InvalidInput(itemview_types::Error),

    /// Base URL cannot carry a path
    InvalidBaseUrl(String),

    /// Response did not contain what the contract promises
    UnexpectedResponse(String),
}

impl Error {
    pub fn status(status: u16, url: impl Into<String>) -> Self {
        Error::Status {
            status,
            url: url.into(),
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Http(err) => write!(f, "HTTP error: {}", err),
            Error::Status { status, url } => {
                write!(f, "Request to {} failed with status {}", url, status)
            }
            Error::InvalidInput(err) => write!(f, "Invalid input: {}", err),
            Error::InvalidBaseUrl(url) => write!(f, "Invalid base URL: {}", url),
            Error::UnexpectedResponse(msg) => write!(f, "Unexpected response: {}", msg),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Http(err) => Some(err),
            Error::InvalidInput(err) => Some(err),
            Error::Status { .. } | Error::InvalidBaseUrl(_) | Error::UnexpectedResponse(_) => None,
        }
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        Error::Http(err)
    }
}

impl From<itemview_types::Error> for Error {
    fn from(err: itemview_types::Error) -> Self {
        Error::InvalidInput(err)
    }
}
