use std::fmt;

/// Result type for itemview-types operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur in the types layer
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Name is not usable as a warehouse or field identifier
    InvalidIdentifier(String),

    /// Value is not one of the known display types
    UnknownDisplayType(String),

    /// Item is missing a value for one of its primary keys
    MissingPrimaryKey(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidIdentifier(name) => write!(f, "Invalid identifier: {:?}", name),
            Error::UnknownDisplayType(value) => write!(f, "Unknown display type: {:?}", value),
            Error::MissingPrimaryKey(field) => {
                write!(f, "Item has no value for primary key {:?}", field)
            }
        }
    }
}

impl std::error::Error for Error {}
