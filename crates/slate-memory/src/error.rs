use std::fmt;

use slate_query::FilterParseError;

#[derive(Debug)]
pub enum MemoryError {
    CollectionNotFound(String),
    CollectionExists(String),
    InvalidQuery(String),
    Filter(FilterParseError),
    Poisoned,
}

impl fmt::Display for MemoryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MemoryError::CollectionNotFound(name) => write!(f, "collection not found: {name}"),
            MemoryError::CollectionExists(name) => write!(f, "collection already exists: {name}"),
            MemoryError::InvalidQuery(msg) => write!(f, "invalid query: {msg}"),
            MemoryError::Filter(e) => write!(f, "{e}"),
            MemoryError::Poisoned => write!(f, "store lock poisoned"),
        }
    }
}

impl std::error::Error for MemoryError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            MemoryError::Filter(e) => Some(e),
            _ => None,
        }
    }
}

impl From<FilterParseError> for MemoryError {
    fn from(e: FilterParseError) -> Self {
        MemoryError::Filter(e)
    }
}
