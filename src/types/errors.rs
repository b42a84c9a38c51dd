use std::fmt;

// === StoreError ===

/// Errors raised by the document store.
#[derive(Debug)]
pub enum StoreError {
    /// The underlying SQLite operation failed.
    Database(String),
    /// A stored value could not be serialized or deserialized.
    Serialization(String),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::Database(msg) => write!(f, "Store database error: {}", msg),
            StoreError::Serialization(msg) => {
                write!(f, "Store serialization error: {}", msg)
            }
        }
    }
}

impl std::error::Error for StoreError {}

impl From<rusqlite::Error> for StoreError {
    fn from(err: rusqlite::Error) -> Self {
        StoreError::Database(err.to_string())
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(err: serde_json::Error) -> Self {
        StoreError::Serialization(err.to_string())
    }
}

// === RepositoryError ===

/// Errors raised by bookmark repository operations.
#[derive(Debug)]
pub enum RepositoryError {
    /// Empty or malformed input: title, URL, or category name.
    Validation(String),
    /// A bookmark with the same URL already exists.
    Duplicate(String),
    /// No bookmark or category with the given ID exists.
    NotFound(String),
    /// The default category cannot be deleted.
    Protected(String),
    /// The underlying store operation failed.
    Store(StoreError),
}

impl fmt::Display for RepositoryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RepositoryError::Validation(msg) => write!(f, "Validation failed: {}", msg),
            RepositoryError::Duplicate(url) => write!(f, "Already bookmarked: {}", url),
            RepositoryError::NotFound(id) => write!(f, "Not found: {}", id),
            RepositoryError::Protected(id) => {
                write!(f, "Default category cannot be deleted: {}", id)
            }
            RepositoryError::Store(err) => write!(f, "Store error: {}", err),
        }
    }
}

impl std::error::Error for RepositoryError {}

impl From<StoreError> for RepositoryError {
    fn from(err: StoreError) -> Self {
        RepositoryError::Store(err)
    }
}

// === ImportError ===

/// Errors raised while importing bookmark files.
#[derive(Debug)]
pub enum ImportError {
    /// The import payload could not be parsed.
    Parse(String),
    /// Applying the imported data to the repository failed.
    Repository(RepositoryError),
}

impl fmt::Display for ImportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ImportError::Parse(msg) => write!(f, "Import parse error: {}", msg),
            ImportError::Repository(err) => write!(f, "Import failed: {}", err),
        }
    }
}

impl std::error::Error for ImportError {}

impl From<RepositoryError> for ImportError {
    fn from(err: RepositoryError) -> Self {
        ImportError::Repository(err)
    }
}

impl From<StoreError> for ImportError {
    fn from(err: StoreError) -> Self {
        ImportError::Repository(RepositoryError::Store(err))
    }
}
