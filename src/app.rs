//! App core for quickmarks.
//!
//! Wires the shared document store and the repository; each UI surface
//! attaches its own `SyncListener` and `SurfaceState` on top.

use std::path::Path;
use std::sync::Arc;

use crate::managers::bookmark_repository::BookmarkRepository;
use crate::store::DocumentStore;
use crate::types::errors::RepositoryError;

/// Central handle shared by every surface of one running instance.
pub struct App {
    pub store: Arc<DocumentStore>,
    pub repository: BookmarkRepository,
}

impl App {
    /// Opens the store at `path`, seeds defaults if absent.
    pub async fn open<P: AsRef<Path>>(path: P) -> Result<Self, RepositoryError> {
        let store = Arc::new(DocumentStore::open(path)?);
        Self::with_store(store).await
    }

    /// In-memory instance, mainly for tests and ephemeral sessions.
    pub async fn open_in_memory() -> Result<Self, RepositoryError> {
        let store = Arc::new(DocumentStore::open_in_memory()?);
        Self::with_store(store).await
    }

    async fn with_store(store: Arc<DocumentStore>) -> Result<Self, RepositoryError> {
        let repository = BookmarkRepository::new(Arc::clone(&store));
        repository.initialize().await?;
        Ok(Self { store, repository })
    }
}
