//! Bookmark repository for quickmarks.
//!
//! Typed CRUD over the `categories` and `bookmarks` collections, backed by
//! the shared [`DocumentStore`]. Every mutation re-reads the latest stored
//! collections immediately before writing, never a cached copy, so the
//! dedup and referential invariants hold against the freshest snapshot the
//! store can give us (cross-surface races remain last-write-wins, see the
//! store docs).

use std::sync::Arc;

use chrono::Utc;
use url::Url;
use uuid::Uuid;

use crate::services::reorder_engine;
use crate::store::{keys, DocumentStore};
use crate::types::bookmark::{Bookmark, BookmarkUpdate, Category};
use crate::types::errors::RepositoryError;

/// ID of the seeded default category. Bookmarks orphaned by a category
/// delete fall back here, and it can never be deleted itself.
pub const DEFAULT_CATEGORY_ID: &str = "new";

/// ID of the second seeded category.
pub const FAVORITES_CATEGORY_ID: &str = "favorites";

/// First field value that appears more than once in `items`, if any.
fn duplicate_field<T, F>(items: &[T], field: F) -> Option<String>
where
    F: Fn(&T) -> &str,
{
    let mut seen = std::collections::HashSet::new();
    for item in items {
        let value = field(item);
        if !seen.insert(value) {
            return Some(value.to_string());
        }
    }
    None
}

/// Repository over the shared document store. Cheap to clone; clones share
/// the same store.
#[derive(Clone)]
pub struct BookmarkRepository {
    store: Arc<DocumentStore>,
}

impl BookmarkRepository {
    pub fn new(store: Arc<DocumentStore>) -> Self {
        Self { store }
    }

    /// Current epoch milliseconds.
    fn now_millis() -> i64 {
        Utc::now().timestamp_millis()
    }

    fn fresh_id() -> String {
        Uuid::new_v4().to_string()
    }

    fn validate_url(url: &str) -> Result<(), RepositoryError> {
        if url.trim().is_empty() {
            return Err(RepositoryError::Validation("URL is empty".to_string()));
        }
        Url::parse(url)
            .map_err(|e| RepositoryError::Validation(format!("Invalid URL '{}': {}", url, e)))?;
        Ok(())
    }

    fn read_categories(&self) -> Result<Vec<Category>, RepositoryError> {
        match self.store.get(keys::CATEGORIES)? {
            Some(value) => serde_json::from_value(value)
                .map_err(|e| RepositoryError::Store(e.into())),
            None => Ok(Vec::new()),
        }
    }

    fn read_bookmarks(&self) -> Result<Vec<Bookmark>, RepositoryError> {
        match self.store.get(keys::BOOKMARKS)? {
            Some(value) => serde_json::from_value(value)
                .map_err(|e| RepositoryError::Store(e.into())),
            None => Ok(Vec::new()),
        }
    }

    fn write_categories(&self, categories: &[Category]) -> Result<(), RepositoryError> {
        let value = serde_json::to_value(categories)
            .map_err(|e| RepositoryError::Store(e.into()))?;
        self.store.set(keys::CATEGORIES, value)?;
        Ok(())
    }

    fn write_bookmarks(&self, bookmarks: &[Bookmark]) -> Result<(), RepositoryError> {
        let value = serde_json::to_value(bookmarks)
            .map_err(|e| RepositoryError::Store(e.into()))?;
        self.store.set(keys::BOOKMARKS, value)?;
        Ok(())
    }

    /// Seeds the two default categories and an empty bookmark list for any
    /// key that is absent. Idempotent: already-seeded keys are untouched.
    pub async fn initialize(&self) -> Result<(), RepositoryError> {
        if self.store.get(keys::CATEGORIES)?.is_none() {
            let seeded = vec![
                Category {
                    id: DEFAULT_CATEGORY_ID.to_string(),
                    name: "New".to_string(),
                    is_default: true,
                },
                Category {
                    id: FAVORITES_CATEGORY_ID.to_string(),
                    name: "Favorites".to_string(),
                    is_default: false,
                },
            ];
            self.write_categories(&seeded)?;
        }
        if self.store.get(keys::BOOKMARKS)?.is_none() {
            self.write_bookmarks(&[])?;
        }
        Ok(())
    }

    /// Reads the stored category sequence (display order).
    pub async fn categories(&self) -> Result<Vec<Category>, RepositoryError> {
        self.read_categories()
    }

    /// Reads the stored bookmarks in insertion order.
    pub async fn bookmarks(&self) -> Result<Vec<Bookmark>, RepositoryError> {
        self.read_bookmarks()
    }

    /// Validates, dedups against the latest stored list, and appends a new
    /// bookmark. Returns the stored bookmark with its generated ID.
    pub async fn create_bookmark(
        &self,
        title: &str,
        url: &str,
        category_id: &str,
    ) -> Result<Bookmark, RepositoryError> {
        let title = title.trim();
        let url = url.trim();

        if title.is_empty() {
            return Err(RepositoryError::Validation("Title is empty".to_string()));
        }
        Self::validate_url(url)?;

        let categories = self.read_categories()?;
        if !categories.iter().any(|c| c.id == category_id) {
            return Err(RepositoryError::Validation(format!(
                "Unknown category: {}",
                category_id
            )));
        }

        // Re-check against the latest read, right before the write.
        let mut bookmarks = self.read_bookmarks()?;
        if bookmarks.iter().any(|b| b.url == url) {
            return Err(RepositoryError::Duplicate(url.to_string()));
        }

        let bookmark = Bookmark {
            id: Self::fresh_id(),
            title: title.to_string(),
            url: url.to_string(),
            category_id: category_id.to_string(),
            created_at: Self::now_millis(),
        };
        bookmarks.push(bookmark.clone());
        self.write_bookmarks(&bookmarks)?;
        Ok(bookmark)
    }

    /// Merges the provided fields into an existing bookmark. `created_at`
    /// is never touched. Fails with `NotFound` if the ID is absent.
    pub async fn update_bookmark(
        &self,
        id: &str,
        update: BookmarkUpdate,
    ) -> Result<Bookmark, RepositoryError> {
        if let Some(title) = &update.title {
            if title.trim().is_empty() {
                return Err(RepositoryError::Validation("Title is empty".to_string()));
            }
        }
        if let Some(url) = &update.url {
            Self::validate_url(url)?;
        }
        if let Some(category_id) = &update.category_id {
            let categories = self.read_categories()?;
            if !categories.iter().any(|c| &c.id == category_id) {
                return Err(RepositoryError::Validation(format!(
                    "Unknown category: {}",
                    category_id
                )));
            }
        }

        let mut bookmarks = self.read_bookmarks()?;

        if let Some(url) = &update.url {
            let url = url.trim();
            if bookmarks.iter().any(|b| b.url == url && b.id != id) {
                return Err(RepositoryError::Duplicate(url.to_string()));
            }
        }

        let bookmark = bookmarks
            .iter_mut()
            .find(|b| b.id == id)
            .ok_or_else(|| RepositoryError::NotFound(id.to_string()))?;

        if let Some(title) = update.title {
            bookmark.title = title.trim().to_string();
        }
        if let Some(url) = update.url {
            bookmark.url = url.trim().to_string();
        }
        if let Some(category_id) = update.category_id {
            bookmark.category_id = category_id;
        }
        let updated = bookmark.clone();

        self.write_bookmarks(&bookmarks)?;
        Ok(updated)
    }

    /// Removes a bookmark. An absent ID is a benign no-op, not an error.
    pub async fn delete_bookmark(&self, id: &str) -> Result<(), RepositoryError> {
        let mut bookmarks = self.read_bookmarks()?;
        let before = bookmarks.len();
        bookmarks.retain(|b| b.id != id);
        if bookmarks.len() != before {
            self.write_bookmarks(&bookmarks)?;
        }
        Ok(())
    }

    /// Drag-drop of a bookmark card onto a category drop zone. Dropping a
    /// bookmark onto its own current category is a no-op.
    pub async fn move_bookmark(
        &self,
        id: &str,
        target_category_id: &str,
    ) -> Result<(), RepositoryError> {
        let bookmarks = self.read_bookmarks()?;
        let bookmark = bookmarks
            .iter()
            .find(|b| b.id == id)
            .ok_or_else(|| RepositoryError::NotFound(id.to_string()))?;
        if bookmark.category_id == target_category_id {
            return Ok(());
        }
        self.update_bookmark(id, BookmarkUpdate::category(target_category_id))
            .await?;
        Ok(())
    }

    /// Creates a new non-default category with a fresh ID.
    pub async fn create_category(&self, name: &str) -> Result<Category, RepositoryError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(RepositoryError::Validation(
                "Category name is empty".to_string(),
            ));
        }
        let mut categories = self.read_categories()?;
        let category = Category {
            id: Self::fresh_id(),
            name: name.to_string(),
            is_default: false,
        };
        categories.push(category.clone());
        self.write_categories(&categories)?;
        Ok(category)
    }

    /// Renames an existing category.
    pub async fn rename_category(
        &self,
        id: &str,
        name: &str,
    ) -> Result<Category, RepositoryError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(RepositoryError::Validation(
                "Category name is empty".to_string(),
            ));
        }
        let mut categories = self.read_categories()?;
        let category = categories
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or_else(|| RepositoryError::NotFound(id.to_string()))?;
        category.name = name.to_string();
        let renamed = category.clone();
        self.write_categories(&categories)?;
        Ok(renamed)
    }

    /// Deletes a category, reassigning its bookmarks to the default
    /// category first. The two writes are one logical step; if interrupted
    /// between them the bookmarks are already reassigned and a retry of the
    /// delete is safe.
    pub async fn delete_category(&self, id: &str) -> Result<(), RepositoryError> {
        let categories = self.read_categories()?;
        let category = categories
            .iter()
            .find(|c| c.id == id)
            .ok_or_else(|| RepositoryError::NotFound(id.to_string()))?;
        if category.is_default {
            return Err(RepositoryError::Protected(id.to_string()));
        }
        let fallback_id = categories
            .iter()
            .find(|c| c.is_default)
            .map(|c| c.id.clone())
            .unwrap_or_else(|| DEFAULT_CATEGORY_ID.to_string());

        let mut bookmarks = self.read_bookmarks()?;
        let mut reassigned = false;
        for bookmark in bookmarks.iter_mut() {
            if bookmark.category_id == id {
                bookmark.category_id = fallback_id.clone();
                reassigned = true;
            }
        }
        if reassigned {
            self.write_bookmarks(&bookmarks)?;
        }

        let remaining: Vec<Category> =
            categories.into_iter().filter(|c| c.id != id).collect();
        self.write_categories(&remaining)?;
        Ok(())
    }

    /// Wholesale replacement of both collections (the JSON import path).
    ///
    /// The incoming document must still satisfy the repository invariants:
    /// exactly one default category, unique IDs, unique URLs, and every
    /// bookmark pointing at an existing category.
    pub async fn replace_collections(
        &self,
        categories: Vec<Category>,
        bookmarks: Vec<Bookmark>,
    ) -> Result<(), RepositoryError> {
        let defaults = categories.iter().filter(|c| c.is_default).count();
        if defaults != 1 {
            return Err(RepositoryError::Validation(format!(
                "Imported document must have exactly one default category, found {}",
                defaults
            )));
        }
        if let Some(id) = duplicate_field(&categories, |c: &Category| &c.id)
            .or_else(|| duplicate_field(&bookmarks, |b: &Bookmark| &b.id))
        {
            return Err(RepositoryError::Validation(format!(
                "Imported document has duplicate id: {}",
                id
            )));
        }
        if let Some(url) = duplicate_field(&bookmarks, |b: &Bookmark| &b.url) {
            return Err(RepositoryError::Duplicate(url));
        }
        for bookmark in &bookmarks {
            if !categories.iter().any(|c| c.id == bookmark.category_id) {
                return Err(RepositoryError::Validation(format!(
                    "Unknown category: {}",
                    bookmark.category_id
                )));
            }
        }

        self.write_categories(&categories)?;
        self.write_bookmarks(&bookmarks)?;
        Ok(())
    }

    /// Extends the stored collections (the HTML import path, or JSON merge).
    ///
    /// Incoming categories with an already-present ID and incoming
    /// bookmarks with an already-present ID or URL are skipped, preserving
    /// the dedup-by-URL invariant that a blind append would break.
    pub async fn merge_collections(
        &self,
        categories: Vec<Category>,
        bookmarks: Vec<Bookmark>,
    ) -> Result<(), RepositoryError> {
        if !categories.is_empty() {
            let mut stored = self.read_categories()?;
            for category in categories {
                if stored.iter().any(|c| c.id == category.id) {
                    continue;
                }
                // the stored default stays the one default
                let mut category = category;
                category.is_default = false;
                stored.push(category);
            }
            self.write_categories(&stored)?;
        }

        if !bookmarks.is_empty() {
            let stored_categories = self.read_categories()?;
            let mut stored = self.read_bookmarks()?;
            let mut appended = false;
            for bookmark in bookmarks {
                if stored.iter().any(|b| b.id == bookmark.id || b.url == bookmark.url) {
                    continue;
                }
                let mut bookmark = bookmark;
                if !stored_categories.iter().any(|c| c.id == bookmark.category_id) {
                    bookmark.category_id = DEFAULT_CATEGORY_ID.to_string();
                }
                stored.push(bookmark);
                appended = true;
            }
            if appended {
                self.write_bookmarks(&stored)?;
            }
        }
        Ok(())
    }

    /// Drag-reorder of the category sequence: the dragged category is
    /// removed and reinserted at the drop target's position. Unlike
    /// bookmark display order, category order is persisted.
    pub async fn reorder_categories(
        &self,
        source_id: &str,
        target_id: &str,
    ) -> Result<(), RepositoryError> {
        let mut categories = self.read_categories()?;
        let changed =
            reorder_engine::reorder_by_ids(&mut categories, source_id, target_id, |c| &c.id);
        if changed {
            self.write_categories(&categories)?;
        }
        Ok(())
    }
}
