//! Per-surface synchronization with the shared document store.
//!
//! Each UI surface keeps a [`SurfaceState`] cache of the document and its
//! preferences. The cache is populated once at startup and from then on
//! mutated only by applying [`StoreChange`] notifications verbatim (no
//! merging), which makes every surface eventually consistent with the
//! store — and never more consistent than the store itself.

use std::collections::HashMap;

use serde::de::DeserializeOwned;
use serde_json::Value;
use tokio::sync::broadcast::error::RecvError;
use tokio::sync::broadcast::Receiver;

use crate::store::{keys, DocumentStore, StoreChange};
use crate::types::bookmark::{Bookmark, Category};
use crate::types::errors::StoreError;
use crate::types::preferences::{Preferences, ViewMode};

/// One surface's in-memory copy of the document and preferences.
///
/// Owned by the surface; rendering code reads it, only the sync path
/// writes it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SurfaceState {
    pub categories: Vec<Category>,
    pub bookmarks: Vec<Bookmark>,
    pub preferences: Preferences,
    pub collapsed: HashMap<String, bool>,
}

/// Deserializes a stored value, falling back to the key's default when the
/// key is absent or its value does not match the expected shape.
fn read_or<T: DeserializeOwned>(
    store: &DocumentStore,
    key: &str,
    default: T,
) -> Result<T, StoreError> {
    Ok(store
        .get(key)?
        .and_then(|value| serde_json::from_value(value).ok())
        .unwrap_or(default))
}

fn decode_or_default<T: DeserializeOwned + Default>(value: Option<&Value>) -> T {
    value
        .and_then(|v| serde_json::from_value(v.clone()).ok())
        .unwrap_or_default()
}

impl SurfaceState {
    /// Resolves the full surface state from the store at startup.
    ///
    /// Preferences take their documented defaults when absent. Dark mode is
    /// special-cased: on first run (no stored value) it is taken from the
    /// host's color-scheme hint and written back, so later surfaces agree.
    pub fn load(
        store: &DocumentStore,
        system_prefers_dark: bool,
    ) -> Result<Self, StoreError> {
        let defaults = Preferences::default();

        let dark_mode = match store.get(keys::DARK_MODE)? {
            Some(value) => serde_json::from_value(value).unwrap_or(defaults.dark_mode),
            None => {
                store.set(keys::DARK_MODE, Value::Bool(system_prefers_dark))?;
                system_prefers_dark
            }
        };

        Ok(Self {
            categories: read_or(store, keys::CATEGORIES, Vec::new())?,
            bookmarks: read_or(store, keys::BOOKMARKS, Vec::new())?,
            preferences: Preferences {
                view_mode: read_or(store, keys::VIEW_MODE, defaults.view_mode)?,
                dark_mode,
                open_in_new_tab: read_or(
                    store,
                    keys::OPEN_IN_NEW_TAB,
                    defaults.open_in_new_tab,
                )?,
                confirm_delete_bookmark: read_or(
                    store,
                    keys::CONFIRM_DELETE_BOOKMARK,
                    defaults.confirm_delete_bookmark,
                )?,
                confirm_delete_category: read_or(
                    store,
                    keys::CONFIRM_DELETE_CATEGORY,
                    defaults.confirm_delete_category,
                )?,
            },
            collapsed: read_or(store, keys::COLLAPSED_CATEGORIES, HashMap::new())?,
        })
    }

    /// Applies one change notification, replacing the affected slice of
    /// state verbatim. Returns whether the surface needs to re-render.
    pub fn apply(&mut self, change: &StoreChange) -> bool {
        let new_value = change.new_value.as_ref();
        match change.key.as_str() {
            keys::CATEGORIES => {
                self.categories = decode_or_default(new_value);
                true
            }
            keys::BOOKMARKS => {
                self.bookmarks = decode_or_default(new_value);
                true
            }
            keys::VIEW_MODE => {
                self.preferences.view_mode = new_value
                    .and_then(|v| serde_json::from_value(v.clone()).ok())
                    .unwrap_or(ViewMode::List);
                true
            }
            keys::DARK_MODE => {
                self.preferences.dark_mode = new_value
                    .and_then(Value::as_bool)
                    .unwrap_or(false);
                true
            }
            keys::COLLAPSED_CATEGORIES => {
                self.collapsed = decode_or_default(new_value);
                true
            }
            keys::OPEN_IN_NEW_TAB => {
                self.preferences.open_in_new_tab =
                    new_value.and_then(Value::as_bool).unwrap_or(true);
                false
            }
            keys::CONFIRM_DELETE_BOOKMARK => {
                self.preferences.confirm_delete_bookmark =
                    new_value.and_then(Value::as_bool).unwrap_or(false);
                false
            }
            keys::CONFIRM_DELETE_CATEGORY => {
                self.preferences.confirm_delete_category =
                    new_value.and_then(Value::as_bool).unwrap_or(true);
                false
            }
            _ => false,
        }
    }
}

/// Subscriber half of the change stream for one surface.
pub struct SyncListener {
    receiver: Receiver<StoreChange>,
}

impl SyncListener {
    pub fn new(store: &DocumentStore) -> Self {
        Self {
            receiver: store.subscribe(),
        }
    }

    /// Waits for the next change. A lagged receiver skips the overwritten
    /// notifications and keeps going; `None` means the store is gone.
    pub async fn recv(&mut self) -> Option<StoreChange> {
        loop {
            match self.receiver.recv().await {
                Ok(change) => return Some(change),
                Err(RecvError::Lagged(_)) => continue,
                Err(RecvError::Closed) => return None,
            }
        }
    }
}
