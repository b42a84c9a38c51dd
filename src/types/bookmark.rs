use serde::{Deserialize, Serialize};

/// A named group of bookmarks. Category order in the stored collection
/// drives display order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: String,
    pub name: String,
    pub is_default: bool,
}

/// A saved bookmark. `created_at` is epoch milliseconds and is only used
/// for export metadata; display order is alphabetical by title.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bookmark {
    pub id: String,
    pub title: String,
    pub url: String,
    pub category_id: String,
    pub created_at: i64,
}

/// Partial update for a bookmark. `None` fields are left untouched.
#[derive(Debug, Clone, Default)]
pub struct BookmarkUpdate {
    pub title: Option<String>,
    pub url: Option<String>,
    pub category_id: Option<String>,
}

impl BookmarkUpdate {
    /// Update that only moves the bookmark to another category.
    pub fn category(category_id: &str) -> Self {
        Self {
            category_id: Some(category_id.to_string()),
            ..Self::default()
        }
    }
}

/// The active tab as seen by the quick-capture surface.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TabInfo {
    pub id: i64,
    pub title: String,
    pub url: String,
}
