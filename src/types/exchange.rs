use serde::{Deserialize, Serialize};

use super::bookmark::{Bookmark, Category};

/// The export file shape: both collections plus an RFC 3339 timestamp.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportDocument {
    pub categories: Vec<Category>,
    pub bookmarks: Vec<Bookmark>,
    pub exported_at: String,
}

/// Whether an import replaces the stored collections or appends to them.
///
/// The observed defaults differ per format (JSON replaces, HTML appends);
/// callers pick explicitly instead of the asymmetry being hard-coded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImportMode {
    Replace,
    Merge,
}
