use serde::{Deserialize, Serialize};

/// How a category's bookmarks are laid out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    List,
    Grid,
}

impl Default for ViewMode {
    fn default() -> Self {
        ViewMode::List
    }
}

/// Per-surface preferences, each persisted under its own store key.
///
/// Resolved once at surface startup; absent keys take the defaults below
/// rather than being re-derived per read.
#[derive(Debug, Clone, PartialEq)]
pub struct Preferences {
    pub view_mode: ViewMode,
    pub dark_mode: bool,
    pub open_in_new_tab: bool,
    pub confirm_delete_bookmark: bool,
    pub confirm_delete_category: bool,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            view_mode: ViewMode::List,
            dark_mode: false,
            open_in_new_tab: true,
            confirm_delete_bookmark: false,
            confirm_delete_category: true,
        }
    }
}
