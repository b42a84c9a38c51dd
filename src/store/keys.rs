//! Well-known document keys.
//!
//! The whole persisted state lives under a handful of independent keys;
//! collections are read and written wholesale.

pub const CATEGORIES: &str = "categories";
pub const BOOKMARKS: &str = "bookmarks";
pub const VIEW_MODE: &str = "viewMode";
pub const DARK_MODE: &str = "darkMode";
pub const COLLAPSED_CATEGORIES: &str = "collapsedCategories";
pub const OPEN_IN_NEW_TAB: &str = "openInNewTab";
pub const CONFIRM_DELETE_BOOKMARK: &str = "confirmDeleteBookmark";
pub const CONFIRM_DELETE_CATEGORY: &str = "confirmDeleteCategory";
