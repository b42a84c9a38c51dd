//! Derives the renderable category/bookmark layout from repository state.
//!
//! Pure functions: safe to call on every state change. Storage order for
//! bookmarks is insertion order; display order is recomputed here as
//! alphabetical-by-title, then grid-interleaved when the surface is in
//! grid view.

use std::collections::HashMap;

use crate::services::reorder_engine::{grid_interleave, GRID_COLUMNS};
use crate::types::bookmark::{Bookmark, Category};
use crate::types::preferences::ViewMode;

/// One rendered category: the category itself, its collapse flag, and its
/// bookmarks in display order.
#[derive(Debug, Clone, PartialEq)]
pub struct CategorySection {
    pub category: Category,
    pub collapsed: bool,
    pub bookmarks: Vec<Bookmark>,
}

/// Projects repository state into the ordered list of sections a surface
/// renders. Categories appear in stored order; each category's bookmarks
/// are sorted alphabetically by title (case-insensitive, ties broken by
/// exact title) and interleaved for the two-column grid when in grid view.
pub fn project(
    categories: &[Category],
    bookmarks: &[Bookmark],
    collapsed: &HashMap<String, bool>,
    view_mode: ViewMode,
) -> Vec<CategorySection> {
    categories
        .iter()
        .map(|category| {
            let mut section_bookmarks: Vec<Bookmark> = bookmarks
                .iter()
                .filter(|b| b.category_id == category.id)
                .cloned()
                .collect();
            section_bookmarks.sort_by(|a, b| {
                a.title
                    .to_lowercase()
                    .cmp(&b.title.to_lowercase())
                    .then_with(|| a.title.cmp(&b.title))
            });
            if view_mode == ViewMode::Grid {
                section_bookmarks = grid_interleave(&section_bookmarks, GRID_COLUMNS);
            }
            CategorySection {
                category: category.clone(),
                collapsed: collapsed.get(&category.id).copied().unwrap_or(false),
                bookmarks: section_bookmarks,
            }
        })
        .collect()
}

/// Search-box filter: case-insensitive substring match on title or URL.
/// An empty query matches everything.
pub fn matches_query(bookmark: &Bookmark, query: &str) -> bool {
    let query = query.to_lowercase();
    bookmark.title.to_lowercase().contains(&query)
        || bookmark.url.to_lowercase().contains(&query)
}
