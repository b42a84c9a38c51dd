//! quickmarks — category-based bookmark manager core.
//!
//! The persisted document (categories + bookmarks) is shared by several
//! independently running UI surfaces through a key/value [`store`] with a
//! change-notification stream; [`managers`] hold the typed mutations,
//! [`services`] the sync, projection, reordering, and exchange logic.

pub mod app;
pub mod managers;
pub mod services;
pub mod store;
pub mod types;
