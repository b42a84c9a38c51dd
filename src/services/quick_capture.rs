//! One-gesture bookmarking of the active tab.
//!
//! Backs the context-menu entry and the keyboard shortcut: save the current
//! page into the default category, tell the user what happened through the
//! [`Notifier`] collaborator, and never error on the expected cases
//! (privileged page, already bookmarked).

use crate::managers::bookmark_repository::{BookmarkRepository, DEFAULT_CATEGORY_ID};
use crate::types::bookmark::{Bookmark, TabInfo};
use crate::types::errors::RepositoryError;
use crate::types::notify::{Notifier, Severity};

/// URL prefixes of internal pages that are never bookmarked.
const PRIVILEGED_PREFIXES: [&str; 5] = [
    "about:",
    "moz-extension:",
    "chrome:",
    "chrome-extension:",
    "edge:",
];

/// What a quick-capture attempt did.
#[derive(Debug, Clone, PartialEq)]
pub enum CaptureOutcome {
    Saved(Bookmark),
    AlreadyBookmarked,
    Skipped,
}

/// Quick-capture flow for the background surface.
pub struct QuickCapture<N: Notifier> {
    repository: BookmarkRepository,
    notifier: N,
}

impl<N: Notifier> QuickCapture<N> {
    pub fn new(repository: BookmarkRepository, notifier: N) -> Self {
        Self {
            repository,
            notifier,
        }
    }

    /// Bookmarks the tab's page into the default category.
    ///
    /// Privileged internal pages are silently skipped, and a tab reporting
    /// no title is saved under its URL. An already-saved URL raises a
    /// warning toast rather than an error; only store failures and
    /// genuinely malformed input propagate as `Err`.
    pub async fn capture(&self, tab: &TabInfo) -> Result<CaptureOutcome, RepositoryError> {
        if tab.url.is_empty()
            || PRIVILEGED_PREFIXES
                .iter()
                .any(|prefix| tab.url.starts_with(prefix))
        {
            return Ok(CaptureOutcome::Skipped);
        }

        let title = if tab.title.trim().is_empty() {
            tab.url.as_str()
        } else {
            tab.title.as_str()
        };
        match self
            .repository
            .create_bookmark(title, &tab.url, DEFAULT_CATEGORY_ID)
            .await
        {
            Ok(bookmark) => {
                self.notifier
                    .notify(tab.id, "Bookmark saved!", Severity::Success);
                Ok(CaptureOutcome::Saved(bookmark))
            }
            Err(RepositoryError::Duplicate(_)) => {
                self.notifier
                    .notify(tab.id, "Already bookmarked!", Severity::Warning);
                Ok(CaptureOutcome::AlreadyBookmarked)
            }
            Err(err) => Err(err),
        }
    }
}
