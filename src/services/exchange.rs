//! Bookmark export and import.
//!
//! Export produces the JSON document shape `{categories, bookmarks,
//! exportedAt}`. Import accepts either that same JSON shape or a generic
//! bookmark-link HTML document in which every anchor becomes a bookmark.
//! Both paths take an explicit [`ImportMode`]; the historically observed
//! defaults are JSON = Replace, HTML = Merge.

use chrono::Utc;
use url::Url;
use uuid::Uuid;

use crate::managers::bookmark_repository::{BookmarkRepository, DEFAULT_CATEGORY_ID};
use crate::types::bookmark::{Bookmark, Category};
use crate::types::errors::ImportError;
use crate::types::exchange::{ExportDocument, ImportMode};

/// Snapshots both collections with an RFC 3339 export timestamp.
pub async fn export(repository: &BookmarkRepository) -> Result<ExportDocument, ImportError> {
    Ok(ExportDocument {
        categories: repository.categories().await?,
        bookmarks: repository.bookmarks().await?,
        exported_at: Utc::now().to_rfc3339(),
    })
}

/// Serializes an export document to pretty JSON.
pub fn to_json(document: &ExportDocument) -> Result<String, ImportError> {
    serde_json::to_string_pretty(document).map_err(|e| ImportError::Parse(e.to_string()))
}

/// Imports the JSON export shape.
///
/// `Replace` swaps both collections wholesale; `Merge` appends only the
/// entries whose ID is not already present.
pub async fn import_json(
    repository: &BookmarkRepository,
    text: &str,
    mode: ImportMode,
) -> Result<(), ImportError> {
    let document: ExportDocument =
        serde_json::from_str(text).map_err(|e| ImportError::Parse(e.to_string()))?;

    match mode {
        ImportMode::Replace => {
            repository
                .replace_collections(document.categories, document.bookmarks)
                .await?;
        }
        ImportMode::Merge => {
            repository
                .merge_collections(document.categories, document.bookmarks)
                .await?;
        }
    }
    Ok(())
}

/// Imports a generic bookmark-link HTML document: every anchor element with
/// an `href` becomes a bookmark in the default category. Title comes from
/// the link text (falling back to the URL when empty). Anchors without an
/// href, or whose href is not an absolute URL, are skipped. Returns the
/// number of bookmarks imported.
pub async fn import_html(
    repository: &BookmarkRepository,
    html: &str,
    mode: ImportMode,
) -> Result<usize, ImportError> {
    let now = Utc::now().timestamp_millis();
    let imported: Vec<Bookmark> = scan_anchors(html)
        .into_iter()
        .filter(|anchor| Url::parse(&anchor.href).is_ok())
        .map(|anchor| {
            let title = if anchor.text.trim().is_empty() {
                anchor.href.clone()
            } else {
                anchor.text.trim().to_string()
            };
            Bookmark {
                id: Uuid::new_v4().to_string(),
                title,
                url: anchor.href,
                category_id: DEFAULT_CATEGORY_ID.to_string(),
                created_at: now,
            }
        })
        .collect();
    let count = imported.len();

    match mode {
        ImportMode::Merge => {
            repository.merge_collections(Vec::new(), imported).await?;
        }
        ImportMode::Replace => {
            let categories: Vec<Category> = repository.categories().await?;
            repository.replace_collections(categories, imported).await?;
        }
    }
    Ok(count)
}

struct Anchor {
    href: String,
    text: String,
}

/// Minimal anchor scanner for bookmark-export HTML. Finds `<a ... href=...>`
/// elements and their link text; no general HTML parsing is attempted.
fn scan_anchors(html: &str) -> Vec<Anchor> {
    let mut anchors = Vec::new();
    // ascii lowercase keeps byte offsets aligned with the original text
    let lower = html.to_ascii_lowercase();
    let mut cursor = 0;

    while let Some(open_rel) = lower[cursor..].find("<a") {
        let open = cursor + open_rel;
        // must be "<a>" or "<a " etc., not "<article"
        let after = html.as_bytes().get(open + 2).copied();
        if !matches!(after, Some(b' ') | Some(b'\t') | Some(b'\n') | Some(b'>')) {
            cursor = open + 2;
            continue;
        }
        let Some(tag_end_rel) = lower[open..].find('>') else {
            break;
        };
        let tag_end = open + tag_end_rel;
        let tag = &html[open..tag_end];

        let Some(close_rel) = lower[tag_end..].find("</a>") else {
            break;
        };
        let close = tag_end + close_rel;
        let text = strip_tags(&html[tag_end + 1..close]);

        if let Some(href) = attribute_value(tag, "href") {
            if !href.is_empty() {
                anchors.push(Anchor { href, text });
            }
        }
        cursor = close + 4;
    }
    anchors
}

/// Extracts a quoted or bare attribute value from an opening tag.
fn attribute_value(tag: &str, name: &str) -> Option<String> {
    let lower = tag.to_ascii_lowercase();
    let needle = format!("{}=", name);
    let mut search = 0;
    while let Some(rel) = lower[search..].find(&needle) {
        let at = search + rel;
        search = at + needle.len();
        // the match must start the attribute name, not end a longer one
        // such as data-href
        if !tag[..at].ends_with(|c: char| c.is_whitespace()) {
            continue;
        }
        let rest = &tag[at + needle.len()..];
        let mut chars = rest.chars();
        return match chars.next()? {
            quote @ ('"' | '\'') => {
                let rest = &rest[1..];
                let end = rest.find(quote)?;
                Some(rest[..end].to_string())
            }
            _ => {
                let end = rest
                    .find(|c: char| c.is_whitespace() || c == '>')
                    .unwrap_or(rest.len());
                Some(rest[..end].to_string())
            }
        };
    }
    None
}

/// Drops any nested markup inside the link text.
fn strip_tags(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut in_tag = false;
    for c in text.chars() {
        match c {
            '<' => in_tag = true,
            '>' => in_tag = false,
            c if !in_tag => out.push(c),
            _ => {}
        }
    }
    out
}
