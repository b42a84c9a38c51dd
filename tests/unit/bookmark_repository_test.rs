//! Unit tests for the BookmarkRepository: seeding, CRUD, the dedup and
//! cascade-delete invariants, and persisted category reordering.

use std::sync::Arc;

use quickmarks::managers::bookmark_repository::{
    BookmarkRepository, DEFAULT_CATEGORY_ID, FAVORITES_CATEGORY_ID,
};
use quickmarks::store::DocumentStore;
use quickmarks::types::bookmark::BookmarkUpdate;
use quickmarks::types::errors::RepositoryError;

async fn setup() -> BookmarkRepository {
    let store = Arc::new(DocumentStore::open_in_memory().unwrap());
    let repo = BookmarkRepository::new(store);
    repo.initialize().await.unwrap();
    repo
}

#[tokio::test]
async fn test_initialize_seeds_default_categories() {
    let repo = setup().await;
    let categories = repo.categories().await.unwrap();
    assert_eq!(categories.len(), 2);
    assert_eq!(categories[0].id, DEFAULT_CATEGORY_ID);
    assert_eq!(categories[0].name, "New");
    assert!(categories[0].is_default);
    assert_eq!(categories[1].id, FAVORITES_CATEGORY_ID);
    assert!(!categories[1].is_default);
    assert!(repo.bookmarks().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_initialize_is_idempotent() {
    let repo = setup().await;
    let category = repo.create_category("Work").await.unwrap();
    repo.create_bookmark("Example", "https://example.com", &category.id)
        .await
        .unwrap();

    repo.initialize().await.unwrap();

    // seeding again must not clobber existing data
    assert_eq!(repo.categories().await.unwrap().len(), 3);
    assert_eq!(repo.bookmarks().await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_create_bookmark_persists_and_resolves_category() {
    let repo = setup().await;
    let bookmark = repo
        .create_bookmark("Rust", "https://rust-lang.org", FAVORITES_CATEGORY_ID)
        .await
        .unwrap();

    let stored = repo.bookmarks().await.unwrap();
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].id, bookmark.id);
    assert_eq!(stored[0].url, "https://rust-lang.org");
    let categories = repo.categories().await.unwrap();
    assert!(categories.iter().any(|c| c.id == stored[0].category_id));
    assert!(stored[0].created_at > 0);
}

#[tokio::test]
async fn test_create_bookmark_validation_errors() {
    let repo = setup().await;

    let err = repo
        .create_bookmark("", "https://a.com", DEFAULT_CATEGORY_ID)
        .await
        .unwrap_err();
    assert!(matches!(err, RepositoryError::Validation(_)));

    let err = repo
        .create_bookmark("A", "", DEFAULT_CATEGORY_ID)
        .await
        .unwrap_err();
    assert!(matches!(err, RepositoryError::Validation(_)));

    // relative URLs are rejected: must parse as absolute
    let err = repo
        .create_bookmark("A", "not-a-url/path", DEFAULT_CATEGORY_ID)
        .await
        .unwrap_err();
    assert!(matches!(err, RepositoryError::Validation(_)));

    let err = repo
        .create_bookmark("A", "https://a.com", "no-such-category")
        .await
        .unwrap_err();
    assert!(matches!(err, RepositoryError::Validation(_)));

    assert!(repo.bookmarks().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_duplicate_url_rejected_and_collection_unchanged() {
    let repo = setup().await;
    repo.create_bookmark("First", "https://example.com", DEFAULT_CATEGORY_ID)
        .await
        .unwrap();

    let err = repo
        .create_bookmark("Second", "https://example.com", FAVORITES_CATEGORY_ID)
        .await
        .unwrap_err();
    assert!(matches!(err, RepositoryError::Duplicate(_)));

    let stored = repo.bookmarks().await.unwrap();
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].title, "First");
}

#[tokio::test]
async fn test_duplicate_check_is_case_sensitive() {
    let repo = setup().await;
    repo.create_bookmark("A", "https://example.com/Page", DEFAULT_CATEGORY_ID)
        .await
        .unwrap();
    // different case in the path is a different URL
    repo.create_bookmark("B", "https://example.com/page", DEFAULT_CATEGORY_ID)
        .await
        .unwrap();
    assert_eq!(repo.bookmarks().await.unwrap().len(), 2);
}

#[tokio::test]
async fn test_update_bookmark_partial_merge_keeps_created_at() {
    let repo = setup().await;
    let bookmark = repo
        .create_bookmark("Old title", "https://example.com", DEFAULT_CATEGORY_ID)
        .await
        .unwrap();

    let updated = repo
        .update_bookmark(
            &bookmark.id,
            BookmarkUpdate {
                title: Some("New title".to_string()),
                ..BookmarkUpdate::default()
            },
        )
        .await
        .unwrap();

    assert_eq!(updated.title, "New title");
    assert_eq!(updated.url, "https://example.com");
    assert_eq!(updated.category_id, DEFAULT_CATEGORY_ID);
    assert_eq!(updated.created_at, bookmark.created_at);
}

#[tokio::test]
async fn test_update_bookmark_absent_id_is_not_found() {
    let repo = setup().await;
    let err = repo
        .update_bookmark("vanished", BookmarkUpdate::default())
        .await
        .unwrap_err();
    assert!(matches!(err, RepositoryError::NotFound(_)));
}

#[tokio::test]
async fn test_update_bookmark_to_existing_url_is_duplicate() {
    let repo = setup().await;
    repo.create_bookmark("A", "https://a.com", DEFAULT_CATEGORY_ID)
        .await
        .unwrap();
    let b = repo
        .create_bookmark("B", "https://b.com", DEFAULT_CATEGORY_ID)
        .await
        .unwrap();

    let err = repo
        .update_bookmark(
            &b.id,
            BookmarkUpdate {
                url: Some("https://a.com".to_string()),
                ..BookmarkUpdate::default()
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, RepositoryError::Duplicate(_)));

    // re-writing a bookmark's own URL is not a duplicate
    repo.update_bookmark(
        &b.id,
        BookmarkUpdate {
            url: Some("https://b.com".to_string()),
            ..BookmarkUpdate::default()
        },
    )
    .await
    .unwrap();
}

#[tokio::test]
async fn test_delete_bookmark_absent_id_is_noop() {
    let repo = setup().await;
    repo.create_bookmark("A", "https://a.com", DEFAULT_CATEGORY_ID)
        .await
        .unwrap();

    repo.delete_bookmark("never-existed").await.unwrap();
    assert_eq!(repo.bookmarks().await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_delete_bookmark_removes_it() {
    let repo = setup().await;
    let bookmark = repo
        .create_bookmark("A", "https://a.com", DEFAULT_CATEGORY_ID)
        .await
        .unwrap();
    repo.delete_bookmark(&bookmark.id).await.unwrap();
    assert!(repo.bookmarks().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_move_bookmark_to_other_category() {
    let repo = setup().await;
    let bookmark = repo
        .create_bookmark("A", "https://a.com", DEFAULT_CATEGORY_ID)
        .await
        .unwrap();

    repo.move_bookmark(&bookmark.id, FAVORITES_CATEGORY_ID)
        .await
        .unwrap();
    let stored = repo.bookmarks().await.unwrap();
    assert_eq!(stored[0].category_id, FAVORITES_CATEGORY_ID);

    // dropping onto the current category is a no-op, not an error
    repo.move_bookmark(&bookmark.id, FAVORITES_CATEGORY_ID)
        .await
        .unwrap();
}

#[tokio::test]
async fn test_create_and_rename_category() {
    let repo = setup().await;
    let category = repo.create_category("  Work  ").await.unwrap();
    assert_eq!(category.name, "Work");
    assert!(!category.is_default);

    let renamed = repo.rename_category(&category.id, "Projects").await.unwrap();
    assert_eq!(renamed.name, "Projects");

    let err = repo.create_category("   ").await.unwrap_err();
    assert!(matches!(err, RepositoryError::Validation(_)));

    let err = repo.rename_category("ghost", "X").await.unwrap_err();
    assert!(matches!(err, RepositoryError::NotFound(_)));
}

#[tokio::test]
async fn test_delete_category_cascades_bookmarks_to_default() {
    let repo = setup().await;
    let category = repo.create_category("Work").await.unwrap();
    let bookmark = repo
        .create_bookmark("A", "https://a.com", &category.id)
        .await
        .unwrap();

    repo.delete_category(&category.id).await.unwrap();

    let categories = repo.categories().await.unwrap();
    assert!(!categories.iter().any(|c| c.id == category.id));

    let stored = repo.bookmarks().await.unwrap();
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].id, bookmark.id);
    assert_eq!(stored[0].category_id, DEFAULT_CATEGORY_ID);
}

#[tokio::test]
async fn test_delete_default_category_is_protected() {
    let repo = setup().await;
    let err = repo.delete_category(DEFAULT_CATEGORY_ID).await.unwrap_err();
    assert!(matches!(err, RepositoryError::Protected(_)));

    // still protected when it holds bookmarks
    repo.create_bookmark("A", "https://a.com", DEFAULT_CATEGORY_ID)
        .await
        .unwrap();
    let err = repo.delete_category(DEFAULT_CATEGORY_ID).await.unwrap_err();
    assert!(matches!(err, RepositoryError::Protected(_)));
}

#[tokio::test]
async fn test_reorder_categories_is_persisted() {
    let repo = setup().await;
    let work = repo.create_category("Work").await.unwrap();

    // [new, favorites, work] -> drag work onto new -> [work, new, favorites]
    repo.reorder_categories(&work.id, DEFAULT_CATEGORY_ID)
        .await
        .unwrap();

    let ids: Vec<String> = repo
        .categories()
        .await
        .unwrap()
        .into_iter()
        .map(|c| c.id)
        .collect();
    assert_eq!(
        ids,
        vec![
            work.id.clone(),
            DEFAULT_CATEGORY_ID.to_string(),
            FAVORITES_CATEGORY_ID.to_string()
        ]
    );

    // dragging a category onto itself changes nothing
    repo.reorder_categories(&work.id, &work.id).await.unwrap();
    let ids_after: Vec<String> = repo
        .categories()
        .await
        .unwrap()
        .into_iter()
        .map(|c| c.id)
        .collect();
    assert_eq!(ids, ids_after);
}
