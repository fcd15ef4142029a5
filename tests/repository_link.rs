//! PostgreSQL link repository tests. Run with `cargo test -- --ignored`
//! against a database reachable through `DATABASE_URL`.

use link_shortener::domain::entities::{Link, NewLink};
use link_shortener::domain::repositories::LinkRepository;
use link_shortener::error::AppError;
use link_shortener::infrastructure::persistence::PgLinkRepository;
use sqlx::PgPool;
use std::sync::Arc;

fn new_link(short_name: &str) -> NewLink {
    NewLink {
        original_url: "https://example.com".to_string(),
        short_name: short_name.to_string(),
        short_url: "yYTQaq".to_string(),
    }
}

#[sqlx::test]
#[ignore = "requires a running PostgreSQL (DATABASE_URL)"]
async fn test_create_and_find(pool: PgPool) {
    let repo = PgLinkRepository::new(Arc::new(pool));

    let link = repo.create(new_link("docs")).await.unwrap();
    assert_eq!(link.short_name, "docs");
    assert_eq!(link.short_url, "yYTQaq");

    let by_id = repo.find_by_id(link.id).await.unwrap();
    assert_eq!(by_id, Some(link.clone()));

    let by_alias = repo.find_by_short_name("docs").await.unwrap();
    assert_eq!(by_alias, Some(link));

    assert!(repo.find_by_short_name("missing").await.unwrap().is_none());
}

#[sqlx::test]
#[ignore = "requires a running PostgreSQL (DATABASE_URL)"]
async fn test_duplicate_alias_is_conflict(pool: PgPool) {
    let repo = PgLinkRepository::new(Arc::new(pool));
    repo.create(new_link("dup")).await.unwrap();

    let result = repo.create(new_link("dup")).await;

    assert!(matches!(result, Err(AppError::Conflict { field: "short_name" })));
    assert_eq!(repo.count().await.unwrap(), 1);
}

#[sqlx::test]
#[ignore = "requires a running PostgreSQL (DATABASE_URL)"]
async fn test_short_name_exists(pool: PgPool) {
    let repo = PgLinkRepository::new(Arc::new(pool));
    repo.create(new_link("here")).await.unwrap();

    assert!(repo.short_name_exists("here").await.unwrap());
    assert!(!repo.short_name_exists("there").await.unwrap());
}

#[sqlx::test]
#[ignore = "requires a running PostgreSQL (DATABASE_URL)"]
async fn test_list_range_ordered_by_id(pool: PgPool) {
    let repo = PgLinkRepository::new(Arc::new(pool));
    for name in ["aaa", "bbb", "ccc", "ddd"] {
        repo.create(new_link(name)).await.unwrap();
    }

    let all = repo.list().await.unwrap();
    assert_eq!(all.len(), 4);
    assert!(all.windows(2).all(|w| w[0].id < w[1].id));

    let window = repo.list_range(1, 2).await.unwrap();
    let names: Vec<_> = window.iter().map(|l| l.short_name.as_str()).collect();
    assert_eq!(names, ["bbb", "ccc"]);

    assert!(repo.list_range(10, 5).await.unwrap().is_empty());
}

#[sqlx::test]
#[ignore = "requires a running PostgreSQL (DATABASE_URL)"]
async fn test_update(pool: PgPool) {
    let repo = PgLinkRepository::new(Arc::new(pool));
    let link = repo.create(new_link("before")).await.unwrap();

    let updated = repo
        .update(Link::new(
            link.id,
            "https://example.org".to_string(),
            "after".to_string(),
            "abcdef".to_string(),
        ))
        .await
        .unwrap()
        .unwrap();

    assert_eq!(updated.short_name, "after");
    assert_eq!(updated.original_url, "https://example.org");

    let missing = repo
        .update(Link::new(
            link.id + 100,
            "https://example.org".to_string(),
            "other".to_string(),
            "abcdef".to_string(),
        ))
        .await
        .unwrap();
    assert!(missing.is_none());
}

#[sqlx::test]
#[ignore = "requires a running PostgreSQL (DATABASE_URL)"]
async fn test_update_to_taken_alias_is_conflict(pool: PgPool) {
    let repo = PgLinkRepository::new(Arc::new(pool));
    repo.create(new_link("first")).await.unwrap();
    let second = repo.create(new_link("second")).await.unwrap();

    let result = repo
        .update(Link {
            short_name: "first".to_string(),
            ..second
        })
        .await;

    assert!(matches!(result, Err(AppError::Conflict { .. })));
}

#[sqlx::test]
#[ignore = "requires a running PostgreSQL (DATABASE_URL)"]
async fn test_delete(pool: PgPool) {
    let repo = PgLinkRepository::new(Arc::new(pool));
    let link = repo.create(new_link("bye")).await.unwrap();

    assert!(repo.delete(link.id).await.unwrap());
    assert!(!repo.delete(link.id).await.unwrap());
    assert_eq!(repo.count().await.unwrap(), 0);
}
