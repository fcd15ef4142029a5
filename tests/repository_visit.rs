//! PostgreSQL visit repository tests. Run with `cargo test -- --ignored`
//! against a database reachable through `DATABASE_URL`.

use chrono::{Duration, Utc};
use link_shortener::domain::entities::{NewVisit, REDIRECT_STATUS};
use link_shortener::domain::repositories::VisitRepository;
use link_shortener::infrastructure::persistence::PgVisitRepository;
use sqlx::PgPool;
use std::sync::Arc;

#[sqlx::test]
#[ignore = "requires a running PostgreSQL (DATABASE_URL)"]
async fn test_record_visit(pool: PgPool) {
    let repo = PgVisitRepository::new(Arc::new(pool));

    let visit = repo
        .record(NewVisit::redirect(7, "198.51.100.4", "curl/8.0"))
        .await
        .unwrap();

    assert!(visit.id > 0);
    assert_eq!(visit.link_id, 7);
    assert_eq!(visit.ip, "198.51.100.4");
    assert_eq!(visit.user_agent, "curl/8.0");
    assert_eq!(visit.status, REDIRECT_STATUS);
}

#[sqlx::test]
#[ignore = "requires a running PostgreSQL (DATABASE_URL)"]
async fn test_visit_without_existing_link(pool: PgPool) {
    let repo = PgVisitRepository::new(Arc::new(pool));

    // Visits reference links by id only.
    assert!(repo.record(NewVisit::redirect(9999, "", "")).await.is_ok());
}

#[sqlx::test]
#[ignore = "requires a running PostgreSQL (DATABASE_URL)"]
async fn test_list_newest_first(pool: PgPool) {
    let repo = PgVisitRepository::new(Arc::new(pool));
    let now = Utc::now();

    for (link_id, age) in [(1, 30), (2, 10), (3, 20)] {
        let mut visit = NewVisit::redirect(link_id, "", "");
        visit.created_at = now - Duration::seconds(age);
        repo.record(visit).await.unwrap();
    }

    let order: Vec<_> = repo
        .list()
        .await
        .unwrap()
        .iter()
        .map(|v| v.link_id)
        .collect();
    assert_eq!(order, [2, 3, 1]);

    let window = repo.list_range(1, 1).await.unwrap();
    assert_eq!(window[0].link_id, 3);
    assert_eq!(repo.count().await.unwrap(), 3);
}
