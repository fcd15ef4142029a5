mod common;

use axum::http::StatusCode;
use link_shortener::infrastructure::persistence::InMemoryStore;
use serde_json::Value;
use std::sync::Arc;

#[tokio::test]
async fn test_redirect_success() {
    let server = common::make_server();
    common::create_link(&server, "https://example.com/target", Some("redirect1")).await;

    let response = server.get("/r/redirect1").await;

    assert_eq!(response.status_code(), StatusCode::FOUND);
    assert_eq!(response.header("location"), "https://example.com/target");
}

#[tokio::test]
async fn test_redirect_not_found_records_nothing() {
    let server = common::make_server();

    let response = server.get("/r/notfound").await;

    response.assert_status_not_found();
    let visits = server.get("/api/link_visits").await;
    assert!(visits.json::<Vec<Value>>().is_empty());
    assert_eq!(visits.header("content-range"), "link_visits */0");
}

#[tokio::test]
async fn test_redirect_uses_alias_not_short_code() {
    let server = common::make_server();
    let link = common::create_link(&server, "https://example.com", Some("by-alias")).await;
    let short_code = link["short_url"].as_str().unwrap();

    server
        .get(&format!("/r/{short_code}"))
        .await
        .assert_status_not_found();
    assert_eq!(
        server.get("/r/by-alias").await.status_code(),
        StatusCode::FOUND
    );
}

#[tokio::test]
async fn test_url_with_control_characters_never_reaches_redirect() {
    let server = common::make_server();

    server
        .post("/api/links")
        .json(&serde_json::json!({ "original_url": "https://example.com/a\nb", "short_name": "nl-link" }))
        .await
        .assert_status(StatusCode::UNPROCESSABLE_ENTITY);

    server.get("/r/nl-link").await.assert_status_not_found();
    let visits = server.get("/api/link_visits").await.json::<Vec<Value>>();
    assert!(visits.is_empty());
}

#[tokio::test]
async fn test_create_then_redirect_records_one_visit() {
    let server = common::make_server();
    let link = common::create_link(&server, "https://example.com/landing", Some("promo")).await;

    let response = server
        .get("/r/promo")
        .add_header("User-Agent", "TestBot/1.0")
        .await;

    assert_eq!(response.status_code(), StatusCode::FOUND);
    assert_eq!(response.header("location"), "https://example.com/landing");

    let visits = server.get("/api/link_visits").await;
    visits.assert_status_ok();
    assert_eq!(visits.header("content-range"), "link_visits 0-0/1");

    let visits = visits.json::<Vec<Value>>();
    assert_eq!(visits.len(), 1);
    assert_eq!(visits[0]["link_id"], link["id"]);
    assert_eq!(visits[0]["ip"], "127.0.0.1");
    assert_eq!(visits[0]["user_agent"], "TestBot/1.0");
    assert_eq!(visits[0]["status"], 302);
}

#[tokio::test]
async fn test_redirect_ignores_forwarding_headers_by_default() {
    let server = common::make_server();
    common::create_link(&server, "https://example.com", Some("direct")).await;

    server
        .get("/r/direct")
        .add_header("X-Forwarded-For", "203.0.113.9")
        .await;

    let visits = server.get("/api/link_visits").await.json::<Vec<Value>>();
    assert_eq!(visits[0]["ip"], "127.0.0.1");
}

#[tokio::test]
async fn test_redirect_behind_proxy_uses_forwarded_ip() {
    let server = common::make_server_with(Arc::new(InMemoryStore::new()), true);
    common::create_link(&server, "https://example.com", Some("proxied")).await;

    server
        .get("/r/proxied")
        .add_header("X-Forwarded-For", "203.0.113.9, 10.0.0.1")
        .await;

    let visits = server.get("/api/link_visits").await.json::<Vec<Value>>();
    assert_eq!(visits[0]["ip"], "203.0.113.9");
}

#[tokio::test]
async fn test_visits_survive_link_deletion() {
    let server = common::make_server();
    common::create_link(&server, "https://example.com", Some("gone")).await;
    server.get("/r/gone").await;

    server
        .delete("/api/links/1")
        .await
        .assert_status(StatusCode::NO_CONTENT);

    let visits = server.get("/api/link_visits").await.json::<Vec<Value>>();
    assert_eq!(visits.len(), 1);
    assert_eq!(visits[0]["link_id"], 1);
}

#[tokio::test]
async fn test_end_to_end_generated_alias() {
    let server = common::make_server();

    let response = server
        .post("/api/links")
        .json(&serde_json::json!({ "original_url": "https://example.com", "short_name": "" }))
        .await;
    response.assert_status(StatusCode::CREATED);
    let link = response.json::<Value>();

    assert_eq!(link["short_url"].as_str().unwrap().len(), 6);
    let short_name = link["short_name"].as_str().unwrap();
    assert!(!short_name.is_empty());

    let redirect = server.get(&format!("/r/{short_name}")).await;
    assert_eq!(redirect.status_code(), StatusCode::FOUND);
    assert_eq!(redirect.header("location"), "https://example.com");

    let visits = server.get("/api/link_visits").await.json::<Vec<Value>>();
    assert_eq!(visits.len(), 1);
    assert_eq!(visits[0]["link_id"], link["id"]);
}
