#![allow(dead_code)]

use axum::extract::ConnectInfo;
use axum_test::TestServer;
use link_shortener::infrastructure::persistence::InMemoryStore;
use link_shortener::routes::app_router;
use link_shortener::state::AppState;
use serde_json::{Value, json};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tower::Layer;

pub const PEER_ADDR: &str = "127.0.0.1:12345";

/// Injects a fixed peer address, standing in for `into_make_service_with_connect_info`.
#[derive(Clone)]
pub struct MockConnectInfoLayer;

impl<S> Layer<S> for MockConnectInfoLayer {
    type Service = MockConnectInfoService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        MockConnectInfoService { inner }
    }
}

#[derive(Clone)]
pub struct MockConnectInfoService<S> {
    inner: S,
}

impl<S, B> tower::Service<axum::http::Request<B>> for MockConnectInfoService<S>
where
    S: tower::Service<axum::http::Request<B>> + Clone + Send + 'static,
    S::Future: Send + 'static,
    B: Send + 'static,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = S::Future;

    fn poll_ready(
        &mut self,
        cx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, mut req: axum::http::Request<B>) -> Self::Future {
        let addr: SocketAddr = PEER_ADDR.parse().unwrap();
        req.extensions_mut().insert(ConnectInfo(addr));
        self.inner.call(req)
    }
}

pub fn create_test_state(store: Arc<InMemoryStore>, behind_proxy: bool) -> AppState {
    AppState::new(
        store.clone(),
        store,
        Duration::from_secs(5),
        behind_proxy,
    )
}

/// Full application over a fresh in-memory store.
pub fn make_server() -> TestServer {
    make_server_with(Arc::new(InMemoryStore::new()), false)
}

pub fn make_server_with(store: Arc<InMemoryStore>, behind_proxy: bool) -> TestServer {
    let state = create_test_state(store, behind_proxy);
    let app = app_router(state, &["http://localhost:3000".to_string()]).layer(MockConnectInfoLayer);
    TestServer::new(app).unwrap()
}

/// Creates a link through the API and returns the response body.
pub async fn create_link(server: &TestServer, original_url: &str, short_name: Option<&str>) -> Value {
    let mut body = json!({ "original_url": original_url });
    if let Some(short_name) = short_name {
        body["short_name"] = json!(short_name);
    }

    let response = server.post("/api/links").json(&body).await;
    response.assert_status(axum::http::StatusCode::CREATED);
    response.json::<Value>()
}
