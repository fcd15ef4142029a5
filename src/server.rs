//! HTTP server initialization and runtime setup.
//!
//! Builds the store, wires the services and runs the Axum server until a
//! shutdown signal arrives.

use crate::config::{Config, StorageBackend};
use crate::domain::repositories::{LinkRepository, VisitRepository};
use crate::infrastructure::persistence::{InMemoryStore, PgLinkRepository, PgVisitRepository};
use crate::routes::app_router;
use crate::state::AppState;

use anyhow::{Context, Result};
use axum::ServiceExt;
use axum::extract::Request;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tower::Layer;
use tower_http::normalize_path::NormalizePathLayer;

const STARTUP_PING_TIMEOUT: Duration = Duration::from_secs(10);

/// Opens the PostgreSQL pool, checks it answers and applies migrations.
///
/// # Errors
///
/// Returns an error if the database is unreachable within
/// [`STARTUP_PING_TIMEOUT`] or a migration fails.
pub async fn connect_database(config: &Config) -> Result<PgPool> {
    let pool = PgPoolOptions::new()
        .max_connections(config.db_max_connections)
        .acquire_timeout(Duration::from_secs(config.db_connect_timeout))
        .idle_timeout(Duration::from_secs(config.db_idle_timeout))
        .max_lifetime(Duration::from_secs(config.db_max_lifetime))
        .connect(&config.database_url)
        .await
        .context("Failed to connect to database")?;

    tokio::time::timeout(STARTUP_PING_TIMEOUT, sqlx::query("SELECT 1").execute(&pool))
        .await
        .context("Database ping timed out")?
        .context("Database ping failed")?;
    tracing::info!("Connected to database");

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .context("Failed to apply migrations")?;
    tracing::info!("Migrations applied");

    Ok(pool)
}

/// Builds the repositories for the configured backend.
async fn build_repositories(
    config: &Config,
) -> Result<(Arc<dyn LinkRepository>, Arc<dyn VisitRepository>)> {
    match config.storage_backend {
        StorageBackend::Postgres => {
            let pool = Arc::new(connect_database(config).await?);
            let links: Arc<dyn LinkRepository> = Arc::new(PgLinkRepository::new(Arc::clone(&pool)));
            let visits: Arc<dyn VisitRepository> = Arc::new(PgVisitRepository::new(pool));
            Ok((links, visits))
        }
        StorageBackend::Memory => {
            tracing::warn!("Using in-memory storage; data is lost on shutdown");
            let store = Arc::new(InMemoryStore::new());
            let links: Arc<dyn LinkRepository> = store.clone();
            let visits: Arc<dyn VisitRepository> = store;
            Ok((links, visits))
        }
    }
}

/// Runs the HTTP server with the given configuration.
///
/// # Errors
///
/// Returns an error if:
/// - The store cannot be initialized
/// - The listen address is invalid or cannot be bound
/// - The server fails at runtime
pub async fn run(config: &Config) -> Result<()> {
    let (links, visits) = build_repositories(config).await?;
    let state = AppState::new(links, visits, config.store_timeout(), config.behind_proxy);

    let app = NormalizePathLayer::trim_trailing_slash()
        .layer(app_router(state, &config.cors_allowed_origins));

    let addr: SocketAddr = config
        .listen_addr
        .parse()
        .with_context(|| format!("Invalid listen address '{}'", config.listen_addr))?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on http://{addr}");

    axum::serve(
        listener,
        ServiceExt::<Request>::into_make_service_with_connect_info::<SocketAddr>(app),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    tracing::info!("Server stopped");
    Ok(())
}

/// Resolves on Ctrl-C or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("Shutdown signal received, draining connections");
}
