use super::handlers;
use crate::clickup::ClickUpClient;
use crate::config::AppConfig;
use crate::source::TaskSource;
use crate::workload::Roster;
use anyhow::Result;
use axum::{
    routing::{get, patch, post},
    Router,
};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tracing::info;

/// Shared application state
pub struct AppState {
    /// `None` when no credential is configured; mutations then answer 400.
    pub client: Option<ClickUpClient>,
    pub source: Arc<dyn TaskSource>,
    pub roster: Roster,
}

impl AppState {
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            client: config.client(),
            source: config.task_source(),
            roster: config.roster.clone(),
        }
    }
}

pub fn router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Forwarded mutations
        .route("/api/clickup/tasks", post(handlers::create_task))
        .route(
            "/api/clickup/tasks/{task_id}",
            patch(handlers::update_task).delete(handlers::delete_task),
        )
        // Local read views
        .route("/api/tasks", get(handlers::list_tasks))
        .route("/api/workload", get(handlers::workload))
        .route("/api/statistics", get(handlers::statistics))
        .route("/api/analytics", get(handlers::analytics))
        .layer(cors)
        .with_state(state)
}

/// Start the proxy and serve until Ctrl+C.
pub async fn serve(config: &AppConfig) -> Result<()> {
    let state = Arc::new(AppState::from_config(config));
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));

    info!(
        "ClickUp token: {}",
        if state.client.is_some() { "SET" } else { "NOT SET" }
    );
    info!("Task data: {}", state.source.describe());

    let listener = TcpListener::bind(addr).await?;
    info!("Proxy listening on http://localhost:{}", config.port);

    axum::serve(listener, router(state))
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            info!("Shutting down proxy");
        })
        .await?;

    Ok(())
}
