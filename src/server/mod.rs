// file: src/server/mod.rs
// description: HTTP surface exposing the agent over axum
// reference: https://docs.rs/axum

pub mod page;
pub mod routes;

use crate::agent::AgentAdapter;
use crate::error::{AgentError, Result};
use crate::mcp::ToolRegistry;
use axum::Router;
use axum::routing::get;
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

/// Everything handlers share. Read-only after startup.
pub struct AppState {
    pub agent_name: String,
    pub adapter: AgentAdapter,
    pub tools: ToolRegistry,
}

impl AppState {
    pub fn new(agent_name: impl Into<String>, adapter: AgentAdapter, tools: ToolRegistry) -> Self {
        Self {
            agent_name: agent_name.into(),
            adapter,
            tools,
        }
    }
}

pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(routes::index))
        .route("/review_code", get(routes::review_code))
        .route("/analyze_sentry", get(routes::analyze_sentry))
        .route("/health", get(routes::health))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub async fn serve(bind_addr: &str, state: Arc<AppState>) -> Result<()> {
    let listener = tokio::net::TcpListener::bind(bind_addr)
        .await
        .map_err(|e| AgentError::HttpServer(format!("Failed to bind {}: {}", bind_addr, e)))?;

    let local_addr = listener
        .local_addr()
        .map_err(|e| AgentError::HttpServer(format!("Failed to get local addr: {}", e)))?;

    info!("Listening on http://{}", local_addr);

    axum::serve(listener, build_router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| AgentError::HttpServer(format!("Server error: {}", e)))?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown requested");
}
