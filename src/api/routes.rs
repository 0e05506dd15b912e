//! HTTP route handlers.

use std::sync::Arc;

use axum::{
    extract::State,
    response::Json,
    routing::{get, post},
    Router,
};
use chrono::{DateTime, Utc};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::agents::{Agent, BOARD};
use crate::config::Config;
use crate::debate::{ModelChain, Orchestrator};
use crate::llm::{LlmClient, OpenAiCompatClient};

use super::debate;
use super::types::HealthResponse;

/// Shared application state.
pub struct AppState {
    pub orchestrator: Orchestrator,
    pub started_at: DateTime<Utc>,
}

impl AppState {
    pub fn new(config: Config, client: Arc<dyn LlmClient>) -> Self {
        let chain = ModelChain::new(client, config.models.clone(), config.generation.clone());
        Self {
            orchestrator: Orchestrator::new(chain),
            started_at: Utc::now(),
        }
    }
}

/// Build the application router.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/health", get(health))
        .route("/api/agents", get(list_agents))
        .route("/api/debate", post(debate::post_debate))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Start the HTTP server.
pub async fn serve(config: Config) -> anyhow::Result<()> {
    let client: Arc<dyn LlmClient> = Arc::new(OpenAiCompatClient::new(
        config.base_url.clone(),
        config.api_key.clone(),
    ));
    let addr = config.bind_addr();
    let state = Arc::new(AppState::new(config, client));
    let app = router(state);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

/// Wait for SIGINT or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::warn!("Failed to listen for Ctrl+C: {}", e);
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
                tracing::warn!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}

async fn health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        models: state.orchestrator.chain().models().to_vec(),
        started_at: state.started_at.to_rfc3339(),
    })
}

/// The board, in speaking order.
async fn list_agents() -> Json<Vec<&'static Agent>> {
    Json(BOARD.iter().collect())
}
