use std::sync::Arc;

use anyhow::{Context, Result};
use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use tower_http::cors::{Any, CorsLayer};
use tracing::{info, warn};

use crate::handler::SkillHandler;

/// Builds the application router: `POST /skill` answers platform requests,
/// `GET /health` answers load balancers.
pub fn router(handler: Arc<SkillHandler>) -> Router {
    // Permissive CORS so a browser-based simulator can call the skill directly.
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/skill", post(skill))
        .route("/health", get(health))
        .layer(cors)
        .with_state(handler)
}

async fn skill(
    State(handler): State<Arc<SkillHandler>>,
    Json(body): Json<serde_json::Value>,
) -> Response {
    match handler.handle_value(body).await {
        Ok(response) => Json(response).into_response(),
        Err(err) => {
            warn!(error = %err, "rejecting request");
            (StatusCode::FORBIDDEN, err.to_string()).into_response()
        }
    }
}

async fn health() -> &'static str {
    "ok"
}

/// Binds `address` and serves until the process is stopped.
pub async fn serve(address: std::net::SocketAddr, handler: Arc<SkillHandler>) -> Result<()> {
    let listener = tokio::net::TcpListener::bind(address)
        .await
        .with_context(|| format!("Failed to bind {address}"))?;
    info!("Skill server listening on {}", address);

    axum::serve(listener, router(handler))
        .await
        .context("Server stopped unexpectedly")?;
    Ok(())
}
