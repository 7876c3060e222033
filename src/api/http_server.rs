//! HTTP server
//!
//! One question-answering endpoint plus a health check. Generation failures
//! arrive as sentinel answer strings inside 200 responses; only input
//! validation and retrieval failures produce error statuses.

use axum::{
    extract::{Json, State},
    response::IntoResponse,
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

use super::errors::ApiErrorResponse;
use crate::engine::RagEngine;

#[derive(Clone)]
struct AppState {
    engine: Arc<RagEngine>,
}

/// Request body for POST /ask
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AskRequest {
    pub query: String,
}

/// Response body for POST /ask
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AskResponse {
    pub question: String,
    pub answer: String,
}

/// Build the router for the query service
pub fn build_router(engine: Arc<RagEngine>) -> Router {
    let state = AppState { engine };

    Router::new()
        .route("/ask", post(ask_handler))
        .route("/health", get(health_handler))
        .layer(TraceLayer::new_for_http())
        .layer(
            // TODO: restrict allow_origin to the frontend domain in production
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}

/// Serve the API until the process is stopped
pub async fn start_server(engine: Arc<RagEngine>, port: u16) -> anyhow::Result<()> {
    let app = build_router(engine);

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = tokio::net::TcpListener::bind(addr).await?;

    info!("API server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}

async fn ask_handler(
    State(state): State<AppState>,
    Json(request): Json<AskRequest>,
) -> impl IntoResponse {
    match state.engine.answer(&request.query).await {
        Ok(answer) => axum::response::Json(AskResponse {
            question: request.query,
            answer,
        })
        .into_response(),
        Err(e) => ApiErrorResponse(e).into_response(),
    }
}

async fn health_handler() -> impl IntoResponse {
    axum::response::Json(json!({ "status": "healthy" }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ask_request_deserialization() {
        let request: AskRequest =
            serde_json::from_str(r#"{"query": "What does the policy cover?"}"#).unwrap();
        assert_eq!(request.query, "What does the policy cover?");
    }

    #[test]
    fn test_ask_response_serialization() {
        let response = AskResponse {
            question: "What does the policy cover?".to_string(),
            answer: "Fire damage.".to_string(),
        };
        let json = serde_json::to_string(&response).unwrap();
        assert!(json.contains("\"question\""));
        assert!(json.contains("\"answer\""));
        assert!(json.contains("Fire damage."));
    }
}
