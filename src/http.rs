//! HTTP surface for the prediction and chat engines.
//!
//! `POST /api/predict` classifies a URL via the external classifier;
//! `POST /api/chat` answers phishing-domain questions from the rule table.
//! Classifier diagnostics stay in the logs; callers only see the classified
//! error category.

use std::sync::Arc;

use axum::extract::State;
use axum::http::{HeaderValue, StatusCode};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Deserialize;
use tower_http::cors::{Any, CorsLayer};
use tracing::warn;

use crate::chat::Dispatcher;
use crate::error::PredictError;
use crate::predict::{PredictionRequest, Predictor};

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub predictor: Arc<Predictor>,
    pub dispatcher: Arc<Dispatcher>,
}

#[derive(Debug, Deserialize)]
struct ChatRequest {
    #[serde(default)]
    message: String,
}

/// Build the router. `allowed_origin` of `*` opens CORS to any origin.
pub fn api_routes(state: AppState, allowed_origin: &str) -> Router {
    let cors = if allowed_origin == "*" {
        CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any)
    } else {
        match allowed_origin.parse::<HeaderValue>() {
            Ok(origin) => CorsLayer::new()
                .allow_origin(origin)
                .allow_methods(Any)
                .allow_headers(Any),
            Err(_) => {
                warn!(origin = %allowed_origin, "Invalid CORS origin, denying cross-origin requests");
                CorsLayer::new()
            }
        }
    };

    Router::new()
        .route("/health", get(health))
        .route("/api/predict", post(predict))
        .route("/api/chat", post(chat))
        .layer(cors)
        .with_state(state)
}

async fn health() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "service": "phishguard"
    }))
}

/// POST /api/predict
///
/// Returns the classified verdict, or an error whose body deliberately
/// carries no classifier diagnostics.
async fn predict(
    State(state): State<AppState>,
    Json(request): Json<PredictionRequest>,
) -> impl IntoResponse {
    match state.predictor.predict(request).await {
        Ok(result) => (StatusCode::OK, Json(serde_json::json!(result))),
        Err(PredictError::InvalidInput) => (
            StatusCode::BAD_REQUEST,
            Json(serde_json::json!({"error": "URL is required."})),
        ),
        Err(PredictError::PredictionFailed) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(serde_json::json!({"error": "Prediction failed."})),
        ),
        Err(PredictError::MalformedOutput(_)) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(serde_json::json!({"error": "Invalid prediction output."})),
        ),
    }
}

/// POST /api/chat
///
/// Total: always 200 with a reply.
async fn chat(
    State(state): State<AppState>,
    Json(request): Json<ChatRequest>,
) -> impl IntoResponse {
    Json(state.dispatcher.dispatch(&request.message))
}
