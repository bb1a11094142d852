//! HTTP surface of the analyzer: `POST /analyze` and `GET /analyze/health`.

use anyhow::Context;
use axum::Json;
use axum::Router;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use serde::Serialize;
use std::sync::Arc;

use crate::diagnoser;
use crate::error::AnalyzeError;
use crate::models::Diagnosis;
use crate::pipeline::Analyzer;

#[derive(Clone)]
struct AppState {
    analyzer: Arc<Analyzer>,
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: &'static str,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    diagnosis: Option<Diagnosis>,
}

pub fn router(analyzer: Arc<Analyzer>) -> Router {
    Router::new()
        .route("/analyze", post(analyze_handler))
        .route("/analyze/health", get(health_handler))
        .with_state(AppState { analyzer })
}

/// Binds and serves until the process is stopped.
pub async fn serve(host: &str, port: u16, analyzer: Arc<Analyzer>) -> anyhow::Result<()> {
    let app = router(analyzer);
    let listener = tokio::net::TcpListener::bind((host, port))
        .await
        .with_context(|| format!("failed to bind {host}:{port}"))?;

    tracing::info!(addr = %listener.local_addr()?, "analyze service listening");

    axum::serve(listener, app).await?;
    Ok(())
}

async fn health_handler() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "ok",
        "service": "analyze",
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}

async fn analyze_handler(
    State(state): State<AppState>,
    Json(body): Json<serde_json::Value>,
) -> Response {
    let Some(url) = body.get("url").and_then(|v| v.as_str()) else {
        return error_response(
            StatusCode::BAD_REQUEST,
            "INVALID_URL",
            "request body must contain a string 'url' field".to_string(),
            None,
        );
    };

    match state.analyzer.analyze(url).await {
        Ok(report) => (StatusCode::OK, Json(report)).into_response(),
        Err(AnalyzeError::Validation(message)) => {
            error_response(StatusCode::BAD_REQUEST, "INVALID_URL", message, None)
        }
        Err(AnalyzeError::Fetch(message)) => {
            tracing::warn!(url, error = %message, "fetch failed");
            error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                "FETCH_FAILED",
                message,
                Some(diagnoser::fetch_failed_diagnosis()),
            )
        }
        Err(AnalyzeError::Analysis(message)) => {
            tracing::error!(url, error = %message, "analysis failed");
            error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                "ANALYSIS_ERROR",
                "an unexpected error occurred while analyzing the page".to_string(),
                Some(diagnoser::analysis_error_diagnosis()),
            )
        }
    }
}

fn error_response(
    status: StatusCode,
    error: &'static str,
    message: String,
    diagnosis: Option<Diagnosis>,
) -> Response {
    (
        status,
        Json(ErrorBody {
            error,
            message,
            diagnosis,
        }),
    )
        .into_response()
}
