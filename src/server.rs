//! HTTP boundary: routing, request/response types, error mapping.
//!
//! Handlers drive checkout -> scan -> aggregate. The workspace guard lives in
//! the handler scope, so the scratch directory is removed on every exit path,
//! including scan-time panics surfacing as join errors.

use crate::remote::{Cloner, RemoteError};
use crate::report::{self, ReportEntry};
use crate::rules::ScanMode;
use crate::scanner;
use axum::Router;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use axum::routing::{get, post};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{error, info};

#[derive(Clone)]
pub struct AppState {
    cloner: Arc<Cloner>,
}

impl AppState {
    pub fn new(clone_timeout_secs: u64) -> Self {
        Self {
            cloner: Arc::new(Cloner::new().with_timeout(clone_timeout_secs)),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ScanRequest {
    pub repo_url: String,
}

#[derive(Debug, Serialize)]
pub struct ScanResponse {
    pub report: Vec<ReportEntry>,
}

/// Failures surfaced to HTTP clients.
///
/// Bodies carry a short fixed reason only. Filesystem paths and subprocess
/// output never leave the tracing log.
#[derive(Debug)]
pub enum ApiError {
    Remote(RemoteError),
    Internal,
}

impl From<RemoteError> for ApiError {
    fn from(err: RemoteError) -> Self {
        ApiError::Remote(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, reason) = match &self {
            ApiError::Remote(RemoteError::InvalidUrl(_)) => {
                (StatusCode::BAD_REQUEST, "Only HTTPS GitHub URLs allowed")
            }
            ApiError::Remote(err) if err.is_client_error() => {
                (StatusCode::BAD_REQUEST, "Clone failed")
            }
            ApiError::Remote(_) | ApiError::Internal => {
                (StatusCode::INTERNAL_SERVER_ERROR, "internal error")
            }
        };

        (status, Json(serde_json::json!({ "error": reason }))).into_response()
    }
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/scan/secrets", post(scan_secrets))
        .route("/scan/code", post(scan_code))
        .with_state(state)
}

async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

async fn scan_secrets(
    State(state): State<AppState>,
    Json(req): Json<ScanRequest>,
) -> Result<Json<ScanResponse>, ApiError> {
    run_scan(&state, &req.repo_url, ScanMode::Secrets)
        .await
        .map(Json)
}

async fn scan_code(
    State(state): State<AppState>,
    Json(req): Json<ScanRequest>,
) -> Result<Json<ScanResponse>, ApiError> {
    run_scan(&state, &req.repo_url, ScanMode::DangerousCode)
        .await
        .map(Json)
}

async fn run_scan(
    state: &AppState,
    url: &str,
    mode: ScanMode,
) -> Result<ScanResponse, ApiError> {
    let workspace = state.cloner.checkout(url).await?;

    // Tree walk and matching are CPU-bound; keep them off the async runtime.
    let root = workspace.path().to_path_buf();
    let raw = tokio::task::spawn_blocking(move || scanner::scan(&root, mode))
        .await
        .map_err(|e| {
            error!(url, error = %e, "scan task failed");
            ApiError::Internal
        })?;

    let report = report::aggregate(raw);
    info!(url, ?mode, files = report.len(), "scan complete");

    Ok(ScanResponse { report })
    // `workspace` drops here: scratch directory removed on success and on
    // every `?` above that fires after checkout.
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_url_maps_to_bad_request() {
        let err = ApiError::Remote(RemoteError::InvalidUrl("ftp://bad.com/repo".to_string()));
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_clone_failure_maps_to_bad_request() {
        let err = ApiError::Remote(RemoteError::CloneFailed {
            url: "https://github.com/user/repo".to_string(),
        });
        assert_eq!(err.into_response().status(), StatusCode::BAD_REQUEST);

        let err = ApiError::Remote(RemoteError::CloneTimeout {
            url: "https://github.com/user/repo".to_string(),
            timeout_secs: 30,
        });
        assert_eq!(err.into_response().status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_host_failures_map_to_internal_error() {
        let err = ApiError::Remote(RemoteError::GitNotFound);
        assert_eq!(
            err.into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            ApiError::Internal.into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_scan_request_deserializes() {
        let req: ScanRequest =
            serde_json::from_str(r#"{"repo_url": "https://github.com/octocat/Hello-World"}"#)
                .unwrap();
        assert_eq!(req.repo_url, "https://github.com/octocat/Hello-World");
    }

    #[test]
    fn test_scan_response_shape() {
        let response = ScanResponse {
            report: vec![ReportEntry {
                file: "config.py".to_string(),
                matches: vec!["api_key = \"abc123\"".to_string()],
            }],
        };
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "report": [{ "file": "config.py", "matches": ["api_key = \"abc123\""] }]
            })
        );
    }
}
