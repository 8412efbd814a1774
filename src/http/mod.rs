use std::time::Duration;

use axum::Json;
use axum::Router;
use axum::extract::State;
use axum::http::Method;
use axum::http::StatusCode;
use axum::http::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use serde::Serialize;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::state::AppState;
use crate::store::{StoreBackend, StoreError};

mod tributes;

pub fn router(state: AppState) -> Router {
    assert!(
        state.start_time.elapsed() < Duration::from_secs(86_400),
        "Application uptime exceeds 24 hours before router creation"
    );

    // The memory tree page is served from a different origin.
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([ACCEPT, AUTHORIZATION, CONTENT_TYPE])
        .max_age(Duration::from_secs(3600));

    let tributes_router = tributes::router().with_state(state.clone());
    Router::new()
        .route("/health", get(health_live))
        .route("/health/ready", get(health_ready))
        .merge(tributes_router)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

async fn health_live(State(state): State<AppState>) -> Result<Json<HealthResponse>, HttpError> {
    let uptime = state.start_time.elapsed().as_secs();
    assert!(
        uptime <= 31_536_000,
        "Uptime exceeds one year without restart"
    );
    let response = HealthResponse {
        status: "live",
        uptime_seconds: uptime,
    };
    Ok(Json(response))
}

async fn health_ready(State(state): State<AppState>) -> Result<Json<ReadyResponse>, HttpError> {
    state
        .store
        .ping()
        .await
        .map_err(|err| HttpError::new(StatusCode::SERVICE_UNAVAILABLE, err.to_string()))?;

    let response = ReadyResponse {
        status: "ready",
        backend: state.store.backend(),
    };
    Ok(Json(response))
}

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: &'static str,
    uptime_seconds: u64,
}

#[derive(Debug, Serialize)]
struct ReadyResponse {
    status: &'static str,
    backend: StoreBackend,
}

#[derive(Debug)]
pub struct HttpError {
    status: StatusCode,
    message: String,
}

impl HttpError {
    pub fn new(status: StatusCode, message: String) -> Self {
        assert!(status != StatusCode::OK, "Error status cannot be 200");
        assert!(!message.is_empty(), "Error message cannot be empty");
        Self { status, message }
    }
}

impl From<StoreError> for HttpError {
    fn from(err: StoreError) -> Self {
        let status = match &err {
            StoreError::Validation(_) => StatusCode::BAD_REQUEST,
            StoreError::ContentRejected => StatusCode::UNPROCESSABLE_ENTITY,
            StoreError::RateLimited => StatusCode::TOO_MANY_REQUESTS,
            StoreError::Backend(_) => StatusCode::BAD_GATEWAY,
        };
        Self::new(status, err.to_string())
    }
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        info!("HTTP error: {}", self.message);
        let body = Json(ErrorBody {
            error: self.message,
        });
        (self.status, body).into_response()
    }
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::anyhow;

    #[test]
    fn store_errors_map_to_distinct_statuses() {
        let cases = [
            (
                StoreError::Validation("Name and message are required".to_string()),
                StatusCode::BAD_REQUEST,
            ),
            (StoreError::ContentRejected, StatusCode::UNPROCESSABLE_ENTITY),
            (StoreError::RateLimited, StatusCode::TOO_MANY_REQUESTS),
            (
                StoreError::Backend(anyhow!("connection refused")),
                StatusCode::BAD_GATEWAY,
            ),
        ];
        for (err, expected) in cases {
            let http_err = HttpError::from(err);
            assert_eq!(http_err.status, expected);
            assert!(!http_err.message.is_empty());
        }
    }
}
