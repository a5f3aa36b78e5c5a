use axum::extract::State;
use axum::http::{header, HeaderMap, HeaderValue, StatusCode};
use axum::response::IntoResponse;
use axum::Json;
use serde::Serialize;
use tokio::time::{timeout, Duration};
use tracing::error;

use backend_application::AppState;

use crate::middleware::authorize;

#[derive(Debug, Serialize)]
pub struct Readiness {
    pub ready: bool,
    pub record_store: String,
    pub scans_in_flight: usize,
}

pub async fn health_live() -> StatusCode {
    StatusCode::OK
}

/// Ready while the record store accepts writes; the body says why not.
pub async fn health_ready(State(state): State<AppState>) -> (StatusCode, Json<Readiness>) {
    let timeout_secs = state.config.request_timeout_seconds.max(1);
    let timeout_duration = Duration::from_secs(timeout_secs);
    let record_store = match timeout(timeout_duration, state.record_store.ping()).await {
        Ok(Ok(())) => Ok(()),
        Ok(Err(err)) => {
            error!("ready check failed: {}", err);
            Err(err.to_string())
        }
        Err(_) => {
            error!("ready check timeout after {}s", timeout_secs);
            Err(format!("no answer within {}s", timeout_secs))
        }
    };
    let status = if record_store.is_ok() {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };
    let body = Readiness {
        ready: record_store.is_ok(),
        record_store: record_store.err().unwrap_or_else(|| "writable".to_string()),
        scans_in_flight: state.scan_gate.in_flight(),
    };
    (status, Json(body))
}

pub async fn metrics_prometheus(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> impl IntoResponse {
    if !authorize(&state.config, &headers) {
        return (StatusCode::UNAUTHORIZED, "unauthorized".to_string()).into_response();
    }
    let payload = state.metrics.render_prometheus();
    let mut headers = HeaderMap::new();
    headers.insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static("text/plain; version=0.0.4; charset=utf-8"),
    );
    (headers, payload).into_response()
}
