use axum::routing::{get, post, put};
use axum::Router;

use backend_application::AppState;

use crate::handlers::{event_handlers, feedback_handlers, ops_handlers, scan_handlers};

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/v1/scans", post(scan_handlers::submit_scan))
        .route(
            "/v1/events/:id",
            get(event_handlers::get_event).put(event_handlers::update_event),
        )
        .route(
            "/v1/events/:id/attendance",
            get(event_handlers::get_attendance),
        )
        .route(
            "/v1/events/:id/interest",
            put(event_handlers::add_interest).delete(event_handlers::remove_interest),
        )
        .route(
            "/v1/events/:id/feedback",
            post(feedback_handlers::submit_feedback),
        )
        .route("/v1/ops/health/live", get(ops_handlers::health_live))
        .route("/v1/ops/health/ready", get(ops_handlers::health_ready))
        .route(
            "/v1/ops/metrics/prometheus",
            get(ops_handlers::metrics_prometheus),
        )
        .with_state(state)
}
