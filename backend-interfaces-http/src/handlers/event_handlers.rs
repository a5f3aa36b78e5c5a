use axum::extract::{Path, State};
use axum::http::HeaderMap;
use axum::Json;

use backend_application::commands::{event_commands, interest_commands};
use backend_application::queries::{attendance_queries, event_queries};
use backend_application::AppState;
use backend_domain::{AttendanceStatus, Document, EventId, EventRecord};
use backend_infrastructure::SessionIdentity;

use crate::error::HttpError;
use crate::middleware::{authorize, current_user};

pub async fn get_event(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(event_id): Path<String>,
) -> Result<Json<EventRecord>, HttpError> {
    if !authorize(&state.config, &headers) {
        return Err(HttpError::Unauthorized);
    }
    let event = event_queries::get_event(&state, &EventId::new(event_id)).await?;
    Ok(Json(event))
}

pub async fn update_event(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(event_id): Path<String>,
    Json(fields): Json<Document>,
) -> Result<Json<EventRecord>, HttpError> {
    if !authorize(&state.config, &headers) {
        return Err(HttpError::Unauthorized);
    }
    let event = event_commands::upsert_event(&state, &EventId::new(event_id), fields).await?;
    Ok(Json(event))
}

pub async fn add_interest(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(event_id): Path<String>,
) -> Result<Json<EventRecord>, HttpError> {
    set_interest(state, headers, event_id, true).await
}

pub async fn remove_interest(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(event_id): Path<String>,
) -> Result<Json<EventRecord>, HttpError> {
    set_interest(state, headers, event_id, false).await
}

async fn set_interest(
    state: AppState,
    headers: HeaderMap,
    event_id: String,
    interested: bool,
) -> Result<Json<EventRecord>, HttpError> {
    if !authorize(&state.config, &headers) {
        return Err(HttpError::Unauthorized);
    }
    let identity = SessionIdentity::new(current_user(&headers));
    let event_id = EventId::new(event_id);
    let event = interest_commands::set_interest(&state, &event_id, &identity, interested).await?;
    Ok(Json(event))
}

pub async fn get_attendance(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(event_id): Path<String>,
) -> Result<Json<AttendanceStatus>, HttpError> {
    if !authorize(&state.config, &headers) {
        return Err(HttpError::Unauthorized);
    }
    let identity = SessionIdentity::new(current_user(&headers));
    let status =
        attendance_queries::attendance_status(&state, &EventId::new(event_id), &identity).await?;
    Ok(Json(status))
}
