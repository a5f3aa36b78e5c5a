use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::Json;

use backend_application::commands::feedback_commands;
use backend_application::AppState;
use backend_domain::{EventId, Evaluation, FeedbackSubmission};
use backend_infrastructure::SessionIdentity;

use crate::error::HttpError;
use crate::middleware::{authorize, current_user};

pub async fn submit_feedback(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(event_id): Path<String>,
    Json(submission): Json<FeedbackSubmission>,
) -> Result<(StatusCode, Json<Evaluation>), HttpError> {
    if !authorize(&state.config, &headers) {
        return Err(HttpError::Unauthorized);
    }
    let identity = SessionIdentity::new(current_user(&headers));
    let evaluation = feedback_commands::submit_feedback(
        &state,
        &EventId::new(event_id),
        &identity,
        submission,
    )
    .await?;
    Ok((StatusCode::CREATED, Json(evaluation)))
}
