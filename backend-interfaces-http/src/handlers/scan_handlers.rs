use axum::extract::State;
use axum::http::HeaderMap;
use axum::Json;

use backend_application::commands::scan_commands;
use backend_application::AppState;
use backend_domain::{ScanOutcome, ScanRequest};
use backend_infrastructure::{ReportedLocation, SessionIdentity};

use crate::error::HttpError;
use crate::middleware::{authorize, current_user};

pub async fn submit_scan(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(request): Json<ScanRequest>,
) -> Result<Json<ScanOutcome>, HttpError> {
    if !authorize(&state.config, &headers) {
        return Err(HttpError::Unauthorized);
    }
    let utc_offset = request
        .utc_offset()
        .map_err(|err| HttpError::BadRequest(err.to_string()))?;
    let identity = SessionIdentity::new(current_user(&headers));
    let location = ReportedLocation::from_request(&request);
    let outcome = scan_commands::process_scan(
        &state,
        &request.payload,
        &location,
        &identity,
        utc_offset,
    )
    .await?;
    Ok(Json(outcome))
}
