use tracing::{error, info};

use backend_domain::ports::{Collection, Document, SetField};
use backend_domain::{EventId, EventRecord};

use crate::{AppError, AppState};

/// Partial-field merge into a meeting document, creating it if needed.
/// Attendance sets are owned by the scan flow and cannot be written here.
pub async fn upsert_event(
    state: &AppState,
    event_id: &EventId,
    fields: Document,
) -> Result<EventRecord, AppError> {
    if event_id.as_str().trim().is_empty() {
        return Err(AppError::BadRequest("event id must not be empty".to_string()));
    }
    if let Some(field) = fields.keys().find_map(|key| SetField::from_name(key)) {
        return Err(AppError::BadRequest(format!(
            "'{}' cannot be set directly",
            field.as_str()
        )));
    }

    let mut merged = state
        .record_store
        .read(Collection::Meetings, event_id.as_str())
        .await
        .map_err(|err| {
            error!("failed to read event {}: {}", event_id, err);
            AppError::Internal(err)
        })?
        .unwrap_or_default();
    merged.extend(fields.clone());

    let event = EventRecord::from_document(&merged)
        .map_err(|err| AppError::BadRequest(format!("invalid event '{}': {}", event_id, err)))?;
    if !event.position().is_valid() {
        return Err(AppError::BadRequest(format!(
            "event '{}' has out-of-range coordinates",
            event_id
        )));
    }

    state
        .record_store
        .merge(Collection::Meetings, event_id.as_str(), fields)
        .await
        .map_err(|err| {
            error!("failed to merge event {}: {}", event_id, err);
            AppError::Internal(err)
        })?;
    info!("event {} updated ({} on {})", event_id, event.name, event.date);
    Ok(event)
}
