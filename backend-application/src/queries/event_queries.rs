use tracing::error;

use backend_domain::ports::Collection;
use backend_domain::{EventId, EventRecord};

use crate::{AppError, AppState};

pub async fn get_event(state: &AppState, event_id: &EventId) -> Result<EventRecord, AppError> {
    let document = state
        .record_store
        .read(Collection::Meetings, event_id.as_str())
        .await
        .map_err(|err| {
            error!("failed to fetch event {}: {}", event_id, err);
            AppError::Internal(err)
        })?
        .ok_or_else(|| AppError::NotFound(format!("event '{}'", event_id)))?;
    EventRecord::from_document(&document).map_err(|err| {
        AppError::Internal(anyhow::anyhow!("event '{}' is malformed: {}", event_id, err))
    })
}
