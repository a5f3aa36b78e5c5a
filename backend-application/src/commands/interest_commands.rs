use tracing::{error, info};

use backend_domain::ports::{IdentityProvider, SetField};
use backend_domain::{EventId, EventRecord};

use crate::queries::event_queries;
use crate::{AppError, AppState};

/// Marks or clears the signed-in user's interest in an event and returns the
/// updated record. Repeating either call leaves the set unchanged.
pub async fn set_interest(
    state: &AppState,
    event_id: &EventId,
    identity: &dyn IdentityProvider,
    interested: bool,
) -> Result<EventRecord, AppError> {
    let user = identity.current_user().ok_or(AppError::Unauthorized)?;
    event_queries::get_event(state, event_id).await?;

    let field = SetField::InterestedUsers;
    let written = if interested {
        state
            .record_store
            .array_union(event_id.as_str(), field, user.as_str())
            .await
    } else {
        state
            .record_store
            .array_remove(event_id.as_str(), field, user.as_str())
            .await
    };
    written.map_err(|err| {
        error!("failed to update interest of {} in {}: {}", user, event_id, err);
        AppError::Internal(err)
    })?;

    info!("user {} interested in {}: {}", user, event_id, interested);
    event_queries::get_event(state, event_id).await
}
