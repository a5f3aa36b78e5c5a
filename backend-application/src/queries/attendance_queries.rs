use backend_domain::ports::{Collection, IdentityProvider};
use backend_domain::{AttendanceState, AttendanceStatus, EventId, NextStep, UserRecord};

use crate::queries::event_queries;
use crate::{AppError, AppState};

/// Where the signed-in user stands for one event, including whether the
/// feedback step is still outstanding.
pub async fn attendance_status(
    state: &AppState,
    event_id: &EventId,
    identity: &dyn IdentityProvider,
) -> Result<AttendanceStatus, AppError> {
    let user = identity.current_user().ok_or(AppError::Unauthorized)?;
    let event = event_queries::get_event(state, event_id).await?;
    let attendance = event.attendance_state(&user);

    let history_recorded = match state
        .record_store
        .read(Collection::Users, user.as_str())
        .await
        .map_err(AppError::Internal)?
    {
        Some(document) => UserRecord::from_document(&document)
            .map_err(|err| {
                AppError::Internal(anyhow::anyhow!("user '{}' is malformed: {}", user, err))
            })?
            .has_attended(event_id),
        None => false,
    };

    let feedback_submitted = state
        .record_store
        .list_evaluations(event_id.as_str())
        .await
        .map_err(AppError::Internal)?
        .iter()
        .any(|evaluation| evaluation.user_id == user.as_str());

    let next_step = if attendance == AttendanceState::AttendanceConfirmed && !feedback_submitted {
        NextStep::Feedback
    } else {
        NextStep::None
    };

    Ok(AttendanceStatus {
        event_id: event_id.clone(),
        user_id: user,
        state: attendance,
        history_recorded,
        feedback_submitted,
        next_step,
    })
}
