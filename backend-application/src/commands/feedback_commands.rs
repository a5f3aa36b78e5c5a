use tracing::{error, info, warn};
use uuid::Uuid;

use backend_domain::ports::{Collection, IdentityProvider};
use backend_domain::{
    AttendanceState, EventId, EventRecord, Evaluation, FeedbackSubmission, MAX_RATING, MIN_RATING,
    RATING_QUESTIONS,
};

use crate::{AppError, AppState, AttendanceRecorder};

/// Stores the post-event evaluation. Only users whose attendance is confirmed
/// may submit, once per event.
pub async fn submit_feedback(
    state: &AppState,
    event_id: &EventId,
    identity: &dyn IdentityProvider,
    submission: FeedbackSubmission,
) -> Result<Evaluation, AppError> {
    let user = identity.current_user().ok_or(AppError::Unauthorized)?;
    let submission = submission.normalized();
    validate_ratings(&submission.ratings)?;

    let document = state
        .record_store
        .read(Collection::Meetings, event_id.as_str())
        .await
        .map_err(|err| {
            error!("failed to read event {}: {}", event_id, err);
            AppError::Internal(err)
        })?
        .ok_or_else(|| AppError::NotFound(format!("event '{}'", event_id)))?;
    let event = EventRecord::from_document(&document).map_err(|err| {
        AppError::Internal(anyhow::anyhow!("event '{}' is malformed: {}", event_id, err))
    })?;

    if event.attendance_state(&user) != AttendanceState::AttendanceConfirmed {
        return Err(AppError::BadRequest(format!(
            "attendance at '{}' is not confirmed",
            event_id
        )));
    }

    let existing = state
        .record_store
        .list_evaluations(event_id.as_str())
        .await
        .map_err(AppError::Internal)?;
    if existing.iter().any(|evaluation| evaluation.user_id == user.as_str()) {
        return Err(AppError::BadRequest(format!(
            "feedback for '{}' was already submitted",
            event_id
        )));
    }

    // Attendee membership proves confirmation, so finishing the user-side
    // half of the pair is safe if an earlier scan stopped short of it.
    let recorder = AttendanceRecorder::new(state.record_store.as_ref());
    if let Err(err) = recorder.record_history(event_id, &user).await {
        warn!(
            "could not add {} to the history of user {}: {}",
            event_id, user, err
        );
    }

    let evaluation = Evaluation {
        id: Uuid::new_v4().to_string(),
        user_id: user.as_str().to_string(),
        name: submission.name,
        course: submission.course,
        ratings: submission.ratings,
        best_features: submission.best_features,
        suggestions: submission.suggestions,
        other_comments: submission.other_comments,
        core_values: submission.core_values,
        submitted_at: state.clock.now(),
    };
    state
        .record_store
        .add_evaluation(event_id.as_str(), &evaluation)
        .await
        .map_err(|err| {
            error!("failed to store evaluation for {}: {}", event_id, err);
            AppError::Internal(err)
        })?;

    state.metrics.record_feedback();
    info!("feedback for {} received from user {}", event_id, user);
    Ok(evaluation)
}

fn validate_ratings(ratings: &[Option<u8>]) -> Result<(), AppError> {
    if ratings.len() != RATING_QUESTIONS {
        return Err(AppError::BadRequest(format!(
            "expected {} ratings, got {}",
            RATING_QUESTIONS,
            ratings.len()
        )));
    }
    for (idx, rating) in ratings.iter().enumerate() {
        if let Some(value) = rating {
            if !(MIN_RATING..=MAX_RATING).contains(value) {
                return Err(AppError::BadRequest(format!(
                    "rating {} must be between {} and {}",
                    idx + 1,
                    MIN_RATING,
                    MAX_RATING
                )));
            }
        }
    }
    Ok(())
}
