use std::time::Duration;

use chrono::FixedOffset;
use tracing::{info, warn};

use backend_domain::ports::{Collection, IdentityProvider, LocationProvider};
use backend_domain::{decode_scan, EventRecord, NextStep, ScanAction, ScanOutcome};

use crate::{AppState, AttendanceRecorder, EligibilityValidator, ScanError};

/// Full scan flow: decode, validate, record. Returns one immutable outcome
/// per attempt.
pub async fn process_scan(
    state: &AppState,
    raw_payload: &str,
    location: &dyn LocationProvider,
    identity: &dyn IdentityProvider,
    utc_offset: Option<FixedOffset>,
) -> Result<ScanOutcome, ScanError> {
    state.metrics.record_scan();
    let result = run_scan(state, raw_payload, location, identity, utc_offset).await;
    match &result {
        Ok(outcome) => {
            state
                .metrics
                .record_accepted(outcome.action, outcome.attendance_confirmed());
        }
        Err(err) => {
            warn!("scan rejected ({}): {}", err.kind(), err);
            state.metrics.record_rejection(err);
        }
    }
    result
}

async fn run_scan(
    state: &AppState,
    raw_payload: &str,
    location: &dyn LocationProvider,
    identity: &dyn IdentityProvider,
    utc_offset: Option<FixedOffset>,
) -> Result<ScanOutcome, ScanError> {
    let payload = decode_scan(raw_payload)?;
    let user = identity.current_user().ok_or(ScanError::Unauthenticated)?;
    let _permit = state
        .scan_gate
        .try_acquire(&user)
        .ok_or(ScanError::ScanInProgress)?;

    let document = state
        .record_store
        .read(Collection::Meetings, payload.event_id.as_str())
        .await
        .map_err(ScanError::RecordRead)?
        .ok_or_else(|| ScanError::UnknownEvent(payload.event_id.clone()))?;
    let event = EventRecord::from_document(&document).map_err(|err| {
        ScanError::RecordRead(anyhow::anyhow!(
            "event '{}' is malformed: {}",
            payload.event_id,
            err
        ))
    })?;

    let validator = EligibilityValidator::new(
        state.clock.as_ref(),
        location,
        state.config.geofence_radius_km,
        Duration::from_millis(state.config.location_timeout_ms),
    )
    .with_utc_offset(utc_offset);
    let eligibility = validator.check(&event).await?;

    let recorder = AttendanceRecorder::new(state.record_store.as_ref());
    let recorded = recorder
        .record(&payload.event_id, &event, payload.action, &user)
        .await?;

    let next_step = match payload.action {
        ScanAction::CheckOut => NextStep::from(recorded.state),
        ScanAction::CheckIn => NextStep::None,
    };
    info!(
        "scan {} for {} by {} accepted at {:.3} km",
        payload.action, payload.event_id, user, eligibility.distance_km
    );

    Ok(ScanOutcome {
        event_id: payload.event_id,
        event_name: event.name,
        user_id: user,
        action: payload.action,
        distance_km: eligibility.distance_km,
        state: recorded.state,
        already_recorded: recorded.already_recorded,
        next_step,
    })
}
