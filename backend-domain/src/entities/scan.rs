// Scan request and outcome

use chrono::FixedOffset;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::ports::LocationError;
use crate::value_objects::{AttendanceState, EventId, GeoPoint, NextStep, ScanAction, UserId};

/// A scan attempt as reported by the device: the decoded QR text plus either
/// the position fix or the reason the device could not produce one.
#[derive(Debug, Clone, Deserialize)]
pub struct ScanRequest {
    pub payload: String,
    #[serde(default)]
    pub position: Option<GeoPoint>,
    #[serde(default)]
    pub location_error: Option<LocationError>,
    /// Device's offset from UTC in minutes (480 for UTC+8). Dates are
    /// compared in the device's calendar when present.
    #[serde(default)]
    pub utc_offset_minutes: Option<i32>,
}

pub const MAX_UTC_OFFSET_MINUTES: i32 = 14 * 60;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("utc offset of {0} minutes is outside +/-14 hours")]
pub struct InvalidUtcOffset(pub i32);

impl ScanRequest {
    pub fn utc_offset(&self) -> Result<Option<FixedOffset>, InvalidUtcOffset> {
        let Some(minutes) = self.utc_offset_minutes else {
            return Ok(None);
        };
        if minutes.abs() > MAX_UTC_OFFSET_MINUTES {
            return Err(InvalidUtcOffset(minutes));
        }
        FixedOffset::east_opt(minutes * 60)
            .map(Some)
            .ok_or(InvalidUtcOffset(minutes))
    }
}

/// Result of one successful scan attempt. Built once per attempt and handed
/// to the caller; nothing about it is retained between scans.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScanOutcome {
    pub event_id: EventId,
    pub event_name: String,
    pub user_id: UserId,
    pub action: ScanAction,
    pub distance_km: f64,
    pub state: AttendanceState,
    pub already_recorded: bool,
    pub next_step: NextStep,
}

impl ScanOutcome {
    pub fn attendance_confirmed(&self) -> bool {
        self.state == AttendanceState::AttendanceConfirmed
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AttendanceStatus {
    pub event_id: EventId,
    pub user_id: UserId,
    pub state: AttendanceState,
    /// Whether the event is in the user's `eventsAttended`. False alongside a
    /// confirmed state means the second confirmation write is still missing.
    pub history_recorded: bool,
    pub feedback_submitted: bool,
    pub next_step: NextStep,
}
