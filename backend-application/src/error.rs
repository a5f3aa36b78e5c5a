use chrono::NaiveDate;
use thiserror::Error;

use backend_domain::{EventId, LocationError, ScanDecodeError};

#[derive(Debug, Error)]
pub enum AppError {
    #[error("unauthorized")]
    Unauthorized,
    #[error("bad request: {0}")]
    BadRequest(String),
    #[error("not found: {0}")]
    NotFound(String),
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

/// Every way a scan attempt can be rejected. Each variant has its own
/// user-facing message and `kind` tag.
#[derive(Debug, Error)]
pub enum ScanError {
    #[error("this QR code is not a check-in or check-out code ({0})")]
    MalformedScan(#[from] ScanDecodeError),
    #[error("sign in before scanning")]
    Unauthenticated,
    #[error("a scan is already being processed for this account")]
    ScanInProgress,
    #[error("event '{0}' does not exist")]
    UnknownEvent(EventId),
    #[error("this event is scheduled for {scheduled}, not today ({today})")]
    DateIneligible { scheduled: NaiveDate, today: NaiveDate },
    #[error("could not determine your location: {0}")]
    LocationUnavailable(LocationError),
    #[error("you are {distance_km:.2} km away; scans are accepted within {radius_km:.2} km")]
    OutOfRange { distance_km: f64, radius_km: f64 },
    #[error("failed to read event record: {0}")]
    RecordRead(anyhow::Error),
    #[error("failed to record attendance: {0}")]
    RecordWrite(anyhow::Error),
}

impl ScanError {
    pub fn kind(&self) -> &'static str {
        match self {
            ScanError::MalformedScan(_) => "malformed_scan",
            ScanError::Unauthenticated => "unauthenticated",
            ScanError::ScanInProgress => "scan_in_progress",
            ScanError::UnknownEvent(_) => "unknown_event",
            ScanError::DateIneligible { .. } => "date_ineligible",
            ScanError::LocationUnavailable(_) => "location_unavailable",
            ScanError::OutOfRange { .. } => "out_of_range",
            ScanError::RecordRead(_) => "record_read_error",
            ScanError::RecordWrite(_) => "record_write_error",
        }
    }

    /// Distance to show the user alongside the rejection, if one was measured.
    pub fn distance_km(&self) -> Option<f64> {
        match self {
            ScanError::OutOfRange { distance_km, .. } => Some(*distance_km),
            _ => None,
        }
    }
}
