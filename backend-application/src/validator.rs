use std::time::Duration;

use chrono::FixedOffset;
use tokio::time::timeout;
use tracing::{debug, warn};

use backend_domain::ports::{Clock, LocationError, LocationProvider};
use backend_domain::{is_scheduled_on, EventRecord, GeoPoint, GeofenceCheck};

use crate::ScanError;

/// A scan that passed every eligibility check.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Eligibility {
    pub position: GeoPoint,
    pub distance_km: f64,
}

/// Read-only checks run on every scan: calendar date, then geofence.
pub struct EligibilityValidator<'a> {
    clock: &'a dyn Clock,
    location: &'a dyn LocationProvider,
    radius_km: f64,
    location_timeout: Duration,
    utc_offset: Option<FixedOffset>,
}

impl<'a> EligibilityValidator<'a> {
    pub fn new(
        clock: &'a dyn Clock,
        location: &'a dyn LocationProvider,
        radius_km: f64,
        location_timeout: Duration,
    ) -> Self {
        Self {
            clock,
            location,
            radius_km,
            location_timeout,
            utc_offset: None,
        }
    }

    /// Compare dates in the scanning device's calendar instead of the
    /// server's.
    pub fn with_utc_offset(mut self, offset: Option<FixedOffset>) -> Self {
        self.utc_offset = offset;
        self
    }

    pub async fn check(&self, event: &EventRecord) -> Result<Eligibility, ScanError> {
        let today = match self.utc_offset {
            Some(offset) => self.clock.today_at(offset),
            None => self.clock.today(),
        };
        if !is_scheduled_on(event.date, today) {
            return Err(ScanError::DateIneligible {
                scheduled: event.date,
                today,
            });
        }

        let position = self.locate().await?;
        let check = GeofenceCheck::measure(position, event.position(), self.radius_km);
        debug!(
            "device is {:.3} km from venue (radius {:.3} km)",
            check.distance_km, check.radius_km
        );
        if !check.within() {
            return Err(ScanError::OutOfRange {
                distance_km: check.distance_km,
                radius_km: check.radius_km,
            });
        }

        Ok(Eligibility {
            position,
            distance_km: check.distance_km,
        })
    }

    async fn locate(&self) -> Result<GeoPoint, ScanError> {
        let position = match timeout(self.location_timeout, self.location.current_position()).await
        {
            Ok(result) => result,
            Err(_) => Err(LocationError::Timeout),
        }
        .map_err(ScanError::LocationUnavailable)?;

        if !position.is_valid() {
            warn!(
                "location provider returned invalid coordinates ({}, {})",
                position.latitude, position.longitude
            );
            return Err(ScanError::LocationUnavailable(
                LocationError::PositionUnavailable,
            ));
        }
        Ok(position)
    }
}
