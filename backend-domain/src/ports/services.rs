use async_trait::async_trait;
use chrono::{DateTime, FixedOffset, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::value_objects::{GeoPoint, UserId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LocationError {
    #[error("location permission denied")]
    PermissionDenied,
    #[error("timed out waiting for a position fix")]
    Timeout,
    #[error("position unavailable")]
    PositionUnavailable,
}

#[async_trait]
pub trait LocationProvider: Send + Sync {
    async fn current_position(&self) -> Result<GeoPoint, LocationError>;
}

pub trait IdentityProvider: Send + Sync {
    fn current_user(&self) -> Option<UserId>;
}

pub trait Clock: Send + Sync {
    /// Today's calendar date in the local time zone.
    fn today(&self) -> NaiveDate;
    fn now(&self) -> DateTime<Utc>;

    /// Calendar date for a viewer at `offset` from UTC.
    fn today_at(&self, offset: FixedOffset) -> NaiveDate {
        self.now().with_timezone(&offset).date_naive()
    }
}
