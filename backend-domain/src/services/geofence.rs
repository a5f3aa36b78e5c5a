use chrono::NaiveDate;

use crate::value_objects::GeoPoint;

pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Great-circle distance in kilometres.
pub fn haversine_km(a: GeoPoint, b: GeoPoint) -> f64 {
    let lat1 = a.latitude.to_radians();
    let lat2 = b.latitude.to_radians();
    let d_lat = (b.latitude - a.latitude).to_radians();
    let d_lon = (b.longitude - a.longitude).to_radians();

    let h = (d_lat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (d_lon / 2.0).sin().powi(2);
    // rounding can push near-antipodal points just past 1
    let h = h.clamp(0.0, 1.0);
    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());
    EARTH_RADIUS_KM * c
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeofenceCheck {
    pub distance_km: f64,
    pub radius_km: f64,
}

impl GeofenceCheck {
    pub fn measure(device: GeoPoint, venue: GeoPoint, radius_km: f64) -> Self {
        Self {
            distance_km: haversine_km(device, venue),
            radius_km,
        }
    }

    /// The boundary itself counts as inside.
    pub fn within(&self) -> bool {
        self.distance_km <= self.radius_km
    }
}

/// Date eligibility compares calendar dates only.
pub fn is_scheduled_on(scheduled: NaiveDate, today: NaiveDate) -> bool {
    scheduled == today
}
