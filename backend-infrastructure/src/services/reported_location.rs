use async_trait::async_trait;

use backend_domain::{GeoPoint, LocationError, LocationProvider, ScanRequest};

/// Position fix reported by the scanning device alongside the payload.
#[derive(Debug, Clone, Copy)]
pub struct ReportedLocation {
    result: Result<GeoPoint, LocationError>,
}

impl ReportedLocation {
    pub fn new(result: Result<GeoPoint, LocationError>) -> Self {
        Self { result }
    }

    /// A device-side error wins over any position sent with it; a request
    /// with neither means the device produced no fix.
    pub fn from_request(request: &ScanRequest) -> Self {
        let result = match (request.location_error, request.position) {
            (Some(err), _) => Err(err),
            (None, Some(position)) => Ok(position),
            (None, None) => Err(LocationError::PositionUnavailable),
        };
        Self { result }
    }
}

#[async_trait]
impl LocationProvider for ReportedLocation {
    async fn current_position(&self) -> Result<GeoPoint, LocationError> {
        self.result
    }
}
