// Runtime configuration shared with the application layer

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RuntimeConfig {
    pub bind_addr: String,
    pub api_token: Option<String>,
    pub geofence_radius_km: f64,
    pub location_timeout_ms: u64,
    pub max_body_bytes: u64,
    pub request_timeout_seconds: u64,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            bind_addr: "127.0.0.1:3240".to_string(),
            api_token: None,
            geofence_radius_km: 0.1,
            location_timeout_ms: 10_000,
            max_body_bytes: 64 * 1024,
            request_timeout_seconds: 15,
        }
    }
}
