use std::env;
use std::path::Path;

use anyhow::{anyhow, Result};
use chrono::NaiveDate;
use serde::Deserialize;
use tokio::fs;
use tracing::warn;

use backend_domain::RuntimeConfig;

use crate::config::validation::{parse_date, validate_radius_km};

pub const CONFIG_PATH_ENV: &str = "ROLLCALL_CONFIG";

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct AppConfig {
    pub bind_addr: String,
    pub api_token: Option<String>,
    /// JSON snapshot of the record store. Unset keeps records in memory only.
    pub store_path: Option<String>,
    pub geofence_radius_km: f64,
    pub location_timeout_ms: u64,
    pub max_body_bytes: u64,
    pub request_timeout_seconds: u64,
    /// Pins "today" for rehearsing an event ahead of its date.
    pub fixed_date: Option<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        let runtime = RuntimeConfig::default();
        Self {
            bind_addr: runtime.bind_addr,
            api_token: runtime.api_token,
            store_path: None,
            geofence_radius_km: runtime.geofence_radius_km,
            location_timeout_ms: runtime.location_timeout_ms,
            max_body_bytes: runtime.max_body_bytes,
            request_timeout_seconds: runtime.request_timeout_seconds,
            fixed_date: None,
        }
    }
}

impl AppConfig {
    pub async fn load() -> Result<Self> {
        let path = env::var(CONFIG_PATH_ENV).unwrap_or_else(|_| "./config.toml".to_string());
        let file_path = Path::new(&path);
        let base_dir = file_path.parent();
        let mut config = if file_path.exists() {
            let content = fs::read_to_string(file_path).await?;
            Self::from_toml_str(&content)?
        } else {
            warn!("{} not found, using defaults", path);
            AppConfig::default()
        };
        config.apply_overrides(|key| env::var(key).ok());
        config.resolve_paths(base_dir);
        config.normalize();
        config.validate()?;
        Ok(config)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|err| anyhow!("invalid config: {}", err))
    }

    pub fn normalize(&mut self) {
        self.api_token = normalize_optional(self.api_token.take());
        self.store_path = normalize_optional(self.store_path.take());
        self.fixed_date = normalize_optional(self.fixed_date.take());
    }

    fn resolve_paths(&mut self, base_dir: Option<&Path>) {
        let Some(base) = base_dir else {
            return;
        };
        if let Some(store_path) = &self.store_path {
            self.store_path = Some(resolve_path(base, store_path));
        }
    }

    pub fn validate(&self) -> Result<()> {
        self.bind_addr
            .parse::<std::net::SocketAddr>()
            .map_err(|err| anyhow!("invalid bind_addr: {}", err))?;
        validate_radius_km(self.geofence_radius_km)?;
        if self.location_timeout_ms == 0 {
            return Err(anyhow!("location_timeout_ms must be greater than 0"));
        }
        if self.max_body_bytes == 0 {
            return Err(anyhow!("max_body_bytes must be greater than 0"));
        }
        if self.request_timeout_seconds == 0 {
            return Err(anyhow!("request_timeout_seconds must be greater than 0"));
        }
        self.fixed_date()?;
        Ok(())
    }

    pub fn fixed_date(&self) -> Result<Option<NaiveDate>> {
        self.fixed_date
            .as_deref()
            .map(|value| parse_date(value).map_err(|err| anyhow!("invalid fixed_date: {}", err)))
            .transpose()
    }

    pub fn to_runtime_config(&self) -> RuntimeConfig {
        RuntimeConfig {
            bind_addr: self.bind_addr.clone(),
            api_token: self.api_token.clone(),
            geofence_radius_km: self.geofence_radius_km,
            location_timeout_ms: self.location_timeout_ms,
            max_body_bytes: self.max_body_bytes,
            request_timeout_seconds: self.request_timeout_seconds,
        }
    }

    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(value) = lookup("ROLLCALL_BIND_ADDR") {
            self.bind_addr = value;
        }
        if let Some(value) = lookup("ROLLCALL_API_TOKEN") {
            self.api_token = Some(value);
        }
        if let Some(value) = lookup("ROLLCALL_STORE_PATH") {
            self.store_path = Some(value);
        }
        if let Some(value) = lookup("ROLLCALL_GEOFENCE_RADIUS_KM") {
            self.geofence_radius_km = value.parse().unwrap_or(self.geofence_radius_km);
        }
        if let Some(value) = lookup("ROLLCALL_LOCATION_TIMEOUT_MS") {
            self.location_timeout_ms = value.parse().unwrap_or(self.location_timeout_ms);
        }
        if let Some(value) = lookup("ROLLCALL_MAX_BODY_BYTES") {
            self.max_body_bytes = value.parse().unwrap_or(self.max_body_bytes);
        }
        if let Some(value) = lookup("ROLLCALL_REQUEST_TIMEOUT_SECONDS") {
            self.request_timeout_seconds = value.parse().unwrap_or(self.request_timeout_seconds);
        }
        if let Some(value) = lookup("ROLLCALL_FIXED_DATE") {
            self.fixed_date = Some(value);
        }
    }
}

fn normalize_optional(value: Option<String>) -> Option<String> {
    value.and_then(|raw| {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    })
}

fn resolve_path(base: &Path, value: &str) -> String {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return trimmed.to_string();
    }
    let path = Path::new(trimmed);
    if path.is_absolute() {
        trimmed.to_string()
    } else {
        base.join(path).to_string_lossy().to_string()
    }
}
