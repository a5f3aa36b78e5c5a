use std::sync::Arc;

use anyhow::Result;
use tracing::{info, warn};

use backend_application::AppState;
use backend_domain::{Clock, RecordStore};
use backend_infrastructure::{AppConfig, FixedClock, JsonRecordStore, SystemClock};

pub struct AppContext {
    pub state: AppState,
}

impl AppContext {
    pub async fn new() -> Result<Self> {
        let config = AppConfig::load().await?;
        Self::from_config(&config).await
    }

    pub async fn from_config(config: &AppConfig) -> Result<Self> {
        let record_store: Arc<dyn RecordStore> = match &config.store_path {
            Some(path) => {
                info!("record store at {}", path);
                Arc::new(JsonRecordStore::open(path).await?)
            }
            None => {
                warn!("no store_path configured, records are kept in memory only");
                Arc::new(JsonRecordStore::in_memory())
            }
        };

        let clock: Arc<dyn Clock> = match config.fixed_date()? {
            Some(day) => {
                warn!("clock pinned to {}", day);
                Arc::new(FixedClock::new(day))
            }
            None => Arc::new(SystemClock),
        };

        let state = AppState::new(config.to_runtime_config(), record_store, clock);
        Ok(Self { state })
    }
}
