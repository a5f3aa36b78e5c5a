use std::sync::Arc;

use backend_domain::ports::{Clock, RecordStore};
use backend_domain::RuntimeConfig;

use crate::{Metrics, ScanGate};

#[derive(Clone)]
pub struct AppState {
    pub config: RuntimeConfig,
    pub record_store: Arc<dyn RecordStore>,
    pub clock: Arc<dyn Clock>,
    pub metrics: Arc<Metrics>,
    pub scan_gate: Arc<ScanGate>,
}

impl AppState {
    pub fn new(
        config: RuntimeConfig,
        record_store: Arc<dyn RecordStore>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            config,
            record_store,
            clock,
            metrics: Arc::new(Metrics::default()),
            scan_gate: Arc::new(ScanGate::default()),
        }
    }
}
