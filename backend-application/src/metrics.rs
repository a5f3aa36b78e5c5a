use std::sync::atomic::{AtomicU64, Ordering};

use backend_domain::ScanAction;

use crate::ScanError;

#[derive(Debug, Default)]
pub struct Metrics {
    scans: AtomicU64,
    checkins: AtomicU64,
    checkouts: AtomicU64,
    confirmations: AtomicU64,
    rejected_malformed: AtomicU64,
    rejected_date: AtomicU64,
    rejected_location: AtomicU64,
    rejected_range: AtomicU64,
    rejected_other: AtomicU64,
    store_errors: AtomicU64,
    feedback: AtomicU64,
}

impl Metrics {
    pub fn record_scan(&self) {
        self.scans.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_accepted(&self, action: ScanAction, confirmed: bool) {
        match action {
            ScanAction::CheckIn => self.checkins.fetch_add(1, Ordering::Relaxed),
            ScanAction::CheckOut => self.checkouts.fetch_add(1, Ordering::Relaxed),
        };
        if confirmed {
            self.confirmations.fetch_add(1, Ordering::Relaxed);
        }
    }

    pub fn record_rejection(&self, err: &ScanError) {
        let counter = match err {
            ScanError::MalformedScan(_) => &self.rejected_malformed,
            ScanError::DateIneligible { .. } => &self.rejected_date,
            ScanError::LocationUnavailable(_) => &self.rejected_location,
            ScanError::OutOfRange { .. } => &self.rejected_range,
            ScanError::RecordRead(_) | ScanError::RecordWrite(_) => &self.store_errors,
            ScanError::Unauthenticated
            | ScanError::ScanInProgress
            | ScanError::UnknownEvent(_) => &self.rejected_other,
        };
        counter.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_feedback(&self) {
        self.feedback.fetch_add(1, Ordering::Relaxed);
    }

    pub fn render_prometheus(&self) -> String {
        let load = |counter: &AtomicU64| counter.load(Ordering::Relaxed);

        format!(
            "# TYPE rollcall_scans_total counter\n\
rollcall_scans_total {}\n\
# TYPE rollcall_checkins_total counter\n\
rollcall_checkins_total {}\n\
# TYPE rollcall_checkouts_total counter\n\
rollcall_checkouts_total {}\n\
# TYPE rollcall_attendance_confirmed_total counter\n\
rollcall_attendance_confirmed_total {}\n\
# TYPE rollcall_scan_rejections_total counter\n\
rollcall_scan_rejections_total{{reason=\"malformed_scan\"}} {}\n\
rollcall_scan_rejections_total{{reason=\"date_ineligible\"}} {}\n\
rollcall_scan_rejections_total{{reason=\"location_unavailable\"}} {}\n\
rollcall_scan_rejections_total{{reason=\"out_of_range\"}} {}\n\
rollcall_scan_rejections_total{{reason=\"other\"}} {}\n\
# TYPE rollcall_store_errors_total counter\n\
rollcall_store_errors_total {}\n\
# TYPE rollcall_feedback_total counter\n\
rollcall_feedback_total {}\n",
            load(&self.scans),
            load(&self.checkins),
            load(&self.checkouts),
            load(&self.confirmations),
            load(&self.rejected_malformed),
            load(&self.rejected_date),
            load(&self.rejected_location),
            load(&self.rejected_range),
            load(&self.rejected_other),
            load(&self.store_errors),
            load(&self.feedback),
        )
    }
}
