use std::collections::HashSet;
use std::sync::{Arc, Mutex, PoisonError};

use backend_domain::UserId;

/// Tracks which users have a scan in flight. A device processes one scan to
/// completion before accepting the next, so a second concurrent attempt for
/// the same account is refused instead of queued.
#[derive(Debug, Default)]
pub struct ScanGate {
    in_flight: Mutex<HashSet<UserId>>,
}

impl ScanGate {
    pub fn try_acquire(self: &Arc<Self>, user: &UserId) -> Option<ScanPermit> {
        let mut in_flight = self.in_flight.lock().unwrap_or_else(PoisonError::into_inner);
        if !in_flight.insert(user.clone()) {
            return None;
        }
        Some(ScanPermit {
            gate: Arc::clone(self),
            user: user.clone(),
        })
    }

    pub fn in_flight(&self) -> usize {
        self.in_flight
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}

/// Released when dropped, whichever way the scan ended.
#[derive(Debug)]
pub struct ScanPermit {
    gate: Arc<ScanGate>,
    user: UserId,
}

impl Drop for ScanPermit {
    fn drop(&mut self) {
        self.gate
            .in_flight
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&self.user);
    }
}
