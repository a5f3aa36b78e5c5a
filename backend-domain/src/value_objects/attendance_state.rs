// Attendance state value object
// Per user, per event. No transition ever removes a user from a set, so the
// state only moves forward.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttendanceState {
    NotCheckedIn,
    CheckedIn,
    CheckedOutUnconfirmed,
    AttendanceConfirmed,
}

impl AttendanceState {
    pub fn as_str(&self) -> &'static str {
        match self {
            AttendanceState::NotCheckedIn => "not_checked_in",
            AttendanceState::CheckedIn => "checked_in",
            AttendanceState::CheckedOutUnconfirmed => "checked_out_unconfirmed",
            AttendanceState::AttendanceConfirmed => "attendance_confirmed",
        }
    }

    /// Derives the state from set membership on the event document.
    ///
    /// A user on the checkout list who is not an attendee is reported as
    /// unconfirmed, whether they never checked in first or the confirmation
    /// writes did not complete. Scanning the checkout code again after a
    /// check-in converges both cases.
    pub fn from_membership(checked_in: bool, checked_out: bool, attendee: bool) -> Self {
        if attendee {
            AttendanceState::AttendanceConfirmed
        } else if checked_out {
            AttendanceState::CheckedOutUnconfirmed
        } else if checked_in {
            AttendanceState::CheckedIn
        } else {
            AttendanceState::NotCheckedIn
        }
    }
}

/// What the caller should do after a successful scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NextStep {
    None,
    Feedback,
}

impl From<AttendanceState> for NextStep {
    fn from(state: AttendanceState) -> Self {
        match state {
            AttendanceState::AttendanceConfirmed => NextStep::Feedback,
            _ => NextStep::None,
        }
    }
}
