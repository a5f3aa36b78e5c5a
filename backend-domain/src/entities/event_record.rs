// Event entity
// One document in the `meetings` collection

use std::collections::BTreeSet;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::ports::Document;
use crate::value_objects::{AttendanceState, GeoPoint, UserId};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventRecord {
    #[serde(default)]
    pub name: String,
    pub date: NaiveDate,
    pub latitude: f64,
    pub longitude: f64,
    #[serde(default)]
    pub checked_in_users: BTreeSet<String>,
    #[serde(default)]
    pub checked_out_users: BTreeSet<String>,
    #[serde(default)]
    pub attendees: BTreeSet<String>,
    #[serde(default)]
    pub interested_users: BTreeSet<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub organizer: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

impl EventRecord {
    pub fn from_document(document: &Document) -> serde_json::Result<Self> {
        serde_json::from_value(serde_json::Value::Object(document.clone()))
    }

    pub fn position(&self) -> GeoPoint {
        GeoPoint::new(self.latitude, self.longitude)
    }

    pub fn has_checked_in(&self, user: &UserId) -> bool {
        self.checked_in_users.contains(user.as_str())
    }

    pub fn has_checked_out(&self, user: &UserId) -> bool {
        self.checked_out_users.contains(user.as_str())
    }

    pub fn is_attendee(&self, user: &UserId) -> bool {
        self.attendees.contains(user.as_str())
    }

    pub fn attendance_state(&self, user: &UserId) -> AttendanceState {
        AttendanceState::from_membership(
            self.has_checked_in(user),
            self.has_checked_out(user),
            self.is_attendee(user),
        )
    }
}
