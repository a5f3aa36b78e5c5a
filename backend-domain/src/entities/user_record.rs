// User entity
// One document in the `users` collection

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::ports::Document;
use crate::value_objects::EventId;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRecord {
    #[serde(default)]
    pub events_attended: BTreeSet<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,
}

impl UserRecord {
    pub fn from_document(document: &Document) -> serde_json::Result<Self> {
        serde_json::from_value(serde_json::Value::Object(document.clone()))
    }

    pub fn has_attended(&self, event: &EventId) -> bool {
        self.events_attended.contains(event.as_str())
    }
}
