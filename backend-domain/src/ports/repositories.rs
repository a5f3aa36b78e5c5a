use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::entities::Evaluation;

/// Field map of a stored document.
pub type Document = serde_json::Map<String, serde_json::Value>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Collection {
    Meetings,
    Users,
}

impl Collection {
    pub fn as_str(&self) -> &'static str {
        match self {
            Collection::Meetings => "meetings",
            Collection::Users => "users",
        }
    }
}

/// Array fields that are only ever changed through set-style updates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SetField {
    CheckedInUsers,
    CheckedOutUsers,
    Attendees,
    InterestedUsers,
    EventsAttended,
}

impl SetField {
    pub const ALL: [SetField; 5] = [
        SetField::CheckedInUsers,
        SetField::CheckedOutUsers,
        SetField::Attendees,
        SetField::InterestedUsers,
        SetField::EventsAttended,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SetField::CheckedInUsers => "checkedInUsers",
            SetField::CheckedOutUsers => "checkedOutUsers",
            SetField::Attendees => "attendees",
            SetField::InterestedUsers => "interestedUsers",
            SetField::EventsAttended => "eventsAttended",
        }
    }

    pub fn collection(&self) -> Collection {
        match self {
            SetField::EventsAttended => Collection::Users,
            _ => Collection::Meetings,
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|field| field.as_str() == name)
    }
}

/// Document store keyed by collection and document id.
///
/// `array_union` and `array_remove` fail when the target document does not
/// exist; `merge` creates it.
#[async_trait]
pub trait RecordStore: Send + Sync {
    async fn read(&self, collection: Collection, key: &str) -> anyhow::Result<Option<Document>>;
    async fn merge(
        &self,
        collection: Collection,
        key: &str,
        fields: Document,
    ) -> anyhow::Result<()>;
    async fn array_union(&self, key: &str, field: SetField, value: &str) -> anyhow::Result<()>;
    async fn array_remove(&self, key: &str, field: SetField, value: &str) -> anyhow::Result<()>;

    async fn add_evaluation(&self, event_key: &str, evaluation: &Evaluation) -> anyhow::Result<()>;
    async fn list_evaluations(&self, event_key: &str) -> anyhow::Result<Vec<Evaluation>>;

    async fn ping(&self) -> anyhow::Result<()>;
}
