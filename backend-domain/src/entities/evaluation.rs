// Evaluation entity
// Feedback form submitted once attendance is confirmed. Stored in the
// `evaluations` sub-collection of the meeting.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub const RATING_QUESTIONS: usize = 10;
pub const MIN_RATING: u8 = 1;
pub const MAX_RATING: u8 = 5;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Evaluation {
    pub id: String,
    pub user_id: String,
    pub name: String,
    pub course: String,
    pub ratings: Vec<Option<u8>>,
    pub best_features: String,
    pub suggestions: String,
    pub other_comments: String,
    pub core_values: Vec<String>,
    pub submitted_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedbackSubmission {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub course: String,
    #[serde(default)]
    pub ratings: Vec<Option<u8>>,
    #[serde(default)]
    pub best_features: String,
    #[serde(default)]
    pub suggestions: String,
    #[serde(default)]
    pub other_comments: String,
    #[serde(default)]
    pub core_values: Vec<String>,
}

impl FeedbackSubmission {
    pub fn normalized(self) -> Self {
        let mut core_values: Vec<String> = self
            .core_values
            .into_iter()
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
            .collect();
        core_values.sort();
        core_values.dedup();
        Self {
            name: self.name.trim().to_string(),
            course: self.course.trim().to_string(),
            ratings: self.ratings,
            best_features: self.best_features.trim().to_string(),
            suggestions: self.suggestions.trim().to_string(),
            other_comments: self.other_comments.trim().to_string(),
            core_values,
        }
    }
}
