// Scan action value object

use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ScanAction {
    #[serde(rename = "checkin")]
    CheckIn,
    #[serde(rename = "checkout")]
    CheckOut,
}

impl ScanAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            ScanAction::CheckIn => "checkin",
            ScanAction::CheckOut => "checkout",
        }
    }

    /// Tags are matched exactly; `CheckIn` or `check-in` are not accepted.
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "checkin" => Some(ScanAction::CheckIn),
            "checkout" => Some(ScanAction::CheckOut),
            _ => None,
        }
    }
}

impl fmt::Display for ScanAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
