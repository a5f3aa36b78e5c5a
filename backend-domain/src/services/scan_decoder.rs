use thiserror::Error;

use crate::value_objects::{EventId, ScanAction};

pub const SCAN_SEPARATOR: char = '-';

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanPayload {
    pub event_id: EventId,
    pub action: ScanAction,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScanDecodeError {
    #[error("scan payload has no '-' separator")]
    MissingSeparator,
    #[error("scan payload has an empty event id")]
    EmptyEventId,
    #[error("unrecognised scan action '{0}'")]
    UnknownAction(String),
}

/// Splits `{eventId}-{action}` on the last hyphen so event ids that contain
/// hyphens survive intact.
pub fn decode_scan(raw: &str) -> Result<ScanPayload, ScanDecodeError> {
    let (event_id, tag) = raw
        .trim()
        .rsplit_once(SCAN_SEPARATOR)
        .ok_or(ScanDecodeError::MissingSeparator)?;
    let action =
        ScanAction::from_tag(tag).ok_or_else(|| ScanDecodeError::UnknownAction(tag.to_string()))?;
    if event_id.is_empty() {
        return Err(ScanDecodeError::EmptyEventId);
    }
    Ok(ScanPayload {
        event_id: EventId::new(event_id),
        action,
    })
}

pub fn encode_scan(event_id: &EventId, action: ScanAction) -> String {
    format!("{}{}{}", event_id, SCAN_SEPARATOR, action.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_checkin_and_checkout() {
        let payload = decode_scan("E1-checkin").expect("checkin");
        assert_eq!(payload.event_id, EventId::new("E1"));
        assert_eq!(payload.action, ScanAction::CheckIn);

        let payload = decode_scan("E1-checkout").expect("checkout");
        assert_eq!(payload.action, ScanAction::CheckOut);
    }

    #[test]
    fn keeps_hyphens_inside_event_id() {
        let payload = decode_scan("  2024-orientation-day-checkout\n").expect("payload");
        assert_eq!(payload.event_id.as_str(), "2024-orientation-day");
        assert_eq!(payload.action, ScanAction::CheckOut);
    }

    #[test]
    fn encode_matches_decoder() {
        let id = EventId::new("aXk3-pQ");
        let raw = encode_scan(&id, ScanAction::CheckIn);
        assert_eq!(raw, "aXk3-pQ-checkin");
        assert_eq!(decode_scan(&raw).expect("payload").event_id, id);
    }

    #[test]
    fn rejects_malformed_payloads() {
        assert_eq!(decode_scan("E1checkin"), Err(ScanDecodeError::MissingSeparator));
        assert_eq!(decode_scan(""), Err(ScanDecodeError::MissingSeparator));
        assert_eq!(decode_scan("-checkin"), Err(ScanDecodeError::EmptyEventId));
        assert_eq!(
            decode_scan("E1-register"),
            Err(ScanDecodeError::UnknownAction("register".to_string()))
        );
        assert_eq!(
            decode_scan("E1-CheckIn"),
            Err(ScanDecodeError::UnknownAction("CheckIn".to_string()))
        );
        assert_eq!(
            decode_scan("E1-checkin-"),
            Err(ScanDecodeError::UnknownAction(String::new()))
        );
    }
}
