//! Trigger event classification and decoding

use std::fmt;

use crate::dto::build::BuildRequest;
use crate::dto::webhook::{PullRequestPayload, PushPayload};
use crate::error::EventError;

/// Webhook event classifications Herald acts on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    Push,
    PullRequest,
}

impl EventKind {
    /// Classify a raw header value
    ///
    /// Double quotes are stripped before an exact, case-sensitive comparison
    /// against `push` and `pull_request`.
    pub fn classify(header: Option<&str>) -> Result<Self, EventError> {
        let raw = header.ok_or(EventError::MissingClassification)?;
        if raw.is_empty() {
            return Err(EventError::MissingClassification);
        }

        match raw.replace('"', "").as_str() {
            "push" => Ok(EventKind::Push),
            "pull_request" => Ok(EventKind::PullRequest),
            other => Err(EventError::Unsupported(other.to_string())),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            EventKind::Push => "push",
            EventKind::PullRequest => "pull_request",
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A decoded trigger event
#[derive(Debug, Clone)]
pub enum TriggerEvent {
    Push(PushPayload),
    PullRequest(PullRequestPayload),
    Manual(BuildRequest),
}

impl TriggerEvent {
    /// Decode a webhook body according to its classification
    pub fn decode(kind: EventKind, payload: &[u8]) -> Result<Self, EventError> {
        let event = match kind {
            EventKind::Push => TriggerEvent::Push(serde_json::from_slice(payload)?),
            EventKind::PullRequest => TriggerEvent::PullRequest(serde_json::from_slice(payload)?),
        };
        Ok(event)
    }

    /// Decode a manual build request body
    pub fn decode_manual(payload: &[u8]) -> Result<Self, EventError> {
        Ok(TriggerEvent::Manual(serde_json::from_slice(payload)?))
    }

    /// Short label for logging
    pub fn label(&self) -> &'static str {
        match self {
            TriggerEvent::Push(_) => "push",
            TriggerEvent::PullRequest(_) => "pull_request",
            TriggerEvent::Manual(_) => "manual",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_recognised_events() {
        assert_eq!(EventKind::classify(Some("push")).unwrap(), EventKind::Push);
        assert_eq!(
            EventKind::classify(Some("pull_request")).unwrap(),
            EventKind::PullRequest
        );
    }

    #[test]
    fn test_classify_strips_quotes() {
        assert_eq!(
            EventKind::classify(Some("\"push\"")).unwrap(),
            EventKind::Push
        );
    }

    #[test]
    fn test_classify_is_case_sensitive() {
        assert!(matches!(
            EventKind::classify(Some("Push")),
            Err(EventError::Unsupported(_))
        ));
    }

    #[test]
    fn test_classify_rejects_other_events() {
        match EventKind::classify(Some("issue_comment")) {
            Err(EventError::Unsupported(kind)) => assert_eq!(kind, "issue_comment"),
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn test_classify_missing_header() {
        assert!(matches!(
            EventKind::classify(None),
            Err(EventError::MissingClassification)
        ));
        assert!(matches!(
            EventKind::classify(Some("")),
            Err(EventError::MissingClassification)
        ));
    }

    #[test]
    fn test_decode_garbage_fails() {
        assert!(matches!(
            TriggerEvent::decode(EventKind::Push, b"not json"),
            Err(EventError::Decode(_))
        ));
    }
}
