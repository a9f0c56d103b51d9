//! Error types for event handling

use thiserror::Error;

/// Reasons an inbound event cannot be turned into a build
#[derive(Debug, Error)]
pub enum EventError {
    /// The classification header was absent or blank
    #[error("event classification header is missing or empty")]
    MissingClassification,

    /// The classification is not one Herald builds for
    #[error("unsupported event classification: {0}")]
    Unsupported(String),

    /// The payload could not be decoded
    #[error("failed to decode event payload: {0}")]
    Decode(#[from] serde_json::Error),

    /// A field required to build is absent or empty
    #[error("event is missing required field: {0}")]
    MissingField(&'static str),
}
