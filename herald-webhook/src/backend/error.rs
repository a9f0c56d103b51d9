//! Error types for the pipeline backend

use thiserror::Error;

/// Errors returned by a [`super::PipelineBackend`]
#[derive(Debug, Error)]
pub enum BackendError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    /// The object does not exist
    #[error("{kind} {name} not found")]
    NotFound { kind: &'static str, name: String },

    /// An object with the same name already exists
    #[error("{kind} {name} already exists")]
    AlreadyExists { kind: &'static str, name: String },

    /// The API answered with an unexpected status
    #[error("API error (status {status}): {message}")]
    ApiError { status: u16, message: String },

    /// Failed to parse response
    #[error("Failed to parse response: {0}")]
    ParseError(String),
}

impl BackendError {
    /// Check if this error is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. }) || matches!(self, Self::ApiError { status: 404, .. })
    }

    /// Check if this error is a name collision
    pub fn is_already_exists(&self) -> bool {
        matches!(self, Self::AlreadyExists { .. })
            || matches!(self, Self::ApiError { status: 409, .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_classification() {
        let err = BackendError::NotFound {
            kind: "Pipeline",
            name: "simple-pipeline".to_string(),
        };
        assert!(err.is_not_found());
        assert!(!err.is_already_exists());

        let err = BackendError::ApiError {
            status: 404,
            message: String::new(),
        };
        assert!(err.is_not_found());
    }

    #[test]
    fn test_server_error_is_neither() {
        let err = BackendError::ApiError {
            status: 503,
            message: "unavailable".to_string(),
        };
        assert!(!err.is_not_found());
        assert!(!err.is_already_exists());
    }
}
