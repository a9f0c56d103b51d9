//! Dispatch error taxonomy

use herald_core::EventError;
use herald_core::domain::resource::ResourceKind;
use thiserror::Error;

use crate::backend::BackendError;

/// Everything that can stop or degrade a submission
///
/// None of these reach the event source; they are only logged.
#[derive(Debug, Error)]
pub enum DispatchError {
    /// No template with that name exists; aborts the submission
    #[error("pipeline template {name} not found in namespace {namespace}")]
    TemplateNotFound { name: String, namespace: String },

    /// Template lookup failed for any other reason; aborts the submission
    #[error("pipeline backend unavailable: {0}")]
    BackendUnavailable(#[source] BackendError),

    /// A resource could not be created; the submission continues
    #[error("could not create pipeline {kind} resource {name}: {source}")]
    ResourceCreationFailed {
        kind: ResourceKind,
        name: String,
        source: BackendError,
    },

    /// The run could not be created; earlier resources are left in place
    #[error("error creating the PipelineRun {name}: {source}")]
    RunCreationFailed { name: String, source: BackendError },

    /// The event was not something Herald can build; no backend call was made
    #[error("malformed event: {0}")]
    MalformedEvent(#[from] EventError),
}
