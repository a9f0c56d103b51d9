//! Pipeline backend
//!
//! The catalog Herald submits work to. Everything the dispatch flow needs from
//! the execution backend goes through [`PipelineBackend`], so the flow can be
//! exercised against an in-memory backend in tests.

mod error;
mod http;
mod manifest;

pub use error::BackendError;
pub use http::{DEFAULT_API_VERSION, HttpPipelineBackend};

use async_trait::async_trait;
use herald_core::domain::resource::ResourceDescriptor;
use herald_core::domain::run::RunRequest;
use herald_core::domain::template::PipelineTemplate;

/// Identity of an object the backend accepted
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatedObject {
    pub name: String,
    pub namespace: String,
    pub uid: Option<String>,
}

/// Port to the pipeline-execution backend catalog
#[async_trait]
pub trait PipelineBackend: Send + Sync {
    /// Fetches a pipeline template by name
    ///
    /// Returns [`BackendError::NotFound`] when no template with that name
    /// exists in the namespace.
    async fn get_pipeline_template(
        &self,
        name: &str,
        namespace: &str,
    ) -> Result<PipelineTemplate, BackendError>;

    /// Creates a pipeline resource
    ///
    /// Returns [`BackendError::AlreadyExists`] when the name is taken.
    async fn create_resource_descriptor(
        &self,
        descriptor: &ResourceDescriptor,
    ) -> Result<CreatedObject, BackendError>;

    /// Creates a pipeline run
    async fn create_run_request(&self, request: &RunRequest) -> Result<CreatedObject, BackendError>;
}
