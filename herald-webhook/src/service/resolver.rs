//! Template resolver

use herald_core::domain::template::PipelineTemplate;

use crate::backend::PipelineBackend;
use crate::service::error::DispatchError;

/// Look up the pipeline template a run will reference
///
/// A single read against the backend. Missing templates map to
/// [`DispatchError::TemplateNotFound`], anything else to
/// [`DispatchError::BackendUnavailable`].
pub async fn resolve(
    backend: &dyn PipelineBackend,
    name: &str,
    namespace: &str,
) -> Result<PipelineTemplate, DispatchError> {
    tracing::debug!("Resolving pipeline template {} in namespace {}", name, namespace);

    match backend.get_pipeline_template(name, namespace).await {
        Ok(template) => {
            tracing::debug!("Found the pipeline template {} OK", template.name);
            Ok(template)
        }
        Err(err) if err.is_not_found() => Err(DispatchError::TemplateNotFound {
            name: name.to_string(),
            namespace: namespace.to_string(),
        }),
        Err(err) => Err(DispatchError::BackendUnavailable(err)),
    }
}
