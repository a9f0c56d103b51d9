//! Run submitter
//!
//! Creates the image resource, the source resource and the run, in that
//! order, with one attempt each. A failed resource is logged and skipped; a
//! failed run ends the submission. Nothing already created is rolled back.

use herald_core::config::DispatchConfig;
use herald_core::domain::coordinate::BuildCoordinate;
use herald_core::domain::resource::ResourceDescriptor;
use herald_core::domain::template::PipelineTemplate;
use herald_core::factory::{self, BuildResources};

use crate::backend::PipelineBackend;
use crate::service::error::DispatchError;

/// What a submission managed to create
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionReport {
    pub image_created: bool,
    pub source_created: bool,
    pub run_name: String,
}

/// Create the resources and the run for one coordinate
///
/// Returns [`DispatchError::RunCreationFailed`] only when the final run
/// creation fails; resource failures show up as `false` in the report.
pub async fn submit(
    backend: &dyn PipelineBackend,
    config: &DispatchConfig,
    coordinate: &BuildCoordinate,
    template: &PipelineTemplate,
    resources: &BuildResources,
) -> Result<SubmissionReport, DispatchError> {
    tracing::debug!("Creating PipelineResources next...");
    if let Some(url) = resources.image.param("url") {
        tracing::info!("Pushing the image to {}", url);
    }

    let image_created = create_resource(backend, &resources.image).await.is_ok();
    let source_created = create_resource(backend, &resources.source).await.is_ok();

    let run = factory::run_request(config, coordinate, template, resources);
    tracing::info!("Creating a new PipelineRun named {}", run.name);

    match backend.create_run_request(&run).await {
        Ok(created) => {
            tracing::info!(
                "PipelineRun created: {}/{} (uid {})",
                created.namespace,
                created.name,
                created.uid.as_deref().unwrap_or("unknown")
            );
            Ok(SubmissionReport {
                image_created,
                source_created,
                run_name: run.name,
            })
        }
        Err(source) => Err(DispatchError::RunCreationFailed {
            name: run.name,
            source,
        }),
    }
}

async fn create_resource(
    backend: &dyn PipelineBackend,
    descriptor: &ResourceDescriptor,
) -> Result<(), DispatchError> {
    match backend.create_resource_descriptor(descriptor).await {
        Ok(created) => {
            tracing::info!(
                "Created pipeline {} resource {} successfully",
                descriptor.kind,
                created.name
            );
            Ok(())
        }
        Err(source) => {
            let err = DispatchError::ResourceCreationFailed {
                kind: descriptor.kind,
                name: descriptor.name.clone(),
                source,
            };
            tracing::error!("{}", err);
            Err(err)
        }
    }
}
