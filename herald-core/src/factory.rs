//! Resource descriptor factory
//!
//! Builds the per-submission image and source descriptors and the run
//! request that binds them. Pure construction; creating them on the backend
//! is the submitter's job.

use uuid::Uuid;

use crate::config::{DispatchConfig, NamingPolicy};
use crate::domain::coordinate::BuildCoordinate;
use crate::domain::resource::{Param, ResourceDescriptor, ResourceKind};
use crate::domain::run::{
    DOCKER_IMAGE_ROLE, GIT_SOURCE_ROLE, ResourceBinding, RunCondition, RunRequest, RunStatus,
    TriggerType,
};
use crate::domain::template::PipelineTemplate;

const IMAGE_PREFIX: &str = "docker-image";
const SOURCE_PREFIX: &str = "git-source";
const RUN_PREFIX: &str = "devops-pipeline-run";

/// The two descriptors generated for one submission
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildResources {
    /// Suffix shared by every generated name of this submission
    pub suffix: String,
    pub image: ResourceDescriptor,
    pub source: ResourceDescriptor,
}

/// Suffix used for this submission's generated names
pub fn name_suffix(policy: NamingPolicy, coordinate: &BuildCoordinate) -> String {
    match policy {
        NamingPolicy::Timestamp => coordinate.timestamp.clone(),
        NamingPolicy::Salted => {
            let salt = Uuid::new_v4().simple().to_string();
            format!("{}-{}", coordinate.timestamp, &salt[..8])
        }
    }
}

/// Image reference the pipeline pushes to: `<registry>/<repository>:<short id>`
pub fn image_url(registry: &str, coordinate: &BuildCoordinate) -> String {
    format!(
        "{}/{}:{}",
        registry, coordinate.repository_name, coordinate.short_id
    )
}

/// Output descriptor for the built image
pub fn image_descriptor(
    config: &DispatchConfig,
    coordinate: &BuildCoordinate,
    suffix: &str,
) -> ResourceDescriptor {
    ResourceDescriptor {
        name: format!("{}-{}", IMAGE_PREFIX, suffix),
        namespace: config.namespace.clone(),
        kind: ResourceKind::Image,
        params: vec![Param::new("url", image_url(&config.registry, coordinate))],
    }
}

/// Input descriptor for the source checkout
pub fn source_descriptor(
    config: &DispatchConfig,
    coordinate: &BuildCoordinate,
    suffix: &str,
) -> ResourceDescriptor {
    ResourceDescriptor {
        name: format!("{}-{}", SOURCE_PREFIX, suffix),
        namespace: config.namespace.clone(),
        kind: ResourceKind::Git,
        params: vec![
            Param::new("revision", coordinate.commit_id.as_str()),
            Param::new("url", coordinate.repository_url.as_str()),
        ],
    }
}

/// Generate both descriptors for a coordinate
pub fn build_resources(config: &DispatchConfig, coordinate: &BuildCoordinate) -> BuildResources {
    let suffix = name_suffix(config.naming, coordinate);
    BuildResources {
        image: image_descriptor(config, coordinate, &suffix),
        source: source_descriptor(config, coordinate, &suffix),
        suffix,
    }
}

/// Run request binding `resources` to `template`
///
/// Always a manual trigger with the configured service account and timeout,
/// marked ready and started at the coordinate's submission time.
pub fn run_request(
    config: &DispatchConfig,
    coordinate: &BuildCoordinate,
    template: &PipelineTemplate,
    resources: &BuildResources,
) -> RunRequest {
    RunRequest {
        name: format!("{}-{}", RUN_PREFIX, resources.suffix),
        namespace: config.namespace.clone(),
        labels: config.run_labels.clone(),
        pipeline_ref: template.name.clone(),
        trigger: TriggerType::Manual,
        service_account: config.service_account.clone(),
        timeout: config.run_timeout,
        resources: vec![
            ResourceBinding {
                role: DOCKER_IMAGE_ROLE.to_string(),
                resource_ref: resources.image.reference(),
            },
            ResourceBinding {
                role: GIT_SOURCE_ROLE.to_string(),
                resource_ref: resources.source.reference(),
            },
        ],
        status: RunStatus {
            condition: RunCondition::Ready,
            start_time: coordinate.submitted_at,
        },
    }
}
