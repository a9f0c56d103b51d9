//! Pipeline run request domain types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::time::Duration;

use super::resource::ResourceRef;

/// Binding role for the image output
pub const DOCKER_IMAGE_ROLE: &str = "docker-image";

/// Binding role for the source input
pub const GIT_SOURCE_ROLE: &str = "git-source";

/// How the run was triggered
///
/// Webhook and manual submissions are both recorded as `Manual`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TriggerType {
    Manual,
}

/// Binds a pipeline resource role to a concrete resource
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceBinding {
    pub role: String,
    pub resource_ref: ResourceRef,
}

/// Condition a run is submitted in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RunCondition {
    Ready,
}

/// Initial status attached to a run request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunStatus {
    pub condition: RunCondition,
    pub start_time: DateTime<Utc>,
}

/// One instantiation of a pipeline template bound to concrete resources
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunRequest {
    pub name: String,
    pub namespace: String,
    pub labels: BTreeMap<String, String>,
    pub pipeline_ref: String,
    pub trigger: TriggerType,
    pub service_account: String,
    pub timeout: Duration,
    pub resources: Vec<ResourceBinding>,
    pub status: RunStatus,
}

impl RunRequest {
    /// Resource bound under the given role, if any
    pub fn binding(&self, role: &str) -> Option<&ResourceRef> {
        self.resources
            .iter()
            .find(|b| b.role == role)
            .map(|b| &b.resource_ref)
    }
}
