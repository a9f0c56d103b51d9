//! Backend wire format
//!
//! Domain values rendered as Kubernetes-style custom resource objects
//! (`apiVersion`, `kind`, `metadata`, `spec`, `status`).

use chrono::{DateTime, Utc};
use herald_core::domain::resource::{Param, ResourceDescriptor};
use herald_core::domain::run::{RunCondition, RunRequest, TriggerType};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::time::Duration;

pub const PIPELINE_KIND: &str = "Pipeline";
pub const RESOURCE_KIND: &str = "PipelineResource";
pub const RUN_KIND: &str = "PipelineRun";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ObjectMeta {
    pub name: String,
    #[serde(default)]
    pub namespace: String,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub labels: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uid: Option<String>,
}

/// Envelope sent on create
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Manifest<S, T> {
    pub api_version: String,
    pub kind: &'static str,
    pub metadata: ObjectMeta,
    pub spec: S,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<T>,
}

/// Envelope read back from the API; only metadata matters
#[derive(Debug, Deserialize)]
pub struct ObjectResponse {
    pub metadata: ObjectMeta,
}

#[derive(Debug, Serialize)]
pub struct ResourceSpec<'a> {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub params: &'a [Param],
}

#[derive(Debug, Serialize)]
pub struct NameRef<'a> {
    pub name: &'a str,
}

#[derive(Debug, Serialize)]
pub struct Trigger {
    #[serde(rename = "type")]
    pub kind: TriggerType,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Binding<'a> {
    pub name: &'a str,
    pub resource_ref: NameRef<'a>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RunSpec<'a> {
    pub pipeline_ref: NameRef<'a>,
    pub trigger: Trigger,
    pub service_account: &'a str,
    pub timeout: String,
    pub resources: Vec<Binding<'a>>,
}

#[derive(Debug, Serialize)]
pub struct Condition {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub status: &'static str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RunStatus {
    pub conditions: Vec<Condition>,
    pub start_time: DateTime<Utc>,
}

pub fn resource_manifest<'a>(
    api_version: &str,
    descriptor: &'a ResourceDescriptor,
) -> Manifest<ResourceSpec<'a>, ()> {
    Manifest {
        api_version: api_version.to_string(),
        kind: RESOURCE_KIND,
        metadata: ObjectMeta {
            name: descriptor.name.clone(),
            namespace: descriptor.namespace.clone(),
            ..Default::default()
        },
        spec: ResourceSpec {
            kind: descriptor.kind.as_str(),
            params: &descriptor.params,
        },
        status: None,
    }
}

pub fn run_manifest<'a>(api_version: &str, run: &'a RunRequest) -> Manifest<RunSpec<'a>, RunStatus> {
    let condition = match run.status.condition {
        RunCondition::Ready => Condition {
            kind: "Ready",
            status: "True",
        },
    };

    Manifest {
        api_version: api_version.to_string(),
        kind: RUN_KIND,
        metadata: ObjectMeta {
            name: run.name.clone(),
            namespace: run.namespace.clone(),
            labels: run.labels.clone(),
            uid: None,
        },
        spec: RunSpec {
            pipeline_ref: NameRef {
                name: &run.pipeline_ref,
            },
            trigger: Trigger { kind: run.trigger },
            service_account: &run.service_account,
            timeout: go_duration(run.timeout),
            resources: run
                .resources
                .iter()
                .map(|b| Binding {
                    name: &b.role,
                    resource_ref: NameRef {
                        name: &b.resource_ref.name,
                    },
                })
                .collect(),
        },
        status: Some(RunStatus {
            conditions: vec![condition],
            start_time: run.status.start_time,
        }),
    }
}

/// Formats a duration the way the Kubernetes API prints them (`1h0m0s`)
pub fn go_duration(d: Duration) -> String {
    let secs = d.as_secs();
    let (h, m, s) = (secs / 3600, (secs % 3600) / 60, secs % 60);
    if h > 0 {
        format!("{}h{}m{}s", h, m, s)
    } else if m > 0 {
        format!("{}m{}s", m, s)
    } else {
        format!("{}s", s)
    }
}
