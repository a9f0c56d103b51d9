//! In-memory pipeline backend for tests

use std::collections::HashSet;
use std::sync::Mutex;

use async_trait::async_trait;
use herald_core::domain::resource::{ResourceDescriptor, ResourceKind};
use herald_core::domain::run::RunRequest;
use herald_core::domain::template::PipelineTemplate;

use crate::backend::{BackendError, CreatedObject, PipelineBackend};

/// A backend call, in the order it was made
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    GetTemplate { name: String, namespace: String },
    CreateResource(String),
    CreateRun(String),
}

enum TemplateState {
    Present,
    Missing,
    Unavailable,
}

/// Records every call and keeps created objects in memory
///
/// Names are unique per backend, so creating the same name twice fails with
/// [`BackendError::AlreadyExists`] like the real API.
pub struct RecordingBackend {
    template: TemplateState,
    failing_kinds: HashSet<ResourceKind>,
    fail_runs: bool,
    calls: Mutex<Vec<Call>>,
    names: Mutex<HashSet<String>>,
    resources: Mutex<Vec<ResourceDescriptor>>,
    runs: Mutex<Vec<RunRequest>>,
}

impl RecordingBackend {
    pub fn new() -> Self {
        Self {
            template: TemplateState::Present,
            failing_kinds: HashSet::new(),
            fail_runs: false,
            calls: Mutex::new(Vec::new()),
            names: Mutex::new(HashSet::new()),
            resources: Mutex::new(Vec::new()),
            runs: Mutex::new(Vec::new()),
        }
    }

    pub fn without_template(mut self) -> Self {
        self.template = TemplateState::Missing;
        self
    }

    pub fn unavailable(mut self) -> Self {
        self.template = TemplateState::Unavailable;
        self
    }

    pub fn failing_resource(mut self, kind: ResourceKind) -> Self {
        self.failing_kinds.insert(kind);
        self
    }

    pub fn failing_runs(mut self) -> Self {
        self.fail_runs = true;
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn resources(&self) -> Vec<ResourceDescriptor> {
        self.resources.lock().unwrap().clone()
    }

    pub fn runs(&self) -> Vec<RunRequest> {
        self.runs.lock().unwrap().clone()
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }

    fn claim_name(&self, kind: &'static str, name: &str, namespace: &str) -> Result<CreatedObject, BackendError> {
        if !self.names.lock().unwrap().insert(name.to_string()) {
            return Err(BackendError::AlreadyExists {
                kind,
                name: name.to_string(),
            });
        }
        Ok(CreatedObject {
            name: name.to_string(),
            namespace: namespace.to_string(),
            uid: None,
        })
    }
}

#[async_trait]
impl PipelineBackend for RecordingBackend {
    async fn get_pipeline_template(
        &self,
        name: &str,
        namespace: &str,
    ) -> Result<PipelineTemplate, BackendError> {
        self.record(Call::GetTemplate {
            name: name.to_string(),
            namespace: namespace.to_string(),
        });

        match self.template {
            TemplateState::Present => Ok(PipelineTemplate {
                name: name.to_string(),
                namespace: namespace.to_string(),
            }),
            TemplateState::Missing => Err(BackendError::NotFound {
                kind: "Pipeline",
                name: name.to_string(),
            }),
            TemplateState::Unavailable => Err(BackendError::ApiError {
                status: 503,
                message: "service unavailable".to_string(),
            }),
        }
    }

    async fn create_resource_descriptor(
        &self,
        descriptor: &ResourceDescriptor,
    ) -> Result<CreatedObject, BackendError> {
        self.record(Call::CreateResource(descriptor.name.clone()));

        if self.failing_kinds.contains(&descriptor.kind) {
            return Err(BackendError::ApiError {
                status: 500,
                message: format!("cannot create {}", descriptor.kind),
            });
        }

        let created = self.claim_name("PipelineResource", &descriptor.name, &descriptor.namespace)?;
        self.resources.lock().unwrap().push(descriptor.clone());
        Ok(created)
    }

    async fn create_run_request(&self, request: &RunRequest) -> Result<CreatedObject, BackendError> {
        self.record(Call::CreateRun(request.name.clone()));

        if self.fail_runs {
            return Err(BackendError::ApiError {
                status: 500,
                message: "cannot create run".to_string(),
            });
        }

        let created = self.claim_name("PipelineRun", &request.name, &request.namespace)?;
        self.runs.lock().unwrap().push(request.clone());
        Ok(created)
    }
}
