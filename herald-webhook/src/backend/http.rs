//! HTTP pipeline backend
//!
//! Talks to a Kubernetes API server hosting the pipeline custom resources:
//! `/apis/{api_version}/namespaces/{namespace}/{plural}[/{name}]`.

use async_trait::async_trait;
use herald_core::domain::resource::ResourceDescriptor;
use herald_core::domain::run::RunRequest;
use herald_core::domain::template::PipelineTemplate;
use reqwest::{Client, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;

use super::manifest::{
    ObjectResponse, PIPELINE_KIND, RESOURCE_KIND, RUN_KIND, resource_manifest, run_manifest,
};
use super::{BackendError, CreatedObject, PipelineBackend};

/// Default API group/version of the pipeline resources
pub const DEFAULT_API_VERSION: &str = "tekton.dev/v1alpha1";

/// [`PipelineBackend`] over the Kubernetes REST API
#[derive(Debug, Clone)]
pub struct HttpPipelineBackend {
    /// Base URL of the API server (e.g., "https://kubernetes.default.svc")
    base_url: String,
    api_version: String,
    /// Bearer token, when the API server requires one
    token: Option<String>,
    client: Client,
}

impl HttpPipelineBackend {
    /// Create a backend for the API server at `base_url`
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(base_url, Client::new())
    }

    /// Create a backend with a custom HTTP client
    ///
    /// This allows you to configure timeouts, proxies, TLS settings, etc.
    pub fn with_client(base_url: impl Into<String>, client: Client) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_version: DEFAULT_API_VERSION.to_string(),
            token: None,
            client,
        }
    }

    pub fn with_api_version(mut self, api_version: impl Into<String>) -> Self {
        self.api_version = api_version.into();
        self
    }

    pub fn with_token(mut self, token: Option<String>) -> Self {
        self.token = token;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn collection_url(&self, namespace: &str, plural: &str) -> String {
        format!(
            "{}/apis/{}/namespaces/{}/{}",
            self.base_url, self.api_version, namespace, plural
        )
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    /// Check the status code and deserialize the body
    ///
    /// 404 and 409 are mapped to [`BackendError::NotFound`] and
    /// [`BackendError::AlreadyExists`] for the named object.
    async fn handle_response<T: DeserializeOwned>(
        &self,
        response: reqwest::Response,
        kind: &'static str,
        name: &str,
    ) -> Result<T, BackendError> {
        let status = response.status();

        match status {
            StatusCode::NOT_FOUND => {
                return Err(BackendError::NotFound {
                    kind,
                    name: name.to_string(),
                });
            }
            StatusCode::CONFLICT => {
                return Err(BackendError::AlreadyExists {
                    kind,
                    name: name.to_string(),
                });
            }
            _ => {}
        }

        if !status.is_success() {
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(BackendError::ApiError {
                status: status.as_u16(),
                message,
            });
        }

        response
            .json()
            .await
            .map_err(|e| BackendError::ParseError(format!("Failed to parse JSON response: {}", e)))
    }

    fn created(response: ObjectResponse) -> CreatedObject {
        CreatedObject {
            name: response.metadata.name,
            namespace: response.metadata.namespace,
            uid: response.metadata.uid,
        }
    }
}

#[async_trait]
impl PipelineBackend for HttpPipelineBackend {
    async fn get_pipeline_template(
        &self,
        name: &str,
        namespace: &str,
    ) -> Result<PipelineTemplate, BackendError> {
        let url = format!("{}/{}", self.collection_url(namespace, "pipelines"), name);
        let response = self.authorize(self.client.get(&url)).send().await?;

        let object: ObjectResponse = self.handle_response(response, PIPELINE_KIND, name).await?;
        Ok(PipelineTemplate {
            name: object.metadata.name,
            namespace: if object.metadata.namespace.is_empty() {
                namespace.to_string()
            } else {
                object.metadata.namespace
            },
        })
    }

    async fn create_resource_descriptor(
        &self,
        descriptor: &ResourceDescriptor,
    ) -> Result<CreatedObject, BackendError> {
        let url = self.collection_url(&descriptor.namespace, "pipelineresources");
        let body = resource_manifest(&self.api_version, descriptor);
        let response = self
            .authorize(self.client.post(&url).json(&body))
            .send()
            .await?;

        let object = self
            .handle_response(response, RESOURCE_KIND, &descriptor.name)
            .await?;
        Ok(Self::created(object))
    }

    async fn create_run_request(&self, request: &RunRequest) -> Result<CreatedObject, BackendError> {
        let url = self.collection_url(&request.namespace, "pipelineruns");
        let body = run_manifest(&self.api_version, request);
        let response = self
            .authorize(self.client.post(&url).json(&body))
            .send()
            .await?;

        let object = self.handle_response(response, RUN_KIND, &request.name).await?;
        Ok(Self::created(object))
    }
}
