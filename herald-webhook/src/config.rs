//! Service configuration
//!
//! Loaded from environment variables at startup. Anything not set falls back
//! to the defaults of a single-namespace, in-cluster install.

use std::path::{Path, PathBuf};

use herald_core::{DispatchConfig, NamingPolicy};

use crate::backend::DEFAULT_API_VERSION;

/// Header carrying the event classification on inbound webhooks
pub const DEFAULT_EVENT_HEADER: &str = "Ce-Github-Event";

/// Where Kubernetes mounts the pod's service-account credentials
pub const SERVICE_ACCOUNT_DIR: &str = "/var/run/secrets/kubernetes.io/serviceaccount";

/// Webhook service configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Address the HTTP server binds to
    pub bind_addr: String,

    /// Base URL of the pipeline backend API server
    pub backend_url: String,

    /// API group/version of the pipeline resources
    pub backend_api_version: String,

    /// Bearer token for the backend, if it requires one
    pub backend_token: Option<String>,

    /// PEM bundle used to verify the backend's TLS certificate
    pub backend_ca_cert: Option<PathBuf>,

    /// Name of the header carrying the event classification
    pub event_header: String,

    /// Settings for the submission flow
    pub dispatch: DispatchConfig,
}

impl Config {
    /// Creates a new configuration with defaults
    pub fn new(backend_url: String) -> Self {
        Self {
            bind_addr: "0.0.0.0:8080".to_string(),
            backend_url,
            backend_api_version: DEFAULT_API_VERSION.to_string(),
            backend_token: None,
            backend_ca_cert: None,
            event_header: DEFAULT_EVENT_HEADER.to_string(),
            dispatch: DispatchConfig::default(),
        }
    }

    /// Creates configuration from environment variables
    ///
    /// Recognised environment variables:
    /// - HERALD_BIND_ADDR (default: 0.0.0.0:8080)
    /// - PORT (overrides the port of the bind address)
    /// - PIPELINE_API_URL (default: https://kubernetes.default.svc)
    /// - PIPELINE_API_VERSION (default: tekton.dev/v1alpha1)
    /// - PIPELINE_API_TOKEN (default: the mounted service-account token)
    /// - PIPELINE_API_CA_CERT (default: the mounted service-account ca.crt)
    /// - DOCKER_REGISTRY_LOCATION (registry host for built images)
    /// - PIPELINE_NAMESPACE, PIPELINE_TEMPLATE, PIPELINE_TEMPLATE_NAMESPACE,
    ///   PIPELINE_SERVICE_ACCOUNT (default: default / simple-pipeline)
    /// - HERALD_EVENT_HEADER (default: Ce-Github-Event)
    /// - HERALD_UNIQUE_NAMES (optional, true/false, default: false)
    ///
    /// Inside a pod the API server rejects anonymous requests, so unless
    /// PIPELINE_API_TOKEN is set the service-account token mounted under
    /// [`SERVICE_ACCOUNT_DIR`] is used.
    pub fn from_env() -> anyhow::Result<Self> {
        let config = Self::from_lookup(|key| std::env::var(key).ok())?;
        Ok(config.with_service_account(Path::new(SERVICE_ACCOUNT_DIR)))
    }

    /// Fills in backend credentials from a service-account directory
    ///
    /// Only fields not already configured are taken; missing files are skipped.
    pub fn with_service_account(mut self, dir: &Path) -> Self {
        if self.backend_token.is_none() {
            self.backend_token = std::fs::read_to_string(dir.join("token"))
                .ok()
                .map(|token| token.trim().to_string())
                .filter(|token| !token.is_empty());
            if self.backend_token.is_some() {
                tracing::debug!("Using service-account token from {}", dir.display());
            }
        }
        if self.backend_ca_cert.is_none() {
            let ca = dir.join("ca.crt");
            if ca.is_file() {
                self.backend_ca_cert = Some(ca);
            }
        }
        self
    }

    /// Builds configuration from an arbitrary variable source
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let var = |key: &str| lookup(key).filter(|v| !v.is_empty());

        let mut config = Self::new(
            var("PIPELINE_API_URL").unwrap_or_else(|| "https://kubernetes.default.svc".to_string()),
        );

        if let Some(addr) = var("HERALD_BIND_ADDR") {
            config.bind_addr = addr;
        }
        if let Some(port) = var("PORT") {
            let port: u16 = port
                .parse()
                .map_err(|_| anyhow::anyhow!("PORT must be a port number, got {}", port))?;
            let host = config
                .bind_addr
                .rsplit_once(':')
                .map(|(host, _)| host.to_string())
                .unwrap_or_else(|| "0.0.0.0".to_string());
            config.bind_addr = format!("{}:{}", host, port);
        }
        if let Some(version) = var("PIPELINE_API_VERSION") {
            config.backend_api_version = version;
        }
        config.backend_token = var("PIPELINE_API_TOKEN");
        config.backend_ca_cert = var("PIPELINE_API_CA_CERT").map(PathBuf::from);
        if let Some(header) = var("HERALD_EVENT_HEADER") {
            config.event_header = header;
        }

        let dispatch = &mut config.dispatch;
        if let Some(registry) = var("DOCKER_REGISTRY_LOCATION") {
            dispatch.registry = registry;
        }
        if let Some(namespace) = var("PIPELINE_NAMESPACE") {
            dispatch.namespace = namespace;
        }
        if let Some(template) = var("PIPELINE_TEMPLATE") {
            dispatch.template_name = template;
        }
        if let Some(namespace) = var("PIPELINE_TEMPLATE_NAMESPACE") {
            dispatch.template_namespace = namespace;
        }
        if let Some(account) = var("PIPELINE_SERVICE_ACCOUNT") {
            dispatch.service_account = account;
        }
        if let Some(unique) = var("HERALD_UNIQUE_NAMES") {
            dispatch.naming = match unique.to_ascii_lowercase().as_str() {
                "true" | "1" | "yes" => NamingPolicy::Salted,
                "false" | "0" | "no" => NamingPolicy::Timestamp,
                other => anyhow::bail!("HERALD_UNIQUE_NAMES must be true or false, got {}", other),
            };
        }

        Ok(config)
    }

    /// Validates the configuration
    pub fn validate(&self) -> anyhow::Result<()> {
        if !self.backend_url.starts_with("http://") && !self.backend_url.starts_with("https://") {
            anyhow::bail!("backend_url must start with http:// or https://");
        }

        if self.event_header.is_empty() {
            anyhow::bail!("event_header cannot be empty");
        }

        let dispatch = &self.dispatch;
        for (field, value) in [
            ("namespace", &dispatch.namespace),
            ("template_name", &dispatch.template_name),
            ("template_namespace", &dispatch.template_namespace),
            ("service_account", &dispatch.service_account),
        ] {
            if value.is_empty() {
                anyhow::bail!("{} cannot be empty", field);
            }
        }

        if dispatch.registry.is_empty() {
            tracing::warn!("DOCKER_REGISTRY_LOCATION is not set, images will be tagged without a registry host");
        }

        Ok(())
    }
}
