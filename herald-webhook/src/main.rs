//! Herald Webhook Service
//!
//! Receives build-trigger events over HTTP and submits a pipeline run for
//! each one to the pipeline backend.
//!
//! Architecture:
//! - API: axum routes for webhooks, manual build requests and health
//! - Service: dispatch flow (normalize, resolve template, generate resources, submit)
//! - Backend: port to the pipeline catalog and its HTTP implementation

use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use axum::http::HeaderName;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

pub mod api;
pub mod backend;
pub mod config;
pub mod service;

#[cfg(test)]
mod testing;

use crate::api::AppState;
use crate::backend::HttpPipelineBackend;
use crate::config::Config;
use crate::service::Dispatcher;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "herald_webhook=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Herald webhook service...");

    let config = Config::from_env().context("Failed to load configuration")?;
    config.validate()?;

    let backend = match &config.backend_ca_cert {
        Some(ca) => HttpPipelineBackend::with_client(config.backend_url.clone(), tls_client(ca)?),
        None => HttpPipelineBackend::new(config.backend_url.clone()),
    };
    let backend = backend
        .with_api_version(config.backend_api_version.clone())
        .with_token(config.backend_token.clone());

    tracing::info!(
        "Pipeline backend at {} ({}), template {} in namespace {}",
        backend.base_url(),
        config.backend_api_version,
        config.dispatch.template_name,
        config.dispatch.template_namespace
    );

    let event_header = HeaderName::from_bytes(config.event_header.as_bytes())
        .with_context(|| format!("Invalid event header name: {}", config.event_header))?;

    let state = AppState {
        dispatcher: Dispatcher::new(Arc::new(backend), config.dispatch.clone()),
        event_header,
    };

    // Build router with all API endpoints
    let app = api::create_router(state);

    tracing::info!("Listening on {}", config.bind_addr);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr)
        .await
        .with_context(|| format!("Failed to bind to {}", config.bind_addr))?;

    axum::serve(listener, app)
        .await
        .context("Failed to start server")?;

    Ok(())
}

/// HTTP client trusting the given PEM bundle in addition to the system roots
fn tls_client(ca: &Path) -> Result<reqwest::Client> {
    let pem = std::fs::read(ca).with_context(|| format!("Failed to read CA bundle {}", ca.display()))?;
    let cert = reqwest::Certificate::from_pem(&pem)
        .with_context(|| format!("Invalid CA bundle {}", ca.display()))?;
    reqwest::Client::builder()
        .add_root_certificate(cert)
        .build()
        .context("Failed to build HTTP client")
}
