//! API Module
//!
//! HTTP surface of the webhook service.

pub mod health;
pub mod webhook;

use axum::{
    Router,
    http::HeaderName,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;

use crate::service::Dispatcher;

/// Shared state handed to every handler
#[derive(Clone)]
pub struct AppState {
    pub dispatcher: Dispatcher,
    /// Header carrying the event classification
    pub event_header: HeaderName,
}

/// Create the main API router with all endpoints
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Health check
        .route("/health", get(health::health_check))
        // Trigger endpoints
        .route("/", post(webhook::handle_webhook))
        .route("/build", post(webhook::handle_build_request))
        // Add state and middleware
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}
