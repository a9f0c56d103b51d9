//! Trigger API Handlers
//!
//! Both endpoints hand the raw body to the dispatcher and answer `200 OK`
//! once it returns. Nothing about the outcome is reported to the caller.

use axum::{
    body::Bytes,
    extract::State,
    http::{HeaderMap, StatusCode},
};

use crate::api::AppState;

/// POST /
/// Handle a source-control webhook event
pub async fn handle_webhook(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> StatusCode {
    let classification = headers
        .get(&state.event_header)
        .and_then(|value| value.to_str().ok());

    tracing::debug!("Received webhook with event type {:?}", classification);

    state.dispatcher.dispatch(classification, &body).await;
    StatusCode::OK
}

/// POST /build
/// Handle a manually submitted build request
pub async fn handle_build_request(State(state): State<AppState>, body: Bytes) -> StatusCode {
    tracing::debug!("Received manual build request");

    state.dispatcher.dispatch_manual(&body).await;
    StatusCode::OK
}
