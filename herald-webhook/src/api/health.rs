//! Health Check API Handler
//!
//! Liveness only; the pipeline backend is not contacted.

use axum::http::StatusCode;

/// GET /health
pub async fn health_check() -> (StatusCode, &'static str) {
    (StatusCode::OK, "OK")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_health_check() {
        assert_eq!(health_check().await, (StatusCode::OK, "OK"));
    }
}
