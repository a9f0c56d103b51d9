//! Herald HTTP Client
//!
//! A small, typed client for the Herald webhook service, used by the CLI to
//! submit manual builds.
//!
//! # Example
//!
//! ```no_run
//! use herald_client::HeraldClient;
//! use herald_core::dto::build::BuildRequest;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let client = HeraldClient::new("http://localhost:8080");
//!
//!     client.submit_build(&BuildRequest {
//!         repo_url: "https://github.com/your-org/test-project".to_string(),
//!         repo_name: "test-project".to_string(),
//!         branch: "main".to_string(),
//!         ..Default::default()
//!     }).await?;
//!
//!     Ok(())
//! }
//! ```

mod builds;
pub mod error;

// Re-export commonly used types
pub use error::{ClientError, Result};
pub use herald_core::dto::build::BuildRequest;

use reqwest::Client;

/// HTTP client for the Herald webhook service
#[derive(Debug, Clone)]
pub struct HeraldClient {
    /// Base URL of the service (e.g., "http://localhost:8080")
    base_url: String,
    /// HTTP client instance
    client: Client,
}

impl HeraldClient {
    /// Create a new client
    ///
    /// # Arguments
    /// * `base_url` - The base URL of the Herald service (e.g., "http://localhost:8080")
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(base_url, Client::new())
    }

    /// Create a new client with a custom HTTP client
    ///
    /// This allows you to configure timeouts, proxies, TLS settings, etc.
    ///
    /// # Example
    /// ```
    /// use herald_client::HeraldClient;
    /// use reqwest::Client;
    /// use std::time::Duration;
    ///
    /// let http_client = Client::builder()
    ///     .timeout(Duration::from_secs(30))
    ///     .build()
    ///     .unwrap();
    ///
    /// let client = HeraldClient::with_client("http://localhost:8080", http_client);
    /// ```
    pub fn with_client(base_url: impl Into<String>, client: Client) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        }
    }

    /// Get the base URL of the service
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    // =============================================================================
    // Response Handlers
    // =============================================================================

    /// Handle a response that carries no content
    ///
    /// This method checks the status code and returns an error if the request failed.
    async fn handle_empty_response(&self, response: reqwest::Response) -> Result<()> {
        let status = response.status();

        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(ClientError::api_error(status.as_u16(), error_text));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation() {
        let client = HeraldClient::new("http://localhost:8080");
        assert_eq!(client.base_url(), "http://localhost:8080");
    }

    #[test]
    fn test_client_trims_trailing_slash() {
        let client = HeraldClient::new("http://localhost:8080/");
        assert_eq!(client.base_url(), "http://localhost:8080");
    }

    #[test]
    fn test_server_error_classification() {
        assert!(ClientError::api_error(502, "bad gateway").is_server_error());
        assert!(!ClientError::api_error(400, "bad request").is_server_error());
    }
}
