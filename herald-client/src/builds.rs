//! Build submission endpoints

use herald_core::dto::build::BuildRequest;

use crate::HeraldClient;
use crate::error::{ClientError, Result};

impl HeraldClient {
    // =============================================================================
    // Builds
    // =============================================================================

    /// Submit a manual build
    ///
    /// The service accepts the request and answers once the pipeline run has
    /// been submitted (or the attempt failed). It never reports which; check
    /// the service log or the pipeline backend for the outcome.
    ///
    /// # Arguments
    /// * `req` - Repository, name and either a commit or a branch
    ///
    /// # Example
    /// ```no_run
    /// # use herald_client::HeraldClient;
    /// # use herald_core::dto::build::BuildRequest;
    /// # async fn example() -> anyhow::Result<()> {
    /// let client = HeraldClient::new("http://localhost:8080");
    /// client.submit_build(&BuildRequest {
    ///     repo_url: "https://github.com/your-org/test-project".to_string(),
    ///     commit_id: "7d84981c66718ee2dda1af280f915cc2feb6ffow".to_string(),
    ///     repo_name: "test-project".to_string(),
    ///     branch: String::new(),
    /// }).await?;
    /// # Ok(())
    /// # }
    /// ```
    pub async fn submit_build(&self, req: &BuildRequest) -> Result<()> {
        validate_build_request(req)?;

        let url = format!("{}/build", self.base_url);
        tracing::debug!("Submitting build of {} to {}", req.repo_name, url);
        let response = self.client.post(&url).json(req).send().await?;

        self.handle_empty_response(response).await
    }

    /// Check that the service is up
    pub async fn health(&self) -> Result<String> {
        let url = format!("{}/health", self.base_url);
        let response = self.client.get(&url).send().await?;

        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(ClientError::api_error(status.as_u16(), body));
        }
        Ok(body)
    }
}

fn validate_build_request(req: &BuildRequest) -> Result<()> {
    if req.repo_url.trim().is_empty() {
        return Err(ClientError::InvalidRequest(
            "Repository URL cannot be empty".to_string(),
        ));
    }

    if req.repo_name.trim().is_empty() {
        return Err(ClientError::InvalidRequest(
            "Repository name cannot be empty".to_string(),
        ));
    }

    if req.commit_id.is_empty() && req.branch.is_empty() {
        return Err(ClientError::InvalidRequest(
            "Either a commit ID or a branch is required".to_string(),
        ));
    }

    Ok(())
}
