//! Build command handler

use anyhow::Result;
use colored::*;
use herald_client::{ClientError, HeraldClient};
use herald_core::dto::build::BuildRequest;

use crate::config::Config;

/// Submit a manual build request
pub async fn submit_build(
    config: &Config,
    repo_url: String,
    repo_name: String,
    commit: Option<String>,
    branch: Option<String>,
) -> Result<()> {
    let client = HeraldClient::new(&config.herald_url);

    let req = BuildRequest {
        repo_url,
        commit_id: commit.unwrap_or_default(),
        repo_name,
        branch: branch.unwrap_or_default(),
    };

    if let Err(err) = client.submit_build(&req).await {
        if let Some(hint) = failure_hint(&err) {
            eprintln!("{}", hint.yellow());
        }
        return Err(anyhow::Error::new(err).context("Failed to submit build"));
    }

    println!("{}", "✓ Build submitted".green().bold());
    println!("  Repository: {}", req.repo_url.cyan());
    if req.commit_id.is_empty() {
        println!("  Branch:     {}", req.branch.bold());
        println!(
            "  {}",
            "No commit given: the branch head at clone time is built and tagged `latest`".yellow()
        );
    } else {
        println!("  Commit:     {}", req.commit_id.bold());
    }
    println!(
        "  {}",
        "The service does not report whether the run was created; check its log.".dimmed()
    );

    Ok(())
}

/// Extra guidance printed when a submission fails
fn failure_hint(err: &ClientError) -> Option<&'static str> {
    if err.is_server_error() {
        Some("Herald answered with a server error; its log has the details.")
    } else if matches!(err, ClientError::RequestFailed(_)) {
        Some("Herald could not be reached; check --herald-url or HERALD_URL.")
    } else {
        None
    }
}
