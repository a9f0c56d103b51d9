//! Source-control webhook payloads

use serde::{Deserialize, Serialize};

/// Repository section shared by push and pull request payloads
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Repository {
    #[serde(default)]
    pub name: String,
    /// Clone/API URL, used for push events
    #[serde(default)]
    pub url: String,
    /// Browser URL, used for pull request events
    #[serde(default)]
    pub html_url: String,
}

/// Commit reference inside a push payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Commit {
    #[serde(default)]
    pub id: String,
}

/// Push event body
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PushPayload {
    #[serde(default, rename = "ref")]
    pub git_ref: String,
    pub repository: Repository,
    /// Absent for branch deletions
    #[serde(default)]
    pub head_commit: Option<Commit>,
}

/// Head of a pull request
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PullRequestHead {
    #[serde(default)]
    pub sha: String,
    #[serde(default, rename = "ref")]
    pub branch: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PullRequest {
    pub head: PullRequestHead,
}

/// Pull request event body
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PullRequestPayload {
    #[serde(default)]
    pub action: String,
    #[serde(default)]
    pub number: u64,
    pub pull_request: PullRequest,
    pub repository: Repository,
}
