//! Build coordinate domain type

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Short identifier substituted when no commit is known
pub const LATEST_SHORT_ID: &str = "latest";

/// Number of commit characters kept in generated artifact names
pub const SHORT_ID_LEN: usize = 7;

/// Canonical description of what to build
///
/// Produced by the normalizer from a push, pull request or manual request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildCoordinate {
    pub repository_url: String,
    pub commit_id: String,
    /// Either a prefix of `commit_id` or [`LATEST_SHORT_ID`]; never empty.
    pub short_id: String,
    pub repository_name: String,
    /// Submission time as unix seconds
    pub timestamp: String,
    pub submitted_at: DateTime<Utc>,
}

impl BuildCoordinate {
    /// Coordinate for a known commit
    pub fn for_commit(
        repository_url: impl Into<String>,
        repository_name: impl Into<String>,
        commit_id: impl Into<String>,
        submitted_at: DateTime<Utc>,
    ) -> Self {
        let commit_id = commit_id.into();
        Self {
            repository_url: repository_url.into(),
            short_id: short_id(&commit_id),
            commit_id,
            repository_name: repository_name.into(),
            timestamp: submitted_at.timestamp().to_string(),
            submitted_at,
        }
    }

    /// Coordinate for a branch with no resolved commit
    ///
    /// The branch name stands in for the revision, so whatever the branch
    /// points at when the pipeline clones it is what gets built.
    pub fn for_branch(
        repository_url: impl Into<String>,
        repository_name: impl Into<String>,
        branch: impl Into<String>,
        submitted_at: DateTime<Utc>,
    ) -> Self {
        Self {
            repository_url: repository_url.into(),
            commit_id: branch.into(),
            short_id: LATEST_SHORT_ID.to_string(),
            repository_name: repository_name.into(),
            timestamp: submitted_at.timestamp().to_string(),
            submitted_at,
        }
    }
}

/// Truncate a commit identifier to [`SHORT_ID_LEN`] characters
pub fn short_id(commit_id: &str) -> String {
    commit_id.chars().take(SHORT_ID_LEN).collect()
}
