//! Build coordinate normalizer
//!
//! Maps push, pull request and manual events onto a [`BuildCoordinate`].
//! Only presence is checked; identifiers are otherwise taken as given.

use chrono::{DateTime, Utc};

use crate::domain::coordinate::BuildCoordinate;
use crate::dto::build::BuildRequest;
use crate::dto::webhook::{PullRequestPayload, PushPayload};
use crate::error::EventError;
use crate::event::TriggerEvent;

/// Produce the build coordinate for an event submitted at `submitted_at`
pub fn normalize(
    event: &TriggerEvent,
    submitted_at: DateTime<Utc>,
) -> Result<BuildCoordinate, EventError> {
    match event {
        TriggerEvent::Push(payload) => from_push(payload, submitted_at),
        TriggerEvent::PullRequest(payload) => from_pull_request(payload, submitted_at),
        TriggerEvent::Manual(req) => from_build_request(req, submitted_at),
    }
}

fn from_push(payload: &PushPayload, submitted_at: DateTime<Utc>) -> Result<BuildCoordinate, EventError> {
    let commit = payload
        .head_commit
        .as_ref()
        .ok_or(EventError::MissingField("head_commit"))?;

    Ok(BuildCoordinate::for_commit(
        required(&payload.repository.url, "repository.url")?,
        required(&payload.repository.name, "repository.name")?,
        required(&commit.id, "head_commit.id")?,
        submitted_at,
    ))
}

fn from_pull_request(
    payload: &PullRequestPayload,
    submitted_at: DateTime<Utc>,
) -> Result<BuildCoordinate, EventError> {
    Ok(BuildCoordinate::for_commit(
        required(&payload.repository.html_url, "repository.html_url")?,
        required(&payload.repository.name, "repository.name")?,
        required(&payload.pull_request.head.sha, "pull_request.head.sha")?,
        submitted_at,
    ))
}

fn from_build_request(
    req: &BuildRequest,
    submitted_at: DateTime<Utc>,
) -> Result<BuildCoordinate, EventError> {
    let repo_url = required(&req.repo_url, "repourl")?;
    let repo_name = required(&req.repo_name, "reponame")?;

    if !req.commit_id.is_empty() {
        return Ok(BuildCoordinate::for_commit(
            repo_url,
            repo_name,
            req.commit_id.as_str(),
            submitted_at,
        ));
    }

    // TODO: resolve the branch head to a commit once the backend exposes a
    // source lookup; until then the branch name is passed through as the revision.
    let branch = required(&req.branch, "commitid or branch")?;
    Ok(BuildCoordinate::for_branch(repo_url, repo_name, branch, submitted_at))
}

fn required<'a>(value: &'a str, field: &'static str) -> Result<&'a str, EventError> {
    if value.is_empty() {
        Err(EventError::MissingField(field))
    } else {
        Ok(value)
    }
}
