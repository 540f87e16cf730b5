//! Triggering event payload
//!
//! GitHub Actions writes the webhook payload that started the workflow to
//! the file named by `GITHUB_EVENT_PATH`. For pull request events it carries
//! the comments endpoint and the PR author.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

/// Errors loading the event payload; all of them abort the run
#[derive(Debug, Error)]
pub enum EventError {
    /// The file could not be read
    #[error("Failed to read event file {path}: {source}")]
    Read {
        /// Event file path
        path: PathBuf,
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// The file is not valid JSON of the expected shape
    #[error("Failed to parse event data in {path}: {source}")]
    Parse {
        /// Event file path
        path: PathBuf,
        /// Underlying JSON error
        source: serde_json::Error,
    },

    /// The event is not about a pull request
    #[error("Event payload in {path} has no pull_request.comments_url")]
    NotPullRequest {
        /// Event file path
        path: PathBuf,
    },
}

#[derive(Debug, Deserialize)]
struct EventPayload {
    #[serde(default)]
    pull_request: Option<EventPullRequest>,
}

#[derive(Debug, Deserialize)]
struct EventPullRequest {
    #[serde(default)]
    comments_url: Option<String>,
    #[serde(default)]
    number: Option<u64>,
    #[serde(default)]
    user: Option<EventUser>,
}

#[derive(Debug, Deserialize)]
struct EventUser {
    login: String,
}

/// The pull request facts carried by an event payload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PullRequestEvent {
    /// Endpoint for listing and creating PR comments
    pub comments_url: String,
    /// Pull request number
    pub number: Option<u64>,
    /// Login of the PR author
    pub author: Option<String>,
}

/// Load the pull request event at `path`
pub fn load_event(path: &Path) -> Result<PullRequestEvent, EventError> {
    let data = fs::read(path).map_err(|source| EventError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    parse_event(path, &data)
}

fn parse_event(path: &Path, data: &[u8]) -> Result<PullRequestEvent, EventError> {
    let payload: EventPayload = serde_json::from_slice(data).map_err(|source| EventError::Parse {
        path: path.to_path_buf(),
        source,
    })?;

    let not_pull_request = || EventError::NotPullRequest {
        path: path.to_path_buf(),
    };
    let pull_request = payload.pull_request.ok_or_else(not_pull_request)?;
    let comments_url = pull_request
        .comments_url
        .filter(|url| !url.trim().is_empty())
        .ok_or_else(not_pull_request)?;

    Ok(PullRequestEvent {
        comments_url,
        number: pull_request.number,
        author: pull_request.user.map(|u| u.login),
    })
}
