//! Hosting API port
//!
//! Defines the interface to the source-control hosting service: team
//! membership, repository metadata, pull request data, and comments.

use thiserror::Error;

use super::super::models::{
    IssueComment, PullRequestFile, PullRequestInfo, RepositoryInfo, TeamMembership,
};

/// Errors returned by a hosting API implementation
///
/// These describe the call failing, never the answer being "no": a missing
/// membership or repository is a successful call with a negative result.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// The API answered with a status the call does not accept
    #[error("unexpected status {status} from {url}")]
    Status {
        /// HTTP status code
        status: u16,
        /// Request URL
        url: String,
    },

    /// The request never produced a response
    #[error("request to {url} failed: {reason}")]
    Transport {
        /// Request URL
        url: String,
        /// Underlying error text
        reason: String,
    },

    /// The response body could not be decoded
    #[error("unreadable response from {url}: {reason}")]
    Decode {
        /// Request URL
        url: String,
        /// Decoder error text
        reason: String,
    },
}

/// Source-control hosting service
///
/// Every call is a blocking round trip. Implementations do not cache or
/// retry.
#[cfg_attr(test, mockall::automock)]
pub trait HostingApi {
    /// Membership of `user` in team `team` of organization `org`
    ///
    /// A missing membership record is `Ok(TeamMembership::NotMember)`.
    fn team_membership(&self, org: &str, team: &str, user: &str)
    -> Result<TeamMembership, ApiError>;

    /// Metadata for `owner/name`, or `None` when it does not exist
    fn repository(&self, owner: &str, name: &str) -> Result<Option<RepositoryInfo>, ApiError>;

    /// Every comment at `comments_url`, following pagination
    fn list_comments(&self, comments_url: &str) -> Result<Vec<IssueComment>, ApiError>;

    /// Create a comment at `comments_url`
    fn post_comment(&self, comments_url: &str, body: &str) -> Result<(), ApiError>;

    /// Pull request `number` of repository `repo` (`owner/name`)
    fn pull_request(&self, repo: &str, number: u64) -> Result<PullRequestInfo, ApiError>;

    /// Files changed by pull request `number`, following pagination
    fn pull_request_files(&self, repo: &str, number: u64)
    -> Result<Vec<PullRequestFile>, ApiError>;

    /// Raw content of `path` in `repo` at `git_ref`
    fn file_contents(&self, repo: &str, path: &str, git_ref: &str) -> Result<Vec<u8>, ApiError>;
}
