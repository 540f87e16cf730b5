//! Pull request facts shared by every check in a run

/// Immutable facts about the pull request under validation
///
/// Built once at startup, read-only afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PullRequestContext {
    /// Login of the pull request author
    pub author: String,
    /// Organization that owns the teams being checked
    pub organization: String,
    /// Pull request number, when known
    pub number: Option<u64>,
    /// Endpoint used to list and create pull request comments
    pub comments_url: String,
}

/// A comment left on the pull request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssueComment {
    /// Login of the comment author
    pub author: String,
    /// Comment text
    pub body: String,
}

/// Pull request metadata needed for API-driven discovery
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PullRequestInfo {
    /// Login of the pull request author
    pub author: String,
    /// Commit SHA of the pull request head
    pub head_sha: String,
}

/// A file touched by the pull request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PullRequestFile {
    /// Repository-relative path
    pub path: String,
    /// Change status (`added`, `modified`, `removed`, ...)
    pub status: String,
}

impl PullRequestFile {
    /// Whether the file still exists at the head commit
    #[must_use]
    pub fn exists_at_head(&self) -> bool {
        self.status != "removed"
    }
}
