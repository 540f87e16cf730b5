//! Per-file validation failures
//!
//! Every way a namespace file can fail the gate is one variant of
//! [`Failure`], carrying the structured context needed to explain it.
//! The `Display` text is the body of the pull request comment.

use serde::Serialize;
use thiserror::Error;

use crate::core::ports::ApiError;

/// Broad category of a failure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FailureKind {
    /// Missing or malformed input (annotations, references, unreadable files)
    Input,
    /// Document could not be parsed
    Parse,
    /// Author is not allowed to own the namespace
    Authorization,
    /// Referenced repository is missing or private
    Resource,
    /// The check itself could not run
    Transport,
}

impl std::fmt::Display for FailureKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Input => write!(f, "input"),
            Self::Parse => write!(f, "parse"),
            Self::Authorization => write!(f, "authorization"),
            Self::Resource => write!(f, "resource"),
            Self::Transport => write!(f, "transport"),
        }
    }
}

/// Why a namespace file failed validation
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Failure {
    /// File could not be read from disk or fetched from the API
    #[error("Failed to read file: {reason}")]
    Unreadable {
        /// Underlying error text
        reason: String,
    },

    /// Document is not well-formed YAML
    #[error("Invalid YAML: {reason}")]
    Malformed {
        /// Parser error text
        reason: String,
    },

    /// `team` annotation absent or blank
    #[error("Team annotation is missing")]
    MissingTeam,

    /// `source-code` annotation absent or blank
    #[error("Source code repository annotation is missing")]
    MissingSourceCode,

    /// `team` is not a valid team slug
    #[error("Invalid team '{team}': only letters, digits, '-', '_' and '.' are allowed")]
    InvalidTeam {
        /// The annotation value as written
        team: String,
    },

    /// `source-code` does not name an owner and a repository
    #[error(
        "Invalid source-code format '{reference}': expected owner/repo or https://host/owner/repo"
    )]
    InvalidReference {
        /// The annotation value as written
        reference: String,
    },

    /// Author has no membership in the team (strict policy)
    #[error("@{user} is not a member of the team '{team}'")]
    NotTeamMember {
        /// PR author
        user: String,
        /// Team slug
        team: String,
    },

    /// Author's membership is not active (strict policy)
    #[error("@{user} is not an active member of the team '{team}' (membership is pending)")]
    InactiveMember {
        /// PR author
        user: String,
        /// Team slug
        team: String,
    },

    /// Author is not an active member and no team member has approved
    #[error(
        "@{user} is not a member of the team '{team}'. Waiting for LGTM from a member of team '{team}'"
    )]
    AwaitingApproval {
        /// PR author
        user: String,
        /// Team slug
        team: String,
    },

    /// Repository lookup returned 404
    #[error("Repository {repository} does not exist")]
    RepositoryNotFound {
        /// `owner/name`
        repository: String,
    },

    /// Repository exists but is private
    #[error("Repository {repository} is private. Only public repositories are allowed")]
    RepositoryPrivate {
        /// `owner/name`
        repository: String,
    },

    /// A hosting API call failed for reasons unrelated to the check
    #[error("Could not {action}: {source}")]
    Transport {
        /// What was being attempted
        action: String,
        /// The API failure
        source: ApiError,
    },
}

impl Failure {
    /// Category of this failure
    #[must_use]
    pub const fn kind(&self) -> FailureKind {
        match self {
            Self::Unreadable { .. }
            | Self::MissingTeam
            | Self::MissingSourceCode
            | Self::InvalidTeam { .. }
            | Self::InvalidReference { .. } => FailureKind::Input,
            Self::Malformed { .. } => FailureKind::Parse,
            Self::NotTeamMember { .. }
            | Self::InactiveMember { .. }
            | Self::AwaitingApproval { .. } => FailureKind::Authorization,
            Self::RepositoryNotFound { .. } | Self::RepositoryPrivate { .. } => {
                FailureKind::Resource
            },
            Self::Transport { .. } => FailureKind::Transport,
        }
    }

    /// Build a transport failure for an API call
    #[must_use]
    pub fn transport(action: impl Into<String>, source: ApiError) -> Self {
        Self::Transport {
            action: action.into(),
            source,
        }
    }
}
