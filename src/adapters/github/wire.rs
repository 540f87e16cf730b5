//! GitHub REST response and request bodies
//!
//! Only the fields nsguard reads are declared; everything else is ignored.

use serde::{Deserialize, Serialize};

use crate::core::models::{
    IssueComment, PullRequestFile, PullRequestInfo, RepositoryInfo, TeamMembership,
};

#[derive(Debug, Deserialize)]
pub struct MembershipRecord {
    pub state: String,
}

impl From<MembershipRecord> for TeamMembership {
    fn from(record: MembershipRecord) -> Self {
        Self::from_state(&record.state)
    }
}

#[derive(Debug, Deserialize)]
pub struct RepositoryRecord {
    #[serde(default)]
    pub full_name: String,
    #[serde(default)]
    pub private: bool,
}

impl From<RepositoryRecord> for RepositoryInfo {
    fn from(record: RepositoryRecord) -> Self {
        Self {
            full_name: record.full_name,
            private: record.private,
        }
    }
}

/// A user reference; deleted accounts come back as `null`
#[derive(Debug, Clone, Deserialize)]
pub struct UserRecord {
    pub login: String,
}

#[derive(Debug, Deserialize)]
pub struct CommentRecord {
    #[serde(default)]
    pub body: Option<String>,
    #[serde(default)]
    pub user: Option<UserRecord>,
}

impl From<CommentRecord> for IssueComment {
    fn from(record: CommentRecord) -> Self {
        Self {
            author: record.user.map(|u| u.login).unwrap_or_default(),
            body: record.body.unwrap_or_default(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct HeadRecord {
    pub sha: String,
}

#[derive(Debug, Deserialize)]
pub struct PullRecord {
    pub user: UserRecord,
    pub head: HeadRecord,
}

impl From<PullRecord> for PullRequestInfo {
    fn from(record: PullRecord) -> Self {
        Self {
            author: record.user.login,
            head_sha: record.head.sha,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct FileRecord {
    pub filename: String,
    #[serde(default)]
    pub status: String,
}

impl From<FileRecord> for PullRequestFile {
    fn from(record: FileRecord) -> Self {
        Self {
            path: record.filename,
            status: record.status,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct NewComment<'a> {
    pub body: &'a str,
}
