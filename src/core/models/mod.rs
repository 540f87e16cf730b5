//! Domain models for nsguard
//!
//! Pure data structures with no I/O dependencies.
//!
//! - [`Annotations`] - Ownership metadata pulled from a namespace file
//! - [`TeamMembership`] - What the hosting API says about a user in a team
//! - [`RepositoryRef`] - An `owner/name` pair parsed from `source-code`
//! - [`Failure`] - Why a file failed the gate
//! - [`RunReport`] - Ordered per-file outcomes of a run

mod failure;
mod membership;
mod namespace;
mod outcome;
mod pull_request;
mod repository;

pub use failure::{Failure, FailureKind};
pub use membership::{MembershipPolicy, TeamMembership};
pub use namespace::{
    Annotations, NamespaceDeclaration, NamespaceMetadata, SOURCE_CODE_ANNOTATION, TEAM_ANNOTATION,
    is_team_slug,
};
pub use outcome::{Approval, FileOutcome, RunReport, Verified};
pub use pull_request::{IssueComment, PullRequestContext, PullRequestFile, PullRequestInfo};
pub use repository::{ReferenceError, RepositoryInfo, RepositoryRef, RepositoryStatus};
