//! Adapter implementations for port traits
//!
//! This module contains concrete implementations that handle I/O:
//!
//! - `github/` - GitHub REST client implementing `HostingApi`
//! - `source` - Local and pull-request-backed `NamespaceSource`s
//! - `event` - GitHub Actions event payload loading

pub mod event;
pub mod github;
pub mod source;

pub use event::{EventError, PullRequestEvent, load_event};
pub use github::GitHubClient;
pub use source::{LocalFiles, PullRequestFiles};
