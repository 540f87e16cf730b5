//! Namespace file sources
//!
//! - [`LocalFiles`] - paths handed to the CLI, read from the checkout
//! - [`PullRequestFiles`] - the PR's changed-file list, fetched at its head

use std::fs;

use crate::core::models::PullRequestInfo;
use crate::core::ports::{ApiError, HostingApi, NamespaceSource, SourceError};

/// Files named on the command line
#[derive(Debug, Clone, Default)]
pub struct LocalFiles {
    paths: Vec<String>,
}

impl LocalFiles {
    /// Source over `paths`, in the given order
    #[must_use]
    pub const fn new(paths: Vec<String>) -> Self {
        Self { paths }
    }
}

impl NamespaceSource for LocalFiles {
    fn changed_files(&self) -> Result<Vec<String>, ApiError> {
        Ok(self.paths.clone())
    }

    fn read(&self, path: &str) -> Result<Vec<u8>, SourceError> {
        Ok(fs::read(path)?)
    }
}

/// Files changed by a pull request, read at its head commit
pub struct PullRequestFiles<'a> {
    api: &'a dyn HostingApi,
    repo: String,
    number: u64,
    head_sha: String,
}

impl<'a> PullRequestFiles<'a> {
    /// Source over pull request `number` of `repo` (`owner/name`)
    #[must_use]
    pub fn new(
        api: &'a dyn HostingApi,
        repo: impl Into<String>,
        number: u64,
        pull_request: &PullRequestInfo,
    ) -> Self {
        Self {
            api,
            repo: repo.into(),
            number,
            head_sha: pull_request.head_sha.clone(),
        }
    }
}

impl NamespaceSource for PullRequestFiles<'_> {
    fn changed_files(&self) -> Result<Vec<String>, ApiError> {
        let files = self.api.pull_request_files(&self.repo, self.number)?;
        Ok(files
            .into_iter()
            .filter(|f| {
                if !f.exists_at_head() {
                    log::debug!("Skipping removed file: {}", f.path);
                }
                f.exists_at_head()
            })
            .map(|f| f.path)
            .collect())
    }

    fn read(&self, path: &str) -> Result<Vec<u8>, SourceError> {
        Ok(self.api.file_contents(&self.repo, path, &self.head_sha)?)
    }
}

impl std::fmt::Debug for PullRequestFiles<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PullRequestFiles")
            .field("repo", &self.repo)
            .field("number", &self.number)
            .field("head_sha", &self.head_sha)
            .finish_non_exhaustive()
    }
}
