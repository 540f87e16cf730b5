//! Pull request comment reporting
//!
//! One comment per failed file, or a single success comment when every file
//! passed. Posting is best-effort: a comment that cannot be created is logged
//! and never changes the outcome of the run.

use crate::core::models::{Failure, RunReport};
use crate::core::ports::{ApiError, HostingApi};

/// Comment posted when every file passed
pub const SUCCESS_COMMENT: &str = "✅ All team membership and repository validations passed!";

/// Comment body for a failed file
#[must_use]
pub fn failure_comment(file: &str, failure: &Failure) -> String {
    format!("❌ Error in {file}: {failure}")
}

/// Every comment a report produces, in posting order
#[must_use]
pub fn comments_for(report: &RunReport) -> Vec<String> {
    if report.passed() {
        return vec![SUCCESS_COMMENT.to_string()];
    }
    report
        .failures()
        .map(|(file, failure)| failure_comment(file, failure))
        .collect()
}

/// Tally of a publishing pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PublishSummary {
    /// Comments created
    pub posted: usize,
    /// Comments that could not be created
    pub failed: usize,
}

/// Posts run results to a pull request
pub struct Reporter<'a> {
    api: &'a dyn HostingApi,
    comments_url: &'a str,
}

impl<'a> Reporter<'a> {
    /// Create a reporter posting to `comments_url`
    #[must_use]
    pub fn new(api: &'a dyn HostingApi, comments_url: &'a str) -> Self {
        Self { api, comments_url }
    }

    /// Post a single comment
    pub fn post(&self, body: &str) -> Result<(), ApiError> {
        self.api.post_comment(self.comments_url, body)
    }

    /// Post every comment for `report`
    pub fn publish(&self, report: &RunReport) -> PublishSummary {
        let mut summary = PublishSummary::default();
        for body in comments_for(report) {
            match self.post(&body) {
                Ok(()) => summary.posted += 1,
                Err(e) => {
                    log::warn!("Failed to post pull request comment: {e}");
                    summary.failed += 1;
                },
            }
        }
        summary
    }
}

impl std::fmt::Debug for Reporter<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Reporter")
            .field("comments_url", &self.comments_url)
            .finish_non_exhaustive()
    }
}
