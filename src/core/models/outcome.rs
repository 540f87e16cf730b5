//! Results of a validation run

use super::{Failure, RepositoryRef};

/// How the team-membership requirement was satisfied
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Approval {
    /// The author is an active team member
    Member,
    /// An active team member commented LGTM
    Lgtm {
        /// Login of the approving team member
        approver: String,
    },
}

/// A namespace file that passed every check
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Verified {
    /// `metadata.name`, when present
    pub namespace: Option<String>,
    /// Owning team slug
    pub team: String,
    /// Public source-code repository
    pub repository: RepositoryRef,
    /// How membership was satisfied
    pub approval: Approval,
}

/// Outcome of validating one namespace file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileOutcome {
    /// Path of the file as discovered
    pub file: String,
    /// Pass details or the first failure hit
    pub result: Result<Verified, Failure>,
}

impl FileOutcome {
    /// Outcome for a file that passed
    #[must_use]
    pub fn passed(file: impl Into<String>, verified: Verified) -> Self {
        Self {
            file: file.into(),
            result: Ok(verified),
        }
    }

    /// Outcome for a file that failed
    #[must_use]
    pub fn failed(file: impl Into<String>, failure: Failure) -> Self {
        Self {
            file: file.into(),
            result: Err(failure),
        }
    }

    /// Whether the file passed
    #[must_use]
    pub const fn is_pass(&self) -> bool {
        self.result.is_ok()
    }

    /// The failure, if the file failed
    #[must_use]
    pub fn failure(&self) -> Option<&Failure> {
        self.result.as_ref().err()
    }
}

/// Ordered outcomes of one run, in discovery order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunReport {
    /// One entry per candidate file
    pub outcomes: Vec<FileOutcome>,
}

impl RunReport {
    /// Whether every file passed (vacuously true for no files)
    #[must_use]
    pub fn passed(&self) -> bool {
        self.outcomes.iter().all(FileOutcome::is_pass)
    }

    /// Number of files validated
    #[must_use]
    pub fn files_checked(&self) -> usize {
        self.outcomes.len()
    }

    /// Failed files paired with their failure, in order
    pub fn failures(&self) -> impl Iterator<Item = (&str, &Failure)> {
        self.outcomes
            .iter()
            .filter_map(|o| o.failure().map(|f| (o.file.as_str(), f)))
    }
}
