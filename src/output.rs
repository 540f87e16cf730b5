//! Output formatting for human and JSON modes
//!
//! The run summary is printed to stdout, either as human-readable text or
//! machine-parseable JSON. Pull request comments are produced separately by
//! the reporter.

use colored::Colorize;
use serde::Serialize;

use crate::core::models::{Approval, FailureKind, FileOutcome, RunReport};
use crate::core::services::PublishSummary;

/// Output mode for the CLI
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputMode {
    /// Human-readable output (default)
    #[default]
    Human,
    /// JSON output (machine-readable)
    Json,
}

/// Summary of a validation run
#[derive(Debug, Serialize)]
pub struct RunSummary {
    /// Pull request number, when known
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pull_request: Option<u64>,
    /// Whether every file passed
    pub passed: bool,
    /// Number of namespace files validated
    pub files_checked: usize,
    /// Per-file results, in validation order
    pub files: Vec<FileSummary>,
    /// Comments created on the pull request (absent on dry runs)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comments: Option<CommentSummary>,
}

/// Result for a single namespace file
#[derive(Debug, Serialize)]
pub struct FileSummary {
    /// File path
    pub file: String,
    /// Whether the file passed
    pub passed: bool,
    /// Failure category, for failed files
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kind: Option<FailureKind>,
    /// Human-readable result
    pub message: String,
    /// Owning team, for passed files
    #[serde(skip_serializing_if = "Option::is_none")]
    pub team: Option<String>,
    /// Source repository, for passed files
    #[serde(skip_serializing_if = "Option::is_none")]
    pub repository: Option<String>,
    /// Approving team member, when a non-member was approved via LGTM
    #[serde(skip_serializing_if = "Option::is_none")]
    pub approved_by: Option<String>,
}

/// Comment posting tally
#[derive(Debug, Clone, Copy, Serialize)]
pub struct CommentSummary {
    /// Comments created
    pub posted: usize,
    /// Comments that could not be created
    pub failed: usize,
}

impl From<PublishSummary> for CommentSummary {
    fn from(summary: PublishSummary) -> Self {
        Self {
            posted: summary.posted,
            failed: summary.failed,
        }
    }
}

impl From<&FileOutcome> for FileSummary {
    fn from(outcome: &FileOutcome) -> Self {
        match &outcome.result {
            Ok(verified) => Self {
                file: outcome.file.clone(),
                passed: true,
                kind: None,
                message: format!(
                    "team '{}' owns public repository {}",
                    verified.team, verified.repository
                ),
                team: Some(verified.team.clone()),
                repository: Some(verified.repository.to_string()),
                approved_by: match &verified.approval {
                    Approval::Member => None,
                    Approval::Lgtm { approver } => Some(approver.clone()),
                },
            },
            Err(failure) => Self {
                file: outcome.file.clone(),
                passed: false,
                kind: Some(failure.kind()),
                message: failure.to_string(),
                team: None,
                repository: None,
                approved_by: None,
            },
        }
    }
}

impl RunSummary {
    /// Summarize a report and, unless this was a dry run, its comments
    #[must_use]
    pub fn new(report: &RunReport, comments: Option<PublishSummary>) -> Self {
        Self {
            pull_request: None,
            passed: report.passed(),
            files_checked: report.files_checked(),
            files: report.outcomes.iter().map(FileSummary::from).collect(),
            comments: comments.map(CommentSummary::from),
        }
    }

    /// Attach the pull request number
    #[must_use]
    pub const fn with_pull_request(mut self, number: Option<u64>) -> Self {
        self.pull_request = number;
        self
    }

    /// Render the summary based on output mode
    pub fn render(&self, mode: OutputMode) {
        match mode {
            OutputMode::Human => self.render_human(),
            OutputMode::Json => self.render_json(),
        }
    }

    fn render_human(&self) {
        if let Some(number) = self.pull_request {
            println!("Pull request #{number}");
        }
        if self.files_checked == 0 {
            println!("No namespace files changed.");
        } else {
            println!("Checked {} namespace file(s):\n", self.files_checked);
        }

        for f in &self.files {
            if f.passed {
                println!("  {} {}", "PASS".green().bold(), f.file);
                println!("       {}", f.message);
                if let Some(approver) = &f.approved_by {
                    println!("       approved by @{approver}");
                }
            } else {
                let kind = f.kind.map(|k| k.to_string()).unwrap_or_default();
                println!("  {} {} [{kind}]", "FAIL".red().bold(), f.file);
                println!("       {}", f.message);
            }
        }

        if let Some(comments) = &self.comments {
            println!("\nPosted {} pull request comment(s)", comments.posted);
            if comments.failed > 0 {
                println!("{}", format!("{} comment(s) could not be posted", comments.failed).yellow());
            }
        }

        println!();
        if self.passed {
            println!("{}", "All team membership and repository validations passed.".green());
        } else {
            let failed = self.files.iter().filter(|f| !f.passed).count();
            println!("{}", format!("FAILED: {failed} namespace file(s) did not validate").red());
        }
    }

    fn render_json(&self) {
        match serde_json::to_string_pretty(self) {
            Ok(json) => println!("{json}"),
            Err(e) => log::warn!("Failed to serialize run summary: {e}"),
        }
    }
}
