//! Per-file validation pipeline
//!
//! For each changed namespace file, in order:
//!
//! 1. read and extract the `team` / `source-code` annotations, and check
//!    that both are well-formed before any API call
//! 2. require the PR author to be an active team member, falling back to
//!    an LGTM from a member when the policy allows it
//! 3. require the referenced repository to exist and be public
//!
//! The first failure ends that file's checks; the next file is still
//! validated.

use std::fmt;

use crate::core::models::{
    Approval, Failure, FileOutcome, MembershipPolicy, PullRequestContext, RunReport,
    TeamMembership, Verified, is_team_slug,
};
use crate::core::ports::{HostingApi, NamespaceSource};

use super::approval::find_approval;
use super::extractor::{AnnotationExtractor, StructuredExtractor};
use super::membership::check_membership;
use super::repository::{check_repository, parse_reference};

/// Default approval token
pub const DEFAULT_APPROVAL_TOKEN: &str = "LGTM";

/// Validates namespace files against one pull request
pub struct Validator<'a> {
    api: &'a dyn HostingApi,
    source: &'a dyn NamespaceSource,
    context: &'a PullRequestContext,
    extractor: &'a dyn AnnotationExtractor,
    policy: MembershipPolicy,
    approval_token: String,
}

impl<'a> Validator<'a> {
    /// Create a validator with the structured extractor and the LGTM policy
    #[must_use]
    pub fn new(
        api: &'a dyn HostingApi,
        source: &'a dyn NamespaceSource,
        context: &'a PullRequestContext,
    ) -> Self {
        Self {
            api,
            source,
            context,
            extractor: &StructuredExtractor,
            policy: MembershipPolicy::default(),
            approval_token: DEFAULT_APPROVAL_TOKEN.to_string(),
        }
    }

    /// Use a different annotation extractor
    #[must_use]
    pub fn with_extractor(mut self, extractor: &'a dyn AnnotationExtractor) -> Self {
        self.extractor = extractor;
        self
    }

    /// Use a different membership policy
    #[must_use]
    pub fn with_policy(mut self, policy: MembershipPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Use a different approval token
    #[must_use]
    pub fn with_approval_token(mut self, token: impl Into<String>) -> Self {
        self.approval_token = token.into();
        self
    }

    /// Validate every file, in order
    #[must_use]
    pub fn run(&self, files: &[String]) -> RunReport {
        let outcomes = files.iter().map(|file| self.validate_file(file)).collect();
        RunReport { outcomes }
    }

    /// Validate a single file
    #[must_use]
    pub fn validate_file(&self, file: &str) -> FileOutcome {
        log::info!("Processing file: {file}");

        match self.verify(file) {
            Ok(verified) => {
                log::info!(
                    "{file}: team '{}' owns public repository {}",
                    verified.team,
                    verified.repository
                );
                FileOutcome::passed(file, verified)
            },
            Err(failure) => {
                log::warn!("{file}: {failure}");
                FileOutcome::failed(file, failure)
            },
        }
    }

    fn verify(&self, file: &str) -> Result<Verified, Failure> {
        let raw = self.source.read(file).map_err(|e| Failure::Unreadable {
            reason: e.to_string(),
        })?;

        let annotations = self.extractor.extract(&raw).map_err(|e| Failure::Malformed {
            reason: e.to_string(),
        })?;
        if let Some(name) = &annotations.name {
            log::debug!("{file}: namespace '{name}'");
        }

        let team = annotations.team().ok_or(Failure::MissingTeam)?;
        let source_code = annotations.source_code().ok_or(Failure::MissingSourceCode)?;
        log::debug!("{file}: team '{team}', source-code '{source_code}'");

        if !is_team_slug(team) {
            return Err(Failure::InvalidTeam {
                team: team.to_string(),
            });
        }
        let repository = parse_reference(source_code)?;

        let approval = self.authorize(team)?;
        check_repository(self.api, &repository)?;

        Ok(Verified {
            namespace: annotations.name.clone(),
            team: team.to_string(),
            repository,
            approval,
        })
    }

    fn authorize(&self, team: &str) -> Result<Approval, Failure> {
        let author = &self.context.author;
        let membership = check_membership(self.api, &self.context.organization, team, author)?;

        if membership.is_active() {
            return Ok(Approval::Member);
        }

        match self.policy {
            MembershipPolicy::Strict => Err(match membership {
                TeamMembership::Pending => Failure::InactiveMember {
                    user: author.clone(),
                    team: team.to_string(),
                },
                _ => Failure::NotTeamMember {
                    user: author.clone(),
                    team: team.to_string(),
                },
            }),
            MembershipPolicy::Lgtm => {
                match find_approval(self.api, self.context, team, &self.approval_token)? {
                    Some(approver) => Ok(Approval::Lgtm { approver }),
                    None => Err(Failure::AwaitingApproval {
                        user: author.clone(),
                        team: team.to_string(),
                    }),
                }
            },
        }
    }
}

impl fmt::Debug for Validator<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Validator")
            .field("context", self.context)
            .field("policy", &self.policy)
            .field("approval_token", &self.approval_token)
            .finish_non_exhaustive()
    }
}
