//! Run configuration
//!
//! Settings are layered, lowest precedence first:
//!
//! 1. built-in defaults
//! 2. an optional TOML file (`.nsguard.toml` in the working directory, or
//!    the path given with `--config`)
//! 3. environment variables set by GitHub Actions
//! 4. command-line flags
//!
//! ```toml
//! # .nsguard.toml
//! organization = "acme"
//! policy = "strict"
//! extractor = "structured"
//! approval_token = "LGTM"
//! namespace_glob = "namespaces/**/*"
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use crate::adapters::github::DEFAULT_API_URL;
use crate::core::models::MembershipPolicy;
use crate::core::services::{DEFAULT_APPROVAL_TOKEN, ExtractorKind};

/// Config file looked up in the working directory
pub const CONFIG_FILE: &str = ".nsguard.toml";

/// Default location of namespace declarations for API-driven discovery
pub const DEFAULT_NAMESPACE_GLOB: &str = "namespaces/**/*";

/// Environment variable names
pub mod env {
    /// Action input: API token
    pub const INPUT_TOKEN: &str = "INPUT_GITHUB-TOKEN";
    /// Workflow token
    pub const TOKEN: &str = "GITHUB_TOKEN";
    /// Path to the triggering event payload
    pub const EVENT_PATH: &str = "GITHUB_EVENT_PATH";
    /// User that triggered the workflow
    pub const ACTOR: &str = "GITHUB_ACTOR";
    /// Action input: organization
    pub const INPUT_ORGANIZATION: &str = "INPUT_ORGANIZATION";
    /// Owner of the repository running the workflow
    pub const REPOSITORY_OWNER: &str = "GITHUB_REPOSITORY_OWNER";
    /// `owner/name` of the repository running the workflow
    pub const REPOSITORY: &str = "GITHUB_REPOSITORY";
    /// Action input: pull request number
    pub const INPUT_PR_NUMBER: &str = "INPUT_PR-NUMBER";
    /// API root (GitHub Enterprise)
    pub const API_URL: &str = "GITHUB_API_URL";
}

/// Errors resolving configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A required input has no value
    #[error("Missing required input: {0}")]
    Missing(&'static str),

    /// The pull request number is not a positive integer
    #[error("Invalid pull request number: '{0}'")]
    InvalidPrNumber(String),

    /// The repository is not of the form `owner/name`
    #[error("Invalid repository '{0}': expected owner/name")]
    InvalidRepository(String),

    /// The config file could not be read
    #[error("Failed to read config file {path}: {source}")]
    Read {
        /// Config file path
        path: PathBuf,
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// The config file is not valid TOML of the expected shape
    #[error("Failed to parse config file {path}: {source}")]
    Parse {
        /// Config file path
        path: PathBuf,
        /// Underlying TOML error
        source: toml::de::Error,
    },
}

/// Contents of a `.nsguard.toml` file
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    /// API root
    pub api_url: Option<String>,
    /// Organization owning the teams
    pub organization: Option<String>,
    /// Membership policy
    pub policy: Option<MembershipPolicy>,
    /// Annotation extractor
    pub extractor: Option<ExtractorKind>,
    /// Approval token scanned for in comments
    pub approval_token: Option<String>,
    /// Glob selecting namespace files in API-driven discovery
    pub namespace_glob: Option<String>,
}

impl FileConfig {
    /// Load a config file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Load `explicit` if given, else [`CONFIG_FILE`] if it exists, else defaults
    pub fn discover(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        match explicit {
            Some(path) => Self::load(path),
            None => {
                let path = Path::new(CONFIG_FILE);
                if path.exists() {
                    log::debug!("Loading {CONFIG_FILE}");
                    Self::load(path)
                } else {
                    Ok(Self::default())
                }
            },
        }
    }
}

/// Values given on the command line
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    /// `--api-url`
    pub api_url: Option<String>,
    /// `--organization`
    pub organization: Option<String>,
    /// `--pr-number`
    pub pr_number: Option<u64>,
    /// `--policy`
    pub policy: Option<MembershipPolicy>,
    /// `--extractor`
    pub extractor: Option<ExtractorKind>,
    /// Positional file paths
    pub files: Vec<String>,
}

/// Where changed files and PR facts come from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Discovery {
    /// Files from the command line, context from the event payload
    Event {
        /// `GITHUB_EVENT_PATH`
        event_path: PathBuf,
        /// `GITHUB_ACTOR`, when set
        actor: Option<String>,
        /// Changed files
        files: Vec<String>,
    },
    /// Files and context fetched from the hosting API
    PullRequest {
        /// `owner/name` of the repository holding the PR
        repository: String,
        /// Pull request number
        number: u64,
    },
}

/// Fully resolved settings for one run
#[derive(Clone, PartialEq, Eq)]
pub struct Settings {
    /// API root
    pub api_url: String,
    /// Bearer token
    pub token: String,
    /// Organization owning the teams
    pub organization: String,
    /// File discovery mode
    pub discovery: Discovery,
    /// Membership policy
    pub policy: MembershipPolicy,
    /// Annotation extractor
    pub extractor: ExtractorKind,
    /// Approval token scanned for in comments
    pub approval_token: String,
    /// Glob selecting namespace files in API-driven discovery
    pub namespace_glob: String,
}

impl Settings {
    /// Resolve settings from the process environment
    pub fn from_env(file: FileConfig, overrides: Overrides) -> Result<Self, ConfigError> {
        Self::resolve(file, overrides, |name| std::env::var(name).ok())
    }

    /// Resolve settings using `lookup` for environment variables
    ///
    /// Blank variables count as unset: GitHub Actions passes missing
    /// inputs as empty strings.
    pub fn resolve<F>(file: FileConfig, overrides: Overrides, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let token = var(env::INPUT_TOKEN)
            .or_else(|| var(env::TOKEN))
            .ok_or(ConfigError::Missing(env::TOKEN))?;

        let organization = overrides
            .organization
            .or_else(|| var(env::INPUT_ORGANIZATION))
            .or_else(|| var(env::REPOSITORY_OWNER))
            .or(file.organization)
            .ok_or(ConfigError::Missing(env::REPOSITORY_OWNER))?;

        let api_url = overrides
            .api_url
            .or_else(|| var(env::API_URL))
            .or(file.api_url)
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());

        let pr_number = match overrides.pr_number {
            Some(number) => Some(number),
            None => var(env::INPUT_PR_NUMBER).map(|v| parse_pr_number(&v)).transpose()?,
        };

        let discovery = match pr_number {
            Some(number) => {
                let repository = var(env::REPOSITORY).ok_or(ConfigError::Missing(env::REPOSITORY))?;
                if !is_owner_and_name(&repository) {
                    return Err(ConfigError::InvalidRepository(repository));
                }
                if !overrides.files.is_empty() {
                    log::warn!("Ignoring file arguments: files are read from pull request #{number}");
                }
                Discovery::PullRequest { repository, number }
            },
            None => Discovery::Event {
                event_path: var(env::EVENT_PATH)
                    .map(PathBuf::from)
                    .ok_or(ConfigError::Missing(env::EVENT_PATH))?,
                actor: var(env::ACTOR),
                files: overrides.files,
            },
        };

        Ok(Self {
            api_url,
            token,
            organization,
            discovery,
            policy: overrides.policy.or(file.policy).unwrap_or_default(),
            extractor: overrides.extractor.or(file.extractor).unwrap_or_default(),
            approval_token: file
                .approval_token
                .filter(|t| !t.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_APPROVAL_TOKEN.to_string()),
            namespace_glob: file
                .namespace_glob
                .unwrap_or_else(|| DEFAULT_NAMESPACE_GLOB.to_string()),
        })
    }
}

impl std::fmt::Debug for Settings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Settings")
            .field("api_url", &self.api_url)
            .field("token_present", &!self.token.is_empty())
            .field("organization", &self.organization)
            .field("discovery", &self.discovery)
            .field("policy", &self.policy)
            .field("extractor", &self.extractor)
            .field("approval_token", &self.approval_token)
            .field("namespace_glob", &self.namespace_glob)
            .finish()
    }
}

fn parse_pr_number(value: &str) -> Result<u64, ConfigError> {
    value
        .trim()
        .parse::<u64>()
        .ok()
        .filter(|n| *n > 0)
        .ok_or_else(|| ConfigError::InvalidPrNumber(value.to_string()))
}

fn is_owner_and_name(repository: &str) -> bool {
    matches!(repository.split_once('/'), Some((owner, name))
        if !owner.is_empty() && !name.is_empty() && !name.contains('/'))
}
