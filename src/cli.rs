//! CLI definitions and entry point

use std::path::PathBuf;

use clap::Parser;

use crate::commands;
use nsguard::config::{FileConfig, Overrides, Settings};
use nsguard::core::models::MembershipPolicy;
use nsguard::core::services::ExtractorKind;
use nsguard::output::OutputMode;

/// nsguard - Namespace ownership gate for pull requests
#[derive(Parser, Debug)]
#[command(
    name = "nsguard",
    version,
    about = "Namespace ownership gate for pull requests",
    long_about = "Check changed namespace declarations in a pull request.\n\n\
                  Each file must name an owning team and a source-code repository.\n\
                  The PR author must be an active member of that team (or a member\n\
                  must comment LGTM), and the repository must exist and be public."
)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Output in JSON format (machine-readable)
    #[arg(long)]
    pub json: bool,

    /// Config file (defaults to .nsguard.toml when present)
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Read changed files from this pull request instead of the arguments
    #[arg(long, value_name = "NUMBER")]
    pub pr_number: Option<u64>,

    /// Organization that owns the teams
    #[arg(long, value_name = "ORG")]
    pub organization: Option<String>,

    /// Hosting API root
    #[arg(long, value_name = "URL")]
    pub api_url: Option<String>,

    /// What to do when the author is not a team member: lgtm, strict
    #[arg(long)]
    pub policy: Option<MembershipPolicy>,

    /// How annotations are read: structured, line-scan
    #[arg(long)]
    pub extractor: Option<ExtractorKind>,

    /// Validate and print the summary without commenting on the pull request
    #[arg(long)]
    pub dry_run: bool,

    /// Changed files (non-YAML files are skipped)
    #[arg(value_name = "FILE")]
    pub files: Vec<String>,
}

impl Cli {
    fn overrides(&self) -> Overrides {
        Overrides {
            api_url: self.api_url.clone(),
            organization: self.organization.clone(),
            pr_number: self.pr_number,
            policy: self.policy,
            extractor: self.extractor,
            files: self.files.clone(),
        }
    }
}

/// Run the CLI
///
/// Returns whether every namespace file passed.
pub fn run() -> anyhow::Result<bool> {
    let cli = Cli::parse();

    if cli.verbose {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("debug")).init();
    } else {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    }

    let output_mode = if cli.json {
        OutputMode::Json
    } else {
        OutputMode::Human
    };

    let file = FileConfig::discover(cli.config.as_deref())?;
    let settings = Settings::from_env(file, cli.overrides())?;

    commands::validate(&settings, cli.dry_run, output_mode)
}
