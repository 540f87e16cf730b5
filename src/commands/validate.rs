//! Validate the namespace files changed by a pull request

use anyhow::Context;
use nsguard::adapters::{GitHubClient, LocalFiles, PullRequestFiles, load_event};
use nsguard::config::{ConfigError, Discovery, Settings, env};
use nsguard::core::models::PullRequestContext;
use nsguard::core::ports::{HostingApi, NamespaceSource};
use nsguard::core::services::{FileFilter, Reporter, Validator, discover};
use nsguard::output::{OutputMode, RunSummary};

/// Run every check and report to the pull request
///
/// Returns whether every file passed. Setup problems (unreadable event
/// payload, unknown pull request, missing inputs) are errors and happen
/// before any comment is posted.
pub fn validate(settings: &Settings, dry_run: bool, mode: OutputMode) -> anyhow::Result<bool> {
    log::info!("Starting validation for org {}", settings.organization);
    log::debug!("{settings:?}");

    let client = GitHubClient::new(&settings.api_url, &settings.token)?;

    match &settings.discovery {
        Discovery::Event {
            event_path,
            actor,
            files,
        } => {
            let event = load_event(event_path)?;
            let author = actor
                .clone()
                .or(event.author)
                .ok_or(ConfigError::Missing(env::ACTOR))?;
            let context = PullRequestContext {
                author,
                organization: settings.organization.clone(),
                number: event.number,
                comments_url: event.comments_url,
            };
            let source = LocalFiles::new(files.clone());

            run(&client, &source, &FileFilter::yaml_only(), &context, settings, dry_run, mode)
        },
        Discovery::PullRequest { repository, number } => {
            let pull_request = client
                .pull_request(repository, *number)
                .with_context(|| format!("Failed to get pull request #{number} of {repository}"))?;
            let context = PullRequestContext {
                author: pull_request.author.clone(),
                organization: settings.organization.clone(),
                number: Some(*number),
                comments_url: client.comments_url(repository, *number),
            };
            let source = PullRequestFiles::new(&client, repository.as_str(), *number, &pull_request);
            let filter = FileFilter::with_glob(&settings.namespace_glob)
                .with_context(|| format!("Invalid namespace glob '{}'", settings.namespace_glob))?;

            run(&client, &source, &filter, &context, settings, dry_run, mode)
        },
    }
}

fn run(
    api: &dyn HostingApi,
    source: &dyn NamespaceSource,
    filter: &FileFilter,
    context: &PullRequestContext,
    settings: &Settings,
    dry_run: bool,
    mode: OutputMode,
) -> anyhow::Result<bool> {
    match context.number {
        Some(number) => log::info!("PR #{number} author: @{}", context.author),
        None => log::info!("PR author: @{}", context.author),
    }

    let files = discover(source, filter).context("Failed to list changed files")?;

    let report = Validator::new(api, source, context)
        .with_extractor(settings.extractor.extractor())
        .with_policy(settings.policy)
        .with_approval_token(settings.approval_token.as_str())
        .run(&files);

    let comments = if dry_run {
        log::info!("Dry run: not posting pull request comments");
        None
    } else {
        Some(Reporter::new(api, &context.comments_url).publish(&report))
    };

    RunSummary::new(&report, comments)
        .with_pull_request(context.number)
        .render(mode);

    if report.passed() {
        log::info!("All validations passed!");
    }
    Ok(report.passed())
}
