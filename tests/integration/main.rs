//! Integration tests for the nsguard CLI
//!
//! Each test runs the real binary in a scratch directory against a stub
//! GitHub API, then checks the exit status, the summary and the comments
//! the run posted.

mod stub;

use std::fs;
use std::path::Path;

use assert_cmd::cargo;
use predicates::prelude::*;
use tempfile::TempDir;

use stub::{Fixture, StubGitHub};

const SUCCESS_COMMENT: &str = "✅ All team membership and repository validations passed!";

/// Helper to create an nsguard command with a clean environment
fn nsguard(dir: &Path, api: &StubGitHub) -> assert_cmd::Command {
    let mut cmd = assert_cmd::Command::new(cargo::cargo_bin!("nsguard"));
    cmd.current_dir(dir)
        .env_clear()
        .env("NO_PROXY", "127.0.0.1,localhost")
        .env("GITHUB_TOKEN", "test-token")
        .env("GITHUB_REPOSITORY_OWNER", "acme")
        .env("GITHUB_API_URL", &api.url);
    cmd
}

/// Helper to write a pull request event payload and point the command at it
fn with_event(cmd: &mut assert_cmd::Command, dir: &Path, api: &StubGitHub, author: &str) {
    let event = serde_json::json!({
        "action": "synchronize",
        "pull_request": {
            "number": 7,
            "comments_url": api.comments_url(),
            "user": { "login": author },
        },
    });
    let path = dir.join("event.json");
    fs::write(&path, event.to_string()).unwrap();
    cmd.env("GITHUB_EVENT_PATH", &path).env("GITHUB_ACTOR", author);
}

/// Helper to write a namespace declaration
fn namespace(dir: &Path, file: &str, team: Option<&str>, source: Option<&str>) {
    let mut yaml = String::from(
        "apiVersion: v1\nkind: Namespace\nmetadata:\n  name: billing\n  annotations:\n",
    );
    if let Some(team) = team {
        yaml.push_str(&format!("    team: {team}\n"));
    }
    if let Some(source) = source {
        yaml.push_str(&format!("    source-code: \"{source}\"\n"));
    }
    let path = dir.join(file);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, yaml).unwrap();
}

fn setup() -> TempDir {
    let dir = TempDir::new().unwrap();
    namespace(
        dir.path(),
        "namespaces/billing.yaml",
        Some("platform"),
        Some("https://github.com/acme/billing"),
    );
    dir
}

// =============================================================================
// Membership and repository checks
// =============================================================================

#[test]
fn test_member_with_public_repository_passes() {
    let dir = setup();
    let api = StubGitHub::start(
        Fixture::default()
            .member("platform", "alice", "active")
            .repository("acme/billing", false),
    );

    let mut cmd = nsguard(dir.path(), &api);
    with_event(&mut cmd, dir.path(), &api, "alice");
    cmd.arg("namespaces/billing.yaml")
        .assert()
        .success()
        .stdout(predicate::str::contains("PASS"))
        .stdout(predicate::str::contains("namespaces/billing.yaml"));

    assert_eq!(api.posted(), vec![SUCCESS_COMMENT.to_string()]);
}

#[test]
fn test_non_member_without_approval_fails() {
    let dir = setup();
    let api = StubGitHub::start(Fixture::default().repository("acme/billing", false));

    let mut cmd = nsguard(dir.path(), &api);
    with_event(&mut cmd, dir.path(), &api, "alice");
    cmd.arg("namespaces/billing.yaml")
        .assert()
        .code(1)
        .stdout(predicate::str::contains("FAIL"));

    let posted = api.posted();
    assert_eq!(posted.len(), 1);
    assert!(posted[0].starts_with("❌ Error in namespaces/billing.yaml:"));
    assert!(posted[0].contains("@alice is not a member of the team 'platform'"));
    assert!(posted[0].contains("Waiting for LGTM from a member of team 'platform'"));
}

#[test]
fn test_private_repository_fails() {
    let dir = setup();
    let api = StubGitHub::start(
        Fixture::default()
            .member("platform", "alice", "active")
            .repository("acme/billing", true),
    );

    let mut cmd = nsguard(dir.path(), &api);
    with_event(&mut cmd, dir.path(), &api, "alice");
    cmd.arg("namespaces/billing.yaml").assert().code(1);

    let posted = api.posted();
    assert_eq!(posted.len(), 1);
    assert!(posted[0].contains("Repository acme/billing is private"));
}

#[test]
fn test_missing_repository_fails() {
    let dir = setup();
    let api = StubGitHub::start(Fixture::default().member("platform", "alice", "active"));

    let mut cmd = nsguard(dir.path(), &api);
    with_event(&mut cmd, dir.path(), &api, "alice");
    cmd.arg("namespaces/billing.yaml").assert().code(1);

    let posted = api.posted();
    assert_eq!(posted.len(), 1);
    assert!(posted[0].contains("Repository acme/billing does not exist"));
}

#[test]
fn test_lgtm_from_team_member_approves() {
    let dir = setup();
    let api = StubGitHub::start(
        Fixture::default()
            .member("platform", "bob", "active")
            .repository("acme/billing", false)
            .comment("carol", "please take a look")
            .comment("bob", "LGTM, ship it"),
    );

    let mut cmd = nsguard(dir.path(), &api);
    with_event(&mut cmd, dir.path(), &api, "alice");
    cmd.arg("namespaces/billing.yaml")
        .assert()
        .success()
        .stdout(predicate::str::contains("approved by @bob"));

    assert_eq!(api.posted(), vec![SUCCESS_COMMENT.to_string()]);
}

#[test]
fn test_lgtm_from_outsider_is_ignored() {
    let dir = setup();
    let api = StubGitHub::start(
        Fixture::default()
            .repository("acme/billing", false)
            .comment("carol", "LGTM"),
    );

    let mut cmd = nsguard(dir.path(), &api);
    with_event(&mut cmd, dir.path(), &api, "alice");
    cmd.arg("namespaces/billing.yaml").assert().code(1);

    assert!(api.posted()[0].contains("Waiting for LGTM"));
}

#[test]
fn test_strict_policy_rejects_pending_member() {
    let dir = setup();
    let api = StubGitHub::start(
        Fixture::default()
            .member("platform", "alice", "pending")
            .repository("acme/billing", false),
    );

    let mut cmd = nsguard(dir.path(), &api);
    with_event(&mut cmd, dir.path(), &api, "alice");
    cmd.args(["--policy", "strict", "namespaces/billing.yaml"])
        .assert()
        .code(1);

    let posted = api.posted();
    assert_eq!(posted.len(), 1);
    assert!(posted[0].contains("@alice is not an active member of the team 'platform'"));
    assert!(
        !api.requests().iter().any(|r| r.ends_with("/comments") && r.starts_with("GET")),
        "strict policy never scans comments"
    );
}

#[test]
fn test_membership_lookup_error_is_reported_per_file() {
    let dir = setup();
    let api = StubGitHub::start(Fixture {
        membership_status: Some(500),
        ..Fixture::default()
    });

    let mut cmd = nsguard(dir.path(), &api);
    with_event(&mut cmd, dir.path(), &api, "alice");
    cmd.arg("namespaces/billing.yaml").assert().code(1);

    let posted = api.posted();
    assert_eq!(posted.len(), 1);
    assert!(posted[0].contains("Could not check membership of @alice in team 'platform'"));
}

// =============================================================================
// Annotation problems
// =============================================================================

#[test]
fn test_missing_team_skips_remote_checks() {
    let dir = TempDir::new().unwrap();
    namespace(dir.path(), "ns.yaml", None, Some("https://github.com/acme/billing"));
    let api = StubGitHub::start(Fixture::default());

    let mut cmd = nsguard(dir.path(), &api);
    with_event(&mut cmd, dir.path(), &api, "alice");
    cmd.arg("ns.yaml").assert().code(1);

    assert_eq!(api.posted(), vec!["❌ Error in ns.yaml: Team annotation is missing".to_string()]);
    assert!(!api.requests().iter().any(|r| r.contains("/orgs/")));
}

#[test]
fn test_missing_source_code_annotation() {
    let dir = TempDir::new().unwrap();
    namespace(dir.path(), "ns.yaml", Some("platform"), None);
    let api = StubGitHub::start(Fixture::default());

    let mut cmd = nsguard(dir.path(), &api);
    with_event(&mut cmd, dir.path(), &api, "alice");
    cmd.arg("ns.yaml").assert().code(1);

    assert_eq!(
        api.posted(),
        vec!["❌ Error in ns.yaml: Source code repository annotation is missing".to_string()]
    );
}

#[test]
fn test_malformed_reference_fails_before_any_lookup() {
    let dir = TempDir::new().unwrap();
    namespace(dir.path(), "ns.yaml", Some("platform"), Some("widgets"));
    let api = StubGitHub::start(Fixture::default().comment("bob", "LGTM"));

    let mut cmd = nsguard(dir.path(), &api);
    with_event(&mut cmd, dir.path(), &api, "alice");
    cmd.arg("ns.yaml").assert().code(1);

    assert_eq!(api.posted().len(), 1);
    assert!(api.posted()[0].contains("Invalid source-code format 'widgets'"));
    assert!(!api.requests().iter().any(|r| r.starts_with("GET")));
}

#[test]
fn test_team_slug_cannot_redirect_membership_lookup() {
    let dir = TempDir::new().unwrap();
    namespace(
        dir.path(),
        "ns.yaml",
        Some("platform/memberships/alice#"),
        Some("acme/billing"),
    );
    let api = StubGitHub::start(
        Fixture::default()
            .member("platform", "alice", "active")
            .repository("acme/billing", false),
    );

    let mut cmd = nsguard(dir.path(), &api);
    with_event(&mut cmd, dir.path(), &api, "bob");
    cmd.arg("ns.yaml").assert().code(1);

    let posted = api.posted();
    assert_eq!(posted.len(), 1);
    assert!(posted[0].contains("Invalid team 'platform/memberships/alice#'"));
    assert!(!api.requests().iter().any(|r| r.starts_with("GET")));
}

#[test]
fn test_invalid_yaml_is_a_per_file_failure() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("broken.yaml"), "metadata: [unclosed").unwrap();
    let api = StubGitHub::start(Fixture::default());

    let mut cmd = nsguard(dir.path(), &api);
    with_event(&mut cmd, dir.path(), &api, "alice");
    cmd.arg("broken.yaml").assert().code(1);

    let posted = api.posted();
    assert_eq!(posted.len(), 1);
    assert!(posted[0].starts_with("❌ Error in broken.yaml: Invalid YAML"));
}

#[test]
fn test_unreadable_file_is_a_per_file_failure() {
    let dir = TempDir::new().unwrap();
    let api = StubGitHub::start(Fixture::default());

    let mut cmd = nsguard(dir.path(), &api);
    with_event(&mut cmd, dir.path(), &api, "alice");
    cmd.arg("gone.yaml").assert().code(1);

    assert!(api.posted()[0].starts_with("❌ Error in gone.yaml: Failed to read file"));
}

// =============================================================================
// File selection and run shape
// =============================================================================

#[test]
fn test_one_comment_per_failure_and_none_for_passes() {
    let dir = setup();
    namespace(dir.path(), "namespaces/orphan.yml", None, None);
    let api = StubGitHub::start(
        Fixture::default()
            .member("platform", "alice", "active")
            .repository("acme/billing", false),
    );

    let mut cmd = nsguard(dir.path(), &api);
    with_event(&mut cmd, dir.path(), &api, "alice");
    cmd.args(["namespaces/billing.yaml", "namespaces/orphan.yml"])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("Checked 2 namespace file(s)"));

    assert_eq!(
        api.posted(),
        vec!["❌ Error in namespaces/orphan.yml: Team annotation is missing".to_string()]
    );
}

#[test]
fn test_non_yaml_files_are_skipped() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("README.md"), "# not a namespace").unwrap();
    let api = StubGitHub::start(Fixture::default());

    let mut cmd = nsguard(dir.path(), &api);
    with_event(&mut cmd, dir.path(), &api, "alice");
    cmd.args(["README.md", "Cargo.toml"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No namespace files changed"));

    assert_eq!(api.posted(), vec![SUCCESS_COMMENT.to_string()]);
}

#[test]
fn test_dry_run_posts_nothing() {
    let dir = TempDir::new().unwrap();
    namespace(dir.path(), "ns.yaml", None, None);
    let api = StubGitHub::start(Fixture::default());

    let mut cmd = nsguard(dir.path(), &api);
    with_event(&mut cmd, dir.path(), &api, "alice");
    cmd.args(["--dry-run", "ns.yaml"])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("Team annotation is missing"));

    assert!(api.posted().is_empty());
    assert!(!api.requests().iter().any(|r| r.starts_with("POST")));
}

#[test]
fn test_json_output() {
    let dir = setup();
    let api = StubGitHub::start(
        Fixture::default()
            .member("platform", "alice", "active")
            .repository("acme/billing", false),
    );

    let mut cmd = nsguard(dir.path(), &api);
    with_event(&mut cmd, dir.path(), &api, "alice");
    let output = cmd
        .args(["--json", "namespaces/billing.yaml"])
        .output()
        .unwrap();

    assert!(output.status.success());
    let summary: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(summary["pull_request"], 7);
    assert_eq!(summary["passed"], true);
    assert_eq!(summary["files_checked"], 1);
    assert_eq!(summary["files"][0]["team"], "platform");
    assert_eq!(summary["files"][0]["repository"], "acme/billing");
    assert_eq!(summary["comments"]["posted"], 1);
}

#[test]
fn test_comment_failure_does_not_change_exit_status() {
    let dir = setup();
    let api = StubGitHub::start(Fixture {
        comment_status: Some(403),
        ..Fixture::default()
            .member("platform", "alice", "active")
            .repository("acme/billing", false)
    });

    let mut cmd = nsguard(dir.path(), &api);
    with_event(&mut cmd, dir.path(), &api, "alice");
    cmd.arg("namespaces/billing.yaml")
        .assert()
        .success()
        .stdout(predicate::str::contains("1 comment(s) could not be posted"));
}

#[test]
fn test_config_file_sets_approval_token() {
    let dir = setup();
    fs::write(dir.path().join(".nsguard.toml"), "approval_token = \"/approve\"\n").unwrap();
    let api = StubGitHub::start(
        Fixture::default()
            .member("platform", "bob", "active")
            .repository("acme/billing", false)
            .comment("bob", "/approve"),
    );

    let mut cmd = nsguard(dir.path(), &api);
    with_event(&mut cmd, dir.path(), &api, "alice");
    cmd.arg("namespaces/billing.yaml").assert().success();
}

// =============================================================================
// Fatal setup errors
// =============================================================================

#[test]
fn test_malformed_event_aborts_before_commenting() {
    let dir = setup();
    let api = StubGitHub::start(Fixture::default());
    let event = dir.path().join("event.json");
    fs::write(&event, "{ not json").unwrap();

    nsguard(dir.path(), &api)
        .env("GITHUB_EVENT_PATH", &event)
        .env("GITHUB_ACTOR", "alice")
        .arg("namespaces/billing.yaml")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Failed to parse event data"));

    assert!(api.requests().is_empty());
}

#[test]
fn test_missing_event_file_aborts() {
    let dir = setup();
    let api = StubGitHub::start(Fixture::default());

    nsguard(dir.path(), &api)
        .env("GITHUB_EVENT_PATH", dir.path().join("absent.json"))
        .arg("namespaces/billing.yaml")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Failed to read event file"));

    assert!(api.requests().is_empty());
}

#[test]
fn test_missing_token_aborts() {
    let dir = setup();
    let api = StubGitHub::start(Fixture::default());

    let mut cmd = nsguard(dir.path(), &api);
    with_event(&mut cmd, dir.path(), &api, "alice");
    cmd.env_remove("GITHUB_TOKEN")
        .arg("namespaces/billing.yaml")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Missing required input: GITHUB_TOKEN"));

    assert!(api.requests().is_empty());
}
