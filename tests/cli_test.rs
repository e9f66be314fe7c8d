// tests/cli_test.rs
mod common;

use assert_cmd::Command;
use common::{git, setup, APP_JSON};
use predicates::prelude::*;
use std::fs;

fn expo_bump() -> Command {
    Command::cargo_bin("expo-bump").expect("binary should be built")
}

#[test]
fn test_help() {
    expo_bump()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("expo-bump"))
        .stdout(predicate::str::contains("prerelease"))
        .stdout(predicate::str::contains("--android"));
}

#[test]
fn test_version() {
    expo_bump()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_unknown_release_type_is_rejected() {
    expo_bump()
        .arg("hotfix")
        .assert()
        .code(1)
        .stderr(predicate::str::starts_with("Unknown release type 'hotfix'"));
}

#[test]
fn test_usage_error_is_printed_plainly() {
    let fixture = setup(APP_JSON);
    let settings = fixture.settings_file(&["sh", "-c", "exit 0"]);
    fs::write(fixture.work.join("scratch.txt"), "untracked\n").unwrap();

    expo_bump()
        .current_dir(&fixture.work)
        .args(["minor", "--config", settings.to_str().unwrap()])
        .assert()
        .code(1)
        .stderr(predicate::str::starts_with(
            "You have uncommited changes! Commit them before running this script",
        ));

    assert_eq!(fixture.app_json(), APP_JSON);
}

#[test]
fn test_missing_settings_file_fails() {
    let fixture = setup(APP_JSON);
    expo_bump()
        .current_dir(&fixture.work)
        .args(["--config", "/nonexistent/expobump.toml"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Error loading settings"));
}

#[cfg(unix)]
#[test]
fn test_publish_flag_releases_without_prompt() {
    let fixture = setup(APP_JSON);
    let settings = fixture.settings_file(&["sh", "-c", "exit 0"]);

    expo_bump()
        .current_dir(&fixture.work)
        .args(["patch", "--android", "--ios", "--publish"])
        .args(["--config", settings.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("Version bumped from 2.0.0 to 2.0.1"));

    assert!(fixture.remote_ref("refs/tags/2.0.1").is_some());
    assert_eq!(fixture.remote_ref("refs/heads/master"), Some(fixture.head()));
    let json = fixture.app_json();
    assert!(json.contains("\"version\": \"2.0.2-pre\""));
    assert!(json.contains("\"versionCode\": 6"));
    assert!(json.contains("\"buildNumber\": \"2.0.1\""));
}

#[cfg(unix)]
#[test]
fn test_declining_prompt_reverts_and_exits_zero() {
    let fixture = setup(APP_JSON);
    let settings = fixture.settings_file(&["sh", "-c", "exit 0"]);

    expo_bump()
        .current_dir(&fixture.work)
        .args(["minor", "--config", settings.to_str().unwrap()])
        .write_stdin("n\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Changes reverted"));

    assert_eq!(fixture.local_tag("2.1.0"), None);
    assert_eq!(fixture.head(), fixture.initial);
    assert_eq!(fixture.app_json(), APP_JSON);
}

#[cfg(unix)]
#[test]
fn test_failing_publish_exits_non_zero() {
    let fixture = setup(APP_JSON);
    let settings = fixture.settings_file(&["sh", "-c", "exit 7"]);

    expo_bump()
        .current_dir(&fixture.work)
        .args(["minor", "--config", settings.to_str().unwrap()])
        .write_stdin("y\n")
        .assert()
        .code(1)
        .stdout(predicate::str::contains("Changes reverted"))
        .stderr(predicate::str::contains("exited with code 7"));

    assert_eq!(fixture.local_tag("2.1.0"), None);
    assert_eq!(fixture.head(), fixture.initial);
    assert_eq!(git(&fixture.work, &["status", "--porcelain"]), "");
}

#[cfg(unix)]
#[test]
fn test_closed_stdin_is_treated_as_failure() {
    let fixture = setup(APP_JSON);
    let settings = fixture.settings_file(&["sh", "-c", "exit 0"]);

    expo_bump()
        .current_dir(&fixture.work)
        .args(["minor", "--config", settings.to_str().unwrap()])
        .write_stdin("")
        .assert()
        .code(1);

    assert_eq!(fixture.local_tag("2.1.0"), None);
    assert!(fixture.remote_ref("refs/tags/2.1.0").is_none());
}
