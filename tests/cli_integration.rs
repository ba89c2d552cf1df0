use assert_cmd::Command;
use predicates::prelude::*;

fn cmsctl(config_dir: &std::path::Path) -> Command {
    let mut cmd = Command::cargo_bin("cmsctl").unwrap();
    cmd.env("CMSCTL_CONFIG_DIR", config_dir);
    cmd
}

#[test]
fn test_no_args_prints_help() {
    let mut cmd = Command::cargo_bin("cmsctl").unwrap();
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Usage:"))
        .stdout(predicate::str::contains("login"));
}

#[test]
fn test_unknown_command_fails() {
    let mut cmd = Command::cargo_bin("cmsctl").unwrap();
    cmd.arg("frobnicate").assert().failure();
}

#[test]
fn test_set_then_get_round_trips() {
    let tmp = tempfile::tempdir().unwrap();

    cmsctl(tmp.path())
        .args(["set", "editor", "nano"])
        .assert()
        .success();

    cmsctl(tmp.path())
        .args(["get", "editor"])
        .assert()
        .success()
        .stdout(predicate::str::contains("nano"));

    // Settings land in a pretty-printed settings.json.
    let settings = std::fs::read_to_string(tmp.path().join("settings.json")).unwrap();
    assert!(settings.contains("    \"editor\": \"nano\""));
}

#[test]
fn test_get_unset_key_succeeds_with_no_output() {
    let tmp = tempfile::tempdir().unwrap();

    cmsctl(tmp.path())
        .args(["get", "editor"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty());
}

#[test]
fn test_resource_commands_require_login() {
    let tmp = tempfile::tempdir().unwrap();

    cmsctl(tmp.path())
        .args(["content", "ls"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Not logged in"));
}

#[test]
fn test_use_requires_login() {
    let tmp = tempfile::tempdir().unwrap();

    cmsctl(tmp.path())
        .args(["use", "site", "live"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Not logged in"));
}

#[test]
fn test_edit_requires_project_selection() {
    let tmp = tempfile::tempdir().unwrap();
    std::fs::write(
        tmp.path().join("session.json"),
        r#"{"host": "https://cms.example.com", "token": "tok"}"#,
    )
    .unwrap();

    cmsctl(tmp.path())
        .args(["schema", "edit", "42"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Project and environment not set"));
}

#[test]
fn test_use_persists_project_and_environment() {
    let tmp = tempfile::tempdir().unwrap();
    std::fs::write(
        tmp.path().join("session.json"),
        r#"{"host": "https://cms.example.com", "token": "tok"}"#,
    )
    .unwrap();

    cmsctl(tmp.path())
        .args(["use", "site", "live"])
        .assert()
        .success();

    let session = std::fs::read_to_string(tmp.path().join("session.json")).unwrap();
    let value: serde_json::Value = serde_json::from_str(&session).unwrap();
    assert_eq!(value["project"], "site");
    assert_eq!(value["environment"], "live");
    assert_eq!(value["host"], "https://cms.example.com");
}

#[test]
fn test_content_new_without_schema_is_a_usage_error() {
    let tmp = tempfile::tempdir().unwrap();

    cmsctl(tmp.path())
        .args(["content", "new"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("content new <schema>"));
}
