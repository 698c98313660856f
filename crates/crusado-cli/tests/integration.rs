#![allow(deprecated)]
use assert_cmd::Command;
use mockito::Matcher;
use predicates::prelude::*;
use tempfile::TempDir;

const STORY: &str = r#"---
name: release
summary: Cut and announce a release
type: UserStory
title: Release the next version
tasks:
  - title: Tag the release
    description: "`git tag -s vX.Y.Z`"
  - title: Write the announcement
---
Everything needed to get a release **out the door**.
"#;

const LEGACY: &str = r#"templates:
  - name: incident
    summary: Production incident follow-up
    type: Bug
    title: Incident follow-up
    description: Collect the timeline.
    tasks:
      - title: Write postmortem
  - name: spike
    type: UserStory
    title: Time-boxed investigation
"#;

fn crusado(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("crusado").unwrap();
    cmd.current_dir(dir.path())
        .env("CRUSADO_TEMPLATES_DIR", dir.path())
        .env("NO_COLOR", "1")
        .env_remove("AZURE_ORG_URL")
        .env_remove("AZURE_PAT")
        .env_remove("AZURE_PROJECT_NAME")
        .env_remove("AZURE_TEAM_NAME")
        .env_remove("RUST_LOG");
    cmd
}

fn with_templates() -> TempDir {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("release.md"), STORY).unwrap();
    std::fs::write(dir.path().join("legacy.yaml"), LEGACY).unwrap();
    dir
}

fn remote(cmd: &mut Command, server: &mockito::Server) {
    cmd.env("AZURE_ORG_URL", format!("{}/acme", server.url()))
        .env("AZURE_PAT", "pat")
        .env("AZURE_PROJECT_NAME", "Rockets");
}

/// Five sprints with the current one in the middle.
fn mock_iterations(server: &mut mockito::Server) {
    let path = "/acme/Rockets/_apis/work/teamsettings/iterations";
    server
        .mock("GET", path)
        .match_query(Matcher::UrlEncoded("$timeframe".into(), "current".into()))
        .with_body(r#"{"count":1,"value":[{"id":"s2","name":"Sprint 2","path":"Rockets\\Sprint 2"}]}"#)
        .create();

    let all: Vec<String> = (0..5)
        .map(|i| format!(r#"{{"id":"s{i}","name":"Sprint {i}","path":"Rockets\\Sprint {i}"}}"#))
        .collect();
    server
        .mock("GET", path)
        .match_query(Matcher::Regex("^api-version=7.0$".into()))
        .with_body(format!(r#"{{"count":5,"value":[{}]}}"#, all.join(",")))
        .create();
}

// ---------------------------------------------------------------------------
// crusado list
// ---------------------------------------------------------------------------

#[test]
fn list_shows_markdown_and_yaml_templates() {
    let dir = with_templates();
    crusado(&dir)
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("release"))
        .stdout(predicate::str::contains("incident"))
        .stdout(predicate::str::contains("spike"))
        .stdout(predicate::str::contains("Cut and announce a release"));
}

#[test]
fn list_json_is_sorted_by_name() {
    let dir = with_templates();
    let output = crusado(&dir)
        .args(["list", "--output", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let names: Vec<&str> = value
        .as_array()
        .unwrap()
        .iter()
        .map(|t| t["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, ["incident", "release", "spike"]);
    assert_eq!(value[1]["type"], "UserStory");
    assert_eq!(value[1]["tasks"].as_array().unwrap().len(), 2);
}

#[test]
fn list_wide_shows_task_titles() {
    let dir = with_templates();
    crusado(&dir)
        .args(["list", "-o", "wide"])
        .assert()
        .success()
        .stdout(predicate::str::contains("TASKS"))
        .stdout(predicate::str::contains("Tag the release, Write the announcement"));
}

#[test]
fn list_skips_malformed_files_with_a_warning() {
    let dir = with_templates();
    std::fs::write(dir.path().join("notes.md"), "# just notes\n").unwrap();
    crusado(&dir)
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("release"))
        .stderr(predicate::str::contains("notes.md"));
}

#[test]
fn list_fails_on_duplicate_names() {
    let dir = with_templates();
    std::fs::write(
        dir.path().join("again.md"),
        "---\nname: spike\ntype: Bug\n---\n",
    )
    .unwrap();
    crusado(&dir)
        .arg("list")
        .assert()
        .failure()
        .stderr(predicate::str::contains("'spike' exists more than once"));
}

#[test]
fn list_fails_for_missing_directory() {
    let dir = TempDir::new().unwrap();
    crusado(&dir)
        .args(["list", "--templates-dir", "does-not-exist"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("does-not-exist"));
}

// ---------------------------------------------------------------------------
// crusado show
// ---------------------------------------------------------------------------

#[test]
fn show_prints_template_overview() {
    let dir = with_templates();
    crusado(&dir)
        .args(["show", "release"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Release the next version"))
        .stdout(predicate::str::contains("Number of Tasks:  2"))
        .stdout(predicate::str::contains("  - Tag the release"));
}

#[test]
fn show_yaml_contains_rendered_description() {
    let dir = with_templates();
    crusado(&dir)
        .args(["show", "release", "-o", "yaml"])
        .assert()
        .success()
        .stdout(predicate::str::contains("<strong>out the door</strong>"));
}

#[test]
fn show_unknown_template_fails() {
    let dir = with_templates();
    crusado(&dir)
        .args(["show", "nope"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("template not found: nope"));
}

// ---------------------------------------------------------------------------
// crusado validate
// ---------------------------------------------------------------------------

#[test]
fn validate_passes_for_good_templates() {
    let dir = with_templates();
    crusado(&dir)
        .arg("validate")
        .assert()
        .success()
        .stdout(predicate::str::contains("3 templates are valid"));
}

#[test]
fn validate_reports_every_type_problem() {
    let dir = TempDir::new().unwrap();
    std::fs::write(
        dir.path().join("types.yaml"),
        "templates:\n  - name: untyped\n  - name: epic\n    type: Epic\n",
    )
    .unwrap();
    crusado(&dir)
        .arg("validate")
        .assert()
        .failure()
        .stdout(predicate::str::contains("template 'untyped': type not set"))
        .stdout(predicate::str::contains(
            "invalid type 'Epic', should be one of [UserStory, Bug]",
        ));
}

#[test]
fn validate_reports_unnamed_record() {
    let dir = TempDir::new().unwrap();
    std::fs::write(
        dir.path().join("legacy.yaml"),
        "templates:\n  - type: Bug\n  - name: kept\n    type: Bug\n",
    )
    .unwrap();
    crusado(&dir)
        .arg("validate")
        .assert()
        .failure()
        .stdout(predicate::str::contains("legacy.yaml': name not set"))
        .stdout(predicate::str::contains("[skipped]").not());
}

// ---------------------------------------------------------------------------
// crusado apply
// ---------------------------------------------------------------------------

#[test]
fn apply_requires_remote_configuration() {
    let dir = with_templates();
    crusado(&dir)
        .args(["apply", "release", "--yes"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("AZURE_ORG_URL"));
}

#[test]
fn apply_aborts_on_invalid_templates_before_remote_calls() {
    let dir = with_templates();
    std::fs::write(dir.path().join("bad.md"), "---\nname: bad\ntype: Epic\n---\n").unwrap();

    let mut server = mockito::Server::new();
    let any = server.mock("GET", Matcher::Any).expect(0).create();
    let post = server.mock("POST", Matcher::Any).expect(0).create();

    let mut cmd = crusado(&dir);
    remote(&mut cmd, &server);
    cmd.args(["apply", "release", "--yes"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid type 'Epic'"));

    any.assert();
    post.assert();
}

#[test]
fn dry_run_validates_without_creating_anything() {
    let dir = with_templates();
    let mut server = mockito::Server::new();
    mock_iterations(&mut server);

    let validated = server
        .mock("POST", Matcher::Regex(r"^/acme/Rockets/_apis/wit/workitems/\$".into()))
        .match_query(Matcher::UrlEncoded("validateOnly".into(), "true".into()))
        .with_body(r#"{"id":-1}"#)
        .expect(3)
        .create();
    let linked = server
        .mock("POST", Matcher::Any)
        .match_body(Matcher::Regex("/relations/".into()))
        .expect(0)
        .create();

    let mut cmd = crusado(&dir);
    remote(&mut cmd, &server);
    let output = cmd
        .args(["apply", "release", "--dry-run", "--yes"])
        .output()
        .unwrap();
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));

    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("Iteration Path: Rockets > Sprint 3"));
    let task_lines = stdout
        .lines()
        .filter(|l| l.contains("Task") && l.ends_with("would be created"))
        .count();
    assert_eq!(task_lines, 2);
    assert!(stdout.contains("User Story Release the next version would be created"));

    validated.assert();
    linked.assert();
}

#[test]
fn apply_links_tasks_to_the_created_story() {
    let dir = with_templates();
    let mut server = mockito::Server::new();
    mock_iterations(&mut server);

    let story = server
        .mock("POST", "/acme/Rockets/_apis/wit/workitems/$User%20Story")
        .match_query(Matcher::UrlEncoded("api-version".into(), "7.0".into()))
        .match_body(Matcher::Regex(r"Rockets\\\\Sprint 1".into()))
        .with_body(
            r#"{"id":7,"url":"https://dev.azure.com/acme/_apis/wit/workItems/7",
                "_links":{"html":{"href":"https://dev.azure.com/acme/Rockets/_workitems/edit/7"}}}"#,
        )
        .expect(1)
        .create();
    let tasks = server
        .mock("POST", "/acme/Rockets/_apis/wit/workitems/$Task")
        .match_query(Matcher::UrlEncoded("api-version".into(), "7.0".into()))
        .match_body(Matcher::Regex("workItems/7".into()))
        .with_body(r#"{"id":8,"url":"https://dev.azure.com/acme/_apis/wit/workItems/8"}"#)
        .expect(2)
        .create();

    let mut cmd = crusado(&dir);
    remote(&mut cmd, &server);
    cmd.args(["apply", "release", "-y", "-i", "-1"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "created successfully at https://dev.azure.com/acme/Rockets/_workitems/edit/7",
        ));

    story.assert();
    tasks.assert();
}

#[test]
fn apply_offset_out_of_range_fails() {
    let dir = with_templates();
    let mut server = mockito::Server::new();
    mock_iterations(&mut server);

    let mut cmd = crusado(&dir);
    remote(&mut cmd, &server);
    cmd.args(["apply", "release", "--yes", "--iteration-offset", "3"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("too far in the future"));
}

#[test]
fn declining_the_prompt_creates_nothing() {
    let dir = with_templates();
    let mut server = mockito::Server::new();
    mock_iterations(&mut server);
    let post = server.mock("POST", Matcher::Any).expect(0).create();

    let mut cmd = crusado(&dir);
    remote(&mut cmd, &server);
    cmd.args(["apply", "incident"])
        .write_stdin("n\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Bug Incident follow-up"))
        .stdout(predicate::str::contains("Write postmortem"))
        .stdout(predicate::str::contains("No work items created."));

    post.assert();
}

// ---------------------------------------------------------------------------
// crusado iterations
// ---------------------------------------------------------------------------

#[test]
fn iterations_shows_offsets() {
    let dir = with_templates();
    let mut server = mockito::Server::new();
    mock_iterations(&mut server);

    let mut cmd = crusado(&dir);
    remote(&mut cmd, &server);
    cmd.arg("iterations")
        .assert()
        .success()
        .stdout(predicate::str::contains("0 (current)"))
        .stdout(predicate::str::contains("-2"))
        .stdout(predicate::str::contains("+2"));
}
