//! CLI integration tests.

use std::fs;
use std::path::{Path, PathBuf};

use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// A scratch directory with a config pointing at a file store inside it.
struct Workspace {
    dir: TempDir,
    config: PathBuf,
}

impl Workspace {
    fn new() -> Self {
        Self::with_config(|store| {
            format!(
                "[logging]\nlevel = \"warn\"\n\n[local]\nbackend = \"file\"\npath = {:?}\n",
                store.display().to_string()
            )
        })
    }

    fn with_config(render: impl FnOnce(&Path) -> String) -> Self {
        let dir = tempfile::tempdir().expect("temp dir");
        let store = dir.path().join("store.json");
        let config = dir.path().join("quizstore.toml");
        fs::write(&config, render(&store)).expect("write config");
        Self { dir, config }
    }

    fn cmd(&self) -> Command {
        let mut cmd = cargo_bin_cmd!("quizstore");
        cmd.current_dir(self.dir.path())
            .env_remove("FIREBASE_DATABASE_URL")
            .env_remove("FIREBASE_AUTH_TOKEN")
            .env_remove("RUST_LOG")
            .arg("--config")
            .arg(&self.config);
        cmd
    }
}

#[test]
fn test_help() {
    cargo_bin_cmd!("quizstore")
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("quizstore"))
        .stdout(predicate::str::contains("watch"))
        .stdout(predicate::str::contains("questions"));
}

#[test]
fn test_version() {
    cargo_bin_cmd!("quizstore")
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("quizstore"));
}

#[test]
fn set_then_get_across_invocations() {
    let ws = Workspace::new();
    ws.cmd()
        .args(["set", "scores", r#"{"7A":12}"#])
        .assert()
        .success();

    ws.cmd()
        .args(["get", "scores", "--json"])
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""found":true"#))
        .stdout(predicate::str::contains(r#""7A":12"#));

    ws.cmd()
        .args(["exists", "scores"])
        .assert()
        .success()
        .stdout(predicate::str::contains("true"));
}

#[test]
fn json_results_carry_command_tag() {
    let ws = Workspace::new();
    ws.cmd()
        .args(["set", "k", "[1]", "--json"])
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""command":"set""#))
        .stdout(predicate::str::contains(r#""backend":"local""#));

    ws.cmd()
        .args(["exists", "k", "--json"])
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""command":"exists""#))
        .stdout(predicate::str::contains(r#""exists":true"#));
}

#[test]
fn quiet_get_prints_only_the_value() {
    let ws = Workspace::new();
    ws.cmd().args(["set", "k", r#"{"a":1}"#, "-q"]).assert().success().stdout("");

    ws.cmd()
        .args(["get", "k", "-q"])
        .assert()
        .success()
        .stdout("{\n  \"a\": 1\n}\n");
    ws.cmd().args(["get", "missing", "-q"]).assert().success().stdout("");
}

#[test]
fn remove_then_exists_is_false() {
    let ws = Workspace::new();
    ws.cmd().args(["set", "k", "1"]).assert().success();
    ws.cmd().args(["remove", "k"]).assert().success();
    ws.cmd()
        .args(["exists", "k"])
        .assert()
        .success()
        .stdout(predicate::str::contains("false"));
}

#[test]
fn set_rejects_invalid_json() {
    let ws = Workspace::new();
    ws.cmd()
        .args(["set", "k", "{not json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("JSON"));
}

#[test]
fn set_reports_quota_failure() {
    let ws = Workspace::with_config(|store| {
        format!(
            "[logging]\nlevel = \"off\"\n\n[local]\npath = {:?}\nquota_bytes = 8\n",
            store.display().to_string()
        )
    });
    ws.cmd()
        .args(["set", "k", r#""a long value""#])
        .assert()
        .failure()
        .stderr(predicate::str::contains("set 'k' failed"));
}

#[test]
fn classes_add_list_remove() {
    let ws = Workspace::new();
    ws.cmd().args(["classes", "add", " 7A "]).assert().success();
    ws.cmd().args(["classes", "add", "7A"]).assert().failure();

    ws.cmd()
        .args(["classes", "list", "--json"])
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""classes":["7A"]"#));

    ws.cmd().args(["classes", "remove", "7A"]).assert().success();
    ws.cmd()
        .args(["classes", "remove", "7A"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not found"));
}

#[test]
fn topics_list_seeds_defaults() {
    let ws = Workspace::new();
    ws.cmd()
        .args(["topics", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Algebra"));

    ws.cmd()
        .args(["topics", "add", "Trigonometry", "-d", "Angles and ratios"])
        .assert()
        .success();
    ws.cmd()
        .args(["get", "topics"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Trigonometry"));
}

#[test]
fn questions_export_and_import() {
    let ws = Workspace::new();
    ws.cmd()
        .args(["questions", "export"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("nothing to export"));

    ws.cmd().args(["questions", "reset"]).assert().success();
    let export = ws.dir.path().join("export.json");
    ws.cmd()
        .args(["questions", "export", "--output"])
        .arg(&export)
        .assert()
        .success();
    let exported = fs::read_to_string(&export).expect("export written");
    assert!(exported.trim_start().starts_with('['));

    ws.cmd().args(["questions", "clear"]).assert().success();
    ws.cmd()
        .args(["questions", "import"])
        .arg(&export)
        .assert()
        .success();
    ws.cmd()
        .args(["questions", "delete", "0"])
        .assert()
        .success();
    ws.cmd()
        .args(["questions", "delete", "999"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("out of range"));
}

#[test]
fn config_validate_reports_invalid_values() {
    let ws = Workspace::with_config(|_| "[subscription]\npoll_interval_ms = 0\n".to_string());
    ws.cmd()
        .args(["config", "validate"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("poll_interval_ms"));
}

#[test]
fn config_init_writes_template_once() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("fresh.toml");

    cargo_bin_cmd!("quizstore")
        .current_dir(dir.path())
        .args(["config", "init", "--config"])
        .arg(&path)
        .assert()
        .success();
    assert!(fs::read_to_string(&path).unwrap().contains("[subscription]"));

    cargo_bin_cmd!("quizstore")
        .current_dir(dir.path())
        .args(["config", "init", "--config"])
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));
}

#[test]
fn config_show_json_hides_token() {
    let ws = Workspace::new();
    ws.cmd()
        .env("FIREBASE_AUTH_TOKEN", "very-secret")
        .args(["config", "show", "--json"])
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""backend":"file""#))
        .stdout(predicate::str::contains("very-secret").not());
}
