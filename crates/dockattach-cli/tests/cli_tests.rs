//! Integration tests for the dockattach CLI
//!
//! A shell script stands in for the docker CLI, so these run on unix only.
#![cfg(unix)]

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

const FAKE_DOCKER: &str = r#"#!/bin/sh
case "$1" in
  --version)
    echo "Docker version 99.0.0, build fake"
    ;;
  ps)
    printf 'web\napi\ndb\n'
    ;;
  exec)
    case "$2:$4" in
      api:dotnet) echo "1234 5678" ;;
      db:dotnet) echo "42" ;;
      web:dotnet) echo "1234 abc" ;;
    esac
    ;;
esac
"#;

struct Fixture {
    temp: TempDir,
    docker: PathBuf,
}

impl Fixture {
    fn new() -> Self {
        use std::os::unix::fs::PermissionsExt;

        let temp = TempDir::new().unwrap();
        fs::create_dir_all(temp.path().join("project")).unwrap();

        let docker = temp.path().join("docker");
        fs::write(&docker, FAKE_DOCKER).unwrap();
        fs::set_permissions(&docker, fs::Permissions::from_mode(0o755)).unwrap();

        Self { temp, docker }
    }

    fn with_config(self, contents: &str) -> Self {
        fs::write(self.config_path(), contents).unwrap();
        self
    }

    fn project_dir(&self) -> PathBuf {
        self.temp.path().join("project")
    }

    fn config_path(&self) -> PathBuf {
        self.project_dir().join("container-debug-config.json")
    }

    fn settings_dir(&self) -> PathBuf {
        self.temp.path().join("settings")
    }

    fn cmd(&self) -> Command {
        self.cmd_with_docker(&self.docker)
    }

    fn cmd_with_docker(&self, docker: &Path) -> Command {
        let mut cmd = Command::cargo_bin("dockattach").unwrap();
        cmd.env("DOCKATTACH_DOCKER", docker)
            .env("DOCKATTACH_PROJECT_DIR", self.project_dir())
            .env("DOCKATTACH_SETTINGS_HOME", self.settings_dir())
            .env("NO_COLOR", "1")
            .env_remove("RUST_LOG");
        cmd
    }
}

fn dotnet_fixture() -> Fixture {
    Fixture::new().with_config(r#"{"DebuggableProcessNames": ["dotnet", "worker"]}"#)
}

fn stdout_json(output: &std::process::Output) -> serde_json::Value {
    serde_json::from_slice(&output.stdout).unwrap()
}

#[test]
fn test_help() {
    let mut cmd = Command::cargo_bin("dockattach").unwrap();
    cmd.arg("--help").assert().success().stdout(
        predicate::str::contains("Docker container")
            .and(predicate::str::contains("containers"))
            .and(predicate::str::contains("pids"))
            .and(predicate::str::contains("attach")),
    );
}

#[test]
fn test_version() {
    let mut cmd = Command::cargo_bin("dockattach").unwrap();
    cmd.arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("dockattach"));
}

#[test]
fn test_containers_sorted() {
    let fx = Fixture::new();

    let output = fx.cmd().args(["containers", "--json"]).output().unwrap();
    assert!(output.status.success());
    assert_eq!(stdout_json(&output), serde_json::json!(["api", "db", "web"]));

    fx.cmd()
        .args(["containers"])
        .assert()
        .success()
        .stdout(predicate::str::contains("api").and(predicate::str::contains("web")));
}

#[test]
fn test_containers_runtime_missing() {
    let fx = Fixture::new();

    fx.cmd_with_docker(Path::new("/nonexistent/docker"))
        .args(["containers"])
        .assert()
        .code(20)
        .stderr(predicate::str::contains("not available"));
}

#[test]
fn test_pids_found() {
    let fx = Fixture::new();

    fx.cmd()
        .args(["pids", "api", "dotnet"])
        .assert()
        .success()
        .stdout("1234\n5678\n");

    let output = fx
        .cmd()
        .args(["pids", "api", "dotnet", "--json"])
        .output()
        .unwrap();
    let value = stdout_json(&output);
    assert_eq!(value["result"]["status"], "found");
    assert_eq!(value["result"]["pids"], serde_json::json!([1234, 5678]));
}

#[test]
fn test_pids_invalid_output() {
    let fx = Fixture::new();

    fx.cmd()
        .args(["pids", "web", "dotnet"])
        .assert()
        .code(11)
        .stderr(predicate::str::contains("Cannot find target process"));
}

#[test]
fn test_pids_not_found() {
    let fx = Fixture::new();

    let output = fx
        .cmd()
        .args(["pids", "api", "java", "--json"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(11));
    assert_eq!(stdout_json(&output)["result"]["status"], "not_found");
}

#[test]
fn test_pids_rejects_bad_container_name() {
    let fx = Fixture::new();

    fx.cmd()
        .args(["pids", "api;rm", "dotnet"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Invalid container name"));
}

#[test]
fn test_status_defaults_to_first_candidates() {
    let fx = dotnet_fixture();

    let output = fx.cmd().args(["status", "--json"]).output().unwrap();
    assert!(output.status.success());

    let value = stdout_json(&output);
    assert_eq!(value["container"], "api");
    assert_eq!(value["process_name"], "dotnet");
    assert_eq!(value["debugger_path"], "/vsdbg/vsdbg");
    assert_eq!(value["pids"]["pids"], serde_json::json!([1234, 5678]));
    assert_eq!(value["selected_pid"], 1234);
    assert_eq!(value["can_attach"], true);
    assert_eq!(value["pid_selector_enabled"], true);
}

#[test]
fn test_status_human_output() {
    let fx = dotnet_fixture();

    fx.cmd()
        .args(["status", "--container", "web"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("Configuration successfully loaded.")
                .and(predicate::str::contains("Container:    web"))
                .and(predicate::str::contains("Cannot find target process!"))
                .and(predicate::str::contains("Can attach:   no")),
        );
}

#[test]
fn test_attach_persists_and_emits_target() {
    let fx = dotnet_fixture();

    let output = fx
        .cmd()
        .args([
            "attach",
            "--container",
            "api",
            "--process",
            "dotnet",
            "--pid",
            "5678",
            "--vsdbg",
            "/vsdbg/vsdbg",
        ])
        .output()
        .unwrap();
    assert!(output.status.success());

    let launch = stdout_json(&output);
    assert_eq!(launch["type"], "coreclr");
    assert_eq!(launch["request"], "attach");
    assert_eq!(launch["processId"], 5678);
    assert_eq!(
        launch["pipeTransport"]["pipeArgs"],
        serde_json::json!(["exec", "-i", "api"])
    );
    assert_eq!(launch["pipeTransport"]["debuggerPath"], "/vsdbg/vsdbg");

    let output = fx.cmd().args(["settings", "show", "--json"]).output().unwrap();
    assert_eq!(
        stdout_json(&output)["settings"],
        serde_json::json!({
            "container": "api",
            "vsdbg": "/vsdbg/vsdbg",
            "processname": "dotnet"
        })
    );
}

#[test]
fn test_attach_warns_when_several_pids_match() {
    let fx = dotnet_fixture();

    fx.cmd()
        .args(["attach"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"processId\": 1234"))
        .stderr(predicate::str::contains("--pid"));
}

#[test]
fn test_attach_remembers_last_selection() {
    let fx = dotnet_fixture();

    fx.cmd()
        .args(["attach", "--container", "db", "--vsdbg", "/remote_debugger/vsdbg"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"processId\": 42"));

    let output = fx.cmd().args(["status", "--json"]).output().unwrap();
    let value = stdout_json(&output);
    assert_eq!(value["container"], "db");
    assert_eq!(value["debugger_path"], "/remote_debugger/vsdbg");
    assert_eq!(value["pid_selector_enabled"], false);
}

#[test]
fn test_attach_to_file() {
    let fx = dotnet_fixture();
    let out = fx.temp.path().join("launch.json");

    fx.cmd()
        .args(["attach", "--container", "db", "--output"])
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::contains("Wrote attach configuration for PID 42"));

    let launch: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&out).unwrap()).unwrap();
    assert_eq!(launch["processId"], 42);
}

#[test]
fn test_attach_invalid_pid_output() {
    let fx = dotnet_fixture();

    fx.cmd()
        .args(["attach", "--container", "web"])
        .assert()
        .code(11)
        .stderr(predicate::str::contains("Cannot find target process!"));

    // Nothing is persisted when no target resolves
    fx.cmd()
        .args(["settings", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No saved selections"));
}

#[test]
fn test_attach_rejects_unknown_pid() {
    let fx = dotnet_fixture();

    fx.cmd()
        .args(["attach", "--pid", "42"])
        .assert()
        .code(11)
        .stderr(predicate::str::contains("PID 42 is not a candidate"));
}

#[test]
fn test_attach_without_config() {
    let fx = Fixture::new();

    fx.cmd()
        .args(["attach", "--container", "api"])
        .assert()
        .code(11)
        .stderr(
            predicate::str::contains("Problem loading")
                .and(predicate::str::contains("container-debug-config.json")),
        );
}

#[test]
fn test_config_init_and_show() {
    let fx = Fixture::new();

    fx.cmd()
        .args(["config", "show"])
        .assert()
        .code(30)
        .stderr(predicate::str::contains("Problem loading"));

    fx.cmd()
        .args(["config", "init", "--process", "dotnet", "--process", "Worker.Host"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Created"));

    fx.cmd()
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("Configuration successfully loaded.")
                .and(predicate::str::contains("- Worker.Host")),
        );

    let raw = fs::read_to_string(fx.config_path()).unwrap();
    assert!(raw.contains("DebuggableProcessNames"));
}

#[test]
fn test_config_init_refuses_overwrite() {
    let fx = dotnet_fixture();

    fx.cmd()
        .args(["config", "init"])
        .assert()
        .code(30)
        .stderr(predicate::str::contains("--force"));

    fx.cmd()
        .args(["config", "init", "--force"])
        .assert()
        .success();

    let output = fx.cmd().args(["config", "show", "--json"]).output().unwrap();
    assert_eq!(
        stdout_json(&output)["process_names"],
        serde_json::json!(["dotnet"])
    );
}

#[test]
fn test_settings_clear() {
    let fx = dotnet_fixture();

    fx.cmd().args(["attach"]).assert().success();

    fx.cmd()
        .args(["settings", "clear"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Cleared"));

    fx.cmd()
        .args(["settings", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No saved selections"));
}

#[test]
fn test_corrupt_settings_do_not_block_attach_or_clear() {
    let fx = dotnet_fixture();
    fs::create_dir_all(fx.settings_dir()).unwrap();
    fs::write(fx.settings_dir().join("settings.json"), "{ truncated").unwrap();

    fx.cmd()
        .args(["attach", "--container", "db"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"processId\": 42"));

    fs::write(fx.settings_dir().join("settings.json"), "{ truncated").unwrap();
    fx.cmd().args(["settings", "clear"]).assert().success();

    fx.cmd()
        .args(["settings", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No saved selections"));
}

#[test]
fn test_doctor() {
    let fx = dotnet_fixture();

    fx.cmd()
        .args(["doctor"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("System Diagnostics")
                .and(predicate::str::contains("Docker version 99.0.0")),
        );
}

#[test]
fn test_doctor_without_runtime() {
    let fx = dotnet_fixture();

    fx.cmd_with_docker(Path::new("/nonexistent/docker"))
        .args(["doctor"])
        .assert()
        .code(20)
        .stdout(predicate::str::contains("not found or not working"));
}

#[test]
fn test_completions() {
    let fx = Fixture::new();

    fx.cmd()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("dockattach"));
}
