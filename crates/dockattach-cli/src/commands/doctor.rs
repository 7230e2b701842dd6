//! Doctor command implementation

use anyhow::Result;
use dockattach_core::{list_containers, load_attach_config, DockerCli, JsonSettingsStore};
use serde::Serialize;

use crate::output::OutputContext;
use crate::{ExitCode, Workspace};

#[derive(Serialize)]
struct Check {
    name: String,
    passed: bool,
    message: String,
    required: bool,
}

impl Check {
    fn new(name: &str, passed: bool, message: String, required: bool) -> Self {
        Self {
            name: name.to_string(),
            passed,
            message,
            required,
        }
    }
}

pub fn run(ws: &Workspace, ctx: &OutputContext) -> Result<ExitCode> {
    let runtime_check = check_runtime(&ws.runner);
    let runtime_ok = runtime_check.passed;

    let mut checks = vec![runtime_check];
    if runtime_ok {
        checks.push(check_containers(&ws.runner));
    }
    checks.push(check_config(ws));
    checks.push(check_settings_dir(&ws.settings));

    let all_required_passed = checks.iter().all(|c| c.passed || !c.required);

    if ctx.json {
        ctx.json(&serde_json::json!({
            "checks": checks,
            "all_passed": all_required_passed
        }))?;
    } else {
        println!("System Diagnostics");
        println!("==================");
        println!();

        for check in &checks {
            let indicator = match (check.passed, check.required, ctx.no_color) {
                (true, _, true) => "✓",
                (true, _, false) => "\x1b[32m✓\x1b[0m",
                (false, true, true) => "✗",
                (false, true, false) => "\x1b[31m✗\x1b[0m",
                (false, false, true) => "-",
                (false, false, false) => "\x1b[33m-\x1b[0m",
            };

            let required_label = if check.required { "" } else { " (optional)" };
            println!("{} {}{}: {}", indicator, check.name, required_label, check.message);
        }

        println!();
        if all_required_passed {
            ctx.success("All required checks passed");
        } else {
            ctx.error("Some required checks failed");
        }
    }

    if all_required_passed {
        Ok(ExitCode::Success)
    } else if !runtime_ok {
        Ok(ExitCode::RuntimeUnavailable)
    } else {
        Ok(ExitCode::GeneralError)
    }
}

fn check_runtime(runner: &DockerCli) -> Check {
    match runner.version() {
        Some(version) => Check::new("runtime", true, version, true),
        None => Check::new(
            "runtime",
            false,
            format!("'{}' not found or not working", runner.program()),
            true,
        ),
    }
}

fn check_containers(runner: &DockerCli) -> Check {
    let count = list_containers(runner).len();
    Check::new(
        "containers",
        count > 0,
        format!("{} running", count),
        false,
    )
}

fn check_config(ws: &Workspace) -> Check {
    let (config, status) = load_attach_config(&ws.config.config_path());
    let passed = status.is_success();
    let message = if passed {
        format!(
            "{} ({})",
            ws.config.config_path().display(),
            config.debuggable_process_names.join(", ")
        )
    } else {
        status.text
    };

    Check::new("config", passed, message, false)
}

fn check_settings_dir(settings: &JsonSettingsStore) -> Check {
    let writable = settings.is_writable();
    let state = if writable { "writable" } else { "not writable" };
    Check::new(
        "settings_dir",
        writable,
        format!("{} ({})", settings.settings_dir().display(), state),
        true,
    )
}
