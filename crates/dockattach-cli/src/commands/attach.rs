//! Attach command implementation

use anyhow::Result;
use dockattach_core::{AttachError, AttachLauncher, AttachTarget, LaunchConfiguration};
use std::path::PathBuf;

use super::open_session;
use crate::output::OutputContext;
use crate::{ExitCode, Workspace};

/// Options given on the command line
pub struct AttachArgs {
    pub container: Option<String>,
    pub process: Option<String>,
    pub pid: Option<u32>,
    pub vsdbg: Option<String>,
    pub output: Option<PathBuf>,
}

/// Launcher that hands the target to an IDE as a coreclr attach document
pub struct LaunchConfigWriter {
    program: String,
    output: Option<PathBuf>,
}

impl LaunchConfigWriter {
    pub fn new(program: &str, output: Option<PathBuf>) -> Self {
        Self {
            program: program.to_string(),
            output,
        }
    }
}

impl AttachLauncher for LaunchConfigWriter {
    fn launch(&self, target: &AttachTarget) -> dockattach_core::Result<()> {
        let document = LaunchConfiguration::for_target(target, &self.program);
        let json = serde_json::to_string_pretty(&document)
            .map_err(|e| AttachError::Launch(e.to_string()))?;

        match &self.output {
            Some(path) => std::fs::write(path, json + "\n")?,
            None => println!("{}", json),
        }

        Ok(())
    }
}

pub fn run(ws: &Workspace, args: AttachArgs, ctx: &OutputContext) -> Result<ExitCode> {
    let launcher = LaunchConfigWriter::new(ws.runner.program(), args.output.clone());
    let mut session = open_session(
        ws,
        &launcher,
        args.container.as_deref(),
        args.process.as_deref(),
        ctx,
    );

    if !session.config_status().is_success() {
        ctx.warn(&session.config_status().text);
    }

    if session.containers().is_empty() {
        if !ws.runner.is_available() {
            ctx.error(&format!(
                "Container runtime '{}' is not available",
                ws.runner.program()
            ));
            return Ok(ExitCode::RuntimeUnavailable);
        }
        ctx.error("No running containers");
        return Ok(ExitCode::NoContainers);
    }

    if let Some(vsdbg) = args.vsdbg {
        session.set_debugger_path(vsdbg);
    }

    if !session.can_attach() {
        ctx.error(&format!(
            "{} ('{}' in container '{}')",
            session.pid_result(),
            session.process_name().unwrap_or_default(),
            session.container().unwrap_or_default()
        ));
        return Ok(ExitCode::TargetNotFound);
    }

    match args.pid {
        Some(pid) => {
            if let Err(e) = session.select_pid(pid) {
                ctx.error(&format!("{} (candidates: {})", e, session.pid_result()));
                return Ok(ExitCode::TargetNotFound);
            }
        }
        None if session.pid_selector_enabled() => {
            if let Some(pid) = session.selected_pid() {
                ctx.warn(&format!(
                    "Several processes match ({}); attaching to PID {}. Use --pid to choose",
                    session.pid_result(),
                    pid
                ));
            }
        }
        None => {}
    }

    let target = session.submit_attach()?;

    if let Some(path) = &args.output {
        if ctx.json {
            ctx.json(&target)?;
        } else {
            ctx.success(&format!(
                "Wrote attach configuration for PID {} in '{}' to {}",
                target.pid,
                target.container,
                path.display()
            ));
        }
    }

    Ok(ExitCode::Success)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_writer_emits_launch_document() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("attach.json");
        let writer = LaunchConfigWriter::new("docker", Some(path.clone()));

        writer
            .launch(&AttachTarget {
                container: "api".to_string(),
                debugger_path: "/vsdbg/vsdbg".to_string(),
                pid: 5678,
            })
            .unwrap();

        let value: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(path).unwrap()).unwrap();
        assert_eq!(value["processId"], 5678);
        assert_eq!(value["pipeTransport"]["pipeArgs"][2], "api");
    }
}
