//! Container runtime command execution
//!
//! This module provides the [`CommandRunner`] trait and the [`DockerCli`]
//! implementation, which invokes the docker (or a compatible) CLI.
//!
//! Commands are spawned with an argument vector, never through a shell.
//! Only captured standard output is returned; callers treat missing output
//! as the failure signal and do not inspect the exit status.

use crate::error::{AttachError, Result};
use crate::validation::sanitize_for_shell;
use std::process::{Command, Stdio};
use tracing::debug;

/// Default container runtime program
pub const DEFAULT_RUNTIME_PROGRAM: &str = "docker";

/// Executes a single command against a container runtime
pub trait CommandRunner {
    /// Run the runtime with `args` and return its standard output verbatim.
    ///
    /// Blocks until the process exits. Fails only when the process could
    /// not be started.
    fn execute(&self, args: &[&str]) -> Result<String>;
}

/// Runner backed by the docker CLI
#[derive(Debug, Clone)]
pub struct DockerCli {
    program: String,
}

impl Default for DockerCli {
    fn default() -> Self {
        Self::new()
    }
}

impl DockerCli {
    /// Create a runner for the `docker` program on PATH
    pub fn new() -> Self {
        Self::with_program(DEFAULT_RUNTIME_PROGRAM)
    }

    /// Create a runner for an alternate program (e.g. `podman` or a full path)
    pub fn with_program(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    /// The runtime program this runner invokes
    pub fn program(&self) -> &str {
        &self.program
    }

    /// Check if the runtime program can be started
    pub fn is_available(&self) -> bool {
        Command::new(&self.program)
            .arg("--version")
            .stdin(Stdio::null())
            .output()
            .map(|o| o.status.success())
            .unwrap_or(false)
    }

    /// Get the runtime version string
    pub fn version(&self) -> Option<String> {
        Command::new(&self.program)
            .arg("--version")
            .stdin(Stdio::null())
            .output()
            .ok()
            .filter(|o| o.status.success())
            .map(|o| String::from_utf8_lossy(&o.stdout).trim().to_string())
    }
}

impl CommandRunner for DockerCli {
    fn execute(&self, args: &[&str]) -> Result<String> {
        let command_line = render_command_line(&self.program, args);
        debug!(command = %command_line, "executing container runtime command");

        let output = Command::new(&self.program)
            .args(args)
            .stdin(Stdio::null())
            .output()
            .map_err(|source| AttachError::Execution {
                command: command_line.clone(),
                source,
            })?;

        if !output.status.success() {
            debug!(
                command = %command_line,
                status = %output.status,
                stderr = %String::from_utf8_lossy(&output.stderr).trim(),
                "container runtime command exited unsuccessfully"
            );
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

/// Render a program and its arguments as a copy-pasteable command line.
pub fn render_command_line(program: &str, args: &[&str]) -> String {
    std::iter::once(program)
        .chain(args.iter().copied())
        .map(|part| sanitize_for_shell(part).unwrap_or_else(|_| part.escape_debug().to_string()))
        .collect::<Vec<_>>()
        .join(" ")
}
