//! Debugger launch handoff
//!
//! An [`AttachLauncher`] receives the resolved [`AttachTarget`] and starts
//! the debugger. The launch itself belongs to the host (an IDE, or the CLI
//! writing a launch document); this module defines the seam and the
//! document shape a coreclr debug adapter expects for attaching through
//! `docker exec`.

use crate::error::Result;
use crate::models::AttachTarget;
use serde::{Deserialize, Serialize};

/// Hands a resolved attach target to a debugger
pub trait AttachLauncher {
    /// Start debugging `target`. Nothing is returned to the session.
    fn launch(&self, target: &AttachTarget) -> Result<()>;
}

/// How the debug adapter reaches the debugger inside the container
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PipeTransport {
    pub pipe_program: String,
    pub pipe_args: Vec<String>,
    pub debugger_path: String,
    pub quote_args: bool,
}

/// Attach request document for a coreclr debug adapter
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct LaunchConfiguration {
    pub name: String,
    #[serde(rename = "type")]
    pub adapter_type: String,
    pub request: String,
    pub process_id: u32,
    pub pipe_transport: PipeTransport,
}

impl LaunchConfiguration {
    /// Build the attach document for `target`, piping through `runtime_program`.
    pub fn for_target(target: &AttachTarget, runtime_program: &str) -> Self {
        Self {
            name: format!("Attach to {} ({})", target.container, target.pid),
            adapter_type: "coreclr".to_string(),
            request: "attach".to_string(),
            process_id: target.pid,
            pipe_transport: PipeTransport {
                pipe_program: runtime_program.to_string(),
                pipe_args: vec![
                    "exec".to_string(),
                    "-i".to_string(),
                    target.container.clone(),
                ],
                debugger_path: target.debugger_path.clone(),
                quote_args: false,
            },
        }
    }
}
