//! Command implementations for the CLI

pub mod attach;
pub mod completions;
pub mod config_cmd;
pub mod containers;
pub mod doctor;
pub mod pids;
pub mod settings_cmd;
pub mod status;

use dockattach_core::{
    AttachError, AttachLauncher, AttachSession, AttachTarget, SessionContext, CONFIG_FILE_NAME,
};

use crate::output::OutputContext;
use crate::Workspace;

/// Launcher for read-only commands that inspect a session without submitting it
pub(crate) struct NoLaunch;

impl AttachLauncher for NoLaunch {
    fn launch(&self, target: &AttachTarget) -> dockattach_core::Result<()> {
        Err(AttachError::Launch(format!(
            "read-only session cannot attach to PID {}",
            target.pid
        )))
    }
}

/// Open an attach session and apply explicit selections on top of the
/// restored ones, in the order a user would pick them.
pub(crate) fn open_session<'a>(
    ws: &'a Workspace,
    launcher: &'a dyn AttachLauncher,
    container: Option<&str>,
    process: Option<&str>,
    ctx: &OutputContext,
) -> AttachSession<'a> {
    let mut session = AttachSession::open(
        SessionContext {
            runner: &ws.runner,
            settings: &ws.settings,
            launcher,
        },
        &ws.config,
    );

    if let Some(container) = container {
        if !session.containers().iter().any(|c| c == container) {
            ctx.warn(&format!("Container '{}' is not running", container));
        }
        session.set_container(container);
    }

    if let Some(process) = process {
        if !session.config().contains(process) {
            ctx.warn(&format!(
                "Process '{}' is not listed in {}",
                process, CONFIG_FILE_NAME
            ));
        }
        session.set_process_name(process);
    }

    session
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_launch_refuses() {
        let target = AttachTarget {
            container: "api".to_string(),
            debugger_path: "/vsdbg/vsdbg".to_string(),
            pid: 42,
        };

        let err = NoLaunch.launch(&target).unwrap_err();
        assert!(matches!(err, AttachError::Launch(_)));
        assert!(err.to_string().contains("42"));
    }
}
