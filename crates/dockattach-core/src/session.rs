//! Attach session state
//!
//! An [`AttachSession`] tracks the chosen container and process name and
//! the PIDs they resolve to. Changing either selection re-runs the PID
//! lookup. Once a target is resolved, [`AttachSession::submit_attach`]
//! persists the selections and hands the target to the launcher,
//! consuming the session.

use crate::config::ConfigResolver;
use crate::containers::list_containers;
use crate::error::{AttachError, Result};
use crate::launcher::AttachLauncher;
use crate::models::{
    AttachConfig, AttachTarget, PersistedSettings, PidQueryResult, StatusMessage,
    DEFAULT_DEBUGGER_PATH,
};
use crate::pids::resolve_pids;
use crate::runner::CommandRunner;
use crate::settings::SettingsStore;
use crate::validation::{is_blank, validate_not_empty};
use serde::Serialize;
use tracing::{debug, info, warn};

/// Collaborators a session drives
#[derive(Clone, Copy)]
pub struct SessionContext<'a> {
    pub runner: &'a dyn CommandRunner,
    pub settings: &'a dyn SettingsStore,
    pub launcher: &'a dyn AttachLauncher,
}

/// One attach workflow, from opening to submission
pub struct AttachSession<'a> {
    ctx: SessionContext<'a>,
    config: AttachConfig,
    config_status: StatusMessage,
    containers: Vec<String>,
    container: Option<String>,
    process_name: Option<String>,
    debugger_path: String,
    pids: PidQueryResult,
    selected_pid: Option<u32>,
}

/// Serializable view of a session, for display
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct SessionSnapshot {
    pub config_status: StatusMessage,
    pub containers: Vec<String>,
    pub process_names: Vec<String>,
    pub container: Option<String>,
    pub process_name: Option<String>,
    pub debugger_path: String,
    pub pids: PidQueryResult,
    pub selected_pid: Option<u32>,
    pub can_attach: bool,
    pub pid_selector_enabled: bool,
    pub process_selection_enabled: bool,
}

impl<'a> AttachSession<'a> {
    /// Open a session: load the project config, list running containers,
    /// restore the last-used selections and resolve PIDs once.
    pub fn open(ctx: SessionContext<'a>, config_resolver: &ConfigResolver) -> Self {
        let loaded = config_resolver.load();
        let containers = list_containers(ctx.runner);

        let previous = ctx.settings.load().unwrap_or_else(|e| {
            warn!(error = %e, "failed to read saved selections, starting fresh");
            PersistedSettings::default()
        });

        Self::from_parts(ctx, loaded, containers, previous)
    }

    /// Open a session from already-gathered candidates.
    ///
    /// The previous container and process are restored only if they are
    /// still candidates; otherwise the first candidate is chosen.
    pub fn from_parts(
        ctx: SessionContext<'a>,
        (config, config_status): (AttachConfig, StatusMessage),
        containers: Vec<String>,
        previous: PersistedSettings,
    ) -> Self {
        let container = previous
            .container
            .filter(|c| containers.contains(c))
            .or_else(|| containers.first().cloned());

        let process_name = previous
            .process_name
            .filter(|p| config.contains(p))
            .or_else(|| config.debuggable_process_names.first().cloned());

        let debugger_path = previous
            .debugger_path
            .unwrap_or_else(|| DEFAULT_DEBUGGER_PATH.to_string());

        let mut session = Self {
            ctx,
            config,
            config_status,
            containers,
            container,
            process_name,
            debugger_path,
            pids: PidQueryResult::NotFound,
            selected_pid: None,
        };
        session.recompute_pids();
        session
    }

    pub fn config(&self) -> &AttachConfig {
        &self.config
    }

    pub fn config_status(&self) -> &StatusMessage {
        &self.config_status
    }

    /// Running containers at the time the session was opened
    pub fn containers(&self) -> &[String] {
        &self.containers
    }

    pub fn process_names(&self) -> &[String] {
        &self.config.debuggable_process_names
    }

    pub fn container(&self) -> Option<&str> {
        self.container.as_deref()
    }

    pub fn process_name(&self) -> Option<&str> {
        self.process_name.as_deref()
    }

    pub fn debugger_path(&self) -> &str {
        &self.debugger_path
    }

    pub fn pid_result(&self) -> &PidQueryResult {
        &self.pids
    }

    pub fn selected_pid(&self) -> Option<u32> {
        self.selected_pid
    }

    /// Process selection is only offered when the config names processes
    pub fn process_selection_enabled(&self) -> bool {
        !self.config.is_empty()
    }

    /// Attach is permitted iff at least one PID is resolved
    pub fn can_attach(&self) -> bool {
        self.pids.is_found()
    }

    /// Choosing a PID only matters when there is more than one
    pub fn pid_selector_enabled(&self) -> bool {
        self.pids.pids().len() > 1
    }

    /// Select a container and re-resolve PIDs
    pub fn set_container(&mut self, container: impl Into<String>) {
        self.container = Some(container.into());
        self.recompute_pids();
    }

    /// Select a process name and re-resolve PIDs
    pub fn set_process_name(&mut self, process_name: impl Into<String>) {
        self.process_name = Some(process_name.into());
        self.recompute_pids();
    }

    /// Set the debugger binary path inside the container
    pub fn set_debugger_path(&mut self, path: impl Into<String>) {
        self.debugger_path = path.into();
    }

    /// Override the pre-selected PID with another resolved candidate
    pub fn select_pid(&mut self, pid: u32) -> Result<()> {
        if !self.pids.pids().contains(&pid) {
            return Err(AttachError::PidNotCandidate(pid));
        }
        self.selected_pid = Some(pid);
        Ok(())
    }

    /// Re-run the PID lookup for the current selections.
    ///
    /// A selection that is blank or no longer a candidate counts as unset
    /// and yields `NotFound` without running a command. On `Found` the
    /// first PID is pre-selected.
    pub fn recompute_pids(&mut self) {
        self.pids = match (self.effective_container(), self.effective_process_name()) {
            (Some(container), Some(process_name)) => {
                resolve_pids(self.ctx.runner, container, process_name)
            }
            _ => {
                debug!(
                    container = ?self.container,
                    process_name = ?self.process_name,
                    "selection incomplete, skipping PID lookup"
                );
                PidQueryResult::NotFound
            }
        };
        self.selected_pid = self.pids.pids().first().copied();
    }

    /// Capture the current state for display
    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            config_status: self.config_status.clone(),
            containers: self.containers.clone(),
            process_names: self.config.debuggable_process_names.clone(),
            container: self.container.clone(),
            process_name: self.process_name.clone(),
            debugger_path: self.debugger_path.clone(),
            pids: self.pids.clone(),
            selected_pid: self.selected_pid,
            can_attach: self.can_attach(),
            pid_selector_enabled: self.pid_selector_enabled(),
            process_selection_enabled: self.process_selection_enabled(),
        }
    }

    /// Persist the selections, then hand the target to the launcher.
    ///
    /// Fails without side effects when no PID is resolved or the debugger
    /// path is blank. A settings failure is returned as-is and the launch
    /// is not attempted.
    pub fn submit_attach(self) -> Result<AttachTarget> {
        let (container, process_name, pid) = match (
            self.effective_container(),
            self.effective_process_name(),
            self.selected_pid,
        ) {
            (Some(c), Some(p), Some(pid)) if self.can_attach() => (c, p, pid),
            _ => return Err(AttachError::AttachNotAvailable(self.pids.to_string())),
        };

        validate_not_empty(&self.debugger_path)?;

        let target = AttachTarget {
            container: container.to_string(),
            debugger_path: self.debugger_path.clone(),
            pid,
        };

        self.ctx.settings.save(&PersistedSettings {
            container: Some(target.container.clone()),
            debugger_path: Some(target.debugger_path.clone()),
            process_name: Some(process_name.to_string()),
        })?;

        info!(
            container = %target.container,
            pid = target.pid,
            debugger = %target.debugger_path,
            "attaching debugger"
        );
        self.ctx.launcher.launch(&target)?;

        Ok(target)
    }

    fn effective_container(&self) -> Option<&str> {
        self.container
            .as_deref()
            .filter(|c| !is_blank(c) && self.containers.iter().any(|known| known == c))
    }

    fn effective_process_name(&self) -> Option<&str> {
        self.process_name
            .as_deref()
            .filter(|p| !is_blank(p) && self.config.contains(p))
    }
}
