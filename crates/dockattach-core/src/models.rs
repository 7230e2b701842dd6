//! Data models for dockattach

use serde::{Deserialize, Serialize};

/// Debugger binary path used when none has been persisted
pub const DEFAULT_DEBUGGER_PATH: &str = "/vsdbg/vsdbg";

/// Shown in place of PIDs when the lookup found nothing usable
pub const TARGET_NOT_FOUND_MESSAGE: &str = "Cannot find target process!";

/// Which processes may be attached to, as read from the project config file
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct AttachConfig {
    /// Process names offered as attach candidates, in file order
    #[serde(
        rename = "DebuggableProcessNames",
        alias = "debuggableProcessNames",
        alias = "debuggableprocessnames",
        default
    )]
    pub debuggable_process_names: Vec<String>,
}

impl AttachConfig {
    /// Create a config from a list of process names
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            debuggable_process_names: names.into_iter().map(Into::into).collect(),
        }
    }

    /// True when no process name is configured
    pub fn is_empty(&self) -> bool {
        self.debuggable_process_names.is_empty()
    }

    /// Check if a process name is one of the configured candidates
    pub fn contains(&self, name: &str) -> bool {
        self.debuggable_process_names.iter().any(|n| n == name)
    }
}

/// Outcome kind of loading the config file
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum StatusKind {
    Success,
    Failure,
}

/// User-visible status produced by the config loader
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StatusMessage {
    pub kind: StatusKind,
    pub text: String,
}

impl StatusMessage {
    pub fn success(text: impl Into<String>) -> Self {
        Self {
            kind: StatusKind::Success,
            text: text.into(),
        }
    }

    pub fn failure(text: impl Into<String>) -> Self {
        Self {
            kind: StatusKind::Failure,
            text: text.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        self.kind == StatusKind::Success
    }
}

impl std::fmt::Display for StatusMessage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.text)
    }
}

/// Result of looking up process IDs inside a container
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "status", content = "pids", rename_all = "snake_case")]
pub enum PidQueryResult {
    /// The lookup produced no output
    NotFound,
    /// The lookup produced at least one token that is not a positive integer
    Invalid,
    /// Every token was a positive integer; never empty
    Found(Vec<u32>),
}

impl PidQueryResult {
    /// The resolved PIDs, empty unless `Found`
    pub fn pids(&self) -> &[u32] {
        match self {
            PidQueryResult::Found(pids) => pids,
            _ => &[],
        }
    }

    /// True when at least one PID was resolved
    pub fn is_found(&self) -> bool {
        !self.pids().is_empty()
    }
}

impl std::fmt::Display for PidQueryResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PidQueryResult::Found(pids) => {
                let pids: Vec<String> = pids.iter().map(u32::to_string).collect();
                write!(f, "{}", pids.join(", "))
            }
            PidQueryResult::NotFound | PidQueryResult::Invalid => {
                f.write_str(TARGET_NOT_FOUND_MESSAGE)
            }
        }
    }
}

/// A fully resolved attach request
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AttachTarget {
    pub container: String,
    pub debugger_path: String,
    pub pid: u32,
}

/// Last-used selections, carried across sessions by a settings store.
///
/// Field names match the keys of the persisted collection.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct PersistedSettings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub container: Option<String>,
    #[serde(rename = "vsdbg", default, skip_serializing_if = "Option::is_none")]
    pub debugger_path: Option<String>,
    #[serde(rename = "processname", default, skip_serializing_if = "Option::is_none")]
    pub process_name: Option<String>,
}

impl PersistedSettings {
    /// True when nothing has been persisted yet
    pub fn is_empty(&self) -> bool {
        self.container.is_none() && self.debugger_path.is_none() && self.process_name.is_none()
    }
}
