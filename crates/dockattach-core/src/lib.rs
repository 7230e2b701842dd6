//! dockattach Core Library
//!
//! This crate provides the core functionality for dockattach: discovering
//! running containers, resolving the PIDs of debuggable processes inside
//! them, and tracking the attach selection until a target is handed to a
//! debugger launcher.
//!
//! # Example
//!
//! ```no_run
//! use dockattach_core::{
//!     AttachSession, ConfigResolver, DockerCli, JsonSettingsStore, LaunchConfiguration,
//!     SessionContext,
//! };
//! # use dockattach_core::{AttachLauncher, AttachTarget};
//! # struct Print;
//! # impl AttachLauncher for Print {
//! #     fn launch(&self, target: &AttachTarget) -> dockattach_core::Result<()> {
//! #         println!("{:?}", LaunchConfiguration::for_target(target, "docker"));
//! #         Ok(())
//! #     }
//! # }
//!
//! let runner = DockerCli::new();
//! let settings = JsonSettingsStore::with_defaults().unwrap();
//! let launcher = Print;
//!
//! let mut session = AttachSession::open(
//!     SessionContext { runner: &runner, settings: &settings, launcher: &launcher },
//!     &ConfigResolver::new("."),
//! );
//! session.set_container("api");
//!
//! if session.can_attach() {
//!     let target = session.submit_attach().unwrap();
//!     println!("attached to {} in {}", target.pid, target.container);
//! }
//! ```

pub mod config;
pub mod containers;
pub mod error;
pub mod launcher;
pub mod models;
pub mod pids;
pub mod runner;
pub mod session;
pub mod settings;
pub mod validation;

// Re-export commonly used types
pub use config::{load_attach_config, ConfigResolver, CONFIG_FILE_NAME};
pub use containers::list_containers;
pub use error::{AttachError, ConfigError, Result, ValidationError};
pub use launcher::{AttachLauncher, LaunchConfiguration, PipeTransport};
pub use models::{
    AttachConfig, AttachTarget, PersistedSettings, PidQueryResult, StatusKind, StatusMessage,
    DEFAULT_DEBUGGER_PATH, TARGET_NOT_FOUND_MESSAGE,
};
pub use pids::resolve_pids;
pub use runner::{CommandRunner, DockerCli, DEFAULT_RUNTIME_PROGRAM};
pub use session::{AttachSession, SessionContext, SessionSnapshot};
pub use settings::{JsonSettingsStore, MemorySettingsStore, SettingsStore};
pub use validation::{validate_container_name, validate_not_empty, validate_process_name};
