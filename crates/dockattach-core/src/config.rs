//! Project configuration for dockattach
//!
//! The config file lives at the root of the project being debugged and
//! names the processes that may be attached to. Loading never fails:
//! any problem yields an empty [`AttachConfig`] and a failure
//! [`StatusMessage`] for the caller to display.

use crate::error::{ConfigError, Result};
use crate::models::{AttachConfig, StatusMessage};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Configuration file name, resolved against the project root
pub const CONFIG_FILE_NAME: &str = "container-debug-config.json";

/// Status text shown after a successful load
pub const CONFIG_LOADED_MESSAGE: &str = "Configuration successfully loaded.";

/// Resolves and loads the attach configuration of one project
#[derive(Debug, Clone)]
pub struct ConfigResolver {
    /// Directory the config file is resolved against
    project_root: PathBuf,
}

impl ConfigResolver {
    /// Create a resolver for the given project root.
    ///
    /// The root is supplied by the caller; nothing here searches for it.
    pub fn new(project_root: impl Into<PathBuf>) -> Self {
        Self {
            project_root: project_root.into(),
        }
    }

    /// Get the project root
    pub fn project_root(&self) -> &Path {
        &self.project_root
    }

    /// Get the path to the config file
    pub fn config_path(&self) -> PathBuf {
        self.project_root.join(CONFIG_FILE_NAME)
    }

    /// Load the config, converting every failure into a status message.
    pub fn load(&self) -> (AttachConfig, StatusMessage) {
        load_attach_config(&self.config_path())
    }

    /// Load the config, returning the underlying error on failure.
    pub fn try_load(&self) -> std::result::Result<AttachConfig, ConfigError> {
        read_attach_config(&self.config_path())
    }

    /// Save a config to the project root atomically.
    ///
    /// Uses a write-to-temp-then-rename strategy to prevent a half-written
    /// file if the process is interrupted.
    pub fn save(&self, config: &AttachConfig) -> Result<()> {
        fs::create_dir_all(&self.project_root)?;

        let config_path = self.config_path();
        let temp_path = config_path.with_extension("json.tmp");

        let contents = serde_json::to_string_pretty(config).map_err(ConfigError::ParseError)?;
        fs::write(&temp_path, contents)?;
        fs::rename(&temp_path, &config_path)?;

        Ok(())
    }
}

/// Load the attach config at `path`.
///
/// Returns the parsed config with a success status, or an empty config
/// with a failure status naming `path` and the cause.
pub fn load_attach_config(path: &Path) -> (AttachConfig, StatusMessage) {
    match read_attach_config(path) {
        Ok(config) => {
            debug!(
                path = %path.display(),
                processes = config.debuggable_process_names.len(),
                "loaded attach config"
            );
            (config, StatusMessage::success(CONFIG_LOADED_MESSAGE))
        }
        Err(e) => {
            warn!(path = %path.display(), error = %e, "failed to load attach config");
            (
                AttachConfig::default(),
                StatusMessage::failure(format!("Problem loading {}: {}", path.display(), e)),
            )
        }
    }
}

fn read_attach_config(path: &Path) -> std::result::Result<AttachConfig, ConfigError> {
    let contents = fs::read_to_string(path)?;
    let config: AttachConfig = serde_json::from_str(&contents)?;

    if config.is_empty() {
        return Err(ConfigError::MissingProcessNames);
    }

    Ok(config)
}
