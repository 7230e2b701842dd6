//! Error types for dockattach

use thiserror::Error;

/// Main error type for dockattach-core operations
#[derive(Error, Debug)]
pub enum AttachError {
    /// The container runtime program could not be started
    #[error("Failed to execute '{command}': {source}")]
    Execution {
        command: String,
        #[source]
        source: std::io::Error,
    },

    /// Attach was requested while no target process is resolved
    #[error("Attach is not available: {0}")]
    AttachNotAvailable(String),

    /// The requested PID is not among the resolved candidates
    #[error("PID {0} is not a candidate for the current selection")]
    PidNotCandidate(u32),

    /// Validation error
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Configuration error
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    /// Settings store error
    #[error("Settings error: {0}")]
    Settings(String),

    /// Attach launcher failed
    #[error("Launch failed: {0}")]
    Launch(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Validation errors for user-supplied names and paths
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// Container name contains characters docker does not allow
    #[error("Invalid container name: {0}")]
    InvalidContainerName(String),

    /// Input contains null byte
    #[error("Input contains null byte")]
    NullByteInInput,

    /// Empty input where non-empty is required
    #[error("Input cannot be empty")]
    EmptyInput,
}

/// Configuration-related errors
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to determine the settings directory
    #[error("Could not determine settings directory")]
    NoSettingsDirectory,

    /// Failed to parse a JSON document
    #[error("Failed to parse config: {0}")]
    ParseError(#[from] serde_json::Error),

    /// The document parsed but lists no debuggable processes
    #[error("Missing or empty DebuggableProcessNames.")]
    MissingProcessNames,

    /// IO error during config operations
    #[error("Config IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for dockattach-core operations
pub type Result<T> = std::result::Result<T, AttachError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = AttachError::PidNotCandidate(42);
        assert_eq!(
            err.to_string(),
            "PID 42 is not a candidate for the current selection"
        );

        let err = AttachError::Validation(ValidationError::InvalidContainerName("a b".into()));
        assert!(err.to_string().contains("a b"));
    }

    #[test]
    fn test_execution_error_names_command() {
        let err = AttachError::Execution {
            command: "docker ps".to_string(),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "no such file"),
        };
        let msg = err.to_string();
        assert!(msg.contains("docker ps"));
        assert!(msg.contains("no such file"));
    }

    #[test]
    fn test_missing_process_names_message() {
        let err = ConfigError::MissingProcessNames;
        assert_eq!(err.to_string(), "Missing or empty DebuggableProcessNames.");
    }

    #[test]
    fn test_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: AttachError = io_err.into();
        assert!(matches!(err, AttachError::Io(_)));
    }
}
