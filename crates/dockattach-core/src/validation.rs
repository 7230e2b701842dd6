//! Input validation for dockattach
//!
//! Container and process names end up as arguments to the container
//! runtime, so they are checked before a command is issued.

use crate::error::ValidationError;

/// Returns true when the input is empty or whitespace only.
pub fn is_blank(input: &str) -> bool {
    input.trim().is_empty()
}

/// Validate that a string is not empty.
pub fn validate_not_empty(input: &str) -> Result<(), ValidationError> {
    if is_blank(input) {
        return Err(ValidationError::EmptyInput);
    }
    Ok(())
}

/// Validate a container name.
///
/// Docker names must start with an alphanumeric character and may then
/// contain alphanumerics, underscores, periods and hyphens.
///
/// # Examples
///
/// ```
/// use dockattach_core::validation::validate_container_name;
///
/// assert!(validate_container_name("api").is_ok());
/// assert!(validate_container_name("my_app-1.web").is_ok());
/// assert!(validate_container_name("").is_err());
/// assert!(validate_container_name("-api").is_err());
/// assert!(validate_container_name("api; rm -rf /").is_err());
/// ```
pub fn validate_container_name(name: &str) -> Result<(), ValidationError> {
    validate_not_empty(name)?;

    let mut chars = name.chars();
    let first_ok = chars.next().is_some_and(|c| c.is_ascii_alphanumeric());
    let rest_ok = chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '-'));

    if !first_ok || !rest_ok {
        return Err(ValidationError::InvalidContainerName(name.to_string()));
    }

    Ok(())
}

/// Validate a process name passed to `pidof`.
///
/// Process names are opaque, but must be a single non-empty argument.
pub fn validate_process_name(name: &str) -> Result<(), ValidationError> {
    validate_not_empty(name)?;
    if name.contains('\0') {
        return Err(ValidationError::NullByteInInput);
    }
    Ok(())
}

/// Sanitize a string for safe shell usage.
///
/// Used when rendering a command line for display; commands themselves
/// are always spawned with an argument vector.
///
/// # Examples
///
/// ```
/// use dockattach_core::validation::sanitize_for_shell;
///
/// assert!(sanitize_for_shell("{{.Names}}").is_ok());
/// assert!(sanitize_for_shell("hello\0world").is_err());
/// ```
pub fn sanitize_for_shell(input: &str) -> Result<String, ValidationError> {
    if input.contains('\0') {
        return Err(ValidationError::NullByteInInput);
    }

    Ok(shell_escape::escape(input.into()).to_string())
}
