//! Process ID lookup inside a container
//!
//! The lookup runs `pidof <process>` inside the container. Its output is
//! accepted all-or-nothing: a single token that is not a positive integer
//! makes the whole result [`PidQueryResult::Invalid`].

use crate::models::PidQueryResult;
use crate::runner::CommandRunner;
use crate::validation::is_blank;
use tracing::{debug, warn};

/// Build the runtime arguments that look up `process_name` inside `container`
pub fn pidof_args<'a>(container: &'a str, process_name: &'a str) -> [&'a str; 4] {
    ["exec", container, "pidof", process_name]
}

/// Resolve the PIDs of `process_name` running inside `container`.
///
/// Blank names short-circuit to `NotFound` without running a command.
/// A runtime that cannot be started is treated as empty output.
pub fn resolve_pids(
    runner: &dyn CommandRunner,
    container: &str,
    process_name: &str,
) -> PidQueryResult {
    if is_blank(container) || is_blank(process_name) {
        return PidQueryResult::NotFound;
    }

    let output = match runner.execute(&pidof_args(container, process_name)) {
        Ok(output) => output,
        Err(e) => {
            warn!(container, process_name, error = %e, "PID lookup could not run");
            String::new()
        }
    };

    let result = parse_pid_output(&output);
    debug!(container, process_name, result = ?result, "resolved PIDs");
    result
}

/// Classify the output of a PID lookup.
///
/// Tokens are separated by any run of whitespace, so carriage returns
/// from a TTY-attached exec are tolerated.
pub fn parse_pid_output(output: &str) -> PidQueryResult {
    let tokens: Vec<&str> = output.split_whitespace().collect();
    if tokens.is_empty() {
        return PidQueryResult::NotFound;
    }

    let pids: Option<Vec<u32>> = tokens
        .iter()
        .map(|token| token.parse::<u32>().ok().filter(|pid| *pid > 0))
        .collect();

    match pids {
        Some(pids) => PidQueryResult::Found(pids),
        None => PidQueryResult::Invalid,
    }
}
