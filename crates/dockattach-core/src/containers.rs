//! Running container discovery

use crate::runner::CommandRunner;
use tracing::warn;

/// Arguments asking the runtime for running container names only
pub const LIST_CONTAINERS_ARGS: [&str; 3] = ["ps", "--format", "{{.Names}}"];

/// List running container names, sorted ascending by ordinal comparison.
///
/// Duplicates are kept as the runtime reported them and blank lines are
/// dropped. A runtime that cannot be started yields an empty list.
pub fn list_containers(runner: &dyn CommandRunner) -> Vec<String> {
    match runner.execute(&LIST_CONTAINERS_ARGS) {
        Ok(output) => parse_container_names(&output),
        Err(e) => {
            warn!(error = %e, "failed to list containers");
            Vec::new()
        }
    }
}

/// Split runtime output into sorted container names.
///
/// Accepts `\r\n`, `\r` and `\n` line endings.
pub fn parse_container_names(output: &str) -> Vec<String> {
    let mut names: Vec<String> = output
        .split(['\r', '\n'])
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect();
    names.sort();
    names
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runner::testing::ScriptedRunner;

    #[test]
    fn test_list_sorts_names() {
        let runner = ScriptedRunner::new().on(&LIST_CONTAINERS_ARGS, "web\napi\ndb\n");
        assert_eq!(list_containers(&runner), vec!["api", "db", "web"]);
        assert_eq!(runner.calls(), vec!["ps --format {{.Names}}"]);
    }

    #[test]
    fn test_parse_mixed_line_endings() {
        assert_eq!(
            parse_container_names("web\r\napi\rdb\n\n\r\n"),
            vec!["api", "db", "web"]
        );
    }

    #[test]
    fn test_parse_keeps_duplicates() {
        assert_eq!(parse_container_names("b\na\nb\n"), vec!["a", "b", "b"]);
    }

    #[test]
    fn test_parse_is_ordinal() {
        assert_eq!(
            parse_container_names("beta\nAlpha\nalpha\n_x\n"),
            vec!["Alpha", "_x", "alpha", "beta"]
        );
    }

    #[test]
    fn test_empty_output() {
        assert!(parse_container_names("").is_empty());
        assert!(parse_container_names("\r\n\n").is_empty());
    }

    #[test]
    fn test_runtime_failure_is_empty_list() {
        let runner = ScriptedRunner::new();
        assert!(list_containers(&runner).is_empty());
    }
}
