//! Pids command implementation

use anyhow::Result;
use dockattach_core::{resolve_pids, validate_container_name, validate_process_name};
use dockattach_core::{PidQueryResult, TARGET_NOT_FOUND_MESSAGE};
use serde::Serialize;

use crate::output::OutputContext;
use crate::{ExitCode, Workspace};

#[derive(Serialize)]
struct PidsInfo<'a> {
    container: &'a str,
    process: &'a str,
    result: &'a PidQueryResult,
}

pub fn run(ws: &Workspace, container: &str, process: &str, ctx: &OutputContext) -> Result<ExitCode> {
    if let Err(e) = validate_container_name(container).and_then(|_| validate_process_name(process))
    {
        ctx.error(&e.to_string());
        return Ok(ExitCode::UsageError);
    }

    let result = resolve_pids(&ws.runner, container, process);

    if ctx.json {
        ctx.json(&PidsInfo {
            container,
            process,
            result: &result,
        })?;
    } else {
        match &result {
            PidQueryResult::Found(pids) => {
                for pid in pids {
                    println!("{}", pid);
                }
            }
            PidQueryResult::NotFound | PidQueryResult::Invalid => {
                ctx.error(&format!(
                    "{} ('{}' in container '{}')",
                    TARGET_NOT_FOUND_MESSAGE, process, container
                ));
            }
        }
    }

    if result.is_found() {
        Ok(ExitCode::Success)
    } else {
        Ok(ExitCode::TargetNotFound)
    }
}
