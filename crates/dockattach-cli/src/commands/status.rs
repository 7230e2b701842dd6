//! Status command implementation

use anyhow::Result;

use super::{open_session, NoLaunch};
use crate::output::OutputContext;
use crate::{ExitCode, Workspace};

pub fn run(
    ws: &Workspace,
    container: Option<&str>,
    process: Option<&str>,
    ctx: &OutputContext,
) -> Result<ExitCode> {
    let session = open_session(ws, &NoLaunch, container, process, ctx);
    let snapshot = session.snapshot();

    if ctx.json {
        ctx.json(&snapshot)?;
        return Ok(ExitCode::Success);
    }

    let or_none = |value: Option<&str>| value.unwrap_or("<none>").to_string();
    let list_or_none = |values: &[String]| {
        if values.is_empty() {
            "<none>".to_string()
        } else {
            values.join(", ")
        }
    };

    ctx.config_status(&snapshot.config_status);
    println!();
    println!("Containers:   {}", list_or_none(snapshot.containers.as_slice()));
    println!("Processes:    {}", list_or_none(snapshot.process_names.as_slice()));
    println!();
    println!("Container:    {}", or_none(snapshot.container.as_deref()));
    println!(
        "Process:      {}{}",
        or_none(snapshot.process_name.as_deref()),
        if snapshot.process_selection_enabled {
            ""
        } else {
            " (no debuggable processes configured)"
        }
    );
    println!("Debugger:     {}", snapshot.debugger_path);
    println!("PIDs:         {}", ctx.pid_indicator(&snapshot.pids));
    if let Some(pid) = snapshot.selected_pid {
        println!("Selected PID: {}", pid);
    }
    println!("Can attach:   {}", ctx.flag_indicator(snapshot.can_attach));
    println!(
        "Choose PID:   {}",
        ctx.flag_indicator(snapshot.pid_selector_enabled)
    );

    Ok(ExitCode::Success)
}
