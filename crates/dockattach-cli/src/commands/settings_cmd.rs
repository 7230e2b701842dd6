//! Settings command implementation

use anyhow::Result;
use dockattach_core::SettingsStore;

use crate::output::OutputContext;
use crate::{ExitCode, Workspace};

pub fn show(ws: &Workspace, ctx: &OutputContext) -> Result<ExitCode> {
    let settings = ws.settings.load()?;

    if ctx.json {
        ctx.json(&serde_json::json!({
            "path": ws.settings.settings_path().to_string_lossy(),
            "settings": settings,
        }))?;
        return Ok(ExitCode::Success);
    }

    println!("Settings file: {}", ws.settings.settings_path().display());
    if settings.is_empty() {
        ctx.info("No saved selections");
        return Ok(ExitCode::Success);
    }

    let unset = || "<unset>".to_string();
    println!("  container: {}", settings.container.unwrap_or_else(unset));
    println!("  vsdbg: {}", settings.debugger_path.unwrap_or_else(unset));
    println!("  processname: {}", settings.process_name.unwrap_or_else(unset));

    Ok(ExitCode::Success)
}

pub fn clear(ws: &Workspace, ctx: &OutputContext) -> Result<ExitCode> {
    let removed = ws.settings.clear()?;

    if ctx.json {
        ctx.json(&serde_json::json!({ "cleared": removed }))?;
    } else if removed {
        ctx.success("Cleared saved selections");
    } else {
        ctx.info("No saved selections");
    }

    Ok(ExitCode::Success)
}
