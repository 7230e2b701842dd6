//! Config command implementation

use anyhow::Result;
use dockattach_core::{load_attach_config, validate_process_name, AttachConfig};

use crate::output::OutputContext;
use crate::{ExitCode, Workspace};

pub fn show(ws: &Workspace, ctx: &OutputContext) -> Result<ExitCode> {
    let path = ws.config.config_path();
    let (config, status) = load_attach_config(&path);

    if ctx.json {
        ctx.json(&serde_json::json!({
            "path": path.to_string_lossy(),
            "status": status,
            "process_names": config.debuggable_process_names,
        }))?;
    } else {
        println!("Configuration:");
        println!("  Config file: {}", path.display());
        println!("  Settings file: {}", ws.settings.settings_path().display());
        println!();
        ctx.config_status(&status);

        if !config.is_empty() {
            println!();
            println!("Debuggable processes:");
            for name in &config.debuggable_process_names {
                println!("  - {}", name);
            }
        }
    }

    if status.is_success() {
        Ok(ExitCode::Success)
    } else {
        Ok(ExitCode::ConfigError)
    }
}

pub fn init(
    ws: &Workspace,
    processes: &[String],
    force: bool,
    ctx: &OutputContext,
) -> Result<ExitCode> {
    let path = ws.config.config_path();

    if path.exists() && !force {
        ctx.error(&format!(
            "{} already exists. Use --force to overwrite",
            path.display()
        ));
        return Ok(ExitCode::ConfigError);
    }

    for name in processes {
        validate_process_name(name)
            .map_err(|e| anyhow::anyhow!("Invalid process name '{}': {}", name, e))?;
    }

    let config = AttachConfig::new(processes.iter().cloned());
    ws.config.save(&config)?;

    if ctx.json {
        ctx.json(&serde_json::json!({
            "status": "created",
            "path": path.to_string_lossy(),
            "process_names": config.debuggable_process_names,
        }))?;
    } else {
        ctx.success(&format!("Created {}", path.display()));
    }

    Ok(ExitCode::Success)
}
