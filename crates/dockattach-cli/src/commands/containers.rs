//! Containers command implementation

use anyhow::Result;
use comfy_table::Cell;
use dockattach_core::list_containers;

use crate::output::{OutputContext, TableBuilder};
use crate::{ExitCode, Workspace};

pub fn run(ws: &Workspace, ctx: &OutputContext) -> Result<ExitCode> {
    let containers = list_containers(&ws.runner);

    // An empty listing looks the same as a missing runtime; tell them apart here
    if containers.is_empty() && !ws.runner.is_available() {
        ctx.error(&format!(
            "Container runtime '{}' is not available",
            ws.runner.program()
        ));
        return Ok(ExitCode::RuntimeUnavailable);
    }

    if ctx.json {
        ctx.json(&containers)?;
        return Ok(ExitCode::Success);
    }

    if containers.is_empty() {
        ctx.info("No running containers");
        return Ok(ExitCode::Success);
    }

    let mut table = TableBuilder::new(vec!["#", "Container"]);
    for (i, name) in containers.iter().enumerate() {
        table.add_row(vec![Cell::new(i + 1), Cell::new(name)]);
    }

    println!("{}", table.build());

    Ok(ExitCode::Success)
}
