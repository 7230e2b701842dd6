//! Output formatting utilities for the CLI

use comfy_table::Cell;
use dockattach_core::{PidQueryResult, StatusMessage};
use owo_colors::OwoColorize;
use serde::Serialize;

/// Context for output formatting
#[derive(Debug, Clone)]
pub struct OutputContext {
    pub json: bool,
    pub no_color: bool,
    pub quiet: bool,
}

impl OutputContext {
    pub fn new(json: bool, no_color: bool, quiet: bool) -> Self {
        // Disable colors if NO_COLOR is set or --no-color flag is used
        let no_color = no_color || std::env::var("NO_COLOR").is_ok();

        Self {
            json,
            no_color,
            quiet,
        }
    }

    /// Print a success message
    pub fn success(&self, msg: &str) {
        if self.quiet {
            return;
        }

        if self.no_color {
            println!("✓ {}", msg);
        } else {
            println!("{} {}", "✓".green(), msg);
        }
    }

    /// Print an error message
    pub fn error(&self, msg: &str) {
        if self.no_color {
            eprintln!("✗ {}", msg);
        } else {
            eprintln!("{} {}", "✗".red(), msg);
        }
    }

    /// Print a warning message
    pub fn warn(&self, msg: &str) {
        if self.quiet {
            return;
        }

        if self.no_color {
            eprintln!("! {}", msg);
        } else {
            eprintln!("{} {}", "!".yellow(), msg);
        }
    }

    /// Print an info message
    pub fn info(&self, msg: &str) {
        if self.quiet {
            return;
        }

        println!("  {}", msg);
    }

    /// Print JSON output
    pub fn json<T: Serialize>(&self, value: &T) -> anyhow::Result<()> {
        let output = serde_json::to_string_pretty(value)?;
        println!("{}", output);
        Ok(())
    }

    /// Report the config load status on the matching stream
    pub fn config_status(&self, status: &StatusMessage) {
        if status.is_success() {
            self.success(&status.text);
        } else {
            self.warn(&status.text);
        }
    }

    /// Format a yes/no indicator string (for non-table output)
    pub fn flag_indicator(&self, enabled: bool) -> String {
        match (enabled, self.no_color) {
            (true, true) => "yes".to_string(),
            (true, false) => "yes".green().to_string(),
            (false, true) => "no".to_string(),
            (false, false) => "no".dimmed().to_string(),
        }
    }

    /// Format a PID lookup result, highlighting the not-found sentinel
    pub fn pid_indicator(&self, result: &PidQueryResult) -> String {
        let text = result.to_string();
        if self.no_color || result.is_found() {
            text
        } else {
            text.red().to_string()
        }
    }
}

/// Helper for building tables using comfy-table
pub struct TableBuilder {
    table: comfy_table::Table,
}

impl TableBuilder {
    pub fn new(headers: Vec<&str>) -> Self {
        use comfy_table::{presets::UTF8_FULL, ContentArrangement};

        let mut table = comfy_table::Table::new();
        table
            .load_preset(UTF8_FULL)
            .set_content_arrangement(ContentArrangement::Dynamic)
            .set_header(headers);

        Self { table }
    }

    pub fn add_row(&mut self, row: Vec<Cell>) {
        self.table.add_row(row);
    }

    pub fn build(self) -> comfy_table::Table {
        self.table
    }
}
