//! dockattach CLI - attach a debugger to a process inside a Docker container

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, Subcommand};
use dockattach_core::{ConfigResolver, DockerCli, JsonSettingsStore, DEFAULT_RUNTIME_PROGRAM};
use std::path::PathBuf;

mod commands;
mod output;

use commands::*;

/// Exit codes for the CLI
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    Success = 0,
    GeneralError = 1,
    UsageError = 2,
    NoContainers = 10,
    TargetNotFound = 11,
    RuntimeUnavailable = 20,
    ConfigError = 30,
}

impl From<ExitCode> for i32 {
    fn from(code: ExitCode) -> Self {
        code as i32
    }
}

/// dockattach - Attach a debugger to a process running inside a Docker container
#[derive(Parser)]
#[command(name = "dockattach", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output in JSON format
    #[arg(long, global = true)]
    json: bool,

    /// Verbose output (-v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Disable colored output
    #[arg(long, global = true, env = "NO_COLOR")]
    no_color: bool,

    /// Project root holding container-debug-config.json (defaults to the current directory)
    #[arg(long, global = true, env = "DOCKATTACH_PROJECT_DIR", value_name = "DIR")]
    project_dir: Option<PathBuf>,

    /// Container runtime program
    #[arg(long, global = true, env = "DOCKATTACH_DOCKER", default_value = DEFAULT_RUNTIME_PROGRAM, value_name = "PROGRAM")]
    docker: String,
}

#[derive(Subcommand)]
enum Commands {
    /// List running containers
    Containers,

    /// Look up the PIDs of a process inside a container
    Pids {
        /// Container name
        container: String,

        /// Process name
        process: String,
    },

    /// Show the attach selection without attaching
    Status {
        /// Container to select (defaults to the last used, then the first running)
        #[arg(short, long)]
        container: Option<String>,

        /// Process name to select (defaults to the last used, then the first configured)
        #[arg(short, long)]
        process: Option<String>,
    },

    /// Resolve the target process and emit a debugger attach configuration
    Attach {
        /// Container to select (defaults to the last used, then the first running)
        #[arg(short, long)]
        container: Option<String>,

        /// Process name to select (defaults to the last used, then the first configured)
        #[arg(short, long)]
        process: Option<String>,

        /// PID to attach to when several match (defaults to the first)
        #[arg(long)]
        pid: Option<u32>,

        /// Debugger binary path inside the container
        #[arg(long, value_name = "PATH")]
        vsdbg: Option<String>,

        /// Write the attach configuration to a file instead of stdout
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },

    /// Show or create the project configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },

    /// Show or clear the last-used selections
    Settings {
        #[command(subcommand)]
        action: SettingsAction,
    },

    /// Check system requirements
    Doctor,

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        shell: clap_complete::Shell,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Show the project configuration and its load status
    Show,

    /// Create a starter configuration file
    Init {
        /// Debuggable process names (repeatable)
        #[arg(short, long = "process", value_name = "NAME", default_value = "dotnet")]
        processes: Vec<String>,

        /// Overwrite an existing file
        #[arg(short, long)]
        force: bool,
    },
}

#[derive(Subcommand)]
enum SettingsAction {
    /// Show the last-used selections
    Show,

    /// Forget the last-used selections
    Clear,
}

/// Collaborators shared by every command
pub struct Workspace {
    pub runner: DockerCli,
    pub config: ConfigResolver,
    pub settings: JsonSettingsStore,
}

impl Workspace {
    fn new(project_dir: Option<PathBuf>, docker: String) -> Result<Self> {
        let project_dir = match project_dir {
            Some(dir) => dir,
            None => std::env::current_dir().context("Could not determine current directory")?,
        };

        Ok(Self {
            runner: DockerCli::with_program(docker),
            config: ConfigResolver::new(project_dir),
            settings: JsonSettingsStore::with_defaults()?,
        })
    }
}

fn setup_logging(verbose: u8, quiet: bool) {
    use tracing_subscriber::EnvFilter;

    if quiet {
        return;
    }

    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    // Set up output formatting
    let ctx = output::OutputContext::new(cli.json, cli.no_color, cli.quiet);

    let result = run_command(cli, &ctx);

    match result {
        Ok(code) => std::process::exit(code.into()),
        Err(e) => {
            ctx.error(&format!("{:#}", e));
            std::process::exit(ExitCode::GeneralError.into());
        }
    }
}

fn run_command(cli: Cli, ctx: &output::OutputContext) -> Result<ExitCode> {
    let ws = Workspace::new(cli.project_dir, cli.docker)?;

    match cli.command {
        Commands::Containers => containers::run(&ws, ctx),

        Commands::Pids { container, process } => pids::run(&ws, &container, &process, ctx),

        Commands::Status { container, process } => {
            status::run(&ws, container.as_deref(), process.as_deref(), ctx)
        }

        Commands::Attach {
            container,
            process,
            pid,
            vsdbg,
            output,
        } => attach::run(
            &ws,
            attach::AttachArgs {
                container,
                process,
                pid,
                vsdbg,
                output,
            },
            ctx,
        ),

        Commands::Config { action } => match action {
            ConfigAction::Show => config_cmd::show(&ws, ctx),
            ConfigAction::Init { processes, force } => {
                config_cmd::init(&ws, &processes, force, ctx)
            }
        },

        Commands::Settings { action } => match action {
            SettingsAction::Show => settings_cmd::show(&ws, ctx),
            SettingsAction::Clear => settings_cmd::clear(&ws, ctx),
        },

        Commands::Doctor => doctor::run(&ws, ctx),

        Commands::Completions { shell } => {
            completions::run(shell);
            Ok(ExitCode::Success)
        }
    }
}
