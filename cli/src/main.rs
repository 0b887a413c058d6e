//! CLI entrypoint for opsbridge
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use std::fs;
use std::io::Read as _;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result, anyhow};
use clap::{Parser, Subcommand, ValueEnum};
use opsbridge_application::{
    ActionGroupHandler, AutomationActionGroup, BackupActionGroup, ComputeActionGroup,
    HandleInvocation, SupportActionGroup,
};
use opsbridge_domain::InvocationRequest;
use opsbridge_infrastructure::{
    ConfigLoader, FileConfig, InMemoryAutomationBackend, InMemoryBackupBackend,
    InMemoryComputeBackend, InMemorySupportBackend, JsonlInvocationLogger,
};
use tracing::warn;
use tracing_subscriber::EnvFilter;

/// Action groups served by this bridge
#[derive(Debug, Clone, Copy, ValueEnum)]
enum ActionGroupKind {
    /// Instance inventory and power control
    Compute,
    /// Command documents and patch baselines
    Automation,
    /// Backup plans, selections, and jobs
    Backup,
    /// Support cases
    Support,
}

impl ActionGroupKind {
    fn label(self) -> &'static str {
        match self {
            ActionGroupKind::Compute => "compute",
            ActionGroupKind::Automation => "automation",
            ActionGroupKind::Backup => "backup",
            ActionGroupKind::Support => "support",
        }
    }
}

/// CLI arguments for opsbridge
#[derive(Parser, Debug)]
#[command(name = "opsbridge")]
#[command(author, version, about = "Dispatch agent action-group invocations to operations backends")]
#[command(long_about = r#"
Opsbridge receives action-group invocation events from an agent
orchestrator, routes them to the named operation, and answers with a
response envelope the orchestrator can consume. Every outcome is an
envelope: success, rejected request, or internal fault.

Configuration files are loaded from (in priority order):
1. --config <path>     Explicit config file
2. ./opsbridge.toml    Project-level config
3. ~/.config/opsbridge/config.toml   Global config

Example:
  opsbridge invoke --group compute --event event.json
  cat event.json | opsbridge invoke -g support --pretty
  opsbridge routes -g backup
"#)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Path to configuration file
    #[arg(long, value_name = "PATH", global = true)]
    config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long, global = true)]
    no_config: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Handle one invocation event and print the response envelope
    Invoke {
        /// Action group that receives the event
        #[arg(short, long, value_enum)]
        group: ActionGroupKind,

        /// Path to the event JSON (reads stdin when omitted)
        #[arg(short, long, value_name = "PATH")]
        event: Option<PathBuf>,

        /// Pretty-print the envelope
        #[arg(long)]
        pretty: bool,
    },

    /// List the api paths each action group serves
    Routes {
        /// Restrict to one action group
        #[arg(short, long, value_enum)]
        group: Option<ActionGroupKind>,
    },

    /// Show configuration file locations and exit
    ConfigSources,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_ref())
            .map_err(|e| anyhow!("could not load configuration: {e}"))?
    };

    // Initialize logging based on verbosity level
    let _guard = init_tracing(cli.verbose, config.log.trace_file.as_deref());

    for warning in config.validate() {
        warn!("{warning}");
    }

    match cli.command {
        Commands::Invoke { group, event, pretty } => {
            invoke(group, event.as_deref(), pretty, &config).await
        }
        Commands::Routes { group } => {
            print_routes(group, &config);
            Ok(())
        }
        Commands::ConfigSources => {
            ConfigLoader::print_config_sources();
            Ok(())
        }
    }
}

/// Handle one event end to end and print the envelope on stdout.
async fn invoke(
    group: ActionGroupKind,
    event: Option<&Path>,
    pretty: bool,
    config: &FileConfig,
) -> Result<()> {
    let raw = read_event(event)?;
    let request: InvocationRequest =
        serde_json::from_str(&raw).context("event is not a valid invocation request")?;

    let handler = build_handler(group, config);
    let use_case = match &config.log.invocation_log {
        Some(path) => match JsonlInvocationLogger::new(path) {
            Some(logger) => HandleInvocation::with_logger(Arc::new(logger)),
            None => HandleInvocation::new(),
        },
        None => HandleInvocation::new(),
    };

    let envelope = use_case.execute(handler.as_ref(), &request).await;

    let output = if pretty {
        serde_json::to_string_pretty(&envelope)?
    } else {
        serde_json::to_string(&envelope)?
    };
    println!("{output}");
    Ok(())
}

fn read_event(path: Option<&Path>) -> Result<String> {
    match path {
        Some(path) => fs::read_to_string(path)
            .with_context(|| format!("could not read event file {}", path.display())),
        None => {
            let mut buffer = String::new();
            std::io::stdin()
                .read_to_string(&mut buffer)
                .context("could not read event from stdin")?;
            Ok(buffer)
        }
    }
}

/// Assemble one action-group handler over its in-memory backend.
fn build_handler(group: ActionGroupKind, config: &FileConfig) -> Arc<dyn ActionGroupHandler> {
    match group {
        ActionGroupKind::Compute => {
            Arc::new(ComputeActionGroup::new(Arc::new(InMemoryComputeBackend::new())))
        }
        ActionGroupKind::Automation => Arc::new(
            AutomationActionGroup::new(Arc::new(InMemoryAutomationBackend::new()))
                .with_settings(config.automation.to_settings()),
        ),
        ActionGroupKind::Backup => Arc::new(
            BackupActionGroup::new(Arc::new(InMemoryBackupBackend::new()))
                .with_settings(config.backup.to_settings()),
        ),
        ActionGroupKind::Support => Arc::new(
            SupportActionGroup::new(Arc::new(InMemorySupportBackend::new()))
                .with_settings(config.support.to_settings()),
        ),
    }
}

fn print_routes(group: Option<ActionGroupKind>, config: &FileConfig) {
    let groups = match group {
        Some(kind) => vec![kind],
        None => vec![
            ActionGroupKind::Compute,
            ActionGroupKind::Automation,
            ActionGroupKind::Backup,
            ActionGroupKind::Support,
        ],
    };

    for kind in groups {
        let handler = build_handler(kind, config);
        println!("{}:", kind.label());
        for path in handler.api_paths() {
            println!("  {path}");
        }
    }
}

/// Set up the tracing subscriber. Diagnostics go to stderr so envelopes on
/// stdout stay pipeable; a configured trace file redirects them instead.
/// The returned guard must stay alive until exit.
fn init_tracing(
    verbosity: u8,
    trace_file: Option<&Path>,
) -> Option<tracing_appender::non_blocking::WorkerGuard> {
    let filter = match verbosity {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"), // -vvv or more
    };

    if let Some(path) = trace_file {
        match open_trace_file(path) {
            Ok(file) => {
                let (writer, guard) = tracing_appender::non_blocking(file);
                tracing_subscriber::fmt()
                    .with_env_filter(filter)
                    .with_target(false)
                    .with_ansi(false)
                    .with_writer(writer)
                    .init();
                return Some(guard);
            }
            Err(e) => {
                eprintln!("warning: could not open trace file {}: {e}", path.display());
            }
        }
    }

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
    None
}

fn open_trace_file(path: &Path) -> std::io::Result<fs::File> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)?;
    }
    fs::OpenOptions::new().create(true).append(true).open(path)
}
