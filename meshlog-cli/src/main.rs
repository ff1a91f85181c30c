//! Meshlog CLI - Gateway Event Replay
//!
//! Replays recorded webhook payloads and agent mesh updates through the
//! logging adapter, formats payloads, and manages configuration.

#![allow(clippy::print_stdout)] // CLI program intentionally uses stdout

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};
use meshlog::config::{ConfigError, IssueLevel, config_path as default_config_path, init_config_at};
use meshlog::prelude::*;
use serde_json::{Map, Value};
use tokio::io::AsyncReadExt;
use tracing::Level;
use tracing_subscriber::EnvFilter;

/// Meshlog - verbose logging for agent mesh gateways
#[derive(Parser)]
#[command(name = "meshlog")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Configuration file path
    #[arg(short, long, env = "MESHLOG_CONFIG", global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Replay a recorded request and its updates through the logging adapter
    Replay(ReplayArgs),

    /// Pretty-print a JSON payload
    Format(FormatArgs),

    /// Manage configuration
    Config(ConfigArgs),
}

/// Arguments for the replay command
#[derive(Args)]
struct ReplayArgs {
    /// JSON file holding the external input payload
    payload: PathBuf,

    /// JSON object file holding the endpoint context
    #[arg(short, long)]
    endpoint: Option<PathBuf>,

    /// JSON Lines file with one update per line
    #[arg(short, long)]
    updates: Option<PathBuf>,

    /// Session ID reported in the response context
    #[arg(long)]
    session: Option<String>,

    /// Task ID reported in the response context
    #[arg(long)]
    task: Option<String>,

    /// User ID reported in the response context
    #[arg(long)]
    user: Option<String>,

    /// Gateway ID passed to init
    #[arg(long)]
    gateway_id: Option<String>,
}

/// Arguments for the format command
#[derive(Args)]
struct FormatArgs {
    /// JSON file to format, `-` or nothing for stdin
    input: Option<PathBuf>,

    /// Spaces per nesting level (overrides config)
    #[arg(short, long)]
    indent: Option<usize>,

    /// Truncate the output to this many characters
    #[arg(short, long)]
    limit: Option<usize>,
}

/// Arguments for the config command
#[derive(Args)]
struct ConfigArgs {
    #[command(subcommand)]
    command: ConfigCommands,
}

#[derive(Subcommand)]
enum ConfigCommands {
    /// Show the effective configuration
    Show,
    /// Show configuration file path
    Path,
    /// Validate configuration
    Validate,
    /// Write a default configuration file if none exists
    Init,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    let rt = match tokio::runtime::Runtime::new() {
        Ok(rt) => rt,
        Err(e) => {
            tracing::error!("failed to create tokio runtime: {e}");
            return ExitCode::FAILURE;
        }
    };

    match rt.block_on(run(cli)) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{e}");
            ExitCode::FAILURE
        }
    }
}

/// Initialize logging with the given verbosity level.
///
/// Diagnostics go to stderr so stdout carries only console sink output.
fn init_logging(verbosity: u8) {
    let level = match verbosity {
        0 => Level::INFO,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "meshlog={level},meshlog_cli={level},{}",
            if verbosity >= 2 { "debug" } else { "warn" }
        ))
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(verbosity >= 2)
        .with_writer(std::io::stderr)
        .init();
}

/// Main async entry point.
async fn run(cli: Cli) -> Result<()> {
    let config_file = cli.config.unwrap_or_else(default_config_path);
    match cli.command {
        Commands::Replay(args) => cmd_replay(args, &config_file).await,
        Commands::Format(args) => cmd_format(args, &config_file).await,
        Commands::Config(args) => cmd_config(args, &config_file).await,
    }
}

/// Load the config file, then apply environment overrides.
async fn load(config_file: &Path) -> Result<MeshlogConfig> {
    let config = load_config_from(config_file).await?.with_env();
    for issue in config.validate() {
        tracing::warn!("{issue}");
    }
    Ok(config)
}

async fn read_json(path: &Path) -> Result<Value> {
    let content = tokio::fs::read_to_string(path).await?;
    Ok(serde_json::from_str(&content)?)
}

/// Drive the full adapter lifecycle over recorded input.
async fn cmd_replay(args: ReplayArgs, config_file: &Path) -> Result<()> {
    let config = load(config_file).await?;

    let input = read_json(&args.payload).await?;
    let endpoint: Option<Map<String, Value>> = match &args.endpoint {
        Some(path) => match read_json(path).await? {
            Value::Object(map) => Some(map),
            other => {
                return Err(Error::invalid_input(format!(
                    "endpoint context must be a JSON object, got {other}"
                )));
            }
        },
        None => None,
    };

    let mut gateway = GatewayContext::new();
    if let Some(id) = args.gateway_id {
        gateway = gateway.with_gateway_id(id);
    }
    let mut ctx = ResponseContext::new();
    if let Some(id) = args.session {
        ctx = ctx.with_session_id(id);
    }
    if let Some(id) = args.task {
        ctx = ctx.with_task_id(id);
    }
    if let Some(id) = args.user {
        ctx = ctx.with_user_id(id);
    }

    let mut adapter = LoggingAdapter::from_config(&config);
    adapter.init(&gateway).await?;

    let task = match adapter.prepare_task(&input, endpoint.as_ref()).await {
        Ok(task) => task,
        Err(e) => {
            adapter.on_error(&e, Some(&ctx)).await;
            return Err(e);
        }
    };
    tracing::debug!(
        agent = %task.target_agent,
        parts = task.content.len(),
        "task prepared"
    );

    let updates = match &args.updates {
        Some(path) => tokio::fs::read_to_string(path).await?,
        None => String::new(),
    };

    replay_updates(&adapter, &updates, &ctx).await
}

/// Feed JSON Lines updates to `adapter`, then complete the task.
///
/// A line that does not parse is reported through `on_error` and skipped.
/// The first `error` update marks the replay as failed; the task is still
/// completed before the failure is returned.
async fn replay_updates<A: GatewayAdapter>(
    adapter: &A,
    updates: &str,
    ctx: &ResponseContext,
) -> Result<()> {
    let mut failure: Option<String> = None;
    let mut finished = false;

    for (index, line) in updates.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let update: Update = match serde_json::from_str(line) {
            Ok(update) => update,
            Err(e) => {
                let err = Error::invalid_input(format!("update line {}: {e}", index + 1));
                adapter.on_error(&err, Some(ctx)).await;
                continue;
            }
        };

        if finished {
            tracing::warn!(line = index + 1, "update received after a terminal update");
        }
        finished |= update.is_terminal();

        if let Err(e) = adapter.handle_update(&update, ctx).await {
            adapter.on_error(&e, Some(ctx)).await;
        }
        if let Some(error) = update.error() {
            failure.get_or_insert_with(|| error.to_owned());
        }
    }

    adapter.on_task_complete(ctx).await;

    match failure {
        Some(message) => Err(Error::task_failed(ctx.task_id_or_na(), message)),
        None => Ok(()),
    }
}

/// Pretty-print a JSON payload the way the adapter renders it.
async fn cmd_format(args: FormatArgs, config_file: &Path) -> Result<()> {
    let content = match args.input.as_deref() {
        Some(path) if path.as_os_str() != "-" => tokio::fs::read_to_string(path).await?,
        _ => {
            let mut buf = String::new();
            tokio::io::stdin().read_to_string(&mut buf).await?;
            buf
        }
    };

    let value: Value = serde_json::from_str(&content)?;
    let indent = match args.indent {
        Some(indent) => indent,
        None => load(config_file).await?.format.indent,
    };

    let formatted = format_value(&value, indent);
    match args.limit {
        Some(limit) => println!("{}", truncate(&formatted, limit)),
        None => println!("{formatted}"),
    }

    Ok(())
}

/// Configuration management.
async fn cmd_config(args: ConfigArgs, config_file: &Path) -> Result<()> {
    match args.command {
        ConfigCommands::Path => {
            println!("{}", config_file.display());
        }
        ConfigCommands::Show => {
            let config = load(config_file).await?;
            let content = toml::to_string_pretty(&config).map_err(ConfigError::from)?;
            println!("{content}");
        }
        ConfigCommands::Validate => {
            let config = load_config_from(config_file).await?.with_env();
            let issues = config.validate();
            if issues.is_empty() {
                println!("Configuration is valid");
                return Ok(());
            }

            for issue in &issues {
                println!("{issue}");
            }
            let errors = issues
                .iter()
                .filter(|issue| issue.level == IssueLevel::Error)
                .count();
            if errors > 0 {
                return Err(ConfigError::InvalidValue(format!(
                    "{errors} configuration error(s) in {}",
                    config_file.display()
                ))
                .into());
            }
        }
        ConfigCommands::Init => {
            let existed = tokio::fs::try_exists(config_file).await?;
            init_config_at(config_file).await?;
            if existed {
                println!("Configuration already exists at: {}", config_file.display());
            } else {
                println!("Configuration created: {}", config_file.display());
            }
        }
    }

    Ok(())
}
