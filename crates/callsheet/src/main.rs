//! Callsheet - contact lookup and call tracking for phone campaigns
//!
//! Main entry point for the Callsheet CLI.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::warn;

mod commands;

use commands::{config, conflicts, lookup, session};

// ─────────────────────────────────────────────────────────────────────────────
// CLI Structure
// ─────────────────────────────────────────────────────────────────────────────

/// Callsheet - contact lookup and call tracking for phone campaigns
#[derive(Parser)]
#[command(name = "callsheet")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output as JSON for scripting (lookup, conflicts, config show)
    #[arg(long, global = true)]
    pub json: bool,

    /// Contact export to load (tab-separated, `-` for stdin)
    #[arg(long, global = true, env = "CALLSHEET_CONTACTS")]
    pub contacts: Option<PathBuf>,

    /// Directory holding config.toml (default: platform config dir)
    #[arg(long, global = true)]
    pub config_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start an interactive calling session (default)
    Session(session::SessionArgs),

    /// Look up a single contact and check for address conflicts
    Lookup(lookup::LookupArgs),

    /// List every phone number recorded against more than one address
    Conflicts(conflicts::ConflictsArgs),

    /// Configuration management
    Config(config::ConfigArgs),
}

// ─────────────────────────────────────────────────────────────────────────────
// Main
// ─────────────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    let cli = Cli::parse();

    let loaded = callsheet_config::load_config(None, cli.config_dir.as_deref());

    // Console (human-readable, stderr) + rolling JSON file
    let _guard = init_tracing(cli.verbose, &loaded.config, cli.config_dir.as_deref());

    for warning in &loaded.warnings {
        warn!("{}", warning);
    }

    let ctx = commands::Context {
        json_output: cli.json,
        verbose: cli.verbose,
        contacts: cli.contacts,
        config_dir: cli.config_dir,
        loaded,
    };

    match cli.command {
        None => session::run(session::SessionArgs::default(), &ctx),
        Some(Commands::Session(args)) => session::run(args, &ctx),
        Some(Commands::Lookup(args)) => lookup::run(args, &ctx),
        Some(Commands::Conflicts(args)) => conflicts::run(args, &ctx),
        Some(Commands::Config(args)) => config::run(args, &ctx),
    }
}

fn init_tracing(
    verbose: bool,
    config: &callsheet_config::CallsheetConfig,
    config_dir: Option<&std::path::Path>,
) -> Option<tracing_appender::non_blocking::WorkerGuard> {
    use tracing_appender::rolling::{RollingFileAppender, Rotation};
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::{EnvFilter, fmt};

    let filter = if verbose {
        "callsheet=debug,callsheet_core=debug,callsheet_config=debug,info"
    } else {
        "callsheet=warn,callsheet_core=warn,callsheet_config=warn,warn"
    };

    let log_dir = config
        .logging()
        .dir
        .or_else(|| config_dir.map(|d| d.join("logs")))
        .or_else(|| callsheet_config::user_config_dir().map(|d| d.join("logs")))
        .unwrap_or_else(|| PathBuf::from("logs"));

    let appender = RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .filename_prefix("callsheet")
        .filename_suffix("log")
        .build(&log_dir)
        .ok();

    let (file_layer, guard) = match appender {
        Some(appender) => {
            let (non_blocking, guard) = tracing_appender::non_blocking(appender);
            let layer = fmt::layer()
                .json()
                .with_writer(non_blocking)
                .with_filter(EnvFilter::new(
                    "callsheet=trace,callsheet_core=trace,callsheet_config=trace,info",
                ));
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_target(true)
                .with_writer(std::io::stderr)
                .with_filter(EnvFilter::new(filter)),
        )
        .with(file_layer)
        .init();

    guard
}
