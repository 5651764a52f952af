//! Config command - configuration management.

use std::path::PathBuf;

use anyhow::{Result, anyhow};
use callsheet_config::{
    CallsheetConfig, ConfigError, LayerStatus, PROJECT_CONFIG_FILE, USER_CONFIG_FILE,
};
use clap::{Args, Subcommand};

use super::Context;

/// Arguments for the config command.
#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Show the resolved configuration
    Show,

    /// Show which config files are loaded and their precedence
    Which,

    /// Initialize a config file with defaults
    Init {
        /// Create project-local config (./callsheet.toml) instead of user config
        #[arg(long)]
        local: bool,
    },

    /// Show configuration file path
    Path,
}

/// Run the config command.
pub fn run(args: ConfigArgs, ctx: &Context) -> Result<()> {
    match args.command {
        ConfigCommand::Show => cmd_show(ctx),
        ConfigCommand::Which => cmd_which(ctx),
        ConfigCommand::Init { local } => cmd_init(ctx, local),
        ConfigCommand::Path => cmd_path(ctx),
    }
}

fn cmd_show(ctx: &Context) -> Result<()> {
    let loaded = &ctx.loaded;
    let config = &loaded.config;

    if ctx.json_output {
        println!("{}", serde_json::to_string_pretty(config)?);
        return Ok(());
    }

    println!("# Callsheet Configuration\n");

    let sources = loaded.loaded_from();
    if sources.is_empty() {
        println!("No config files loaded (using defaults)\n");
    } else {
        println!("Config files:");
        for source in &sources {
            println!("  {}", source.display());
        }
        println!();
    }

    let contacts = config.contacts();
    println!("Contacts:");
    match ctx.contacts_path() {
        Ok(path) => println!("  path: {}", path.display()),
        Err(_) => println!("  path: (not set)"),
    }
    println!("  delimiter: {:?}", contacts.delimiter);
    println!(
        "  columns: {} / {} / {}",
        contacts.columns.identifier, contacts.columns.phone_number, contacts.columns.address
    );
    println!();

    let notes = config.notes();
    println!("Notes:");
    println!(
        "  dir: {}",
        notes
            .dir
            .as_ref()
            .map(|d| d.display().to_string())
            .unwrap_or_else(|| ".".to_string())
    );
    println!("  file: {}", notes.file_name);
    println!("  timestamped: {}", notes.timestamped);
    println!();

    if let Some(dir) = config.logging().dir {
        println!("Logging:");
        println!("  dir: {}", dir.display());
        println!();
    }

    if !loaded.warnings.is_empty() {
        println!("Warnings:");
        for w in &loaded.warnings {
            println!("  ⚠ {}", w);
        }
        println!();
    }

    if ctx.verbose {
        println!("---\nRaw config:\n");
        if let Ok(toml_str) = config.to_toml() {
            println!("{}", toml_str);
        }
    }

    Ok(())
}

fn cmd_which(ctx: &Context) -> Result<()> {
    let loaded = &ctx.loaded;

    println!("Config file search order (later overrides earlier):\n");

    for source in &loaded.sources {
        let status = match &source.status {
            LayerStatus::Loaded => "✓ loaded".to_string(),
            LayerStatus::Missing => "· not found".to_string(),
            LayerStatus::Skipped(reason) => format!("✗ skipped ({})", reason),
        };
        println!(
            "  {:<8} {} {}",
            source.layer.label(),
            source.path.display(),
            status
        );
    }

    println!();
    let loaded_count = loaded.loaded_from().len();
    if loaded_count == 0 {
        println!("No config files found. Run 'callsheet config init' to create one.");
    } else {
        println!("{} config file(s) loaded.", loaded_count);
    }

    Ok(())
}

fn cmd_init(ctx: &Context, local: bool) -> Result<()> {
    let path = if local {
        PathBuf::from(PROJECT_CONFIG_FILE)
    } else {
        user_config_dir(ctx)?.join(USER_CONFIG_FILE)
    };

    match callsheet_config::create_config_file(&CallsheetConfig::starter(), &path) {
        Ok(()) => {}
        Err(ConfigError::AlreadyExists(existing)) => {
            println!("Config file already exists: {}", existing.display());
            return Ok(());
        }
        Err(e) => return Err(e.into()),
    }

    println!("✓ Created config file: {}", path.display());
    println!();
    println!("Next steps:");
    println!("  set [contacts].path to your export file");
    println!("  callsheet config show           # verify configuration");

    Ok(())
}

fn cmd_path(ctx: &Context) -> Result<()> {
    println!("{}", user_config_dir(ctx)?.join(USER_CONFIG_FILE).display());
    Ok(())
}

fn user_config_dir(ctx: &Context) -> Result<PathBuf> {
    ctx.config_dir
        .clone()
        .or_else(callsheet_config::user_config_dir)
        .ok_or_else(|| anyhow!("Could not determine config directory"))
}
