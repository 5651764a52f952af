//! CLI command handlers.

pub mod config;
pub mod conflicts;
pub mod desk;
pub mod lookup;
pub mod repl;
pub mod session;

use std::io;
use std::path::{Path, PathBuf};

use anyhow::{Context as _, Result, anyhow};
use callsheet_config::LoadedConfig;
use callsheet_core::ContactTable;

/// `--contacts` value that reads the export from stdin.
pub const STDIN_PATH: &str = "-";

/// Shared context for all commands.
#[derive(Debug, Clone)]
pub struct Context {
    /// Output as JSON for scripting.
    pub json_output: bool,
    /// Verbose output enabled.
    pub verbose: bool,
    /// Contact export given on the command line, overriding config.
    pub contacts: Option<PathBuf>,
    /// Config directory given on the command line.
    pub config_dir: Option<PathBuf>,
    /// Merged configuration and the files it came from.
    pub loaded: LoadedConfig,
}

impl Context {
    /// The contact export to load: `--contacts`, then `[contacts].path`.
    pub fn contacts_path(&self) -> Result<PathBuf> {
        self.contacts
            .clone()
            .or_else(|| self.loaded.config.contacts().path)
            .ok_or_else(|| {
                anyhow!("no contact file configured; pass --contacts or set [contacts].path")
            })
    }

    /// Whether the contact export is piped in on stdin (`--contacts -`).
    pub fn contacts_from_stdin(&self) -> bool {
        self.contacts.as_deref() == Some(Path::new(STDIN_PATH))
    }

    /// Load the contact table. Failure here ends the command.
    pub fn load_table(&self) -> Result<ContactTable> {
        let path = self.contacts_path()?;
        let options = self.loaded.config.contacts().ingest_options();
        let table = if self.contacts_from_stdin() {
            callsheet_core::read_contacts(io::stdin().lock(), &options)
                .context("could not load contacts from stdin")?
        } else {
            callsheet_core::load_contacts(&path, &options)
                .with_context(|| format!("could not load contacts from {}", path.display()))?
        };
        tracing::info!(path = %path.display(), contacts = table.len(), "Contact table ready");
        Ok(table)
    }
}
