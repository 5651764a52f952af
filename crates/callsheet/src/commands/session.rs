//! Session command - interactive calling session.

use std::path::PathBuf;

use anyhow::{Result, bail};
use callsheet_core::{CallSession, SystemClock};
use clap::Args;

use super::Context;
use super::repl::Repl;

/// Arguments for the session command.
#[derive(Args, Debug, Default)]
pub struct SessionArgs {
    /// Directory to write the notes file into
    #[arg(long)]
    pub notes_dir: Option<PathBuf>,

    /// Notes file name (default: call_notes.txt)
    #[arg(long)]
    pub notes_file: Option<String>,

    /// Append the session end time to the notes file name
    #[arg(long)]
    pub timestamped: bool,
}

/// Run the session command.
pub fn run(args: SessionArgs, ctx: &Context) -> Result<()> {
    if ctx.json_output {
        bail!("--json is not supported for interactive sessions; use `lookup` or `conflicts`");
    }
    // stdin carries the operator's input
    if ctx.contacts_from_stdin() {
        bail!("a session cannot read contacts from stdin; pass a file to --contacts");
    }

    let table = ctx.load_table()?;

    let mut notes = ctx.loaded.config.notes();
    if let Some(dir) = args.notes_dir {
        notes.dir = Some(dir);
    }
    if let Some(file_name) = args.notes_file {
        notes.file_name = file_name;
    }
    if args.timestamped {
        notes.timestamped = true;
    }

    let session = CallSession::new(table, SystemClock);
    let mut repl = Repl::new(session, notes)?;
    repl.run()
}
