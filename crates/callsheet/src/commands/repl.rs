//! REPL (Read-Eval-Print Loop) driving an operator desk from the terminal.

use std::path::PathBuf;

use anyhow::Result;
use callsheet_config::NotesConfig;
use callsheet_core::{CallSession, Clock};
use console::{Style, style};
use rustyline::error::ReadlineError;
use rustyline::history::DefaultHistory;
use rustyline::{Config, Editor};
use tracing::{info, warn};

use super::desk::{ControlFlow, Desk, Stage};

/// REPL state and configuration.
pub struct Repl<C: Clock> {
    desk: Desk<C>,
    editor: Editor<(), DefaultHistory>,
    notes: NotesConfig,
}

impl<C: Clock> Repl<C> {
    /// Create a new REPL instance.
    pub fn new(session: CallSession<C>, notes: NotesConfig) -> Result<Self> {
        let config = Config::builder()
            .history_ignore_space(true)
            .auto_add_history(true)
            .build();

        let editor = Editor::with_config(config)?;

        Ok(Self {
            desk: Desk::new(session),
            editor,
            notes,
        })
    }

    /// Run the REPL loop, then write any notes taken.
    pub fn run(&mut self) -> Result<()> {
        self.print_welcome();

        loop {
            let prompt = self.desk.prompt();

            match self.editor.readline(&prompt) {
                Ok(line) => {
                    let mut stdout = std::io::stdout().lock();
                    match self.desk.handle(&line, &mut stdout) {
                        Ok(ControlFlow::Continue) => continue,
                        Ok(ControlFlow::Exit) => break,
                        Err(e) => {
                            drop(stdout);
                            self.print_error(&format!("Output error: {}", e));
                            break;
                        }
                    }
                }
                Err(ReadlineError::Interrupted) => {
                    // Ctrl+C - drop the current contact but keep the session
                    println!();
                    if *self.desk.stage() == Stage::Identifier {
                        self.print_dim("(Interrupted - type exit to quit)");
                    } else {
                        self.desk.cancel();
                        self.print_dim("(Interrupted - back to the username prompt)");
                    }
                    continue;
                }
                Err(ReadlineError::Eof) => {
                    // Ctrl+D - exit
                    println!();
                    break;
                }
                Err(e) => {
                    self.print_error(&format!("Input error: {}", e));
                    break;
                }
            }
        }

        self.finish()
    }

    /// Flush notes to the configured file.
    fn finish(&self) -> Result<()> {
        let session = self.desk.session();
        let summary = session.summary();
        info!(
            called = summary.called,
            notes = summary.notes,
            "Session ended"
        );

        let path: PathBuf = self.notes.file_path(session.clock().now());
        match session.flush_notes(&path) {
            Ok(0) => self.print_dim("No notes to save."),
            Ok(count) => {
                let green = Style::new().green();
                println!(
                    "{} {} note(s) saved to {}",
                    green.apply_to("✓"),
                    count,
                    path.display()
                );
            }
            Err(e) => {
                warn!(error = %e, "Failed to save notes");
                return Err(e.into());
            }
        }

        self.print_dim("Goodbye!");
        Ok(())
    }

    fn print_welcome(&self) {
        let dim = Style::new().dim();
        let summary = self.desk.session().summary();
        println!();
        println!("{}", style("Callsheet").bold().cyan());
        println!("{}", dim.apply_to("─".repeat(40)));
        println!(
            "{}",
            dim.apply_to(format!("{} contacts loaded.", summary.contacts))
        );
        println!(
            "{}",
            dim.apply_to("Enter a username to look it up. Use /help for commands.")
        );
        println!();
    }

    fn print_dim(&self, msg: &str) {
        let dim = Style::new().dim();
        println!("{}", dim.apply_to(msg));
    }

    fn print_error(&self, msg: &str) {
        let red = Style::new().red();
        eprintln!("{} {}", red.apply_to("Error:"), msg);
    }
}
