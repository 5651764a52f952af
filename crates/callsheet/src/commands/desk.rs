//! Operator desk: the per-line state machine behind the interactive session.
//!
//! Each line the operator enters is routed according to the current [`Stage`]:
//! an identifier to look up, a menu choice after a lookup, or note text.

use std::io::{self, Write};

use callsheet_core::{CallSession, Clock, SessionSummary, Verdict};
use console::{Style, style};

use super::lookup::write_lookup;

/// What the desk expects next.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Stage {
    /// Waiting for a username.
    Identifier,
    /// Waiting for a menu choice about the current contact.
    Choice { identifier: String },
    /// Waiting for note text for the current contact.
    Note { identifier: String },
}

/// Control flow for the session loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlFlow {
    Continue,
    Exit,
}

/// Interactive session state over a [`CallSession`].
pub struct Desk<C: Clock> {
    session: CallSession<C>,
    stage: Stage,
}

impl<C: Clock> Desk<C> {
    /// Create a desk waiting for the first identifier.
    pub fn new(session: CallSession<C>) -> Self {
        Self {
            session,
            stage: Stage::Identifier,
        }
    }

    /// The current stage.
    pub fn stage(&self) -> &Stage {
        &self.stage
    }

    /// The underlying session.
    pub fn session(&self) -> &CallSession<C> {
        &self.session
    }

    /// Prompt text for the current stage.
    pub fn prompt(&self) -> String {
        match self.stage {
            Stage::Identifier => format!(
                "{} ",
                style("Enter the username (or type 'exit' to quit):").cyan()
            ),
            Stage::Choice { .. } => format!("{} ", style("Enter your choice (1/2/3):").cyan()),
            Stage::Note { .. } => format!("{} ", style("Enter notes for this call:").cyan()),
        }
    }

    /// Abandon the current contact and return to the identifier prompt.
    pub fn cancel(&mut self) {
        self.stage = Stage::Identifier;
    }

    /// Handle one line of operator input.
    pub fn handle<W: Write>(&mut self, line: &str, out: &mut W) -> io::Result<ControlFlow> {
        match std::mem::replace(&mut self.stage, Stage::Identifier) {
            Stage::Identifier => self.handle_identifier(line.trim(), out),
            Stage::Choice { identifier } => self.handle_choice(identifier, line.trim(), out),
            Stage::Note { identifier } => self.handle_note(identifier, line, out),
        }
    }

    fn handle_identifier<W: Write>(
        &mut self,
        input: &str,
        out: &mut W,
    ) -> io::Result<ControlFlow> {
        if input.is_empty() {
            return Ok(ControlFlow::Continue);
        }
        if input.eq_ignore_ascii_case("exit") || input.eq_ignore_ascii_case("quit") {
            return Ok(ControlFlow::Exit);
        }
        if let Some(command) = input.strip_prefix('/') {
            return self.handle_slash_command(command, out);
        }

        let result = self.session.lookup(input);
        write_lookup(out, input, &result)?;

        let verdict = self.session.check_and_register(input);
        write_verdict(out, verdict)?;

        let Some(found) = result.into_found() else {
            return Ok(ControlFlow::Continue);
        };
        write_menu(out)?;

        self.stage = Stage::Choice {
            identifier: found.identifier,
        };
        Ok(ControlFlow::Continue)
    }

    fn handle_choice<W: Write>(
        &mut self,
        identifier: String,
        choice: &str,
        out: &mut W,
    ) -> io::Result<ControlFlow> {
        match choice {
            "1" => {
                self.stage = Stage::Note { identifier };
                Ok(ControlFlow::Continue)
            }
            "2" => Ok(ControlFlow::Continue),
            "3" => Ok(ControlFlow::Exit),
            _ => {
                let red = Style::new().red();
                writeln!(
                    out,
                    "{} Invalid choice. Please try again.",
                    red.apply_to("✗")
                )?;
                self.stage = Stage::Choice { identifier };
                Ok(ControlFlow::Continue)
            }
        }
    }

    fn handle_note<W: Write>(
        &mut self,
        identifier: String,
        text: &str,
        out: &mut W,
    ) -> io::Result<ControlFlow> {
        let dim = Style::new().dim();
        let text = text.trim_end();
        if text.trim().is_empty() {
            writeln!(out, "{}", dim.apply_to("(empty note discarded)"))?;
            return Ok(ControlFlow::Continue);
        }

        let entry = self.session.append_note(&identifier, text);
        let green = Style::new().green();
        writeln!(
            out,
            "{} Note saved {}",
            green.apply_to("✓"),
            dim.apply_to(format!("({})", entry.timestamp))
        )?;
        Ok(ControlFlow::Continue)
    }

    fn handle_slash_command<W: Write>(
        &mut self,
        command: &str,
        out: &mut W,
    ) -> io::Result<ControlFlow> {
        match command.trim() {
            "quit" | "q" | "exit" => return Ok(ControlFlow::Exit),
            "help" | "h" | "?" => write_help(out)?,
            "summary" | "status" => write_summary(out, self.session.summary())?,
            "notes" => self.write_notes(out)?,
            other => {
                let red = Style::new().red();
                let dim = Style::new().dim();
                writeln!(out, "{} Unknown command: /{}", red.apply_to("Error:"), other)?;
                writeln!(out, "{}", dim.apply_to("Type /help for available commands"))?;
            }
        }
        Ok(ControlFlow::Continue)
    }

    fn write_notes<W: Write>(&self, out: &mut W) -> io::Result<()> {
        let dim = Style::new().dim();
        let notes = self.session.notes();
        if notes.is_empty() {
            return writeln!(out, "{}", dim.apply_to("No notes taken yet"));
        }
        for entry in notes.entries() {
            writeln!(out, "  {}", entry.to_line())?;
        }
        Ok(())
    }
}

fn write_verdict<W: Write>(out: &mut W, verdict: Verdict) -> io::Result<()> {
    let marker = if verdict.is_clear() {
        Style::new().green().apply_to("✓")
    } else {
        Style::new().yellow().apply_to("⚠")
    };
    writeln!(out, "{} {}", marker, verdict.message())
}

fn write_menu<W: Write>(out: &mut W) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, "Choose an option:")?;
    writeln!(out, "  1. Add notes for current call")?;
    writeln!(out, "  2. Proceed to next call")?;
    writeln!(out, "  3. End the program")
}

fn write_help<W: Write>(out: &mut W) -> io::Result<()> {
    let dim = Style::new().dim();
    writeln!(out)?;
    writeln!(out, "{}", style("Available Commands").bold())?;
    writeln!(out, "{}", dim.apply_to("─".repeat(40)))?;
    writeln!(out, "  {}  - Look up and check a contact", style("<username>").cyan())?;
    writeln!(out, "  {}  - End the session", style("exit, /quit").cyan())?;
    writeln!(out, "  {}  - Show this help", style("/help, /h, /?").cyan())?;
    writeln!(out, "  {}  - Show session counters", style("/summary").cyan())?;
    writeln!(out, "  {}  - List notes taken so far", style("/notes").cyan())?;
    writeln!(out)?;
    writeln!(out, "{}", dim.apply_to("Keyboard shortcuts:"))?;
    writeln!(out, "  {} - Back to the username prompt", dim.apply_to("Ctrl+C"))?;
    writeln!(out, "  {} - End the session", dim.apply_to("Ctrl+D"))?;
    writeln!(out)
}

fn write_summary<W: Write>(out: &mut W, summary: SessionSummary) -> io::Result<()> {
    let dim = Style::new().dim();
    writeln!(out, "  {} {}", dim.apply_to("Contacts:"), summary.contacts)?;
    writeln!(out, "  {} {}", dim.apply_to("Called:  "), summary.called)?;
    writeln!(out, "  {} {}", dim.apply_to("Notes:   "), summary.notes)
}
