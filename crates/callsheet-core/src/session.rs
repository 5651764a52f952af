//! Session context threading the contact table, guard, notes, and clock.

use std::path::Path;

use serde::Serialize;

use crate::clock::Clock;
use crate::contact::ContactTable;
use crate::error::Result;
use crate::guard::{CallGuard, Verdict};
use crate::lookup::{LookupResult, lookup};
use crate::notes::{NoteEntry, NotesLog};

/// Counters describing a session so far.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SessionSummary {
    /// Records in the contact table.
    pub contacts: usize,
    /// Calls registered by the guard.
    pub called: usize,
    /// Notes taken.
    pub notes: usize,
}

/// State for one operator session.
///
/// Owns the contact table (read-only), the call guard, and the notes log.
/// Dropping the session discards the guard; nothing persists between runs
/// except the flushed notes file.
pub struct CallSession<C: Clock> {
    table: ContactTable,
    guard: CallGuard,
    notes: NotesLog,
    clock: C,
}

impl<C: Clock> CallSession<C> {
    /// Start a session over `table`.
    pub fn new(table: ContactTable, clock: C) -> Self {
        Self {
            table,
            guard: CallGuard::new(),
            notes: NotesLog::new(),
            clock,
        }
    }

    /// The contact table.
    pub fn table(&self) -> &ContactTable {
        &self.table
    }

    /// The call guard state.
    pub fn guard(&self) -> &CallGuard {
        &self.guard
    }

    /// The notes taken so far.
    pub fn notes(&self) -> &NotesLog {
        &self.notes
    }

    /// The session clock.
    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Look up `identifier` without affecting session state.
    pub fn lookup(&self, identifier: &str) -> LookupResult {
        lookup(&self.table, identifier)
    }

    /// Check `identifier` against the guard, recording the call if clear.
    pub fn check_and_register(&mut self, identifier: &str) -> Verdict {
        self.guard.check_and_register(&self.table, identifier)
    }

    /// Append a note for `identifier`, stamped with the session clock.
    pub fn append_note(&mut self, identifier: &str, text: &str) -> &NoteEntry {
        self.notes.append(identifier, text, &self.clock)
    }

    /// Write the notes to `path`. Does nothing when no notes were taken.
    pub fn flush_notes(&self, path: impl AsRef<Path>) -> Result<usize> {
        self.notes.flush(path)
    }

    /// Current counters.
    pub fn summary(&self) -> SessionSummary {
        SessionSummary {
            contacts: self.table.len(),
            called: self.guard.called_count(),
            notes: self.notes.len(),
        }
    }
}
