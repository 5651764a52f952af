//! Append-only session notes, written to a file when the session ends.

use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::Path;

use serde::Serialize;
use tracing::{debug, info};

use crate::clock::Clock;
use crate::error::{Error, Result};

/// Timestamp format for note entries (ISO-like, second precision).
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// A single note taken during a call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NoteEntry {
    pub identifier: String,
    pub timestamp: String,
    pub text: String,
}

impl NoteEntry {
    /// The line written to the notes file, without the trailing newline.
    pub fn to_line(&self) -> String {
        format!("{}: {} - {}", self.identifier, self.timestamp, self.text)
    }
}

/// Ordered notes for one session.
#[derive(Debug, Clone, Default)]
pub struct NotesLog {
    entries: Vec<NoteEntry>,
}

impl NotesLog {
    /// Create an empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a note stamped with `clock`'s current time.
    ///
    /// Line breaks in `text` become spaces so each entry stays on one line.
    pub fn append<C: Clock + ?Sized>(
        &mut self,
        identifier: &str,
        text: &str,
        clock: &C,
    ) -> &NoteEntry {
        let entry = NoteEntry {
            identifier: identifier.trim().to_string(),
            timestamp: clock.now().format(TIMESTAMP_FORMAT).to_string(),
            text: text.replace(['\r', '\n'], " "),
        };
        debug!(identifier = %entry.identifier, timestamp = %entry.timestamp, "Note appended");
        self.entries.push(entry);
        &self.entries[self.entries.len() - 1]
    }

    /// Entries in the order they were appended.
    pub fn entries(&self) -> &[NoteEntry] {
        &self.entries
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no notes have been taken.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Write one newline-terminated line per entry, in order.
    pub fn write_to<W: Write>(&self, mut writer: W) -> io::Result<usize> {
        for entry in &self.entries {
            writeln!(writer, "{}", entry.to_line())?;
        }
        writer.flush()?;
        Ok(self.entries.len())
    }

    /// Write all entries to a new file at `path`, returning the line count.
    ///
    /// With no entries this returns `Ok(0)` and does not touch the
    /// filesystem. An existing file at `path` is truncated. The log itself
    /// is left intact.
    pub fn flush(&self, path: impl AsRef<Path>) -> Result<usize> {
        let path = path.as_ref();
        if self.entries.is_empty() {
            debug!(path = %path.display(), "No notes to flush");
            return Ok(0);
        }

        let write_err = |source: io::Error| Error::WriteNotes {
            path: path.display().to_string(),
            source,
        };

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent).map_err(write_err)?;
        }

        let file = File::create(path).map_err(write_err)?;
        let written = self.write_to(BufWriter::new(file)).map_err(write_err)?;

        info!(path = %path.display(), notes = written, "Notes flushed");
        Ok(written)
    }
}
