//! Core call-session logic for Callsheet.
//!
//! This crate provides the pieces an operator session is built from:
//! - An immutable [`ContactTable`] loaded once from a tab-separated export
//! - Lookup with address conflict detection for shared phone numbers
//! - A [`CallGuard`] that refuses repeat calls by identifier or phone number
//! - An append-only [`NotesLog`] flushed to a file when the session ends
//!
//! None of these touch the terminal; the interactive loop lives in the
//! `callsheet` binary and drives a [`CallSession`].
//!
//! # Example
//!
//! ```rust,ignore
//! use callsheet_core::{CallSession, IngestOptions, SystemClock, load_contacts};
//!
//! let table = load_contacts("contacts.tsv", &IngestOptions::default())?;
//! let mut session = CallSession::new(table, SystemClock);
//!
//! if session.check_and_register("alice").is_clear() {
//!     session.append_note("alice", "left voicemail");
//! }
//! session.flush_notes("call_notes.txt")?;
//! ```

mod clock;
mod contact;
mod error;
mod guard;
mod ingest;
mod lookup;
mod notes;
mod session;

pub use clock::{Clock, FixedClock, SystemClock};
pub use contact::{ContactRecord, ContactTable};
pub use error::{Error, Result};
pub use guard::{CallGuard, Verdict};
pub use ingest::{ColumnNames, IngestOptions, load_contacts, read_contacts};
pub use lookup::{ADDRESS_SEPARATOR, ContactMatch, LookupResult, PhoneConflict, conflicts, lookup};
pub use notes::{NoteEntry, NotesLog, TIMESTAMP_FORMAT};
pub use session::{CallSession, SessionSummary};
