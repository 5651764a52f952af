//! Configuration types mapping to the TOML schema.
//!
//! Top-level config:
//! ```toml
//! [contacts]               # contact export location and format
//! [contacts.columns]       # header names to read
//! [notes]                  # where session notes are written
//! [logging]                # log file directory
//! ```

use std::path::{Path, PathBuf};

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

pub use callsheet_core::ColumnNames;
use callsheet_core::IngestOptions;

use crate::{ConfigError, Result};

// ─────────────────────────────────────────────────────────────────────────────
// Top-level Config
// ─────────────────────────────────────────────────────────────────────────────

/// Root configuration structure.
///
/// All sections are optional so that partial configs (e.g., project-local
/// overrides) can be loaded and merged.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CallsheetConfig {
    /// Contact export settings.
    pub contacts: Option<ContactsConfig>,

    /// Notes output settings.
    pub notes: Option<NotesConfig>,

    /// Log file settings.
    pub logging: Option<LoggingConfig>,
}

impl CallsheetConfig {
    /// Create an empty config.
    pub fn new() -> Self {
        Self::default()
    }

    /// The config written by `callsheet config init`: every section a new
    /// operator is likely to edit, filled with defaults.
    pub fn starter() -> Self {
        Self {
            contacts: Some(ContactsConfig::default()),
            notes: Some(NotesConfig::default()),
            logging: None,
        }
    }

    /// Parse from a TOML string.
    pub fn from_toml(toml_str: &str) -> Result<Self> {
        Ok(toml::from_str(toml_str)?)
    }

    /// Serialize to a TOML string.
    pub fn to_toml(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Merge another config on top of this one (other takes priority).
    pub fn merge(&mut self, other: CallsheetConfig) {
        if other.contacts.is_some() {
            self.contacts = other.contacts;
        }

        if other.notes.is_some() {
            self.notes = other.notes;
        }

        if other.logging.is_some() {
            self.logging = other.logging;
        }
    }

    /// Contact settings, or defaults if the section is absent.
    pub fn contacts(&self) -> ContactsConfig {
        self.contacts.clone().unwrap_or_default()
    }

    /// Notes settings, or defaults if the section is absent.
    pub fn notes(&self) -> NotesConfig {
        self.notes.clone().unwrap_or_default()
    }

    /// Logging settings, or defaults if the section is absent.
    pub fn logging(&self) -> LoggingConfig {
        self.logging.clone().unwrap_or_default()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Contacts
// ─────────────────────────────────────────────────────────────────────────────

/// Where the contact export lives and how to read it.
///
/// ```toml
/// [contacts]
/// path = "export.txt"
/// delimiter = "\t"
///
/// [contacts.columns]
/// identifier = "Username"
/// phone_number = "PhoneNumber"
/// address = "Address"
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContactsConfig {
    /// Path to the contact export. Overridden by `--contacts`.
    pub path: Option<PathBuf>,

    /// Field delimiter, a single ASCII character.
    pub delimiter: String,

    /// Header names of the required columns.
    pub columns: ColumnNames,
}

impl Default for ContactsConfig {
    fn default() -> Self {
        Self {
            path: None,
            delimiter: "\t".to_string(),
            columns: ColumnNames::default(),
        }
    }
}

impl ContactsConfig {
    /// The delimiter as a byte.
    pub fn delimiter_byte(&self) -> Result<u8> {
        match self.delimiter.as_bytes() {
            [b] if b.is_ascii() => Ok(*b),
            _ => Err(ConfigError::InvalidDelimiter(self.delimiter.clone())),
        }
    }

    /// Ingestion options, falling back to a tab for an invalid delimiter.
    pub fn ingest_options(&self) -> IngestOptions {
        IngestOptions::new()
            .with_delimiter(self.delimiter_byte().unwrap_or(b'\t'))
            .with_columns(self.columns.clone())
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Notes
// ─────────────────────────────────────────────────────────────────────────────

/// Default notes file name.
pub const DEFAULT_NOTES_FILE: &str = "call_notes.txt";

/// Where session notes are written.
///
/// ```toml
/// [notes]
/// dir = "~/calls"
/// file_name = "call_notes.txt"
/// timestamped = true      # call_notes_20250404_094645.txt
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NotesConfig {
    /// Output directory. Default: current directory.
    pub dir: Option<PathBuf>,

    /// Output file name.
    pub file_name: String,

    /// Append the session end time to the file stem.
    pub timestamped: bool,
}

impl Default for NotesConfig {
    fn default() -> Self {
        Self {
            dir: None,
            file_name: DEFAULT_NOTES_FILE.to_string(),
            timestamped: false,
        }
    }
}

impl NotesConfig {
    /// Resolve the notes file path for a session ending at `now`.
    pub fn file_path(&self, now: NaiveDateTime) -> PathBuf {
        let dir = self.dir.clone().unwrap_or_else(|| PathBuf::from("."));
        if !self.timestamped {
            return dir.join(&self.file_name);
        }

        let name = Path::new(&self.file_name);
        let stem = name
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "call_notes".to_string());
        let stamp = now.format("%Y%m%d_%H%M%S");
        let file_name = match name.extension() {
            Some(ext) => format!("{}_{}.{}", stem, stamp, ext.to_string_lossy()),
            None => format!("{}_{}", stem, stamp),
        };
        dir.join(file_name)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Logging
// ─────────────────────────────────────────────────────────────────────────────

/// Log file settings.
///
/// ```toml
/// [logging]
/// dir = "/var/log/callsheet"
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Directory for the rolling JSON log. Default: `<config dir>/logs`.
    pub dir: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn end_of_session() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 4, 4)
            .unwrap()
            .and_hms_opt(9, 46, 45)
            .unwrap()
    }

    #[test]
    fn test_parse_full_config() {
        let config = CallsheetConfig::from_toml(
            r#"
[contacts]
path = "export.txt"
delimiter = ","

[contacts.columns]
identifier = "user"

[notes]
dir = "out"
timestamped = true

[logging]
dir = "/tmp/logs"
"#,
        )
        .unwrap();

        let contacts = config.contacts();
        assert_eq!(contacts.path, Some(PathBuf::from("export.txt")));
        assert_eq!(contacts.delimiter_byte().unwrap(), b',');
        assert_eq!(contacts.columns.identifier, "user");
        // unspecified columns keep their defaults
        assert_eq!(contacts.columns.phone_number, "PhoneNumber");

        let notes = config.notes();
        assert_eq!(notes.file_name, DEFAULT_NOTES_FILE);
        assert!(notes.timestamped);
        assert_eq!(config.logging().dir, Some(PathBuf::from("/tmp/logs")));
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = CallsheetConfig::from_toml("").unwrap();
        assert!(config.contacts.is_none());
        assert_eq!(config.contacts().delimiter_byte().unwrap(), b'\t');
        assert_eq!(config.notes().file_name, "call_notes.txt");
    }

    #[test]
    fn test_merge_overrides_sections() {
        let mut base = CallsheetConfig::from_toml(
            r#"
[contacts]
path = "base.txt"

[notes]
file_name = "base_notes.txt"
"#,
        )
        .unwrap();
        let overlay = CallsheetConfig::from_toml(
            r#"
[contacts]
path = "project.txt"
"#,
        )
        .unwrap();

        base.merge(overlay);
        assert_eq!(base.contacts().path, Some(PathBuf::from("project.txt")));
        assert_eq!(base.notes().file_name, "base_notes.txt");
    }

    #[test]
    fn test_toml_roundtrip() {
        let mut config = CallsheetConfig::new();
        config.notes = Some(NotesConfig {
            dir: Some(PathBuf::from("notes")),
            file_name: "calls.log".to_string(),
            timestamped: true,
        });

        let toml_str = config.to_toml().unwrap();
        assert_eq!(CallsheetConfig::from_toml(&toml_str).unwrap(), config);
    }

    #[test]
    fn test_invalid_delimiter() {
        let contacts = ContactsConfig {
            delimiter: "||".to_string(),
            ..Default::default()
        };
        assert!(matches!(
            contacts.delimiter_byte(),
            Err(ConfigError::InvalidDelimiter(_))
        ));
        assert_eq!(contacts.ingest_options().delimiter, b'\t');
    }

    #[test]
    fn test_notes_file_path_plain() {
        let notes = NotesConfig::default();
        assert_eq!(
            notes.file_path(end_of_session()),
            PathBuf::from(".").join("call_notes.txt")
        );
    }

    #[test]
    fn test_notes_file_path_timestamped() {
        let notes = NotesConfig {
            dir: Some(PathBuf::from("out")),
            timestamped: true,
            ..Default::default()
        };
        assert_eq!(
            notes.file_path(end_of_session()),
            PathBuf::from("out").join("call_notes_20250404_094645.txt")
        );

        let bare = NotesConfig {
            file_name: "notes".to_string(),
            timestamped: true,
            ..Default::default()
        };
        assert!(
            bare.file_path(end_of_session())
                .ends_with("notes_20250404_094645")
        );
    }
}
