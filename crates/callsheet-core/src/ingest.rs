//! Tab-separated contact export ingestion.
//!
//! The first line is a header row; column names are matched after trimming.
//! Every field value is trimmed. Short rows yield empty strings for missing
//! fields, and fully blank rows are skipped.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, trace};

use crate::contact::{ContactRecord, ContactTable};
use crate::error::{Error, Result};

/// Header names of the columns the table is built from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColumnNames {
    pub identifier: String,
    pub phone_number: String,
    pub address: String,
}

impl Default for ColumnNames {
    fn default() -> Self {
        Self {
            identifier: "Username".to_string(),
            phone_number: "PhoneNumber".to_string(),
            address: "Address".to_string(),
        }
    }
}

/// Options controlling how a contact export is parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IngestOptions {
    /// Field delimiter byte.
    pub delimiter: u8,
    /// Required column names.
    pub columns: ColumnNames,
}

impl Default for IngestOptions {
    fn default() -> Self {
        Self {
            delimiter: b'\t',
            columns: ColumnNames::default(),
        }
    }
}

impl IngestOptions {
    /// Create options with the default tab delimiter and column names.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the field delimiter.
    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Set the required column names.
    pub fn with_columns(mut self, columns: ColumnNames) -> Self {
        self.columns = columns;
        self
    }
}

/// Load a contact table from a file on disk.
pub fn load_contacts(path: impl AsRef<Path>, options: &IngestOptions) -> Result<ContactTable> {
    let path = path.as_ref();
    info!(path = %path.display(), "Loading contact table");

    let file = File::open(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            Error::FileNotFound(path.to_path_buf())
        } else {
            Error::Ingestion {
                path: path.display().to_string(),
                message: e.to_string(),
            }
        }
    })?;

    parse(file, options, &path.display().to_string())
}

/// Read a contact table from any reader (e.g. stdin or an in-memory buffer).
pub fn read_contacts<R: Read>(reader: R, options: &IngestOptions) -> Result<ContactTable> {
    parse(reader, options, "<reader>")
}

fn parse<R: Read>(reader: R, options: &IngestOptions, source: &str) -> Result<ContactTable> {
    let ingestion = |e: csv::Error| Error::Ingestion {
        path: source.to_string(),
        message: e.to_string(),
    };

    let mut reader = csv::ReaderBuilder::new()
        .delimiter(options.delimiter)
        .has_headers(true)
        .flexible(true)
        .quoting(false)
        .from_reader(reader);

    let headers = reader.headers().map_err(ingestion)?.clone();
    let column = |name: &str| -> Result<usize> {
        headers
            .iter()
            .position(|h| h.trim() == name)
            .ok_or_else(|| Error::MissingColumn(name.to_string()))
    };
    let id_col = column(&options.columns.identifier)?;
    let phone_col = column(&options.columns.phone_number)?;
    let addr_col = column(&options.columns.address)?;

    let mut records = Vec::new();
    for row in reader.records() {
        let row = row.map_err(ingestion)?;
        if row.iter().all(|field| field.trim().is_empty()) {
            continue;
        }
        let field = |idx: usize| row.get(idx).unwrap_or("");
        let record = ContactRecord::new(field(id_col), field(phone_col), field(addr_col));
        trace!(identifier = %record.identifier, phone = %record.phone_number, "Ingested contact row");
        records.push(record);
    }

    debug!(source = %source, rows = records.len(), "Contact table loaded");
    Ok(ContactTable::new(records))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    const EXPORT: &str = "Username\tPhoneNumber\tAddress\n\
                          alice\t555\tA St\n\
                          bob\t555\tB Ave\n";

    #[test]
    fn test_read_contacts_basic() {
        let table = read_contacts(EXPORT.as_bytes(), &IngestOptions::default()).unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.records()[0], ContactRecord::new("alice", "555", "A St"));
        assert_eq!(table.records()[1], ContactRecord::new("bob", "555", "B Ave"));
    }

    #[test]
    fn test_header_and_values_are_trimmed() {
        let data = " Username \t PhoneNumber\tAddress  \n  alice \t 555\t  A St \n";
        let table = read_contacts(data.as_bytes(), &IngestOptions::default()).unwrap();
        assert_eq!(table.records()[0], ContactRecord::new("alice", "555", "A St"));
        assert_eq!(table.records()[0].identifier, "alice");
    }

    #[test]
    fn test_extra_columns_in_any_order() {
        let data = "Address\tNotes\tUsername\tPhoneNumber\n\
                    A St\tvip\talice\t555\n";
        let table = read_contacts(data.as_bytes(), &IngestOptions::default()).unwrap();
        let record = &table.records()[0];
        assert_eq!(record.identifier, "alice");
        assert_eq!(record.phone_number, "555");
        assert_eq!(record.address, "A St");
    }

    #[test]
    fn test_short_row_yields_empty_fields() {
        let data = "Username\tPhoneNumber\tAddress\nalice\t555\n";
        let table = read_contacts(data.as_bytes(), &IngestOptions::default()).unwrap();
        assert_eq!(table.records()[0].address, "");
    }

    #[test]
    fn test_blank_rows_are_skipped() {
        let data = "Username\tPhoneNumber\tAddress\nalice\t555\tA St\n\t\t\n";
        let table = read_contacts(data.as_bytes(), &IngestOptions::default()).unwrap();
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn test_quotes_are_literal() {
        let data = "Username\tPhoneNumber\tAddress\nalice\t555\t\"12 Main\" St\n";
        let table = read_contacts(data.as_bytes(), &IngestOptions::default()).unwrap();
        assert_eq!(table.records()[0].address, "\"12 Main\" St");
    }

    #[test]
    fn test_missing_column() {
        let data = "Username\tPhone\tAddress\nalice\t555\tA St\n";
        let err = read_contacts(data.as_bytes(), &IngestOptions::default()).unwrap_err();
        assert!(matches!(err, Error::MissingColumn(ref c) if c == "PhoneNumber"));
    }

    #[test]
    fn test_custom_delimiter_and_columns() {
        let data = "user,phone,addr\nalice,555,A St\n";
        let options = IngestOptions::new()
            .with_delimiter(b',')
            .with_columns(ColumnNames {
                identifier: "user".to_string(),
                phone_number: "phone".to_string(),
                address: "addr".to_string(),
            });
        let table = read_contacts(data.as_bytes(), &options).unwrap();
        assert_eq!(table.records()[0], ContactRecord::new("alice", "555", "A St"));
    }

    #[test]
    fn test_load_contacts_from_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("export.txt");
        fs::write(&path, EXPORT).unwrap();

        let table = load_contacts(&path, &IngestOptions::default()).unwrap();
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn test_load_contacts_file_not_found() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("missing.txt");

        let err = load_contacts(&path, &IngestOptions::default()).unwrap_err();
        assert!(matches!(err, Error::FileNotFound(ref p) if p == &path));
        assert!(err.to_string().starts_with("File not found:"));
    }

    #[test]
    fn test_empty_input_reports_missing_column() {
        let err = read_contacts("".as_bytes(), &IngestOptions::default()).unwrap_err();
        assert!(matches!(err, Error::MissingColumn(_)));
    }
}
