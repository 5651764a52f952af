//! Contact records and the immutable table they are loaded into.

use serde::Serialize;

/// One row of the contact export.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContactRecord {
    /// Username or handle identifying the person.
    pub identifier: String,
    /// Phone number, compared by exact string equality.
    pub phone_number: String,
    /// Recorded street address.
    pub address: String,
}

impl ContactRecord {
    /// Create a record, trimming surrounding whitespace from every field.
    pub fn new(
        identifier: impl AsRef<str>,
        phone_number: impl AsRef<str>,
        address: impl AsRef<str>,
    ) -> Self {
        Self {
            identifier: identifier.as_ref().trim().to_string(),
            phone_number: phone_number.as_ref().trim().to_string(),
            address: address.as_ref().trim().to_string(),
        }
    }
}

/// Ordered, read-only collection of contact records.
///
/// Built once per session. Nothing hands out mutable access afterwards, so
/// lookups only ever produce views in source order.
#[derive(Debug, Clone, Default)]
pub struct ContactTable {
    records: Vec<ContactRecord>,
}

impl ContactTable {
    /// Create a table from records in their source order.
    pub fn new(records: Vec<ContactRecord>) -> Self {
        Self { records }
    }

    /// All records in source order.
    pub fn records(&self) -> &[ContactRecord] {
        &self.records
    }

    /// Iterate records in source order.
    pub fn iter(&self) -> std::slice::Iter<'_, ContactRecord> {
        self.records.iter()
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the table has no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// First record whose identifier equals `identifier` exactly.
    pub fn find(&self, identifier: &str) -> Option<&ContactRecord> {
        self.records.iter().find(|r| r.identifier == identifier)
    }

    /// Records sharing `phone_number`, in table order.
    pub fn sharing_phone<'a>(
        &'a self,
        phone_number: &'a str,
    ) -> impl Iterator<Item = &'a ContactRecord> + 'a {
        self.records
            .iter()
            .filter(move |r| r.phone_number == phone_number)
    }
}

impl<'a> IntoIterator for &'a ContactTable {
    type Item = &'a ContactRecord;
    type IntoIter = std::slice::Iter<'a, ContactRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

impl FromIterator<ContactRecord> for ContactTable {
    fn from_iter<I: IntoIterator<Item = ContactRecord>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> ContactTable {
        ContactTable::new(vec![
            ContactRecord::new("alice", "555", "A St"),
            ContactRecord::new("bob", "555", "B Ave"),
            ContactRecord::new("carol", "777", "C Rd"),
            ContactRecord::new("alice", "999", "Elsewhere"),
        ])
    }

    #[test]
    fn test_record_fields_are_trimmed() {
        let record = ContactRecord::new("  alice\t", " 555 ", "\tA St  ");
        assert_eq!(record.identifier, "alice");
        assert_eq!(record.phone_number, "555");
        assert_eq!(record.address, "A St");
    }

    #[test]
    fn test_find_returns_first_match() {
        let table = table();
        let record = table.find("alice").unwrap();
        assert_eq!(record.phone_number, "555");
        assert!(table.find("dave").is_none());
    }

    #[test]
    fn test_find_is_case_sensitive() {
        assert!(table().find("Alice").is_none());
    }

    #[test]
    fn test_sharing_phone_keeps_table_order() {
        let table = table();
        let ids: Vec<&str> = table
            .sharing_phone("555")
            .map(|r| r.identifier.as_str())
            .collect();
        assert_eq!(ids, vec!["alice", "bob"]);
    }

    #[test]
    fn test_collect_into_table() {
        let table: ContactTable = vec![ContactRecord::new("x", "1", "a")]
            .into_iter()
            .collect();
        assert_eq!(table.len(), 1);
        assert!(!table.is_empty());
        assert!(ContactTable::default().is_empty());
    }
}
