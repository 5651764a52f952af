//! Identifier lookup and address conflict detection.
//!
//! A conflict exists when the phone number of the matched record resolves to
//! more than one distinct, non-empty address anywhere in the table.

use std::collections::HashMap;

use serde::Serialize;
use tracing::debug;

use crate::contact::ContactTable;

/// Separator used when listing conflicting addresses.
pub const ADDRESS_SEPARATOR: &str = " | ";

/// Outcome of looking up an identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LookupResult {
    /// No record carries the identifier.
    NotFound,
    /// The first record carrying the identifier, with its phone's addresses.
    Found(ContactMatch),
}

impl LookupResult {
    /// The match, if any.
    pub fn found(&self) -> Option<&ContactMatch> {
        match self {
            LookupResult::Found(m) => Some(m),
            LookupResult::NotFound => None,
        }
    }

    /// Consume into the match, if any.
    pub fn into_found(self) -> Option<ContactMatch> {
        match self {
            LookupResult::Found(m) => Some(m),
            LookupResult::NotFound => None,
        }
    }
}

/// A matched contact together with every address recorded for its phone.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContactMatch {
    pub identifier: String,
    pub phone_number: String,
    pub primary_address: String,
    /// Distinct non-empty addresses sharing the phone, in first-occurrence order.
    pub distinct_addresses: Vec<String>,
}

impl ContactMatch {
    /// Whether the phone number maps to more than one address.
    pub fn has_conflict(&self) -> bool {
        self.distinct_addresses.len() > 1
    }

    /// The conflicting addresses joined with [`ADDRESS_SEPARATOR`], or `None`
    /// when there is no conflict.
    pub fn conflict_summary(&self) -> Option<String> {
        self.has_conflict()
            .then(|| self.distinct_addresses.join(ADDRESS_SEPARATOR))
    }
}

/// A phone number recorded against more than one address.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PhoneConflict {
    pub phone_number: String,
    /// Identifiers of every record with this phone, in table order.
    pub identifiers: Vec<String>,
    /// Distinct non-empty addresses, in first-occurrence order.
    pub addresses: Vec<String>,
}

/// Find `identifier` (trimmed) in `table`.
///
/// Matching is exact and case-sensitive; when several records share the
/// identifier the first one wins. Never mutates the table.
pub fn lookup(table: &ContactTable, identifier: &str) -> LookupResult {
    let identifier = identifier.trim();

    let Some(record) = table.find(identifier) else {
        debug!(identifier = %identifier, "Identifier not found");
        return LookupResult::NotFound;
    };

    let distinct_addresses = distinct_addresses(table, &record.phone_number);
    debug!(
        identifier = %identifier,
        phone = %record.phone_number,
        addresses = distinct_addresses.len(),
        "Identifier found"
    );

    LookupResult::Found(ContactMatch {
        identifier: record.identifier.clone(),
        phone_number: record.phone_number.clone(),
        primary_address: record.address.clone(),
        distinct_addresses,
    })
}

/// Every phone number in `table` that maps to more than one address, in the
/// order the phone numbers first appear.
///
/// Runs in a single pass over the table.
pub fn conflicts(table: &ContactTable) -> Vec<PhoneConflict> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut groups: Vec<PhoneConflict> = Vec::new();

    for record in table {
        let phone = record.phone_number.as_str();
        let slot = *index.entry(phone).or_insert_with(|| {
            groups.push(PhoneConflict {
                phone_number: phone.to_string(),
                identifiers: Vec::new(),
                addresses: Vec::new(),
            });
            groups.len() - 1
        });

        let group = &mut groups[slot];
        group.identifiers.push(record.identifier.clone());
        if !record.address.is_empty() && !group.addresses.contains(&record.address) {
            group.addresses.push(record.address.clone());
        }
    }

    let found: Vec<PhoneConflict> = groups
        .into_iter()
        .filter(|group| group.addresses.len() > 1)
        .collect();
    debug!(phones = index.len(), conflicts = found.len(), "Conflict scan complete");
    found
}

fn distinct_addresses(table: &ContactTable, phone_number: &str) -> Vec<String> {
    let mut addresses: Vec<String> = Vec::new();
    for record in table.sharing_phone(phone_number) {
        if !record.address.is_empty() && !addresses.contains(&record.address) {
            addresses.push(record.address.clone());
        }
    }
    addresses
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contact::ContactRecord;

    fn table(rows: &[(&str, &str, &str)]) -> ContactTable {
        rows.iter()
            .map(|(id, phone, addr)| ContactRecord::new(id, phone, addr))
            .collect()
    }

    #[test]
    fn test_lookup_not_found() {
        let t = table(&[("alice", "555", "A St")]);
        assert_eq!(lookup(&t, "bob"), LookupResult::NotFound);
        assert_eq!(lookup(&ContactTable::default(), "alice"), LookupResult::NotFound);
    }

    #[test]
    fn test_lookup_conflict_example() {
        let t = table(&[("alice", "555", "A St"), ("bob", "555", "B Ave")]);

        let m = lookup(&t, "alice").into_found().unwrap();
        assert_eq!(m.phone_number, "555");
        assert_eq!(m.primary_address, "A St");
        assert_eq!(m.distinct_addresses, vec!["A St", "B Ave"]);
        assert!(m.has_conflict());
        assert_eq!(m.conflict_summary().as_deref(), Some("A St | B Ave"));
    }

    #[test]
    fn test_lookup_trims_input() {
        let t = table(&[("alice", "555", "A St")]);
        assert!(lookup(&t, "  alice \n").found().is_some());
    }

    #[test]
    fn test_lookup_is_case_sensitive() {
        let t = table(&[("alice", "555", "A St")]);
        assert_eq!(lookup(&t, "ALICE"), LookupResult::NotFound);
    }

    #[test]
    fn test_same_address_many_records_is_not_a_conflict() {
        let t = table(&[
            ("alice", "555", "A St"),
            ("bob", "555", "A St"),
            ("carol", "555", "A St"),
        ]);
        let m = lookup(&t, "bob").into_found().unwrap();
        assert_eq!(m.distinct_addresses, vec!["A St"]);
        assert!(!m.has_conflict());
        assert_eq!(m.conflict_summary(), None);
    }

    #[test]
    fn test_distinct_addresses_first_occurrence_order() {
        let t = table(&[
            ("dave", "555", "C Rd"),
            ("alice", "555", "A St"),
            ("erin", "555", "C Rd"),
            ("bob", "555", "B Ave"),
            ("frank", "777", "Z Way"),
        ]);
        let m = lookup(&t, "bob").into_found().unwrap();
        assert_eq!(m.primary_address, "B Ave");
        assert_eq!(m.distinct_addresses, vec!["C Rd", "A St", "B Ave"]);
        assert_eq!(m.conflict_summary().as_deref(), Some("C Rd | A St | B Ave"));
    }

    #[test]
    fn test_empty_addresses_are_ignored() {
        let t = table(&[("alice", "555", ""), ("bob", "555", "B Ave")]);
        let m = lookup(&t, "alice").into_found().unwrap();
        assert_eq!(m.primary_address, "");
        assert_eq!(m.distinct_addresses, vec!["B Ave"]);
        assert!(!m.has_conflict());
    }

    #[test]
    fn test_duplicate_identifier_first_wins() {
        let t = table(&[("alice", "555", "A St"), ("alice", "999", "Other")]);
        let m = lookup(&t, "alice").into_found().unwrap();
        assert_eq!(m.phone_number, "555");
        assert_eq!(m.primary_address, "A St");
    }

    #[test]
    fn test_conflicts_report() {
        let t = table(&[
            ("alice", "555", "A St"),
            ("carol", "777", "C Rd"),
            ("bob", "555", "B Ave"),
            ("dave", "777", "C Rd"),
            ("erin", "888", "E Ln"),
            ("frank", "888", "F Ct"),
        ]);

        let report = conflicts(&t);
        assert_eq!(report.len(), 2);
        assert_eq!(report[0].phone_number, "555");
        assert_eq!(report[0].identifiers, vec!["alice", "bob"]);
        assert_eq!(report[0].addresses, vec!["A St", "B Ave"]);
        assert_eq!(report[1].phone_number, "888");
    }

    #[test]
    fn test_conflicts_empty_when_consistent() {
        let t = table(&[("alice", "555", "A St"), ("bob", "555", "A St")]);
        assert!(conflicts(&t).is_empty());
    }

    #[test]
    fn test_conflicts_scales_to_large_exports() {
        let rows = 60_000;
        let mut records: Vec<ContactRecord> = (0..rows)
            .map(|i| {
                ContactRecord::new(format!("user{i}"), format!("{i}"), format!("{i} Main St"))
            })
            .collect();
        records.push(ContactRecord::new("late", "17", "Elsewhere"));
        let t = ContactTable::new(records);

        let started = std::time::Instant::now();
        let report = conflicts(&t);
        let elapsed = started.elapsed();

        assert_eq!(report.len(), 1);
        assert_eq!(report[0].phone_number, "17");
        assert_eq!(report[0].identifiers, vec!["user17", "late"]);
        assert_eq!(report[0].addresses, vec!["17 Main St", "Elsewhere"]);
        assert!(
            elapsed < std::time::Duration::from_secs(2),
            "conflict scan took {elapsed:?}"
        );
    }
}
