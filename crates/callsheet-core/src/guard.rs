//! Session-scoped duplicate call guard.

use std::collections::HashSet;

use serde::Serialize;
use tracing::{debug, info};

use crate::contact::ContactTable;
use crate::lookup::{LookupResult, lookup};

/// Decision returned by [`CallGuard::check_and_register`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    /// The identifier is not in the contact table. Nothing was recorded.
    UnknownIdentifier,
    /// This identifier was already called this session.
    AlreadyCalledByIdentifier,
    /// Another identifier with the same phone number was already called.
    AlreadyCalledByPhone,
    /// First contact for both identifier and phone; both are now recorded.
    ClearToCall,
}

impl Verdict {
    /// Whether the operator may place the call.
    pub fn is_clear(self) -> bool {
        self == Verdict::ClearToCall
    }

    /// Operator-facing status line.
    pub fn message(self) -> &'static str {
        match self {
            Verdict::UnknownIdentifier => "Unknown username, no call recorded",
            Verdict::AlreadyCalledByIdentifier => "This contact has already been called",
            Verdict::AlreadyCalledByPhone => {
                "This phone number has already been called for another contact"
            }
            Verdict::ClearToCall => "You're good to call",
        }
    }
}

/// Identifiers and phone numbers already called in this session.
///
/// Both sets only grow. They are updated together, and only on
/// [`Verdict::ClearToCall`].
#[derive(Debug, Clone, Default)]
pub struct CallGuard {
    identifiers: HashSet<String>,
    phone_numbers: HashSet<String>,
}

impl CallGuard {
    /// Create an empty guard.
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up `identifier` and record the call if neither it nor its phone
    /// number has been called yet.
    ///
    /// The identifier check runs before the phone check, so a first-time
    /// identifier sharing an already-called phone is a phone duplicate.
    pub fn check_and_register(&mut self, table: &ContactTable, identifier: &str) -> Verdict {
        let LookupResult::Found(found) = lookup(table, identifier) else {
            return Verdict::UnknownIdentifier;
        };

        if self.identifiers.contains(&found.identifier) {
            debug!(identifier = %found.identifier, "Already called by identifier");
            return Verdict::AlreadyCalledByIdentifier;
        }
        if self.phone_numbers.contains(&found.phone_number) {
            debug!(
                identifier = %found.identifier,
                phone = %found.phone_number,
                "Already called by phone number"
            );
            return Verdict::AlreadyCalledByPhone;
        }

        info!(identifier = %found.identifier, phone = %found.phone_number, "Call registered");
        self.identifiers.insert(found.identifier);
        self.phone_numbers.insert(found.phone_number);
        Verdict::ClearToCall
    }

    /// Whether `identifier` has been called.
    pub fn is_identifier_called(&self, identifier: &str) -> bool {
        self.identifiers.contains(identifier.trim())
    }

    /// Whether `phone_number` has been called.
    pub fn is_phone_called(&self, phone_number: &str) -> bool {
        self.phone_numbers.contains(phone_number.trim())
    }

    /// Number of calls registered.
    pub fn called_count(&self) -> usize {
        self.identifiers.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contact::ContactRecord;

    fn table() -> ContactTable {
        ContactTable::new(vec![
            ContactRecord::new("alice", "555", "A St"),
            ContactRecord::new("bob", "555", "B Ave"),
            ContactRecord::new("carol", "777", "C Rd"),
        ])
    }

    #[test]
    fn test_unknown_identifier_is_not_registered() {
        let t = table();
        let mut guard = CallGuard::new();

        assert_eq!(guard.check_and_register(&t, "zed"), Verdict::UnknownIdentifier);
        assert_eq!(guard.check_and_register(&t, "zed"), Verdict::UnknownIdentifier);
        assert_eq!(guard.called_count(), 0);
        assert!(!guard.is_identifier_called("zed"));
    }

    #[test]
    fn test_repeat_identifier() {
        let t = table();
        let mut guard = CallGuard::new();

        assert_eq!(guard.check_and_register(&t, "carol"), Verdict::ClearToCall);
        assert_eq!(
            guard.check_and_register(&t, "carol"),
            Verdict::AlreadyCalledByIdentifier
        );
        assert_eq!(guard.called_count(), 1);
    }

    #[test]
    fn test_shared_phone_is_blocked() {
        let t = table();
        let mut guard = CallGuard::new();

        assert_eq!(guard.check_and_register(&t, "alice"), Verdict::ClearToCall);
        assert_eq!(guard.check_and_register(&t, "bob"), Verdict::AlreadyCalledByPhone);

        // bob was refused, so only alice is recorded
        assert!(guard.is_identifier_called("alice"));
        assert!(!guard.is_identifier_called("bob"));
        assert!(guard.is_phone_called("555"));
        assert_eq!(guard.called_count(), 1);
    }

    #[test]
    fn test_identifier_check_precedes_phone_check() {
        let t = table();
        let mut guard = CallGuard::new();

        guard.check_and_register(&t, "alice");
        assert_eq!(
            guard.check_and_register(&t, "alice"),
            Verdict::AlreadyCalledByIdentifier
        );
    }

    #[test]
    fn test_input_is_trimmed() {
        let t = table();
        let mut guard = CallGuard::new();

        assert_eq!(guard.check_and_register(&t, " carol "), Verdict::ClearToCall);
        assert_eq!(
            guard.check_and_register(&t, "carol"),
            Verdict::AlreadyCalledByIdentifier
        );
    }

    #[test]
    fn test_independent_phones_are_both_clear() {
        let t = table();
        let mut guard = CallGuard::new();

        assert!(guard.check_and_register(&t, "alice").is_clear());
        assert!(guard.check_and_register(&t, "carol").is_clear());
        assert_eq!(guard.called_count(), 2);
    }

    #[test]
    fn test_verdict_messages() {
        assert_eq!(Verdict::ClearToCall.message(), "You're good to call");
        assert!(!Verdict::AlreadyCalledByPhone.is_clear());
        assert_eq!(
            Verdict::UnknownIdentifier.message(),
            "Unknown username, no call recorded"
        );
    }
}
