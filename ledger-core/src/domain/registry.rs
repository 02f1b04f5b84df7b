//! In-memory account registry

use super::ledger_account::LedgerAccount;

/// Insertion-ordered collection of accounts with unique identities.
///
/// The registry is the only place accounts are added or removed.
#[derive(Debug, Clone, Default)]
pub struct AccountRegistry {
    accounts: Vec<LedgerAccount>,
}

impl AccountRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert `account` unless its identity is already registered.
    ///
    /// Returns whether the account was inserted; duplicates are dropped.
    pub fn add(&mut self, account: impl Into<LedgerAccount>) -> bool {
        let account = account.into();
        if self.accounts.iter().any(|a| a.identity() == account.identity()) {
            return false;
        }
        self.accounts.push(account);
        true
    }

    pub fn find(&self, identity: &str) -> Option<&LedgerAccount> {
        self.accounts.iter().find(|a| a.identity().matches(identity))
    }

    pub fn find_mut(&mut self, identity: &str) -> Option<&mut LedgerAccount> {
        self.accounts.iter_mut().find(|a| a.identity().matches(identity))
    }

    /// Owned point-in-time copy of every account
    pub fn all(&self) -> Vec<LedgerAccount> {
        self.accounts.clone()
    }

    /// Borrowing iterator, for callers that only need to read
    pub fn iter(&self) -> impl Iterator<Item = &LedgerAccount> {
        self.accounts.iter()
    }

    pub fn count(&self) -> usize {
        self.accounts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }

    /// Remove and return the account with `identity`; absent is a no-op
    pub fn remove(&mut self, identity: &str) -> Option<LedgerAccount> {
        let index = self
            .accounts
            .iter()
            .position(|a| a.identity().matches(identity))?;
        Some(self.accounts.remove(index))
    }

    pub fn clear(&mut self) {
        self.accounts.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Account, Transfers};
    use rust_decimal_macros::dec;

    fn person(first: &str, pesel: &str) -> Account {
        Account::new(first, "Kowalski", Some(pesel), None)
    }

    #[test]
    fn test_add_account_duplicate_pesel() {
        let mut registry = AccountRegistry::new();
        assert!(registry.add(person("Jan", "12345678901")));
        assert!(!registry.add(Account::new("Anna", "Nowak", Some("12345678901"), None)));
        assert_eq!(registry.count(), 1);
        assert_eq!(
            registry.find("12345678901").map(|a| a.display_name()),
            Some("Jan Kowalski".to_string())
        );
    }

    #[test]
    fn test_invalid_identity_registered_once() {
        let mut registry = AccountRegistry::new();
        assert!(registry.add(person("Jan", "123")));
        assert!(!registry.add(person("Ola", "456")));
        assert_eq!(registry.count(), 1);
        assert!(registry.find("Invalid").is_some());
    }

    #[test]
    fn test_find_missing() {
        let registry = AccountRegistry::new();
        assert!(registry.find("99999999999").is_none());
    }

    #[test]
    fn test_all_is_a_snapshot() {
        let mut registry = AccountRegistry::new();
        registry.add(person("Jan", "12345678901"));

        let mut snapshot = registry.all();
        snapshot[0].transfer_in(dec!(10)).unwrap();
        snapshot.clear();

        assert_eq!(registry.count(), 1);
        assert_eq!(registry.find("12345678901").unwrap().balance(), dec!(0));
    }

    #[test]
    fn test_find_mut_mutates_in_place() {
        let mut registry = AccountRegistry::new();
        registry.add(person("Jan", "12345678901"));
        registry
            .find_mut("12345678901")
            .unwrap()
            .transfer_in(dec!(25))
            .unwrap();
        assert_eq!(registry.find("12345678901").unwrap().balance(), dec!(25));
    }

    #[test]
    fn test_remove() {
        let mut registry = AccountRegistry::new();
        registry.add(person("Jan", "12345678901"));
        registry.add(person("Ola", "12345678902"));

        let removed = registry.remove("12345678901").unwrap();
        assert_eq!(removed.identity().as_str(), "12345678901");
        assert!(registry.remove("12345678901").is_none());
        assert_eq!(registry.count(), 1);

        // the freed identity can be registered again
        assert!(registry.add(person("Jan", "12345678901")));
        let order: Vec<_> = registry.iter().map(|a| a.identity().to_string()).collect();
        assert_eq!(order, vec!["12345678902", "12345678901"]);
    }
}
