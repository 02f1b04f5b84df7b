//! Storage record for a single account

use rust_decimal::Decimal;

use super::account::Account;
use super::company::CompanyAccount;
use super::identity::Identity;
use super::ledger::{Ledger, Transfers};
use super::ledger_account::{AccountKind, LedgerAccount};

/// Flat representation written to and read from an account store
#[derive(Debug, Clone, PartialEq)]
pub struct AccountRecord {
    /// Missing in records written before variants were tagged
    pub kind: Option<AccountKind>,
    pub identity: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub company_name: Option<String>,
    pub balance: Decimal,
    pub history: Vec<Decimal>,
}

impl From<&LedgerAccount> for AccountRecord {
    fn from(account: &LedgerAccount) -> Self {
        let (first_name, last_name, company_name) = match account {
            LedgerAccount::Personal(a) => {
                (Some(a.first_name.clone()), Some(a.last_name.clone()), None)
            }
            LedgerAccount::Company(c) => (None, None, Some(c.company_name.clone())),
        };

        Self {
            kind: Some(account.kind()),
            identity: account.identity().as_str().to_string(),
            first_name,
            last_name,
            company_name,
            balance: account.balance(),
            history: account.history().to_vec(),
        }
    }
}

impl AccountRecord {
    /// Rebuild the account this record describes.
    ///
    /// Balance and history are assigned as stored; identity validation,
    /// promo codes and the registrar are bypassed. Untagged records are
    /// treated as personal accounts.
    pub fn into_account(self) -> LedgerAccount {
        let identity = Identity::restore(&self.identity);
        let ledger = Ledger::restore(self.balance, self.history);

        match self.kind.unwrap_or(AccountKind::Personal) {
            AccountKind::Personal => LedgerAccount::Personal(Account::restore(
                self.first_name.unwrap_or_default(),
                self.last_name.unwrap_or_default(),
                identity,
                ledger,
            )),
            AccountKind::Company => LedgerAccount::Company(CompanyAccount::restore(
                self.company_name.unwrap_or_default(),
                identity,
                ledger,
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_record_from_company_account() {
        let company = CompanyAccount::restore(
            "Acme",
            Identity::nip(Some("8461627563")),
            Ledger::restore(dec!(95), vec![dec!(200), dec!(-100), dec!(-5)]),
        );
        let record = AccountRecord::from(&LedgerAccount::Company(company.clone()));

        assert_eq!(record.kind, Some(AccountKind::Company));
        assert_eq!(record.identity, "8461627563");
        assert_eq!(record.company_name.as_deref(), Some("Acme"));
        assert!(record.first_name.is_none());
        assert_eq!(record.into_account(), LedgerAccount::Company(company));
    }

    #[test]
    fn test_untagged_record_restores_as_personal() {
        let record = AccountRecord {
            kind: None,
            identity: "89092909825".to_string(),
            first_name: Some("James".to_string()),
            last_name: Some("Hetfield".to_string()),
            company_name: None,
            balance: dec!(120.5),
            history: vec![dec!(100), dec!(20.5)],
        };

        let account = record.into_account();
        assert_eq!(account.kind(), AccountKind::Personal);
        assert_eq!(account.balance(), dec!(120.5));
        assert_eq!(account.history(), &[dec!(100), dec!(20.5)]);
    }

    #[test]
    fn test_restore_bypasses_promo_and_validation() {
        let record = AccountRecord {
            kind: Some(AccountKind::Personal),
            identity: "Invalid".to_string(),
            first_name: Some("Jane".to_string()),
            last_name: Some("Doe".to_string()),
            company_name: None,
            balance: dec!(0),
            history: Vec::new(),
        };
        let account = record.into_account();
        assert_eq!(account.identity(), &Identity::Invalid);
        assert_eq!(account.balance(), dec!(0));
    }
}
