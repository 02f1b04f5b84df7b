//! Closed set of account variants held by the registry

use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::Serialize;

use super::account::Account;
use super::company::CompanyAccount;
use super::identity::Identity;
use super::ledger::{Ledger, Transfers};
use super::result::{Error, Result};

/// Which variant an account (or stored record) is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AccountKind {
    Personal,
    Company,
}

impl AccountKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            AccountKind::Personal => "personal",
            AccountKind::Company => "company",
        }
    }
}

impl fmt::Display for AccountKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AccountKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "personal" => Ok(AccountKind::Personal),
            "company" => Ok(AccountKind::Company),
            other => Err(Error::validation(format!("unknown account kind: {}", other))),
        }
    }
}

/// Transfer types accepted at the boundary
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TransferKind {
    Incoming,
    Outgoing,
    Express,
}

impl FromStr for TransferKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "incoming" => Ok(TransferKind::Incoming),
            "outgoing" => Ok(TransferKind::Outgoing),
            "express" => Ok(TransferKind::Express),
            other => Err(Error::UnknownTransferType(other.to_string())),
        }
    }
}

/// Either a personal or a business account
#[derive(Debug, Clone, PartialEq)]
pub enum LedgerAccount {
    Personal(Account),
    Company(CompanyAccount),
}

impl LedgerAccount {
    pub fn kind(&self) -> AccountKind {
        match self {
            LedgerAccount::Personal(_) => AccountKind::Personal,
            LedgerAccount::Company(_) => AccountKind::Company,
        }
    }

    pub fn identity(&self) -> &Identity {
        match self {
            LedgerAccount::Personal(a) => a.pesel(),
            LedgerAccount::Company(c) => c.nip(),
        }
    }

    /// Human-readable holder name
    pub fn display_name(&self) -> String {
        match self {
            LedgerAccount::Personal(a) => format!("{} {}", a.first_name, a.last_name),
            LedgerAccount::Company(c) => c.company_name.clone(),
        }
    }

    /// Apply a boundary transfer request
    pub fn transfer(&mut self, kind: TransferKind, amount: Decimal) -> Result<()> {
        match kind {
            TransferKind::Incoming => self.transfer_in(amount),
            TransferKind::Outgoing => self.transfer_out(amount),
            TransferKind::Express => self.express_transfer_out(amount),
        }
    }

    /// Run the variant's loan rule
    pub fn request_loan(&mut self, amount: Decimal) -> bool {
        match self {
            LedgerAccount::Personal(a) => a.submit_for_loan(amount),
            LedgerAccount::Company(c) => c.take_loan(amount),
        }
    }
}

impl Transfers for LedgerAccount {
    fn ledger(&self) -> &Ledger {
        match self {
            LedgerAccount::Personal(a) => a.ledger(),
            LedgerAccount::Company(c) => c.ledger(),
        }
    }

    fn ledger_mut(&mut self) -> &mut Ledger {
        match self {
            LedgerAccount::Personal(a) => a.ledger_mut(),
            LedgerAccount::Company(c) => c.ledger_mut(),
        }
    }

    fn express_fee(&self) -> Decimal {
        match self {
            LedgerAccount::Personal(a) => a.express_fee(),
            LedgerAccount::Company(c) => c.express_fee(),
        }
    }
}

impl From<Account> for LedgerAccount {
    fn from(account: Account) -> Self {
        LedgerAccount::Personal(account)
    }
}

impl From<CompanyAccount> for LedgerAccount {
    fn from(account: CompanyAccount) -> Self {
        LedgerAccount::Company(account)
    }
}
