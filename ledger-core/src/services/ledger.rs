//! Ledger service - account lifecycle, transfers and loans
//!
//! Every operation goes through the shared registry lock. Mutations hold the
//! write lock for the whole check-and-act so concurrent callers never see a
//! half-applied change.

use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use rust_decimal::Decimal;
use serde::Serialize;

use crate::domain::identity::INVALID_SENTINEL;
use crate::domain::result::{Error, Result};
use crate::domain::{
    Account, AccountKind, AccountRegistry, CompanyAccount, LedgerAccount, TransferKind, Transfers,
};
use crate::ports::TaxRegistrar;

/// Name changes requested by the caller; `None` leaves a field untouched
#[derive(Debug, Clone, Default)]
pub struct AccountUpdate {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub company_name: Option<String>,
}

/// Account view returned to callers
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AccountSummary {
    pub kind: AccountKind,
    pub identity: String,
    pub name: String,
    pub balance: Decimal,
    pub history: Vec<Decimal>,
}

impl AccountSummary {
    pub fn identity_is_valid(&self) -> bool {
        self.identity != INVALID_SENTINEL
    }
}

impl From<&LedgerAccount> for AccountSummary {
    fn from(account: &LedgerAccount) -> Self {
        Self {
            kind: account.kind(),
            identity: account.identity().as_str().to_string(),
            name: account.display_name(),
            balance: account.balance(),
            history: account.history().to_vec(),
        }
    }
}

/// Outcome of a transfer
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TransferResult {
    pub account_kind: AccountKind,
    pub kind: TransferKind,
    pub amount: Decimal,
    pub balance: Decimal,
}

/// Outcome of a loan request
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LoanDecision {
    pub account_kind: AccountKind,
    pub granted: bool,
    pub amount: Decimal,
    pub balance: Decimal,
}

pub struct LedgerService {
    registry: Arc<RwLock<AccountRegistry>>,
    registrar: Arc<dyn TaxRegistrar>,
}

impl LedgerService {
    pub fn new(registry: Arc<RwLock<AccountRegistry>>, registrar: Arc<dyn TaxRegistrar>) -> Self {
        Self {
            registry,
            registrar,
        }
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, AccountRegistry>> {
        self.registry
            .read()
            .map_err(|e| Error::Other(format!("Lock poisoned: {}", e)))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, AccountRegistry>> {
        self.registry
            .write()
            .map_err(|e| Error::Other(format!("Lock poisoned: {}", e)))
    }

    /// Name of the registrar consulted for business accounts
    pub fn registrar_name(&self) -> &str {
        self.registrar.name()
    }

    /// Open a personal account and register it
    pub fn create_personal(
        &self,
        first_name: &str,
        last_name: &str,
        pesel: Option<&str>,
        promo_code: Option<&str>,
    ) -> Result<AccountSummary> {
        let account = LedgerAccount::from(Account::new(first_name, last_name, pesel, promo_code));
        self.register(account)
    }

    /// Open a business account and register it
    ///
    /// A well-formed NIP is checked with the registrar before anything is
    /// registered.
    pub fn create_company(&self, company_name: &str, nip: Option<&str>) -> Result<AccountSummary> {
        let account = CompanyAccount::new(company_name, nip, self.registrar.as_ref())?;
        self.register(LedgerAccount::from(account))
    }

    fn register(&self, account: LedgerAccount) -> Result<AccountSummary> {
        let summary = AccountSummary::from(&account);
        let mut registry = self.write()?;
        if !registry.add(account) {
            return Err(Error::DuplicateIdentity(summary.identity));
        }
        Ok(summary)
    }

    pub fn get(&self, identity: &str) -> Result<AccountSummary> {
        let registry = self.read()?;
        registry
            .find(identity)
            .map(AccountSummary::from)
            .ok_or_else(|| not_found(identity))
    }

    pub fn list(&self) -> Result<Vec<AccountSummary>> {
        Ok(self.read()?.iter().map(AccountSummary::from).collect())
    }

    pub fn count(&self) -> Result<usize> {
        Ok(self.read()?.count())
    }

    /// Change holder names; the identity never changes
    ///
    /// Fields that do not exist on the account's variant are rejected.
    pub fn update(&self, identity: &str, update: AccountUpdate) -> Result<AccountSummary> {
        let mut registry = self.write()?;
        let account = registry.find_mut(identity).ok_or_else(|| not_found(identity))?;

        match account {
            LedgerAccount::Personal(a) => {
                if update.company_name.is_some() {
                    return Err(Error::validation("personal accounts have no company name"));
                }
                if let Some(first_name) = update.first_name {
                    a.first_name = first_name;
                }
                if let Some(last_name) = update.last_name {
                    a.last_name = last_name;
                }
            }
            LedgerAccount::Company(c) => {
                if update.first_name.is_some() || update.last_name.is_some() {
                    return Err(Error::validation("company accounts have no first or last name"));
                }
                if let Some(company_name) = update.company_name {
                    c.company_name = company_name;
                }
            }
        }

        Ok(AccountSummary::from(&*account))
    }

    pub fn delete(&self, identity: &str) -> Result<AccountSummary> {
        let mut registry = self.write()?;
        registry
            .remove(identity)
            .map(|account| AccountSummary::from(&account))
            .ok_or_else(|| not_found(identity))
    }

    /// Apply a transfer named at the boundary ("incoming", "outgoing", "express")
    pub fn transfer(&self, identity: &str, kind: &str, amount: Decimal) -> Result<TransferResult> {
        let mut registry = self.write()?;
        let account = registry.find_mut(identity).ok_or_else(|| not_found(identity))?;
        let kind: TransferKind = kind.parse()?;

        account.transfer(kind, amount)?;

        Ok(TransferResult {
            account_kind: account.kind(),
            kind,
            amount,
            balance: account.balance(),
        })
    }

    /// Run the account's loan rule
    pub fn loan(&self, identity: &str, amount: Decimal) -> Result<LoanDecision> {
        let mut registry = self.write()?;
        let account = registry.find_mut(identity).ok_or_else(|| not_found(identity))?;

        let granted = account.request_loan(amount);

        Ok(LoanDecision {
            account_kind: account.kind(),
            granted,
            amount,
            balance: account.balance(),
        })
    }
}

fn not_found(identity: &str) -> Error {
    Error::not_found(format!("No account with identity {}", identity))
}
