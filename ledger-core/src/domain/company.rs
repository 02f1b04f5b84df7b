//! Business account domain model

use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;

use super::identity::Identity;
use super::ledger::{Ledger, Transfers};
use super::result::{Error, Result};
use crate::ports::TaxRegistrar;

/// Fee charged on an express transfer from a business account
pub const COMPANY_EXPRESS_FEE: Decimal = Decimal::from_parts(5, 0, 0, false, 0);

/// History entry that qualifies a company for a loan.
///
/// Its business meaning is undocumented; the rule only checks for presence.
pub const LOAN_QUALIFYING_MARKER: Decimal = Decimal::from_parts(1775, 0, 0, true, 0);

/// A business account identified by NIP
#[derive(Debug, Clone, PartialEq)]
pub struct CompanyAccount {
    pub company_name: String,
    nip: Identity,
    ledger: Ledger,
}

impl CompanyAccount {
    /// Open a business account, dated today.
    ///
    /// See [`CompanyAccount::new_on`].
    pub fn new(
        company_name: impl Into<String>,
        nip: Option<&str>,
        registrar: &dyn TaxRegistrar,
    ) -> Result<Self> {
        Self::new_on(company_name, nip, registrar, Utc::now().date_naive())
    }

    /// Open a business account.
    ///
    /// A malformed NIP is stored as `Invalid` without asking the registrar.
    /// A well-formed NIP must be confirmed active by the registrar for
    /// `date`; a denial or a failed lookup aborts construction.
    pub fn new_on(
        company_name: impl Into<String>,
        nip: Option<&str>,
        registrar: &dyn TaxRegistrar,
        date: NaiveDate,
    ) -> Result<Self> {
        let identity = Identity::nip(nip);

        if let Identity::Valid(digits) = &identity {
            let approved = registrar.is_active(digits, date).unwrap_or(false);
            if !approved {
                return Err(Error::RegistrarDenied(digits.clone()));
            }
        }

        Ok(Self {
            company_name: company_name.into(),
            nip: identity,
            ledger: Ledger::new(),
        })
    }

    /// Rebuild an account from stored state, skipping the registrar
    pub fn restore(company_name: impl Into<String>, nip: Identity, ledger: Ledger) -> Self {
        Self {
            company_name: company_name.into(),
            nip,
            ledger,
        }
    }

    pub fn nip(&self) -> &Identity {
        &self.nip
    }

    /// Granted when the balance covers twice the amount and the history
    /// contains the qualifying marker entry
    pub fn take_loan(&mut self, amount: Decimal) -> bool {
        if amount <= Decimal::ZERO {
            return false;
        }

        let covered = amount
            .checked_mul(Decimal::TWO)
            .is_some_and(|required| self.ledger.balance >= required);
        let has_marker = self.ledger.history.contains(&LOAN_QUALIFYING_MARKER);
        if !(covered && has_marker) {
            return false;
        }

        match self.ledger.balance.checked_add(amount) {
            Some(balance) => {
                self.ledger.balance = balance;
                true
            }
            None => false,
        }
    }
}

impl Transfers for CompanyAccount {
    fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    fn ledger_mut(&mut self) -> &mut Ledger {
        &mut self.ledger
    }

    fn express_fee(&self) -> Decimal {
        COMPANY_EXPRESS_FEE
    }
}
