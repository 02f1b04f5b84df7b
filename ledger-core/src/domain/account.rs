//! Personal account domain model

use rust_decimal::Decimal;

use super::identity::Identity;
use super::ledger::{Ledger, Transfers};

/// Prefix a promo code must carry to earn the sign-up bonus
pub const PROMO_PREFIX: &str = "PROM_";

/// Fee charged on an express transfer from a personal account
pub const PERSONAL_EXPRESS_FEE: Decimal = Decimal::ONE;

/// One-time sign-up bonus, in whole units
const PROMO_BONUS: i64 = 50;

/// A personal account identified by PESEL
#[derive(Debug, Clone, PartialEq)]
pub struct Account {
    pub first_name: String,
    pub last_name: String,
    pesel: Identity,
    ledger: Ledger,
    pub promo_code: Option<String>,
}

impl Account {
    /// Open a new account.
    ///
    /// A malformed PESEL is stored as the `Invalid` sentinel. The promo code
    /// is evaluated once here and never again.
    pub fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        pesel: Option<&str>,
        promo_code: Option<&str>,
    ) -> Self {
        let mut account = Self {
            first_name: first_name.into(),
            last_name: last_name.into(),
            pesel: Identity::pesel(pesel),
            ledger: Ledger::new(),
            promo_code: promo_code.map(str::to_string),
        };
        if account.is_promo_eligible() {
            account.apply_promo();
        }
        account
    }

    /// Rebuild an account from stored state, skipping validation and promo
    pub fn restore(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        pesel: Identity,
        ledger: Ledger,
    ) -> Self {
        Self {
            first_name: first_name.into(),
            last_name: last_name.into(),
            pesel,
            ledger,
            promo_code: None,
        }
    }

    pub fn pesel(&self) -> &Identity {
        &self.pesel
    }

    /// Born after 1959 (year field >= 60) or in the 2000s (month field
    /// offset by 20 in PESEL encoding)
    fn is_promo_eligible(&self) -> bool {
        let Identity::Valid(digits) = &self.pesel else {
            return false;
        };
        let field = |range: std::ops::Range<usize>| digits[range].parse::<u32>().unwrap_or(0);
        let year = field(0..2);
        let month = field(2..4);
        month >= 20 || year >= 60
    }

    fn apply_promo(&mut self) {
        if self
            .promo_code
            .as_deref()
            .is_some_and(|code| code.starts_with(PROMO_PREFIX))
        {
            self.ledger.balance += Decimal::from(PROMO_BONUS);
        }
    }

    /// Automated loan decision based on recent history.
    ///
    /// Granted when the last three entries are all incoming, or when the
    /// last five entries sum to more than the requested amount. A granted
    /// loan is credited without a history entry; a loan the balance cannot
    /// hold is denied.
    pub fn submit_for_loan(&mut self, amount: Decimal) -> bool {
        if amount <= Decimal::ZERO {
            return false;
        }

        let last_three_incoming = self
            .ledger
            .recent(3)
            .is_some_and(|entries| entries.iter().all(|e| *e > Decimal::ZERO));
        let last_five_cover = self
            .ledger
            .recent(5)
            .and_then(|entries| {
                entries
                    .iter()
                    .try_fold(Decimal::ZERO, |sum, e| sum.checked_add(*e))
            })
            .is_some_and(|sum| sum > amount);

        if !(last_three_incoming || last_five_cover) {
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

impl Transfers for Account {
    fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    fn ledger_mut(&mut self) -> &mut Ledger {
        &mut self.ledger
    }

    fn express_fee(&self) -> Decimal {
        PERSONAL_EXPRESS_FEE
    }
}
