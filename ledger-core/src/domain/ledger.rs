//! Balance and transfer history shared by every account variant

use rust_decimal::Decimal;

use super::result::{Error, Result};

/// Balance plus the append-only history of completed mutations
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Ledger {
    pub balance: Decimal,
    pub history: Vec<Decimal>,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Restore a ledger from stored state
    pub fn restore(balance: Decimal, history: Vec<Decimal>) -> Self {
        Self { balance, history }
    }

    /// Check an outgoing amount against the current balance
    fn check_outgoing(&self, amount: Decimal) -> Result<()> {
        if amount <= Decimal::ZERO {
            return Err(Error::InvalidAmount(amount));
        }
        if amount > self.balance {
            return Err(Error::InsufficientFunds {
                requested: amount,
                available: self.balance,
            });
        }
        Ok(())
    }

    /// The `n` most recent history entries, or `None` if there are fewer
    pub fn recent(&self, n: usize) -> Option<&[Decimal]> {
        self.history
            .len()
            .checked_sub(n)
            .map(|start| &self.history[start..])
    }
}

/// Transfer capability implemented by both account variants.
///
/// Rejected operations leave balance and history untouched.
pub trait Transfers {
    fn ledger(&self) -> &Ledger;

    fn ledger_mut(&mut self) -> &mut Ledger;

    /// Fixed fee charged on top of an express transfer
    fn express_fee(&self) -> Decimal;

    fn balance(&self) -> Decimal {
        self.ledger().balance
    }

    fn history(&self) -> &[Decimal] {
        &self.ledger().history
    }

    /// Credit `amount`. A credit that would overflow the balance is
    /// rejected as an invalid amount.
    fn transfer_in(&mut self, amount: Decimal) -> Result<()> {
        if amount <= Decimal::ZERO {
            return Err(Error::InvalidAmount(amount));
        }
        let balance = self
            .balance()
            .checked_add(amount)
            .ok_or(Error::InvalidAmount(amount))?;
        let ledger = self.ledger_mut();
        ledger.balance = balance;
        ledger.history.push(amount);
        Ok(())
    }

    fn transfer_out(&mut self, amount: Decimal) -> Result<()> {
        self.ledger().check_outgoing(amount)?;
        let balance = self
            .balance()
            .checked_sub(amount)
            .ok_or(Error::InvalidAmount(amount))?;
        let ledger = self.ledger_mut();
        ledger.balance = balance;
        ledger.history.push(-amount);
        Ok(())
    }

    /// Outgoing transfer plus the variant's fee. The fee may take the
    /// balance below zero; the principal may not exceed the balance.
    fn express_transfer_out(&mut self, amount: Decimal) -> Result<()> {
        self.ledger().check_outgoing(amount)?;
        let fee = self.express_fee();
        let balance = self
            .balance()
            .checked_sub(amount)
            .and_then(|rest| rest.checked_sub(fee))
            .ok_or(Error::InvalidAmount(amount))?;
        let ledger = self.ledger_mut();
        ledger.balance = balance;
        ledger.history.push(-amount);
        ledger.history.push(-fee);
        Ok(())
    }
}
