//! Transfer history report sent to account holders

use chrono::NaiveDate;
use serde::Serialize;

use super::ledger::Transfers;
use super::ledger_account::LedgerAccount;

/// Subject and body of a history message
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HistoryReport {
    pub subject: String,
    pub body: String,
}

impl HistoryReport {
    pub fn for_account(account: &LedgerAccount, date: NaiveDate) -> Self {
        let label = match account {
            LedgerAccount::Personal(_) => "Personal",
            LedgerAccount::Company(_) => "Company",
        };
        let entries: Vec<String> = account.history().iter().map(|e| e.to_string()).collect();

        Self {
            subject: format!("Account Transfer History {}", date.format("%Y-%m-%d")),
            body: format!("{} account history: [{}]", label, entries.join(", ")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Account, CompanyAccount, Identity, Ledger};
    use rust_decimal_macros::dec;

    #[test]
    fn test_personal_report() {
        let account = Account::restore(
            "Jan",
            "Nowak",
            Identity::pesel(Some("89092909825")),
            Ledger::restore(dec!(0), vec![dec!(100), dec!(-1), dec!(500)]),
        );
        let date = NaiveDate::from_ymd_opt(2024, 3, 7).unwrap();
        let report = HistoryReport::for_account(&LedgerAccount::from(account), date);

        assert_eq!(report.subject, "Account Transfer History 2024-03-07");
        assert_eq!(report.body, "Personal account history: [100, -1, 500]");
    }

    #[test]
    fn test_company_report_empty_history() {
        let company = CompanyAccount::restore("Acme", Identity::Invalid, Ledger::new());
        let date = NaiveDate::from_ymd_opt(2024, 12, 31).unwrap();
        let report = HistoryReport::for_account(&LedgerAccount::from(company), date);
        assert_eq!(report.body, "Company account history: []");
    }
}
