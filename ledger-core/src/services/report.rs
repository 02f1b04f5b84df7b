//! Report service - sends transfer history to account holders

use std::sync::{Arc, RwLock};

use chrono::{NaiveDate, Utc};

use crate::domain::result::{Error, Result};
use crate::domain::{AccountRegistry, HistoryReport};
use crate::ports::Notifier;

pub struct ReportService {
    registry: Arc<RwLock<AccountRegistry>>,
    notifier: Arc<dyn Notifier>,
}

impl ReportService {
    pub fn new(registry: Arc<RwLock<AccountRegistry>>, notifier: Arc<dyn Notifier>) -> Self {
        Self { registry, notifier }
    }

    /// Name of the channel reports are delivered through
    pub fn notifier_name(&self) -> &str {
        self.notifier.name()
    }

    /// Send today's history report for `identity` to `address`
    pub fn send_history(&self, identity: &str, address: &str) -> Result<HistoryReport> {
        self.send_history_on(identity, address, Utc::now().date_naive())
    }

    pub fn send_history_on(
        &self,
        identity: &str,
        address: &str,
        date: NaiveDate,
    ) -> Result<HistoryReport> {
        // Format under the lock, deliver after releasing it
        let report = {
            let registry = self
                .registry
                .read()
                .map_err(|e| Error::Other(format!("Lock poisoned: {}", e)))?;
            let account = registry
                .find(identity)
                .ok_or_else(|| Error::not_found(format!("No account with identity {}", identity)))?;
            HistoryReport::for_account(account, date)
        };

        self.notifier.send(address, &report.subject, &report.body)?;
        Ok(report)
    }
}
