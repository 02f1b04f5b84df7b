//! Notification port - message delivery to account holders

use crate::domain::result::Result;

/// Delivers a subject/body message to an address
pub trait Notifier: Send + Sync {
    /// Channel name (e.g., "outbox")
    fn name(&self) -> &str;

    fn send(&self, address: &str, subject: &str, body: &str) -> Result<()>;
}
