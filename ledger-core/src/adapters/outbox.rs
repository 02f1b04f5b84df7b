//! Outbox notifier
//!
//! Delivers messages by writing each one as a JSON file into a directory.
//! Another process (or a person) picks them up from there.

use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::result::{Error as DomainError, Result as DomainResult};
use crate::ports::Notifier;

/// A message as written to the outbox
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OutboxMessage {
    pub id: Uuid,
    pub from: String,
    pub to: String,
    pub subject: String,
    pub body: String,
    pub created_at: DateTime<Utc>,
}

pub struct OutboxNotifier {
    dir: PathBuf,
    sender: String,
}

impl OutboxNotifier {
    pub fn new(dir: impl Into<PathBuf>, sender: impl Into<String>) -> Self {
        Self {
            dir: dir.into(),
            sender: sender.into(),
        }
    }

    /// Write one message file, creating the outbox directory on first use
    pub fn write_message(&self, address: &str, subject: &str, body: &str) -> Result<PathBuf> {
        if address.trim().is_empty() {
            anyhow::bail!("Recipient address cannot be empty");
        }

        std::fs::create_dir_all(&self.dir)
            .with_context(|| format!("Failed to create outbox at {}", self.dir.display()))?;

        let message = OutboxMessage {
            id: Uuid::new_v4(),
            from: self.sender.clone(),
            to: address.to_string(),
            subject: subject.to_string(),
            body: body.to_string(),
            created_at: Utc::now(),
        };

        let path = self.dir.join(format!(
            "{}_{}.json",
            message.created_at.format("%Y%m%dT%H%M%S"),
            message.id
        ));
        std::fs::write(&path, serde_json::to_string_pretty(&message)?)
            .with_context(|| format!("Failed to write {}", path.display()))?;

        Ok(path)
    }

    /// All messages currently in the outbox, oldest first
    pub fn messages(&self) -> Result<Vec<OutboxMessage>> {
        if !self.dir.exists() {
            return Ok(Vec::new());
        }

        let mut messages = Vec::new();
        for entry in std::fs::read_dir(&self.dir)? {
            let path = entry?.path();
            if path.extension().and_then(|e| e.to_str()) != Some("json") {
                continue;
            }
            let content = std::fs::read_to_string(&path)?;
            messages.push(serde_json::from_str::<OutboxMessage>(&content)?);
        }
        messages.sort_by_key(|m| m.created_at);
        Ok(messages)
    }
}

impl Notifier for OutboxNotifier {
    fn name(&self) -> &str {
        "outbox"
    }

    fn send(&self, address: &str, subject: &str, body: &str) -> DomainResult<()> {
        self.write_message(address, subject, body)
            .map(|_| ())
            .map_err(|e| DomainError::Notification(e.to_string()))
    }
}
