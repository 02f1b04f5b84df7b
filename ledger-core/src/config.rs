//! Configuration management
//!
//! Settings live in `settings.json` inside the ledger directory:
//! ```json
//! {
//!   "registrar": { "baseUrl": "https://wl-api.mf.gov.pl", "timeoutSecs": 30 },
//!   "reports": { "senderAddress": "ledger@localhost" }
//! }
//! ```
//! Keys the ledger does not manage are preserved on save.

use std::collections::HashMap;
use std::path::Path;

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::adapters::registrar::{BASE_URL_ENV, DEFAULT_BASE_URL};

const DEFAULT_TIMEOUT_SECS: u64 = 30;
const DEFAULT_SENDER: &str = "ledger@localhost";

/// Raw settings.json structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SettingsFile {
    #[serde(default)]
    registrar: RegistrarSettings,
    #[serde(default)]
    reports: ReportSettings,
    #[serde(flatten)]
    other: HashMap<String, serde_json::Value>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RegistrarSettings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    base_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    timeout_secs: Option<u64>,
    #[serde(flatten)]
    other: HashMap<String, serde_json::Value>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ReportSettings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    sender_address: Option<String>,
    #[serde(flatten)]
    other: HashMap<String, serde_json::Value>,
}

/// Ledger configuration (resolved view of settings)
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    pub registrar_url: String,
    pub registrar_timeout_secs: u64,
    pub sender_address: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            registrar_url: DEFAULT_BASE_URL.to_string(),
            registrar_timeout_secs: DEFAULT_TIMEOUT_SECS,
            sender_address: DEFAULT_SENDER.to_string(),
        }
    }
}

impl Config {
    /// Load config from the ledger directory
    ///
    /// A missing or malformed file yields defaults. `LEDGER_REGISTRAR_URL`
    /// overrides the registrar URL (for CI and the mock server).
    pub fn load(ledger_dir: &Path) -> Result<Self> {
        let raw = Self::read_settings(ledger_dir)?;
        let env_url = std::env::var(BASE_URL_ENV).ok().filter(|v| !v.trim().is_empty());
        Ok(Self::resolve(raw, env_url))
    }

    /// Settings as written in the file, ignoring environment overrides.
    /// Start from this when changing and saving settings.
    pub fn from_file(ledger_dir: &Path) -> Result<Self> {
        Ok(Self::resolve(Self::read_settings(ledger_dir)?, None))
    }

    fn resolve(raw: SettingsFile, env_url: Option<String>) -> Self {
        let defaults = Self::default();
        Self {
            registrar_url: env_url
                .or(raw.registrar.base_url)
                .unwrap_or(defaults.registrar_url),
            registrar_timeout_secs: raw
                .registrar
                .timeout_secs
                .unwrap_or(defaults.registrar_timeout_secs),
            sender_address: raw
                .reports
                .sender_address
                .unwrap_or(defaults.sender_address),
        }
    }

    fn read_settings(ledger_dir: &Path) -> Result<SettingsFile> {
        let settings_path = ledger_dir.join("settings.json");
        if !settings_path.exists() {
            return Ok(SettingsFile::default());
        }
        let content = std::fs::read_to_string(&settings_path)?;
        Ok(serde_json::from_str(&content).unwrap_or_default())
    }

    /// Save config to the ledger directory, preserving unmanaged keys
    pub fn save(&self, ledger_dir: &Path) -> Result<()> {
        let mut settings = Self::read_settings(ledger_dir)?;

        settings.registrar.base_url = Some(self.registrar_url.clone());
        settings.registrar.timeout_secs = Some(self.registrar_timeout_secs);
        settings.reports.sender_address = Some(self.sender_address.clone());

        let content = serde_json::to_string_pretty(&settings)?;
        std::fs::write(ledger_dir.join("settings.json"), content)?;
        Ok(())
    }
}
