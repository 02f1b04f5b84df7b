//! Ministry of Finance VAT whitelist client
//!
//! Asks the public whitelist API whether a NIP belongs to an active VAT
//! taxpayer on a given day:
//! - GET {base}/api/search/nip/{nip}?date=YYYY-MM-DD
//!   returns { result: { subject: { statusVat: "Czynny" | ... } | null } }

use std::time::Duration;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use reqwest::blocking::Client;
use serde::Deserialize;

use crate::domain::result::{Error as DomainError, Result as DomainResult};
use crate::ports::TaxRegistrar;

/// Public whitelist endpoint
pub const DEFAULT_BASE_URL: &str = "https://wl-api.mf.gov.pl";

/// Environment variable that overrides the base URL (used with the mock server)
pub const BASE_URL_ENV: &str = "LEDGER_REGISTRAR_URL";

/// VAT status reported for active taxpayers
const ACTIVE_STATUS: &str = "Czynny";

// =============================================================================
// API Response Types
// =============================================================================

#[derive(Debug, Deserialize)]
struct SearchResponse {
    result: Option<SearchResult>,
}

#[derive(Debug, Deserialize)]
struct SearchResult {
    subject: Option<Subject>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Subject {
    status_vat: Option<String>,
}

impl SearchResponse {
    fn is_active(&self) -> bool {
        self.result
            .as_ref()
            .and_then(|r| r.subject.as_ref())
            .and_then(|s| s.status_vat.as_deref())
            == Some(ACTIVE_STATUS)
    }
}

// =============================================================================
// Client
// =============================================================================

/// Blocking HTTP client for the whitelist API
pub struct MfRegistrarClient {
    client: Client,
    base_url: String,
    timeout_secs: u64,
}

impl MfRegistrarClient {
    pub fn new(base_url: &str, timeout_secs: u64) -> Result<Self> {
        if base_url.trim().is_empty() {
            anyhow::bail!("Registrar base URL cannot be empty");
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            timeout_secs,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Look up the VAT status of `nip` on `date`
    pub fn check_status(&self, nip: &str, date: NaiveDate) -> Result<bool> {
        let url = format!(
            "{}/api/search/nip/{}?date={}",
            self.base_url,
            nip,
            date.format("%Y-%m-%d")
        );

        let response = self
            .client
            .get(&url)
            .send()
            .map_err(|e| self.map_request_error(e))?;

        self.check_response_status(&response)?;

        let body: SearchResponse = response
            .json()
            .context("Failed to parse registrar response")?;

        Ok(body.is_active())
    }

    fn map_request_error(&self, error: reqwest::Error) -> anyhow::Error {
        if error.is_timeout() {
            anyhow::anyhow!("Connection timed out after {} seconds", self.timeout_secs)
        } else if error.is_connect() {
            anyhow::anyhow!("Unable to connect to the registrar at {}", self.base_url)
        } else {
            anyhow::anyhow!("Registrar request failed: {}", error)
        }
    }

    fn check_response_status(&self, response: &reqwest::blocking::Response) -> Result<()> {
        match response.status().as_u16() {
            200 => Ok(()),
            400 => anyhow::bail!("Registrar rejected the request (malformed NIP or date)."),
            429 => {
                anyhow::bail!("Registrar rate limit exceeded. Please wait a moment and try again.")
            }
            status => anyhow::bail!("Registrar API error: HTTP {}", status),
        }
    }
}

impl TaxRegistrar for MfRegistrarClient {
    fn name(&self) -> &str {
        "mf-whitelist"
    }

    fn is_active(&self, nip: &str, date: NaiveDate) -> DomainResult<bool> {
        self.check_status(nip, date)
            .map_err(|e| DomainError::Registrar(e.to_string()))
    }
}
