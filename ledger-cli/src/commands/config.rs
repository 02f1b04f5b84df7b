//! Config command - show or change settings.json

use anyhow::{bail, Result};
use colored::Colorize;
use ledger_core::adapters::registrar::BASE_URL_ENV;
use ledger_core::config::Config;
use ledger_core::services::LogEvent;

use super::{get_ledger_dir, get_logger, log_event};
use crate::output;

/// Settings to change; `None` keeps the saved value
#[derive(Debug, Default)]
pub struct SettingsChange {
    pub registrar_url: Option<String>,
    pub timeout_secs: Option<u64>,
    pub sender: Option<String>,
}

impl SettingsChange {
    fn is_empty(&self) -> bool {
        self.registrar_url.is_none() && self.timeout_secs.is_none() && self.sender.is_none()
    }

    fn apply(self, config: &mut Config) -> Result<()> {
        if let Some(url) = self.registrar_url {
            let url = url.trim();
            if !(url.starts_with("http://") || url.starts_with("https://")) {
                bail!("Registrar URL must start with http:// or https://");
            }
            config.registrar_url = url.trim_end_matches('/').to_string();
        }
        if let Some(secs) = self.timeout_secs {
            if secs == 0 {
                bail!("Registrar timeout must be at least one second");
            }
            config.registrar_timeout_secs = secs;
        }
        if let Some(sender) = self.sender {
            if sender.trim().is_empty() {
                bail!("Sender address cannot be empty");
            }
            config.sender_address = sender.trim().to_string();
        }
        Ok(())
    }
}

pub fn run(change: SettingsChange, json: bool) -> Result<()> {
    let ledger_dir = get_ledger_dir();
    std::fs::create_dir_all(&ledger_dir)?;

    if !change.is_empty() {
        let mut config = Config::from_file(&ledger_dir)?;
        change.apply(&mut config)?;
        config.save(&ledger_dir)?;
        log_event(&get_logger(), LogEvent::new("settings_changed").with_command("config"));
        if !json {
            output::success("Settings saved");
        }
    }

    let effective = Config::load(&ledger_dir)?;
    if json {
        println!("{}", serde_json::to_string_pretty(&effective)?);
        return Ok(());
    }

    let mut table = output::create_table();
    table.add_row(vec!["Registrar URL", effective.registrar_url.as_str()]);
    let timeout = format!("{}s", effective.registrar_timeout_secs);
    table.add_row(vec!["Registrar timeout", timeout.as_str()]);
    table.add_row(vec!["Report sender", effective.sender_address.as_str()]);
    println!("{}", table);

    if std::env::var(BASE_URL_ENV).is_ok_and(|v| !v.trim().is_empty()) {
        println!(
            "{}",
            format!("{} overrides the saved registrar URL", BASE_URL_ENV).dimmed()
        );
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_changes_only_given_fields() {
        let mut config = Config::default();
        SettingsChange {
            registrar_url: Some("http://localhost:8080/".to_string()),
            ..SettingsChange::default()
        }
        .apply(&mut config)
        .unwrap();

        assert_eq!(config.registrar_url, "http://localhost:8080");
        assert_eq!(config.registrar_timeout_secs, Config::default().registrar_timeout_secs);
        assert_eq!(config.sender_address, Config::default().sender_address);
    }

    #[test]
    fn test_apply_rejects_bad_values() {
        let mut config = Config::default();
        let bad_url = SettingsChange {
            registrar_url: Some("wl-api.mf.gov.pl".to_string()),
            ..SettingsChange::default()
        };
        assert!(bad_url.apply(&mut config).is_err());

        let zero_timeout = SettingsChange {
            timeout_secs: Some(0),
            ..SettingsChange::default()
        };
        assert!(zero_timeout.apply(&mut config).is_err());
        assert_eq!(config, Config::default());
    }
}
