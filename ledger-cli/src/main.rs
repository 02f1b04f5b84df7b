//! Ledger CLI - personal and business bank accounts in your terminal

use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};
use ledger_core::services::AccountUpdate;
use rust_decimal::Decimal;

mod commands;
mod output;

use commands::{
    company, config, create, delete, list, loan, logs, report, show, store, transfer, update,
};

/// Ledger - personal and business bank accounts in your terminal
#[derive(Parser)]
#[command(name = "ledger", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Open a personal account
    Create {
        /// Holder's first name
        first_name: String,
        /// Holder's last name
        last_name: String,
        /// 11-digit PESEL
        #[arg(long)]
        pesel: Option<String>,
        /// Promotional code (PROM_...)
        #[arg(long)]
        promo: Option<String>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Open a business account (the NIP is checked with the VAT whitelist)
    Company {
        /// Company name
        name: String,
        /// 10-digit NIP
        #[arg(long)]
        nip: Option<String>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// List all accounts
    List {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show the number of accounts
    Count {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show one account
    Show {
        /// PESEL or NIP
        identity: String,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Change holder names
    Update {
        /// PESEL or NIP
        identity: String,
        #[arg(long)]
        first_name: Option<String>,
        #[arg(long)]
        last_name: Option<String>,
        #[arg(long)]
        company_name: Option<String>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Delete an account
    Delete {
        /// PESEL or NIP
        identity: String,
        /// Skip confirmation prompt
        #[arg(long, short)]
        force: bool,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Apply a transfer (incoming, outgoing, express)
    Transfer {
        /// PESEL or NIP
        identity: String,
        /// Transfer type: incoming, outgoing or express
        #[arg(long = "type", value_name = "TYPE")]
        kind: String,
        /// Amount, e.g. 125.50
        #[arg(allow_negative_numbers = true)]
        amount: Decimal,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Request a loan
    Loan {
        /// PESEL or NIP
        identity: String,
        /// Requested amount
        #[arg(allow_negative_numbers = true)]
        amount: Decimal,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Send an account's transfer history to an address
    Report {
        /// PESEL or NIP
        identity: String,
        /// Recipient address
        #[arg(long)]
        to: String,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Save all accounts to the database
    Save {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Reload all accounts from the database
    Load {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show settings, or change them with the flags below
    Config {
        /// VAT whitelist base URL
        #[arg(long)]
        registrar_url: Option<String>,
        /// Registrar request timeout in seconds
        #[arg(long)]
        timeout_secs: Option<u64>,
        /// Sender address for history reports
        #[arg(long)]
        sender: Option<String>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// View and manage application logs
    Logs {
        #[command(subcommand)]
        command: logs::LogsCommands,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let result = run(cli);

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            output::error(&format!("{:#}", e));
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Create { first_name, last_name, pesel, promo, json } => {
            create::run(&first_name, &last_name, pesel.as_deref(), promo.as_deref(), json)
        }
        Commands::Company { name, nip, json } => company::run(&name, nip.as_deref(), json),
        Commands::List { json } => list::run(json),
        Commands::Count { json } => list::run_count(json),
        Commands::Show { identity, json } => show::run(&identity, json),
        Commands::Update { identity, first_name, last_name, company_name, json } => {
            let changes = AccountUpdate { first_name, last_name, company_name };
            update::run(&identity, changes, json)
        }
        Commands::Delete { identity, force, json } => delete::run(&identity, force, json),
        Commands::Transfer { identity, kind, amount, json } => {
            transfer::run(&identity, &kind, amount, json)
        }
        Commands::Loan { identity, amount, json } => loan::run(&identity, amount, json),
        Commands::Report { identity, to, json } => report::run(&identity, &to, json),
        Commands::Save { json } => store::run_save(json),
        Commands::Load { json } => store::run_load(json),
        Commands::Config { registrar_url, timeout_secs, sender, json } => {
            let change = config::SettingsChange { registrar_url, timeout_secs, sender };
            config::run(change, json)
        }
        Commands::Logs { command } => logs::run(command),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_transfer_arguments_parse() {
        let cli = Cli::try_parse_from([
            "ledger", "transfer", "89092909825", "--type", "express", "12.50",
        ])
        .unwrap();
        match cli.command {
            Commands::Transfer { identity, kind, amount, json } => {
                assert_eq!(identity, "89092909825");
                assert_eq!(kind, "express");
                assert_eq!(amount, Decimal::new(1250, 2));
                assert!(!json);
            }
            _ => panic!("expected transfer"),
        }
    }

    #[test]
    fn test_amount_at_decimal_limit_parses() {
        let cli = Cli::try_parse_from([
            "ledger", "loan", "8461627563", "79228162514264337593543950335",
        ])
        .unwrap();
        match cli.command {
            Commands::Loan { amount, .. } => assert_eq!(amount, Decimal::MAX),
            _ => panic!("expected loan"),
        }
    }

    #[test]
    fn test_logs_filters_parse() {
        let cli = Cli::try_parse_from([
            "ledger", "logs", "list", "--kind", "company", "--error-kind", "not_found",
        ])
        .unwrap();
        assert!(matches!(cli.command, Commands::Logs { .. }));
        assert!(Cli::try_parse_from(["ledger", "logs", "list", "--kind", "savings"]).is_err());
    }

    #[test]
    fn test_invalid_amount_rejected_by_parser() {
        assert!(Cli::try_parse_from(["ledger", "loan", "89092909825", "lots"]).is_err());
    }
}
