//! Coffer operator CLI.
//!
//! Resolves currencies from configuration and runs conversions, exchange
//! quotes and income type lookups from the shell.

use std::process::ExitCode;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing::{debug, error};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use coffer_core::currency::CurrencyRegistry;
use coffer_core::wallet::WalletError;
use coffer_shared::{AppConfig, AppError};

#[derive(Debug, Parser)]
#[command(name = "coffer", version, about = "Currency conversion and exchange quotes")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// List configured currencies
    Currencies {
        /// Print the resolved settings as JSON
        #[arg(long)]
        json: bool,
    },
    /// Convert a display amount to minor units
    ToMinor {
        /// Currency code
        currency: String,
        /// Display amount, e.g. 12.50
        amount: String,
    },
    /// Convert minor units to a display amount
    FromMinor {
        /// Currency code
        currency: String,
        /// Integer amount in minor units
        #[arg(allow_negative_numbers = true)]
        value: String,
        /// Fractional digits to keep (defaults to the currency's scale)
        #[arg(long)]
        scale: Option<u32>,
    },
    /// Quote how much of one currency a display amount of another buys
    Exchange {
        /// Source currency code
        from: String,
        /// Target currency code
        to: String,
        /// Display amount of the source currency
        amount: String,
    },
    /// Show an income type as deposits see it
    CheckType {
        /// Currency code
        currency: String,
        /// Income type key
        income_type: String,
        /// Print the income type as JSON
        #[arg(long)]
        json: bool,
    },
}

fn main() -> ExitCode {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "coffer=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            let code = err.downcast_ref::<AppError>().map_or(1, AppError::exit_code);
            error!(error = %format!("{err:#}"), "Command failed");
            ExitCode::from(code)
        }
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let config = AppConfig::load()
        .map_err(AppError::from)
        .context("Failed to load configuration")?;
    let registry = CurrencyRegistry::from_config(&config);
    debug!(currencies = registry.len(), "Configuration loaded");

    match cli.command {
        Command::Currencies { json: true } => {
            let settings: Vec<_> = registry
                .currencies()
                .iter()
                .map(|currency| currency.conf().clone())
                .collect();
            println!("{}", serde_json::to_string_pretty(&settings)?);
        }
        Command::Currencies { json: false } => {
            for currency in registry.currencies() {
                println!(
                    "{}\t{}\t{}\tdecimals={}\tscale={}\trate={}\twithdraw={}",
                    currency.id(),
                    currency.name(),
                    currency.symbol(),
                    currency.decimals(),
                    currency.scale(),
                    currency.rate(),
                    currency.withdraw(),
                );
            }
        }
        Command::ToMinor { currency, amount } => {
            let currency = registry.require(&currency)?;
            let minor = currency
                .to_minor_unit(&amount)
                .ok_or_else(|| invalid_amount(currency.id(), &amount))?;
            println!("{minor}");
        }
        Command::FromMinor {
            currency,
            value,
            scale,
        } => {
            let currency = registry.require(&currency)?;
            println!("{}", currency.from_minor_unit(&value, scale));
        }
        Command::Exchange { from, to, amount } => {
            let from = registry.require(&from)?;
            let to = registry.require(&to)?;
            if from.to_minor_unit(&amount).is_none() {
                return Err(invalid_amount(from.id(), &amount).into());
            }
            let minor = from.exchange_amount(&to, &amount).ok_or_else(|| {
                AppError::from(WalletError::NotExchangeable {
                    from: from.id().to_string(),
                    to: to.id().to_string(),
                })
            })?;
            println!(
                "{minor}\t{} {}",
                to.from_minor_unit(&minor.to_string(), None),
                to.symbol()
            );
        }
        Command::CheckType {
            currency,
            income_type,
            json,
        } => {
            let currency = registry.require(&currency)?;
            let income = currency
                .check_type(&income_type)
                .ok_or_else(|| AppError::from(WalletError::UnknownIncomeType(income_type)))?;
            if json {
                println!("{}", serde_json::to_string_pretty(&income)?);
                return Ok(());
            }
            println!(
                "{}\t{}\tsubject={}\twithdraw={}",
                income.key,
                income.name,
                income.subject().unwrap_or("-"),
                income.withdraw,
            );
        }
    }

    Ok(())
}

fn invalid_amount(currency: &str, amount: &str) -> AppError {
    WalletError::InvalidAmount {
        currency: currency.to_string(),
        amount: amount.to_string(),
    }
    .into()
}
