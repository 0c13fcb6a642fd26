pub mod cli;
pub mod core;
pub mod providers;

use crate::core::Currency;
use crate::core::config::AppConfig;
use crate::core::convert::Converter;
use crate::core::rates::RateStore;
use crate::providers::ExchangeRateHostProvider;
use anyhow::{Context, Result};
use tracing::{debug, info};

pub enum AppCommand {
    Convert {
        amount: String,
        from: String,
        to: String,
    },
    Rates {
        base: String,
    },
    List,
}

pub async fn run_command(command: AppCommand, config_path: Option<&str>) -> Result<()> {
    info!("valuta starting...");

    let config = match config_path {
        Some(path) => AppConfig::load_from_path(path)?,
        None => AppConfig::load()?,
    };
    debug!("Loaded config: {config:#?}");

    let base_url = config
        .providers
        .exchangerate
        .as_ref()
        .map_or(ExchangeRateHostProvider::DEFAULT_BASE_URL, |p| &p.base_url);
    let provider = ExchangeRateHostProvider::new(base_url);
    let mut store = RateStore::new(provider);

    match command {
        AppCommand::Convert { amount, from, to } => {
            let from = parse_currency(&from)?;
            let to = parse_currency(&to)?;
            let amount = parse_amount(&amount);
            let mut converter = Converter::new(store);
            cli::convert::run(&mut converter, amount, from, to).await
        }
        AppCommand::Rates { base } => cli::rates::run(&mut store, parse_currency(&base)?).await,
        AppCommand::List => {
            cli::list::run();
            Ok(())
        }
    }
}

/// Amounts come straight from user input; anything unusable means "nothing
/// to convert" rather than an error.
fn parse_amount(raw: &str) -> f64 {
    match raw.trim().parse::<f64>() {
        Ok(value) if value.is_finite() && value > 0.0 => value,
        _ => 0.0,
    }
}

fn parse_currency(raw: &str) -> Result<Currency> {
    raw.trim().to_uppercase().parse().with_context(|| {
        let codes = Currency::ALL.map(|c| c.code()).join(", ");
        format!("expected one of: {codes}")
    })
}
