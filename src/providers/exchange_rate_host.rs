use anyhow::{Context, Result, bail};
use async_trait::async_trait;
use chrono::NaiveDate;
use serde::Deserialize;
use std::collections::HashMap;
use tracing::{debug, error};

use crate::core::currency::Currency;
use crate::core::rates::{RateProvider, RateSnapshot, RateTable};

/// Client for an exchangerate.host-compatible rate service:
/// `GET /latest?base=XXX` answering `{ "rates": {...}, "date": "YYYY-MM-DD" }`.
pub struct ExchangeRateHostProvider {
    base_url: String,
}

impl ExchangeRateHostProvider {
    pub const DEFAULT_BASE_URL: &'static str = "https://api.exchangerate.host";

    pub fn new(base_url: &str) -> Self {
        ExchangeRateHostProvider {
            base_url: base_url.to_string(),
        }
    }

    fn parse_api_date(date_str: &str) -> Result<NaiveDate> {
        NaiveDate::parse_from_str(date_str, "%Y-%m-%d")
            .with_context(|| format!("Failed to parse rate date: {date_str}"))
    }
}

#[derive(Debug, Deserialize)]
struct LatestRatesResponse {
    rates: HashMap<String, f64>,
    date: String,
}

#[async_trait]
impl RateProvider for ExchangeRateHostProvider {
    async fn fetch_latest(&self, base: Currency) -> Result<RateSnapshot> {
        let url = format!("{}/latest?base={}", self.base_url, base);
        debug!("Requesting rate table from {}", url);

        let client = reqwest::Client::builder().user_agent("valuta/0.3").build()?;
        let response = client
            .get(&url)
            .send()
            .await
            .with_context(|| format!("Rate request failed for base: {base}"))?;

        if !response.status().is_success() {
            bail!("HTTP error: {} for base: {}", response.status(), base);
        }

        let text = response.text().await?;
        let data: LatestRatesResponse = match serde_json::from_str(&text) {
            Ok(data) => data,
            Err(e) => {
                error!(
                    error = ?e,
                    response = %text,
                    "Failed to parse rate response"
                );
                return Err(e).context("Failed to parse rate response");
            }
        };

        let date = Self::parse_api_date(&data.date)?;

        // Only the closed currency set makes it into the table; anything
        // else in the payload is dropped here, not trusted downstream.
        let mut rates = RateTable::new();
        for (code, value) in data.rates {
            match Currency::from_code(&code) {
                Some(currency) if value.is_finite() && value > 0.0 => {
                    rates.insert(currency, value);
                }
                Some(currency) => {
                    debug!(%currency, value, "Discarding non-positive rate");
                }
                None => {
                    debug!(%code, "Ignoring unsupported currency in rate payload");
                }
            }
        }

        Ok(RateSnapshot { rates, date })
    }
}
