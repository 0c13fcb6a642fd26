//! Rate table storage: which base is loaded, when to re-fetch, and what to
//! substitute when the rate service is unreachable.

use crate::core::currency::Currency;
use anyhow::Result;
use async_trait::async_trait;
use chrono::NaiveDate;
use std::collections::HashMap;
use tracing::{debug, warn};

/// Multipliers relative to a single base currency. The base's own 1.0 is
/// implicit and never stored as a key.
pub type RateTable = HashMap<Currency, f64>;

/// One fetched rate table, as reported by the rate service.
#[derive(Debug, Clone, PartialEq)]
pub struct RateSnapshot {
    pub rates: RateTable,
    pub date: NaiveDate,
}

#[async_trait]
pub trait RateProvider: Send + Sync {
    async fn fetch_latest(&self, base: Currency) -> Result<RateSnapshot>;
}

/// Why the store is running on the fallback snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DegradedReason {
    /// Transport-level failure: connection refused, DNS, timeout.
    Connectivity,
    /// The service answered, but not with a usable rate table.
    UnexpectedResponse,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RateSource {
    Live(NaiveDate),
    FallbackSnapshot,
}

/// The fallback table is denominated in USD.
pub const FALLBACK_BASE: Currency = Currency::Usd;

/// Vintage of the hardcoded snapshot below.
pub const FALLBACK_SNAPSHOT_DATE: &str = "2025-12-01";

pub const FALLBACK_RATES: [(Currency, f64); 15] = [
    (Currency::Eur, 0.9205),
    (Currency::Rub, 97.8521),
    (Currency::Kgs, 89.1234),
    (Currency::Gbp, 0.7856),
    (Currency::Jpy, 151.2345),
    (Currency::Cny, 7.1234),
    (Currency::Kzt, 485.6789),
    (Currency::Uah, 41.5678),
    (Currency::Byn, 3.1890),
    (Currency::Chf, 0.8623),
    (Currency::Cad, 1.3721),
    (Currency::Aud, 1.4987),
    (Currency::Pln, 3.9456),
    (Currency::Try, 34.5678),
    (Currency::Inr, 84.9123),
];

#[derive(Debug, Clone, PartialEq)]
pub struct RateState {
    pub base: Currency,
    pub table: RateTable,
    pub source: Option<RateSource>,
    pub degraded: Option<DegradedReason>,
}

impl RateState {
    pub fn is_fallback(&self) -> bool {
        self.source == Some(RateSource::FallbackSnapshot)
    }
}

pub struct RateStore<P> {
    provider: P,
    state: RateState,
}

impl<P: RateProvider> RateStore<P> {
    pub fn new(provider: P) -> Self {
        Self {
            provider,
            state: RateState {
                base: FALLBACK_BASE,
                table: RateTable::new(),
                source: None,
                degraded: None,
            },
        }
    }

    pub fn state(&self) -> &RateState {
        &self.state
    }

    /// Makes the store hold a rate table denominated in `requested_base`.
    ///
    /// A matching base with a non-empty table is a cache hit and skips the
    /// network entirely. Otherwise a single best-effort fetch runs: on
    /// success the whole state is replaced with live data; on any failure
    /// the hardcoded snapshot takes its place, with the base forced to USD.
    /// There is no retry and no deduplication of overlapping refreshes;
    /// the last completion wins.
    pub async fn refresh(&mut self, requested_base: Currency) -> &RateState {
        if requested_base == self.state.base && !self.state.table.is_empty() {
            debug!(base = %requested_base, "rate table already loaded");
            return &self.state;
        }

        match self.provider.fetch_latest(requested_base).await {
            Ok(snapshot) => {
                let mut table = snapshot.rates;
                table.remove(&requested_base);
                self.state = RateState {
                    base: requested_base,
                    table,
                    source: Some(RateSource::Live(snapshot.date)),
                    degraded: None,
                };
            }
            Err(err) => {
                warn!(error = %err, base = %requested_base, "rate fetch failed, using fallback table");
                self.state = RateState {
                    base: FALLBACK_BASE,
                    table: FALLBACK_RATES.iter().copied().collect(),
                    source: Some(RateSource::FallbackSnapshot),
                    degraded: Some(classify_failure(&err)),
                };
            }
        }
        &self.state
    }
}

/// Splits fetch failures into the two categories the UI distinguishes.
fn classify_failure(err: &anyhow::Error) -> DegradedReason {
    let connectivity = err.chain().any(|cause| {
        cause
            .downcast_ref::<reqwest::Error>()
            .is_some_and(|e| e.is_connect() || e.is_timeout())
    });
    if connectivity {
        DegradedReason::Connectivity
    } else {
        DegradedReason::UnexpectedResponse
    }
}
