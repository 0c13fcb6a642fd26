//! Conversion arithmetic on top of the rate store.

use crate::core::currency::Currency;
use crate::core::rates::{RateProvider, RateStore};
use tracing::debug;

/// Outcome of a conversion request. `Empty` is the zero-amount sentinel;
/// the UI renders a placeholder for it, never a formatted zero.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Conversion {
    Empty,
    Converted {
        amount: f64,
        unit_rate: f64,
        from: Currency,
        to: Currency,
    },
}

pub struct Converter<P> {
    store: RateStore<P>,
}

impl<P: RateProvider> Converter<P> {
    pub fn new(store: RateStore<P>) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &RateStore<P> {
        &self.store
    }

    /// Converts `amount` from one currency to another using the store's
    /// current table, refreshing it first when the base does not match.
    ///
    /// Always produces a result: fetch failures are absorbed by the store's
    /// fallback path and only surface through its status accessors. The
    /// caller guarantees `amount` is non-negative and finite.
    pub async fn convert(&mut self, amount: f64, from: Currency, to: Currency) -> Conversion {
        if amount == 0.0 {
            return Conversion::Empty;
        }

        // Identity pairs skip the table (and the network) so the amount
        // passes through without a floating-point multiply.
        if from == to {
            return Conversion::Converted {
                amount,
                unit_rate: 1.0,
                from,
                to,
            };
        }

        let state = self.store.refresh(from).await;
        let unit_rate = if state.base == from {
            state.table.get(&to).copied().unwrap_or(1.0)
        } else {
            // The store could not be aligned to `from` (fallback landed on
            // USD), so go through the base both ways. Missing codes imply
            // 1.0 to keep the result total.
            debug!(%from, %to, base = %state.base, "computing cross-rate");
            let from_rate = state.table.get(&from).copied().unwrap_or(1.0);
            let to_rate = state.table.get(&to).copied().unwrap_or(1.0);
            (1.0 / from_rate) * to_rate
        };

        Conversion::Converted {
            amount: amount * unit_rate,
            unit_rate,
            from,
            to,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::rates::{FALLBACK_RATES, RateSnapshot, RateTable};
    use anyhow::{Result, anyhow};
    use async_trait::async_trait;
    use chrono::NaiveDate;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct MockProvider {
        call_count: AtomicUsize,
        response: fn(Currency) -> Result<RateSnapshot>,
    }

    impl MockProvider {
        fn new(response: fn(Currency) -> Result<RateSnapshot>) -> Self {
            Self {
                call_count: AtomicUsize::new(0),
                response,
            }
        }
    }

    #[async_trait]
    impl<'a> RateProvider for &'a MockProvider {
        async fn fetch_latest(&self, base: Currency) -> Result<RateSnapshot> {
            self.call_count.fetch_add(1, Ordering::SeqCst);
            (self.response)(base)
        }
    }

    fn usd_rates(_base: Currency) -> Result<RateSnapshot> {
        Ok(RateSnapshot {
            rates: RateTable::from([(Currency::Eur, 0.92), (Currency::Rub, 98.0)]),
            date: NaiveDate::from_ymd_opt(2026, 8, 1).unwrap(),
        })
    }

    fn failing(_base: Currency) -> Result<RateSnapshot> {
        Err(anyhow!("unreachable"))
    }

    #[tokio::test]
    async fn test_zero_amount_is_the_empty_sentinel() {
        let provider = MockProvider::new(usd_rates);
        let mut converter = Converter::new(RateStore::new(&provider));

        let result = converter.convert(0.0, Currency::Usd, Currency::Rub).await;
        assert_eq!(result, Conversion::Empty);
        assert_eq!(provider.call_count.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_identity_pairs_pass_the_amount_through_exactly() {
        let provider = MockProvider::new(usd_rates);
        let mut converter = Converter::new(RateStore::new(&provider));

        for currency in Currency::ALL {
            let result = converter.convert(123.45, currency, currency).await;
            assert_eq!(
                result,
                Conversion::Converted {
                    amount: 123.45,
                    unit_rate: 1.0,
                    from: currency,
                    to: currency,
                }
            );
        }
        // Identity conversions never consult the table, let alone fetch one.
        assert_eq!(provider.call_count.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_conversion_from_the_loaded_base() {
        let provider = MockProvider::new(usd_rates);
        let mut converter = Converter::new(RateStore::new(&provider));

        let result = converter.convert(100.0, Currency::Usd, Currency::Rub).await;
        let Conversion::Converted { amount, unit_rate, .. } = result else {
            panic!("expected a converted result");
        };
        assert_eq!(amount, 9800.0);
        assert_eq!(unit_rate, 98.0);
    }

    #[tokio::test]
    async fn test_cross_rate_through_the_fallback_base() {
        let provider = MockProvider::new(failing);
        let mut converter = Converter::new(RateStore::new(&provider));

        // The fetch for EUR fails, the store falls back to the USD snapshot,
        // and the pair resolves through it.
        let result = converter.convert(10.0, Currency::Eur, Currency::Rub).await;
        let Conversion::Converted { amount, unit_rate, .. } = result else {
            panic!("expected a converted result");
        };
        let expected_rate = (1.0 / 0.9205) * 97.8521;
        assert!((unit_rate - expected_rate).abs() < 1e-12);
        assert!((amount - 10.0 * expected_rate).abs() < 1e-12);
        assert!(converter.store().state().is_fallback());
    }

    #[tokio::test]
    async fn test_missing_codes_default_to_one() {
        fn sparse(_base: Currency) -> Result<RateSnapshot> {
            Ok(RateSnapshot {
                rates: RateTable::from([(Currency::Usd, 1.08)]),
                date: NaiveDate::from_ymd_opt(2026, 8, 1).unwrap(),
            })
        }

        let provider = MockProvider::new(sparse);
        let mut converter = Converter::new(RateStore::new(&provider));

        let result = converter.convert(5.0, Currency::Eur, Currency::Rub).await;
        assert_eq!(
            result,
            Conversion::Converted {
                amount: 5.0,
                unit_rate: 1.0,
                from: Currency::Eur,
                to: Currency::Rub,
            }
        );
    }

    #[tokio::test]
    async fn test_round_trip_over_an_unchanged_table() {
        let provider = MockProvider::new(failing);
        let mut converter = Converter::new(RateStore::new(&provider));

        // Both directions cross-rate through the same fallback table, so the
        // two unit rates are exact reciprocals up to float rounding.
        let there = converter.convert(250.0, Currency::Eur, Currency::Rub).await;
        let Conversion::Converted { amount: forward, .. } = there else {
            panic!("expected a converted result");
        };
        let back = converter.convert(forward, Currency::Rub, Currency::Eur).await;
        let Conversion::Converted { amount: returned, .. } = back else {
            panic!("expected a converted result");
        };
        assert!((returned - 250.0).abs() < 1e-9);
    }

    #[tokio::test]
    async fn test_fallback_values_match_the_constants() {
        let provider = MockProvider::new(failing);
        let mut converter = Converter::new(RateStore::new(&provider));

        converter.convert(1.0, Currency::Usd, Currency::Eur).await;
        let state = converter.store().state();
        for (currency, rate) in FALLBACK_RATES {
            assert_eq!(state.table.get(&currency), Some(&rate));
        }
    }
}
