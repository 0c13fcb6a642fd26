//! The closed set of supported currencies.

use anyhow::{Error, anyhow};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Currency {
    Usd,
    Eur,
    Rub,
    Kgs,
    Gbp,
    Jpy,
    Cny,
    Kzt,
    Uah,
    Byn,
    Chf,
    Cad,
    Aud,
    Pln,
    Try,
    Inr,
}

impl Currency {
    /// All supported currencies, in display order. The order is part of the
    /// UI contract and must stay stable.
    pub const ALL: [Currency; 16] = [
        Currency::Usd,
        Currency::Eur,
        Currency::Rub,
        Currency::Kgs,
        Currency::Gbp,
        Currency::Jpy,
        Currency::Cny,
        Currency::Kzt,
        Currency::Uah,
        Currency::Byn,
        Currency::Chf,
        Currency::Cad,
        Currency::Aud,
        Currency::Pln,
        Currency::Try,
        Currency::Inr,
    ];

    pub fn code(&self) -> &'static str {
        match self {
            Currency::Usd => "USD",
            Currency::Eur => "EUR",
            Currency::Rub => "RUB",
            Currency::Kgs => "KGS",
            Currency::Gbp => "GBP",
            Currency::Jpy => "JPY",
            Currency::Cny => "CNY",
            Currency::Kzt => "KZT",
            Currency::Uah => "UAH",
            Currency::Byn => "BYN",
            Currency::Chf => "CHF",
            Currency::Cad => "CAD",
            Currency::Aud => "AUD",
            Currency::Pln => "PLN",
            Currency::Try => "TRY",
            Currency::Inr => "INR",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Currency::Usd => "US Dollar",
            Currency::Eur => "Euro",
            Currency::Rub => "Russian Ruble",
            Currency::Kgs => "Kyrgyzstani Som",
            Currency::Gbp => "British Pound",
            Currency::Jpy => "Japanese Yen",
            Currency::Cny => "Chinese Yuan",
            Currency::Kzt => "Kazakhstani Tenge",
            Currency::Uah => "Ukrainian Hryvnia",
            Currency::Byn => "Belarusian Ruble",
            Currency::Chf => "Swiss Franc",
            Currency::Cad => "Canadian Dollar",
            Currency::Aud => "Australian Dollar",
            Currency::Pln => "Polish Zloty",
            Currency::Try => "Turkish Lira",
            Currency::Inr => "Indian Rupee",
        }
    }

    /// Exact-match lookup by ISO code. Unknown codes are `None` so callers
    /// can decide whether to error or skip.
    pub fn from_code(code: &str) -> Option<Currency> {
        Currency::ALL.iter().find(|c| c.code() == code).copied()
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Currency {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Currency::from_code(s).ok_or_else(|| anyhow!("unsupported currency code: {s}"))
    }
}
