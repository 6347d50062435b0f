//! Ticker normalization and market classification.
//!
//! Free-text symbols are canonicalized into the exchange-qualified form used by
//! the market-data provider:
//! - blank input falls back to `AAPL`
//! - Hong Kong codes are zero-padded to four digits (`700.hk` → `0700.HK`)
//! - share-class dots become hyphens (`BRK.B` → `BRK-B`)
//! - bare six-digit mainland codes get `.SS` (leading 6 or 9) or `.SZ`
//!
//! Normalization never fails.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Symbol used when the input is blank.
pub const DEFAULT_TICKER: &str = "AAPL";

/// Canonical, exchange-qualified ticker.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Ticker(String);

impl Ticker {
    /// Canonicalize a free-text symbol.
    pub fn normalize(raw: &str) -> Self {
        Self(normalize(raw))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Market the ticker trades on, derived from its suffix.
    pub fn market(&self) -> Market {
        Market::of(&self.0)
    }
}

impl fmt::Display for Ticker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for Ticker {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Canonicalize a free-text symbol into an exchange-qualified ticker string.
pub fn normalize(raw: &str) -> String {
    let s = raw.trim().to_uppercase();
    if s.is_empty() {
        return DEFAULT_TICKER.to_string();
    }

    if s.ends_with(".HK") {
        let code = s.split('.').next().unwrap_or_default();
        let digits: String = code.chars().filter(|c| c.is_ascii_digit()).collect();
        return format!("{digits:0>4}.HK");
    }

    if s.contains('.') && !s.ends_with(".SS") && !s.ends_with(".SZ") {
        return s.replace('.', "-");
    }

    if s.len() == 6 && s.bytes().all(|b| b.is_ascii_digit()) {
        let suffix = if s.starts_with('6') || s.starts_with('9') {
            "SS"
        } else {
            "SZ"
        };
        return format!("{s}.{suffix}");
    }

    s
}

/// Exchange group a ticker belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Market {
    HongKong,
    China,
    UnitedStates,
}

impl Market {
    /// Classify a normalized ticker by its suffix.
    pub fn of(ticker: &str) -> Self {
        let t = ticker.to_uppercase();
        if t.ends_with(".HK") {
            Market::HongKong
        } else if t.ends_with(".SS") || t.ends_with(".SZ") {
            Market::China
        } else {
            Market::UnitedStates
        }
    }

    /// Currency prefix used when displaying prices.
    pub fn currency_symbol(self) -> &'static str {
        match self {
            Market::HongKong => "HKD $",
            Market::China => "CNY ¥",
            Market::UnitedStates => "USD $",
        }
    }

    /// Short market label.
    pub fn label(self) -> &'static str {
        match self {
            Market::HongKong => "HK",
            Market::China => "CN",
            Market::UnitedStates => "US",
        }
    }
}

impl fmt::Display for Market {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
