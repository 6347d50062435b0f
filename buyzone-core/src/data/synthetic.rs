//! Synthetic price provider for demos and offline runs.
//!
//! Produces a weekday-only random walk from a starting price of 100.0. The RNG
//! seed is derived from the symbol with BLAKE3, so the same symbol and date
//! range always yield the same bars. Results are tagged `DataSource::Synthetic`.

use super::provider::{DataError, DataProvider, DataSource, FetchResult};
use crate::domain::{Bar, InstrumentProfile, PriceSeries};
use chrono::{Datelike, NaiveDate, Weekday};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Display name of every synthetic instrument. The ticker is shown beside it.
pub const SYNTHETIC_NAME: &str = "Synthetic random walk";

#[derive(Debug, Clone, Default)]
pub struct SyntheticProvider;

impl SyntheticProvider {
    pub fn new() -> Self {
        Self
    }
}

/// Generate synthetic bars for `symbol` over `[start, end]`.
pub fn generate_bars(symbol: &str, start: NaiveDate, end: NaiveDate) -> Vec<Bar> {
    let seed: [u8; 32] = *blake3::hash(symbol.as_bytes()).as_bytes();
    let mut rng = StdRng::from_seed(seed);

    let mut bars = Vec::new();
    let mut price = 100.0_f64;

    for date in start.iter_days().take_while(|d| *d <= end) {
        if matches!(date.weekday(), Weekday::Sat | Weekday::Sun) {
            continue;
        }

        let daily_return: f64 = rng.gen_range(-0.03..0.03);
        let open = price;
        let close = price * (1.0 + daily_return);
        let high = open.max(close) * (1.0 + rng.gen_range(0.0..0.01));
        let low = open.min(close) * (1.0 - rng.gen_range(0.0..0.01));
        let volume = rng.gen_range(500_000..5_000_000u64);

        bars.push(Bar {
            date,
            open,
            high,
            low,
            close,
            volume,
        });
        price = close;
    }

    bars
}

impl DataProvider for SyntheticProvider {
    fn name(&self) -> &str {
        "synthetic"
    }

    fn fetch(
        &self,
        symbol: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<FetchResult, DataError> {
        let series = PriceSeries::new(generate_bars(symbol, start, end))?;
        Ok(FetchResult {
            symbol: symbol.to_string(),
            series,
            profile: InstrumentProfile {
                short_name: Some(SYNTHETIC_NAME.to_string()),
                ..InstrumentProfile::default()
            },
            source: DataSource::Synthetic,
        })
    }

    fn is_available(&self) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn range() -> (NaiveDate, NaiveDate) {
        (
            NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            NaiveDate::from_ymd_opt(2024, 3, 31).unwrap(),
        )
    }

    #[test]
    fn same_symbol_same_bars() {
        let (start, end) = range();
        assert_eq!(generate_bars("SPY", start, end), generate_bars("SPY", start, end));
    }

    #[test]
    fn different_symbols_differ() {
        let (start, end) = range();
        assert_ne!(generate_bars("SPY", start, end), generate_bars("QQQ", start, end));
    }

    #[test]
    fn weekdays_only_and_sane() {
        let (start, end) = range();
        let bars = generate_bars("SPY", start, end);
        assert!(!bars.is_empty());
        for bar in &bars {
            assert!(!matches!(bar.date.weekday(), Weekday::Sat | Weekday::Sun));
            assert!(bar.is_sane(), "insane bar on {}", bar.date);
        }
    }

    #[test]
    fn provider_returns_ordered_series() {
        let (start, end) = range();
        let result = SyntheticProvider::new().fetch("SPY", start, end).unwrap();
        assert_eq!(result.source, DataSource::Synthetic);
        assert!(result.series.len() > 20);
        let name = result.profile.display_name("SPY");
        assert_eq!(name, SYNTHETIC_NAME);
        assert!(!name.contains("SPY"));
    }
}
