//! BuyZone Core — ticker normalization, indicators, signal tiers, zone geometry.
//!
//! This crate turns a daily price history into a buy-zone report:
//! - Ticker normalization and market classification
//! - Indicators (Wilder RSI, ATR, trailing percentile rank)
//! - Four-tier accumulation signal from three bottom conditions
//! - Conservative / neutral / aggressive purchase bands and add-points
//! - Report assembly into one immutable `AnalysisResult`
//! - Data providers (Yahoo Finance, CSV import, synthetic) at the boundary
//!
//! The analysis itself is synchronous and pure: identical input always yields a
//! bit-identical result.

pub mod config;
pub mod data;
pub mod domain;
pub mod error;
pub mod indicators;
pub mod radar;
pub mod report;
pub mod signal;
pub mod zones;

pub use config::AnalysisConfig;
pub use domain::{Bar, InstrumentProfile, Market, PriceSeries, Ticker};
pub use error::AnalysisError;
pub use indicators::IndicatorSnapshot;
pub use radar::RadarScores;
pub use report::{analyze, analyze_with, AnalysisResult};
pub use signal::{Conditions, SignalTier};
pub use zones::{AddPoints, PriceBand, ZoneSet};

#[cfg(test)]
mod tests {
    use super::*;

    /// Compile-time check: result and domain types are Send + Sync, so callers
    /// can analyze several tickers on their own threads.
    #[allow(dead_code)]
    fn assert_send_sync() {
        fn require_send<T: Send>() {}
        fn require_sync<T: Sync>() {}

        require_send::<Bar>();
        require_sync::<Bar>();
        require_send::<PriceSeries>();
        require_sync::<PriceSeries>();
        require_send::<Ticker>();
        require_sync::<Ticker>();
        require_send::<InstrumentProfile>();
        require_sync::<InstrumentProfile>();
        require_send::<AnalysisConfig>();
        require_sync::<AnalysisConfig>();
        require_send::<AnalysisResult>();
        require_sync::<AnalysisResult>();
        require_send::<AnalysisError>();
        require_sync::<AnalysisError>();
        require_send::<data::YahooProvider>();
        require_sync::<data::YahooProvider>();
        require_send::<data::CircuitBreaker>();
        require_sync::<data::CircuitBreaker>();
    }

    /// Architecture contract: the analysis entry point takes only a series and
    /// a config, never a provider, so it cannot perform I/O.
    #[test]
    fn analysis_takes_no_provider() {
        fn _check(
            series: &PriceSeries,
            config: &AnalysisConfig,
        ) -> Result<AnalysisResult, AnalysisError> {
            analyze_with(series, config)
        }
    }
}
