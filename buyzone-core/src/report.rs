//! Report assembly: price series in, one immutable `AnalysisResult` out.
//!
//! Pipeline: drop bars without a close → indicator snapshot → conditions →
//! signal tier → zones and add-points. The result is either complete or an
//! `AnalysisError`; nothing partial is ever returned.

use crate::config::AnalysisConfig;
use crate::domain::PriceSeries;
use crate::error::AnalysisError;
use crate::indicators::IndicatorSnapshot;
use crate::radar::RadarScores;
use crate::signal::{Conditions, SignalTier};
use crate::zones::{AddPoints, ZoneSet};
use serde::Serialize;
use tracing::{debug, warn};

/// Outcome of one analysis.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisResult {
    pub last_price: f64,
    pub tier: SignalTier,
    pub zones: ZoneSet,
    pub add_points: AddPoints,
    pub metrics: IndicatorSnapshot,
    pub conditions: Conditions,
}

impl AnalysisResult {
    pub fn radar_scores(&self) -> RadarScores {
        RadarScores::compute(self.conditions, self.metrics.atr, self.last_price)
    }

    /// BLAKE3 hash over the exact bit patterns of every field.
    ///
    /// Two results share a fingerprint only if they are bit-identical, NaNs
    /// included (which `PartialEq` cannot express).
    pub fn fingerprint(&self) -> String {
        let mut hasher = blake3::Hasher::new();
        let numbers = [
            self.last_price,
            self.zones.conservative.low,
            self.zones.conservative.high,
            self.zones.neutral.low,
            self.zones.neutral.high,
            self.zones.aggressive.low,
            self.zones.aggressive.high,
            self.add_points.first,
            self.add_points.pullback,
            self.metrics.rsi_last,
            self.metrics.rsi_prev,
            self.metrics.percentile_rank_3y,
            self.metrics.atr,
        ];
        for n in numbers {
            hasher.update(&n.to_bits().to_le_bytes());
        }
        hasher.update(self.tier.label().as_bytes());
        let (a, b, c) = self.conditions.as_tuple();
        hasher.update(&[a as u8, b as u8, c as u8]);
        hasher.finalize().to_hex().to_string()
    }
}

/// Analyze a series with the default parameters.
pub fn analyze(series: &PriceSeries) -> Result<AnalysisResult, AnalysisError> {
    analyze_with(series, &AnalysisConfig::default())
}

/// Analyze a series with explicit parameters.
pub fn analyze_with(
    series: &PriceSeries,
    config: &AnalysisConfig,
) -> Result<AnalysisResult, AnalysisError> {
    config.validate()?;

    if series.is_empty() {
        return Err(AnalysisError::EmptySeries);
    }

    let bars = series.usable_bars();
    let dropped = series.len() - bars.len();
    if dropped > 0 {
        warn!(dropped, kept = bars.len(), "dropped bars without a close");
    }

    let metrics = IndicatorSnapshot::compute(&bars, &config.indicators)?;
    let last_price = bars
        .last()
        .map(|b| b.close)
        .ok_or(AnalysisError::InsufficientData {
            available: 0,
            required: config.indicators.min_observations,
        })?;

    if metrics.has_undefined_rsi() {
        debug!("RSI undefined (zero average loss); oversold and turning-up read as false");
    }

    let conditions = Conditions::evaluate(&metrics, &config.signal);
    let tier = SignalTier::classify(conditions);
    let zones = ZoneSet::compute(last_price, metrics.atr, &config.zones);
    let add_points = zones.add_points();

    debug!(
        last_price,
        tier = tier.label(),
        a = conditions.low_in_range,
        b = conditions.oversold,
        c = conditions.turning_up,
        "classified series"
    );

    Ok(AnalysisResult {
        last_price,
        tier,
        zones,
        add_points,
        metrics,
        conditions,
    })
}
