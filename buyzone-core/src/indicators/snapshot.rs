//! Indicator snapshot: the latest values the signal and zones are built from.

use super::{rank_of_last, Atr, Indicator, Rsi};
use crate::config::IndicatorConfig;
use crate::domain::Bar;
use crate::error::AnalysisError;
use serde::Serialize;
use tracing::debug;

/// Latest indicator readings for one analysis.
///
/// Recomputed from scratch on every request. `rsi_last` and `rsi_prev` are NaN
/// when the average loss is zero (see `indicators::rsi`).
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct IndicatorSnapshot {
    pub rsi_last: f64,
    pub rsi_prev: f64,
    /// Percentile rank of the last close over the trailing window, in [0, 1].
    pub percentile_rank_3y: f64,
    pub atr: f64,
}

impl IndicatorSnapshot {
    /// Compute the snapshot from bars that all carry a close.
    pub fn compute(bars: &[Bar], config: &IndicatorConfig) -> Result<Self, AnalysisError> {
        config.validate()?;
        if bars.len() < config.min_observations {
            return Err(AnalysisError::InsufficientData {
                available: bars.len(),
                required: config.min_observations,
            });
        }

        let rsi = Rsi::new(config.rsi_period).compute(bars);
        let (rsi_prev, rsi_last) = match rsi.as_slice() {
            [.., prev, last] => (*prev, *last),
            [only] => (*only, *only),
            [] => (f64::NAN, f64::NAN),
        };

        let atr = Atr::new(config.atr_period)
            .compute(bars)
            .last()
            .copied()
            .unwrap_or(f64::NAN);

        let closes: Vec<f64> = bars.iter().map(|b| b.close).collect();
        let start = closes.len().saturating_sub(config.percentile_window);
        let percentile_rank_3y = rank_of_last(&closes[start..]);

        let snapshot = Self {
            rsi_last,
            rsi_prev,
            percentile_rank_3y,
            atr,
        };
        debug!(
            rsi_last = snapshot.rsi_last,
            rsi_prev = snapshot.rsi_prev,
            percentile_rank = snapshot.percentile_rank_3y,
            atr = snapshot.atr,
            bars = bars.len(),
            "computed indicator snapshot"
        );
        Ok(snapshot)
    }

    /// True when the RSI ratio was undefined on either of the last two bars.
    pub fn has_undefined_rsi(&self) -> bool {
        self.rsi_last.is_nan() || self.rsi_prev.is_nan()
    }
}
