//! Relative Strength Index (RSI).
//!
//! Wilder smoothing (recursive EMA, alpha = 1/period, no bias correction) of
//! per-bar gains and losses, seeded from the first observed change.
//! RSI = 100 - 100 / (1 + avg_gain / avg_loss)
//!
//! When avg_loss is exactly zero the ratio is undefined and the RSI is NaN.
//! It is deliberately not clamped to 100: downstream threshold comparisons
//! then evaluate false for that bar.

use super::Indicator;
use crate::domain::Bar;

#[derive(Debug, Clone)]
pub struct Rsi {
    period: usize,
    name: String,
}

impl Rsi {
    pub fn new(period: usize) -> Self {
        assert!(period >= 1, "RSI period must be >= 1");
        Self {
            period,
            name: format!("rsi_{period}"),
        }
    }
}

impl Indicator for Rsi {
    fn name(&self) -> &str {
        &self.name
    }

    /// The first change, and therefore the first RSI value, is at bar 1.
    fn lookback(&self) -> usize {
        1
    }

    fn compute(&self, bars: &[Bar]) -> Vec<f64> {
        let n = bars.len();
        let mut gains = vec![f64::NAN; n];
        let mut losses = vec![f64::NAN; n];

        for i in 1..n {
            let change = bars[i].close - bars[i - 1].close;
            if change.is_nan() {
                continue;
            }
            gains[i] = change.max(0.0);
            losses[i] = (-change).max(0.0);
        }

        let avg_gain = wilder_ewm(&gains, self.period);
        let avg_loss = wilder_ewm(&losses, self.period);

        avg_gain
            .iter()
            .zip(&avg_loss)
            .map(|(&g, &l)| compute_rsi(g, l))
            .collect()
    }
}

fn compute_rsi(avg_gain: f64, avg_loss: f64) -> f64 {
    let avg_loss = if avg_loss == 0.0 { f64::NAN } else { avg_loss };
    let rs = avg_gain / avg_loss;
    100.0 - 100.0 / (1.0 + rs)
}

/// Wilder's recursive moving average with alpha = 1/period.
///
/// The first non-NaN value seeds the average; earlier positions are NaN.
/// A NaN after the seed leaves the average unchanged.
pub fn wilder_ewm(values: &[f64], period: usize) -> Vec<f64> {
    let alpha = 1.0 / period.max(1) as f64;
    let mut result = Vec::with_capacity(values.len());
    let mut prev: Option<f64> = None;

    for &v in values {
        let next = match (prev, v.is_nan()) {
            (None, true) => None,
            (None, false) => Some(v),
            (Some(p), true) => Some(p),
            (Some(p), false) => Some(alpha * v + (1.0 - alpha) * p),
        };
        result.push(next.unwrap_or(f64::NAN));
        prev = next;
    }

    result
}
