//! Diagnostic scores for the four-axis radar view.
//!
//! Each axis is scored on 0..=25. The three condition axes take a fixed high
//! score when their condition holds; volatility scales ATR as a fraction of
//! price.

use crate::signal::Conditions;
use serde::Serialize;

/// Upper bound of every axis.
pub const MAX_SCORE: f64 = 25.0;

/// Fixed axis labels, in display order.
pub const AXIS_LABELS: [&str; 4] = ["position", "sentiment", "momentum", "volatility"];

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RadarScores {
    pub position: f64,
    pub sentiment: f64,
    pub momentum: f64,
    pub volatility: f64,
}

impl RadarScores {
    pub fn compute(conditions: Conditions, atr: f64, last_price: f64) -> Self {
        let pick = |hit: bool, miss: f64| if hit { MAX_SCORE } else { miss };
        Self {
            position: pick(conditions.low_in_range, 8.0),
            sentiment: pick(conditions.oversold, 10.0),
            momentum: pick(conditions.turning_up, 12.0),
            volatility: ((atr / last_price) * 150.0).min(MAX_SCORE),
        }
    }

    /// Scores paired with their axis labels, in display order.
    pub fn axes(&self) -> [(&'static str, f64); 4] {
        [
            (AXIS_LABELS[0], self.position),
            (AXIS_LABELS[1], self.sentiment),
            (AXIS_LABELS[2], self.momentum),
            (AXIS_LABELS[3], self.volatility),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_conditions_met() {
        let scores = RadarScores::compute(Conditions::new(true, true, true), 2.0, 100.0);
        assert_eq!(scores.position, 25.0);
        assert_eq!(scores.sentiment, 25.0);
        assert_eq!(scores.momentum, 25.0);
        assert!((scores.volatility - 3.0).abs() < 1e-12);
    }

    #[test]
    fn no_conditions_met() {
        let scores = RadarScores::compute(Conditions::new(false, false, false), 0.0, 100.0);
        assert_eq!(scores.position, 8.0);
        assert_eq!(scores.sentiment, 10.0);
        assert_eq!(scores.momentum, 12.0);
        assert_eq!(scores.volatility, 0.0);
    }

    #[test]
    fn volatility_is_capped() {
        let scores = RadarScores::compute(Conditions::new(false, false, false), 50.0, 100.0);
        assert_eq!(scores.volatility, MAX_SCORE);
    }

    #[test]
    fn axes_follow_label_order() {
        let scores = RadarScores::compute(Conditions::new(true, false, false), 1.0, 100.0);
        let axes = scores.axes();
        assert_eq!(axes[0], ("position", 25.0));
        assert_eq!(axes[1], ("sentiment", 10.0));
        assert_eq!(axes[3].0, "volatility");
    }
}
