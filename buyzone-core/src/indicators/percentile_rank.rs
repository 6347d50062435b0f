//! Rolling percentile rank of the close.
//!
//! For each bar, ranks the close among the closes of the trailing window
//! (up to `window` bars, fewer at the start of the series) and expresses the
//! rank as a fraction of the window length. Ties receive the average of the
//! ranks they jointly occupy, so the maximum of a window scores exactly 1.0
//! and a value tied with k others sits in the middle of their rank block.

use super::Indicator;
use crate::domain::Bar;

#[derive(Debug, Clone)]
pub struct PercentileRank {
    window: usize,
    name: String,
}

impl PercentileRank {
    pub fn new(window: usize) -> Self {
        assert!(window >= 1, "percentile window must be >= 1");
        Self {
            window,
            name: format!("pct_rank_{window}"),
        }
    }
}

impl Indicator for PercentileRank {
    fn name(&self) -> &str {
        &self.name
    }

    /// A partial window is ranked as-is, so the first bar already has a value.
    fn lookback(&self) -> usize {
        0
    }

    fn compute(&self, bars: &[Bar]) -> Vec<f64> {
        let closes: Vec<f64> = bars.iter().map(|b| b.close).collect();
        (0..closes.len())
            .map(|end| {
                let start = (end + 1).saturating_sub(self.window);
                rank_of_last(&closes[start..=end])
            })
            .collect()
    }
}

/// Average-rank percentile of the last value within `window`, in (0, 1].
///
/// NaN entries are excluded from the ranking. Returns NaN for an empty
/// window or a NaN last value.
pub fn rank_of_last(window: &[f64]) -> f64 {
    let Some(&target) = window.last() else {
        return f64::NAN;
    };
    if target.is_nan() {
        return f64::NAN;
    }

    let mut below = 0usize;
    let mut equal = 0usize;
    let mut valid = 0usize;
    for &v in window.iter().filter(|v| !v.is_nan()) {
        valid += 1;
        if v < target {
            below += 1;
        } else if v == target {
            equal += 1;
        }
    }

    // Ranks below+1 ..= below+equal, averaged
    let avg_rank = below as f64 + (equal as f64 + 1.0) / 2.0;
    avg_rank / valid as f64
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::{assert_approx, make_bars, DEFAULT_EPSILON};

    #[test]
    fn maximum_ranks_one() {
        assert_approx(rank_of_last(&[3.0, 1.0, 2.0, 5.0]), 1.0, DEFAULT_EPSILON);
    }

    #[test]
    fn minimum_ranks_one_over_n() {
        assert_approx(rank_of_last(&[3.0, 1.0, 2.0, 0.5]), 0.25, DEFAULT_EPSILON);
    }

    #[test]
    fn ties_take_average_rank() {
        // Values sorted: 1, 2, 2, 2, 4 → the three 2s occupy ranks 2,3,4 → avg 3
        assert_approx(rank_of_last(&[2.0, 1.0, 4.0, 2.0, 2.0]), 3.0 / 5.0, DEFAULT_EPSILON);
    }

    #[test]
    fn flat_window_ranks_in_the_middle() {
        // n equal values: average rank (n+1)/2
        assert_approx(rank_of_last(&[7.0; 4]), 2.5 / 4.0, DEFAULT_EPSILON);
    }

    #[test]
    fn single_value_ranks_one() {
        assert_approx(rank_of_last(&[42.0]), 1.0, DEFAULT_EPSILON);
    }

    #[test]
    fn empty_or_nan_is_undefined() {
        assert!(rank_of_last(&[]).is_nan());
        assert!(rank_of_last(&[1.0, f64::NAN]).is_nan());
        // NaN elsewhere is ignored
        assert_approx(rank_of_last(&[f64::NAN, 1.0, 2.0]), 1.0, DEFAULT_EPSILON);
    }

    #[test]
    fn rolling_window_forgets_old_values() {
        // With window 3 the early 100 drops out by the last bar.
        let bars = make_bars(&[100.0, 1.0, 2.0, 3.0]);
        let result = PercentileRank::new(3).compute(&bars);
        assert_eq!(result.len(), 4);
        assert_approx(result[0], 1.0, DEFAULT_EPSILON);
        assert_approx(result[1], 0.5, DEFAULT_EPSILON);
        assert_approx(result[3], 1.0, DEFAULT_EPSILON);

        let unbounded = PercentileRank::new(10).compute(&bars);
        assert_approx(unbounded[3], 0.75, DEFAULT_EPSILON);
    }

    #[test]
    fn output_stays_in_unit_interval() {
        let bars = make_bars(&[5.0, 3.0, 8.0, 8.0, 1.0, 9.0, 2.0, 2.0]);
        for v in PercentileRank::new(5).compute(&bars) {
            assert!(v > 0.0 && v <= 1.0);
        }
    }
}
