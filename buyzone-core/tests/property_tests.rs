//! Property tests for analysis invariants.
//!
//! Uses proptest to verify:
//! 1. RSI bounds: every defined RSI value lies in [0, 100]
//! 2. Percentile bounds: rank of the last close lies in (0, 1], max of window is 1
//! 3. Zone ordering: low <= high per band, aggressive < neutral < conservative
//! 4. Decision table: classify matches the four-tier table for every input
//! 5. Determinism: analysing the same closes twice is bit-identical

use buyzone_core::config::ZoneConfig;
use buyzone_core::domain::{Bar, PriceSeries};
use buyzone_core::indicators::{rank_of_last, Indicator, Rsi};
use buyzone_core::zones::ZoneSet;
use buyzone_core::{analyze, Conditions, SignalTier};
use chrono::NaiveDate;
use proptest::prelude::*;

// ── Strategies (proptest) ────────────────────────────────────────────

fn arb_price() -> impl Strategy<Value = f64> {
    (1.0..1000.0_f64).prop_map(|p| (p * 100.0).round() / 100.0)
}

fn arb_closes(min: usize, max: usize) -> impl Strategy<Value = Vec<f64>> {
    prop::collection::vec(arb_price(), min..max)
}

fn bars_from_closes(closes: &[f64]) -> Vec<Bar> {
    let base = NaiveDate::from_ymd_opt(2020, 1, 1).unwrap();
    closes
        .iter()
        .enumerate()
        .map(|(i, &close)| {
            let open = if i == 0 { close } else { closes[i - 1] };
            Bar {
                date: base + chrono::Duration::days(i as i64),
                open,
                high: open.max(close),
                low: open.min(close),
                close,
                volume: 1,
            }
        })
        .collect()
}

// ── 1. RSI bounds ────────────────────────────────────────────────────

proptest! {
    #[test]
    fn rsi_stays_in_range(closes in arb_closes(2, 200)) {
        let values = Rsi::new(14).compute(&bars_from_closes(&closes));
        prop_assert!(values[0].is_nan());
        for v in values.iter().filter(|v| !v.is_nan()) {
            prop_assert!((0.0..=100.0).contains(v), "rsi out of range: {v}");
        }
    }
}

// ── 2. Percentile bounds ─────────────────────────────────────────────

proptest! {
    #[test]
    fn rank_is_a_fraction(closes in arb_closes(1, 300)) {
        let rank = rank_of_last(&closes);
        prop_assert!(rank > 0.0 && rank <= 1.0, "rank out of range: {rank}");
    }

    #[test]
    fn window_maximum_ranks_one(mut closes in arb_closes(1, 300)) {
        let max = closes.iter().cloned().fold(f64::MIN, f64::max);
        closes.push(max + 1.0);
        prop_assert_eq!(rank_of_last(&closes), 1.0);
    }
}

// ── 3. Zone ordering ─────────────────────────────────────────────────

proptest! {
    #[test]
    fn zones_are_ordered(last in arb_price(), atr in 0.0..200.0_f64) {
        let zones = ZoneSet::compute(last, atr, &ZoneConfig::default());
        for (name, band) in zones.iter() {
            prop_assert!(band.low <= band.high, "{} inverted", name);
        }
        prop_assert!(zones.aggressive.high < zones.neutral.high);
        prop_assert!(zones.neutral.high < zones.conservative.high);
        prop_assert!(zones.aggressive.low < zones.neutral.low);
        prop_assert!(zones.neutral.low < zones.conservative.low);

        let width = (zones.conservative.high - zones.aggressive.low) / 1.6;
        prop_assert!(width >= 0.08 * last * (1.0 - 1e-9));
    }
}

// ── 4. Decision table ────────────────────────────────────────────────

proptest! {
    #[test]
    fn classify_matches_table(a: bool, b: bool, c: bool) {
        let expected = if a && b && c {
            SignalTier::Add
        } else if a && b {
            SignalTier::Build
        } else if a || b {
            SignalTier::Probe
        } else {
            SignalTier::Watch
        };
        prop_assert_eq!(SignalTier::classify(Conditions::new(a, b, c)), expected);
    }
}

// ── 5. Determinism ───────────────────────────────────────────────────

proptest! {
    #[test]
    fn analysis_is_deterministic(closes in arb_closes(20, 120)) {
        let series = PriceSeries::new(bars_from_closes(&closes)).unwrap();
        let first = analyze(&series).unwrap();
        let second = analyze(&series).unwrap();
        prop_assert_eq!(first.fingerprint(), second.fingerprint());
        prop_assert_eq!(first.last_price, *closes.last().unwrap());
    }
}
