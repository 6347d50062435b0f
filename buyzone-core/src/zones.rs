//! Buy-zone geometry.
//!
//! All three bands hang off a shared center below the last price:
//!
//! ```text
//! width  = max(atr_multiplier * atr, price_floor_ratio * last)
//! center = center_ratio * last
//!
//! conservative = (center + 0.3w, center + 0.8w)
//! neutral      = (center - 0.2w, center + 0.2w)
//! aggressive   = (center - 0.8w, center - 0.3w)
//! ```
//!
//! The price floor keeps the bands usable when ATR is near zero.

use crate::config::ZoneConfig;
use serde::Serialize;

/// A (low, high) price interval with `low <= high`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PriceBand {
    pub low: f64,
    pub high: f64,
}

impl PriceBand {
    fn around(center: f64, width: f64, from: f64, to: f64) -> Self {
        Self {
            low: center + from * width,
            high: center + to * width,
        }
    }

    pub fn midpoint(&self) -> f64 {
        (self.low + self.high) / 2.0
    }
}

/// Conservative, neutral and aggressive purchase bands.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ZoneSet {
    pub conservative: PriceBand,
    pub neutral: PriceBand,
    pub aggressive: PriceBand,
}

/// Two price levels for incremental purchases.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AddPoints {
    /// Bottom of the neutral band.
    pub first: f64,
    /// Middle of the aggressive band.
    pub pullback: f64,
}

/// Band width: ATR-scaled, floored at a fraction of the price.
///
/// A NaN ATR falls through to the price floor.
pub fn zone_width(last_price: f64, atr: f64, config: &ZoneConfig) -> f64 {
    (config.atr_multiplier * atr).max(config.price_floor_ratio * last_price)
}

impl ZoneSet {
    pub fn compute(last_price: f64, atr: f64, config: &ZoneConfig) -> Self {
        let width = zone_width(last_price, atr, config);
        let center = config.center_ratio * last_price;
        Self {
            conservative: PriceBand::around(center, width, 0.3, 0.8),
            neutral: PriceBand::around(center, width, -0.2, 0.2),
            aggressive: PriceBand::around(center, width, -0.8, -0.3),
        }
    }

    pub fn add_points(&self) -> AddPoints {
        AddPoints {
            first: self.neutral.low,
            pullback: self.aggressive.midpoint(),
        }
    }

    /// Bands from highest to lowest price, with their names.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, PriceBand)> {
        [
            ("conservative", self.conservative),
            ("neutral", self.neutral),
            ("aggressive", self.aggressive),
        ]
        .into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) {
        assert!((a - b).abs() < 1e-9, "{a} != {b}");
    }

    #[test]
    fn atr_dominates_when_volatile() {
        let config = ZoneConfig::default();
        // 1.8 * 10 = 18 > 0.08 * 100 = 8
        let zones = ZoneSet::compute(100.0, 10.0, &config);
        approx(zones.neutral.low, 92.0 - 0.2 * 18.0);
        approx(zones.neutral.high, 92.0 + 0.2 * 18.0);
        approx(zones.conservative.low, 92.0 + 0.3 * 18.0);
        approx(zones.conservative.high, 92.0 + 0.8 * 18.0);
        approx(zones.aggressive.low, 92.0 - 0.8 * 18.0);
        approx(zones.aggressive.high, 92.0 - 0.3 * 18.0);
    }

    #[test]
    fn floor_applies_when_atr_is_small() {
        let config = ZoneConfig::default();
        approx(zone_width(100.0, 0.0, &config), 8.0);
        approx(zone_width(100.0, 1.0, &config), 8.0);
        approx(zone_width(100.0, f64::NAN, &config), 8.0);
    }

    #[test]
    fn add_points() {
        let zones = ZoneSet::compute(100.0, 0.0, &ZoneConfig::default());
        let adds = zones.add_points();
        // width 8, center 92
        approx(adds.first, 92.0 - 1.6);
        approx(adds.pullback, 92.0 - 0.55 * 8.0);
        assert!(zones.aggressive.low < adds.pullback && adds.pullback < zones.aggressive.high);
    }

    #[test]
    fn bands_are_ordered() {
        let zones = ZoneSet::compute(250.0, 7.5, &ZoneConfig::default());
        for (name, band) in zones.iter() {
            assert!(band.low <= band.high, "{name} band inverted");
        }
        assert!(zones.aggressive.high < zones.neutral.low);
        assert!(zones.neutral.high < zones.conservative.low);
    }
}
