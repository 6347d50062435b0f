//! Accumulation signal: three bottom conditions and the four-tier decision table.
//!
//! | A (low in range) | B (oversold) | C (RSI turning up) | Tier  |
//! |------------------|--------------|--------------------|-------|
//! | yes              | yes          | yes                | Add   |
//! | yes              | yes          | no                 | Build |
//! | exactly one of A, B             | any                | Probe |
//! | no               | no           | any                | Watch |
//!
//! Conditions are plain float comparisons, so a NaN input makes the
//! comparison false.

use crate::config::SignalConfig;
use crate::indicators::IndicatorSnapshot;
use serde::Serialize;
use std::fmt;

/// Signal tier, strongest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SignalTier {
    Add,
    Build,
    Probe,
    Watch,
}

impl SignalTier {
    pub const ALL: [SignalTier; 4] = [
        SignalTier::Add,
        SignalTier::Build,
        SignalTier::Probe,
        SignalTier::Watch,
    ];

    /// Classify a set of conditions. First matching row of the table wins.
    pub fn classify(conditions: Conditions) -> Self {
        match (
            conditions.low_in_range,
            conditions.oversold,
            conditions.turning_up,
        ) {
            (true, true, true) => SignalTier::Add,
            (true, true, false) => SignalTier::Build,
            (true, false, _) | (false, true, _) => SignalTier::Probe,
            (false, false, _) => SignalTier::Watch,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            SignalTier::Add => "ADD",
            SignalTier::Build => "BUILD",
            SignalTier::Probe => "PROBE",
            SignalTier::Watch => "WATCH",
        }
    }

    pub fn marker(self) -> &'static str {
        match self {
            SignalTier::Add => "🔵",
            SignalTier::Build => "🟢",
            SignalTier::Probe => "🟡",
            SignalTier::Watch => "⚪",
        }
    }

    pub fn rationale(self) -> &'static str {
        match self {
            SignalTier::Add => "confirmed reversal, high value",
            SignalTier::Build => "entering value zone, awaiting upturn",
            SignalTier::Probe => "single bottom feature present",
            SignalTier::Watch => "no bottom signal",
        }
    }
}

impl fmt::Display for SignalTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.marker(), self.label())
    }
}

/// The three bottom conditions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Conditions {
    /// A: close sits in the bottom of its trailing range.
    pub low_in_range: bool,
    /// B: RSI is oversold.
    pub oversold: bool,
    /// C: RSI rose on the last bar.
    pub turning_up: bool,
}

impl Conditions {
    pub fn new(low_in_range: bool, oversold: bool, turning_up: bool) -> Self {
        Self {
            low_in_range,
            oversold,
            turning_up,
        }
    }

    pub fn evaluate(snapshot: &IndicatorSnapshot, config: &SignalConfig) -> Self {
        Self {
            low_in_range: snapshot.percentile_rank_3y < config.percentile_threshold,
            oversold: snapshot.rsi_last < config.rsi_oversold,
            turning_up: snapshot.rsi_last > snapshot.rsi_prev,
        }
    }

    pub fn as_tuple(self) -> (bool, bool, bool) {
        (self.low_in_range, self.oversold, self.turning_up)
    }
}
