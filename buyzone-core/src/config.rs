//! Serializable analysis parameters.
//!
//! Every field defaults to the standard buy-zone constants, so an empty TOML
//! document (or `AnalysisConfig::default()`) reproduces the reference
//! behaviour. The config is a plain value handed to the pipeline; nothing is
//! stored process-wide.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid config value for {field}: {reason}")]
    Invalid { field: &'static str, reason: String },
}

/// Full parameter set for one analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct AnalysisConfig {
    pub indicators: IndicatorConfig,
    pub signal: SignalConfig,
    pub zones: ZoneConfig,
}

/// Lookbacks for the indicator engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IndicatorConfig {
    /// Wilder RSI period.
    pub rsi_period: usize,
    /// ATR averaging window.
    pub atr_period: usize,
    /// Trailing window for the percentile rank (756 ≈ three years of sessions).
    pub percentile_window: usize,
    /// Minimum usable closes required to produce a result.
    pub min_observations: usize,
}

impl Default for IndicatorConfig {
    fn default() -> Self {
        Self {
            rsi_period: 14,
            atr_period: 14,
            percentile_window: 756,
            min_observations: 20,
        }
    }
}

/// Thresholds for the three bottom conditions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SignalConfig {
    /// Condition A holds when the percentile rank is below this fraction.
    pub percentile_threshold: f64,
    /// Condition B holds when the latest RSI is below this level.
    pub rsi_oversold: f64,
}

impl Default for SignalConfig {
    fn default() -> Self {
        Self {
            percentile_threshold: 0.30,
            rsi_oversold: 35.0,
        }
    }
}

/// Zone geometry multipliers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ZoneConfig {
    /// Band width as a multiple of ATR.
    pub atr_multiplier: f64,
    /// Minimum band width as a fraction of the last price.
    pub price_floor_ratio: f64,
    /// Zone center as a fraction of the last price.
    pub center_ratio: f64,
}

impl Default for ZoneConfig {
    fn default() -> Self {
        Self {
            atr_multiplier: 1.8,
            price_floor_ratio: 0.08,
            center_ratio: 0.92,
        }
    }
}

impl IndicatorConfig {
    /// Reject periods and windows the indicators cannot be built with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.rsi_period == 0 {
            return Err(invalid("indicators.rsi_period", "must be at least 1"));
        }
        if self.atr_period == 0 {
            return Err(invalid("indicators.atr_period", "must be at least 1"));
        }
        if self.percentile_window == 0 {
            return Err(invalid("indicators.percentile_window", "must be at least 1"));
        }
        // The ATR window skips the first bar, and the RSI needs a previous value.
        if self.min_observations < 2 || self.min_observations <= self.atr_period {
            return Err(invalid(
                "indicators.min_observations",
                format!("must be at least 2 and greater than atr_period ({})", self.atr_period),
            ));
        }

        Ok(())
    }
}

impl AnalysisConfig {
    /// Parse a TOML document. Missing sections and keys take their defaults.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a TOML config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    /// Reject parameter combinations that cannot produce a meaningful result.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.indicators.validate()?;

        let sig = &self.signal;
        if !(sig.percentile_threshold > 0.0 && sig.percentile_threshold <= 1.0) {
            return Err(invalid("signal.percentile_threshold", "must be in (0, 1]"));
        }
        if !(sig.rsi_oversold > 0.0 && sig.rsi_oversold < 100.0) {
            return Err(invalid("signal.rsi_oversold", "must be in (0, 100)"));
        }

        let z = &self.zones;
        for (field, value) in [
            ("zones.atr_multiplier", z.atr_multiplier),
            ("zones.price_floor_ratio", z.price_floor_ratio),
            ("zones.center_ratio", z.center_ratio),
        ] {
            if !(value.is_finite() && value > 0.0) {
                return Err(invalid(field, "must be a positive finite number"));
            }
        }

        Ok(())
    }
}

fn invalid(field: &'static str, reason: impl Into<String>) -> ConfigError {
    ConfigError::Invalid {
        field,
        reason: reason.into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_reference_constants() {
        let config = AnalysisConfig::default();
        assert_eq!(config.indicators.rsi_period, 14);
        assert_eq!(config.indicators.atr_period, 14);
        assert_eq!(config.indicators.percentile_window, 756);
        assert_eq!(config.indicators.min_observations, 20);
        assert_eq!(config.signal.percentile_threshold, 0.30);
        assert_eq!(config.signal.rsi_oversold, 35.0);
        assert_eq!(config.zones.atr_multiplier, 1.8);
        assert_eq!(config.zones.price_floor_ratio, 0.08);
        assert_eq!(config.zones.center_ratio, 0.92);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn empty_toml_is_default() {
        let config = AnalysisConfig::from_toml_str("").unwrap();
        assert_eq!(config, AnalysisConfig::default());
    }

    #[test]
    fn partial_toml_overrides_only_given_keys() {
        let config = AnalysisConfig::from_toml_str(
            r#"
            [signal]
            rsi_oversold = 30.0

            [zones]
            center_ratio = 0.95
            "#,
        )
        .unwrap();
        assert_eq!(config.signal.rsi_oversold, 30.0);
        assert_eq!(config.signal.percentile_threshold, 0.30);
        assert_eq!(config.zones.center_ratio, 0.95);
        assert_eq!(config.zones.atr_multiplier, 1.8);
        assert_eq!(config.indicators, IndicatorConfig::default());
    }

    #[test]
    fn rejects_zero_period() {
        let err = AnalysisConfig::from_toml_str("[indicators]\nrsi_period = 0\n").unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Invalid {
                field: "indicators.rsi_period",
                ..
            }
        ));
    }

    #[test]
    fn rejects_min_observations_not_covering_atr() {
        let err = AnalysisConfig::from_toml_str("[indicators]\nmin_observations = 14\n").unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Invalid {
                field: "indicators.min_observations",
                ..
            }
        ));
    }

    #[test]
    fn rejects_negative_multiplier() {
        let mut config = AnalysisConfig::default();
        config.zones.atr_multiplier = -1.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn rejects_malformed_toml() {
        let err = AnalysisConfig::from_toml_str("[signal\n").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn load_reports_missing_file() {
        let err = AnalysisConfig::load("/nonexistent/buyzone.toml").unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }
}
