//! Instrument profile: optional descriptive metadata from the provider.
//!
//! Provider metadata is loosely typed. Every field is optional and a key that is
//! missing or carries the wrong JSON type is treated as absent.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Placeholder shown in place of a missing metric.
pub const PLACEHOLDER: &str = "—";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InstrumentProfile {
    pub short_name: Option<String>,
    pub long_name: Option<String>,
    pub trailing_pe: Option<f64>,
    pub price_to_sales: Option<f64>,
}

impl InstrumentProfile {
    /// Read a provider metadata map. Never fails.
    pub fn from_metadata(map: &Map<String, Value>) -> Self {
        Self {
            short_name: text_field(map, "shortName"),
            long_name: text_field(map, "longName"),
            trailing_pe: numeric_field(map, "trailingPE"),
            price_to_sales: numeric_field(map, "priceToSalesTrailing12Months"),
        }
    }

    /// Name to show for the instrument: short name, then long name, then the ticker.
    pub fn display_name<'a>(&'a self, ticker: &'a str) -> &'a str {
        self.short_name
            .as_deref()
            .or(self.long_name.as_deref())
            .unwrap_or(ticker)
    }
}

/// Format an optional metric with two decimals, or the placeholder.
pub fn format_metric(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{v:.2}"),
        None => PLACEHOLDER.to_string(),
    }
}

fn text_field(map: &Map<String, Value>, key: &str) -> Option<String> {
    map.get(key)
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

fn numeric_field(map: &Map<String, Value>, key: &str) -> Option<f64> {
    map.get(key).and_then(Value::as_f64).filter(|v| v.is_finite())
}
