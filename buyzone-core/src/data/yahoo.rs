//! Yahoo Finance data provider.
//!
//! Fetches daily OHLCV bars from Yahoo's v8 chart API. Handles rate limiting,
//! retries with exponential backoff, response parsing, and the circuit breaker.
//! The instrument profile is the chart `meta` object merged with the
//! `summaryDetail` / `defaultKeyStatistics` / `price` modules of the v10
//! quote-summary API. That second request is best effort: when it fails the
//! profile keeps what the chart returned and valuation metrics stay empty.
//!
//! Yahoo Finance has no official API and is subject to unannounced format changes.
//! The CSV import path is the fallback when Yahoo is unavailable.

use super::circuit_breaker::CircuitBreaker;
use super::provider::{DataError, DataProvider, DataSource, FetchResult};
use crate::domain::{Bar, InstrumentProfile, PriceSeries};
use chrono::{NaiveDate, NaiveTime};
use serde::Deserialize;
use serde_json::{Map, Value};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

/// Yahoo Finance v8 chart API response.
#[derive(Debug, Deserialize)]
struct ChartResponse {
    chart: ChartResult,
}

#[derive(Debug, Deserialize)]
struct ChartResult {
    result: Option<Vec<ChartData>>,
    error: Option<ChartError>,
}

#[derive(Debug, Deserialize)]
struct ChartError {
    code: String,
    description: String,
}

#[derive(Debug, Deserialize)]
struct ChartData {
    #[serde(default)]
    meta: Map<String, Value>,
    timestamp: Option<Vec<i64>>,
    indicators: Indicators,
}

#[derive(Debug, Deserialize)]
struct Indicators {
    quote: Vec<QuoteData>,
}

#[derive(Debug, Deserialize)]
struct QuoteData {
    #[serde(default)]
    open: Vec<Option<f64>>,
    #[serde(default)]
    high: Vec<Option<f64>>,
    #[serde(default)]
    low: Vec<Option<f64>>,
    #[serde(default)]
    close: Vec<Option<f64>>,
    #[serde(default)]
    volume: Vec<Option<u64>>,
}

/// Yahoo Finance v10 quote-summary response. Modules stay loosely typed.
#[derive(Debug, Deserialize)]
struct QuoteSummaryResponse {
    #[serde(rename = "quoteSummary")]
    quote_summary: QuoteSummaryResult,
}

#[derive(Debug, Deserialize)]
struct QuoteSummaryResult {
    result: Option<Vec<Map<String, Value>>>,
}

/// Flatten quote-summary modules into one metadata map.
///
/// Yahoo wraps numbers as `{"raw": 28.5, "fmt": "28.50"}`; the `raw` value is
/// kept. Plain strings and numbers are kept as-is, anything else is dropped.
fn flatten_quote_summary(resp: QuoteSummaryResponse) -> Map<String, Value> {
    let mut flat = Map::new();
    let modules = resp
        .quote_summary
        .result
        .and_then(|r| r.into_iter().next())
        .unwrap_or_default();

    for (_, module) in modules {
        let Value::Object(fields) = module else {
            continue;
        };
        for (key, value) in fields {
            let value = match value {
                Value::Object(mut wrapped) => match wrapped.remove("raw") {
                    Some(raw) => raw,
                    None => continue,
                },
                v @ (Value::Number(_) | Value::String(_)) => v,
                _ => continue,
            };
            flat.entry(key).or_insert(value);
        }
    }
    flat
}

/// Add `extra` keys to `meta`; keys the chart already set win.
fn merge_metadata(meta: &mut Map<String, Value>, extra: Map<String, Value>) {
    for (key, value) in extra {
        meta.entry(key).or_insert(value);
    }
}

/// Yahoo Finance data provider.
pub struct YahooProvider {
    client: reqwest::blocking::Client,
    circuit_breaker: Arc<CircuitBreaker>,
    max_retries: u32,
    base_delay: Duration,
}

impl YahooProvider {
    pub fn new(circuit_breaker: Arc<CircuitBreaker>) -> Result<Self, DataError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(30))
            .user_agent("Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36")
            .build()
            .map_err(|e| DataError::Other(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            circuit_breaker,
            max_retries: 3,
            base_delay: Duration::from_millis(500),
        })
    }

    /// Build the chart API URL for a symbol and date range.
    fn chart_url(symbol: &str, start: NaiveDate, end: NaiveDate) -> String {
        let start_ts = start.and_time(NaiveTime::MIN).and_utc().timestamp();
        let end_ts = end.and_time(NaiveTime::MIN).and_utc().timestamp() + 86_399;
        format!(
            "https://query2.finance.yahoo.com/v8/finance/chart/{symbol}\
             ?period1={start_ts}&period2={end_ts}&interval=1d"
        )
    }

    fn quote_summary_url(symbol: &str) -> String {
        format!(
            "https://query2.finance.yahoo.com/v10/finance/quoteSummary/{symbol}\
             ?modules=summaryDetail,defaultKeyStatistics,price"
        )
    }

    /// Parse the chart API response into a series and its `meta` object.
    fn parse_response(
        symbol: &str,
        resp: ChartResponse,
    ) -> Result<(PriceSeries, Map<String, Value>), DataError> {
        let result = resp.chart.result.ok_or_else(|| match resp.chart.error {
            Some(err) if err.code == "Not Found" => DataError::SymbolNotFound {
                symbol: symbol.to_string(),
            },
            Some(err) => {
                DataError::ResponseFormatChanged(format!("{}: {}", err.code, err.description))
            }
            None => DataError::ResponseFormatChanged("empty result with no error".into()),
        })?;

        let data = result
            .into_iter()
            .next()
            .ok_or_else(|| DataError::ResponseFormatChanged("result array is empty".into()))?;

        // Exchange-local dates: shift by the exchange's UTC offset.
        let gmt_offset = data.meta.get("gmtoffset").and_then(Value::as_i64).unwrap_or(0);

        // A symbol with no trading history comes back without timestamps.
        let timestamps = data.timestamp.unwrap_or_default();

        let quote = data
            .indicators
            .quote
            .into_iter()
            .next()
            .ok_or_else(|| DataError::ResponseFormatChanged("no quote data".into()))?;

        let mut bars: Vec<Bar> = Vec::with_capacity(timestamps.len());

        for (i, &ts) in timestamps.iter().enumerate() {
            let date = chrono::DateTime::from_timestamp(ts + gmt_offset, 0)
                .map(|dt| dt.date_naive())
                .ok_or_else(|| {
                    DataError::ResponseFormatChanged(format!("invalid timestamp: {ts}"))
                })?;

            let open = quote.open.get(i).copied().flatten();
            let high = quote.high.get(i).copied().flatten();
            let low = quote.low.get(i).copied().flatten();
            let close = quote.close.get(i).copied().flatten();
            let volume = quote.volume.get(i).copied().flatten();

            // Skip bars where all OHLCV are None (holidays/non-trading days)
            if open.is_none()
                && high.is_none()
                && low.is_none()
                && close.is_none()
                && volume.is_none()
            {
                continue;
            }

            let bar = Bar {
                date,
                open: open.unwrap_or(f64::NAN),
                high: high.unwrap_or(f64::NAN),
                low: low.unwrap_or(f64::NAN),
                close: close.unwrap_or(f64::NAN),
                volume: volume.unwrap_or(0),
            };

            // During a session Yahoo appends a live row that can share the
            // previous row's date; the later row wins.
            match bars.last_mut() {
                Some(prev) if prev.date == bar.date => *prev = bar,
                _ => bars.push(bar),
            }
        }

        let series = PriceSeries::new(bars)?;
        Ok((series, data.meta))
    }

    /// Execute a single HTTP request with retry and circuit breaker logic.
    fn fetch_with_retry(
        &self,
        symbol: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<(PriceSeries, Map<String, Value>), DataError> {
        if !self.circuit_breaker.is_allowed() {
            return Err(DataError::CircuitBreakerTripped);
        }

        let url = Self::chart_url(symbol, start, end);
        let mut last_error = None;

        for attempt in 0..=self.max_retries {
            if attempt > 0 {
                let delay = self.base_delay * 2u32.pow(attempt - 1);
                warn!(symbol, attempt, ?delay, "retrying Yahoo request");
                std::thread::sleep(delay);
            }

            if !self.circuit_breaker.is_allowed() {
                return Err(DataError::CircuitBreakerTripped);
            }

            debug!(%url, "requesting chart");
            match self.client.get(&url).send() {
                Ok(resp) => {
                    let status = resp.status();

                    if status == reqwest::StatusCode::FORBIDDEN {
                        self.circuit_breaker.trip();
                        return Err(DataError::CircuitBreakerTripped);
                    }

                    if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
                        self.circuit_breaker.record_failure();
                        let retry_after = resp
                            .headers()
                            .get("retry-after")
                            .and_then(|v| v.to_str().ok())
                            .and_then(|v| v.parse::<u64>().ok())
                            .unwrap_or(60);
                        last_error = Some(DataError::RateLimited {
                            retry_after_secs: retry_after,
                        });
                        continue;
                    }

                    if status == reqwest::StatusCode::UNAUTHORIZED {
                        return Err(DataError::AuthenticationRequired(
                            "Yahoo Finance requires authentication".into(),
                        ));
                    }

                    if status == reqwest::StatusCode::NOT_FOUND {
                        return Err(DataError::SymbolNotFound {
                            symbol: symbol.to_string(),
                        });
                    }

                    if !status.is_success() {
                        self.circuit_breaker.record_failure();
                        last_error = Some(DataError::Other(format!("HTTP {status} for {symbol}")));
                        continue;
                    }

                    let chart: ChartResponse = resp.json().map_err(|e| {
                        DataError::ResponseFormatChanged(format!(
                            "failed to parse response for {symbol}: {e}"
                        ))
                    })?;

                    let parsed = Self::parse_response(symbol, chart)?;
                    self.circuit_breaker.record_success();
                    return Ok(parsed);
                }
                Err(e) if e.is_connect() || e.is_timeout() => {
                    last_error = Some(DataError::NetworkUnreachable(e.to_string()));
                }
                Err(e) => return Err(DataError::NetworkUnreachable(e.to_string())),
            }
        }

        Err(last_error.unwrap_or_else(|| DataError::Other("max retries exceeded".into())))
    }

    /// One attempt at the quote-summary modules. Any failure yields an empty map.
    fn fetch_key_statistics(&self, symbol: &str) -> Map<String, Value> {
        if !self.circuit_breaker.is_allowed() {
            return Map::new();
        }

        let url = Self::quote_summary_url(symbol);
        debug!(%url, "requesting quote summary");
        let resp = match self.client.get(&url).send() {
            Ok(resp) if resp.status().is_success() => resp,
            Ok(resp) => {
                warn!(symbol, status = %resp.status(), "quote summary unavailable");
                return Map::new();
            }
            Err(e) => {
                warn!(symbol, error = %e, "quote summary request failed");
                return Map::new();
            }
        };

        match resp.json::<QuoteSummaryResponse>() {
            Ok(summary) => flatten_quote_summary(summary),
            Err(e) => {
                warn!(symbol, error = %e, "quote summary not parseable");
                Map::new()
            }
        }
    }
}

impl DataProvider for YahooProvider {
    fn name(&self) -> &str {
        "yahoo_finance"
    }

    fn fetch(
        &self,
        symbol: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<FetchResult, DataError> {
        let (series, mut meta) = self.fetch_with_retry(symbol, start, end)?;
        debug!(symbol, bars = series.len(), "fetched chart");
        merge_metadata(&mut meta, self.fetch_key_statistics(symbol));
        let profile = InstrumentProfile::from_metadata(&meta);
        Ok(FetchResult {
            symbol: symbol.to_string(),
            series,
            profile,
            source: DataSource::YahooFinance,
        })
    }

    fn is_available(&self) -> bool {
        self.circuit_breaker.is_allowed()
    }
}
