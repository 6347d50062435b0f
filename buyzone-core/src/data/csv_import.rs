//! CSV import provider.
//!
//! Reads daily bars from a headed CSV file with `date,open,high,low,close,volume`
//! columns (Yahoo's capitalized export headers are accepted too). Empty cells
//! become NaN; extra columns are ignored.

use super::provider::{DataError, DataProvider, DataSource, FetchResult};
use crate::domain::{Bar, InstrumentProfile, PriceSeries};
use chrono::NaiveDate;
use serde::Deserialize;
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing::debug;

#[derive(Debug, Deserialize)]
struct CsvRow {
    #[serde(alias = "Date")]
    date: NaiveDate,
    #[serde(alias = "Open")]
    open: Option<f64>,
    #[serde(alias = "High")]
    high: Option<f64>,
    #[serde(alias = "Low")]
    low: Option<f64>,
    #[serde(alias = "Close")]
    close: Option<f64>,
    #[serde(alias = "Volume", default)]
    volume: Option<f64>,
}

impl From<CsvRow> for Bar {
    fn from(row: CsvRow) -> Self {
        Bar {
            date: row.date,
            open: row.open.unwrap_or(f64::NAN),
            high: row.high.unwrap_or(f64::NAN),
            low: row.low.unwrap_or(f64::NAN),
            close: row.close.unwrap_or(f64::NAN),
            volume: row.volume.map(|v| v.max(0.0) as u64).unwrap_or(0),
        }
    }
}

/// Parse CSV bars from any reader. `origin` names the source in errors.
pub fn read_bars<R: Read>(reader: R, origin: &str) -> Result<PriceSeries, DataError> {
    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut bars = Vec::new();
    for (line, record) in rdr.deserialize::<CsvRow>().enumerate() {
        let row = record.map_err(|e| DataError::Import {
            path: origin.to_string(),
            reason: format!("row {}: {e}", line + 1),
        })?;
        bars.push(Bar::from(row));
    }

    Ok(PriceSeries::new(bars)?)
}

/// Provider backed by a single CSV file.
pub struct CsvProvider {
    path: PathBuf,
}

impl CsvProvider {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl DataProvider for CsvProvider {
    fn name(&self) -> &str {
        "csv_import"
    }

    fn fetch(
        &self,
        symbol: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<FetchResult, DataError> {
        let origin = self.path.display().to_string();
        let file = std::fs::File::open(&self.path).map_err(|e| DataError::Import {
            path: origin.clone(),
            reason: e.to_string(),
        })?;
        let series = read_bars(file, &origin)?.between(start, end);
        debug!(symbol, path = %origin, bars = series.len(), "imported CSV");

        Ok(FetchResult {
            symbol: symbol.to_string(),
            series,
            profile: InstrumentProfile::default(),
            source: DataSource::CsvImport,
        })
    }

    fn is_available(&self) -> bool {
        self.path.is_file()
    }
}
