//! Price-history providers.
//!
//! Everything that blocks or touches the network lives here; the analysis
//! pipeline only ever sees the resulting `PriceSeries`.

pub mod circuit_breaker;
pub mod csv_import;
pub mod provider;
pub mod synthetic;
pub mod yahoo;

pub use circuit_breaker::{BreakerState, CircuitBreaker};
pub use csv_import::{read_bars, CsvProvider};
pub use provider::{DataError, DataProvider, DataSource, FetchResult};
pub use synthetic::{SyntheticProvider, SYNTHETIC_NAME};
pub use yahoo::YahooProvider;
