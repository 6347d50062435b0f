//! Domain types for BuyZone

pub mod bar;
pub mod profile;
pub mod series;
pub mod ticker;

pub use bar::Bar;
pub use profile::{format_metric, InstrumentProfile, PLACEHOLDER};
pub use series::{PriceSeries, SeriesError};
pub use ticker::{normalize, Market, Ticker, DEFAULT_TICKER};
