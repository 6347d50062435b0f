//! BuyZone CLI — normalize tickers and print buy-zone reports.
//!
//! Commands:
//! - `analyze` — fetch price history, classify the setup, print zones and add-points
//! - `normalize` — print the canonical ticker with its market and currency

use anyhow::{bail, Context, Result};
use buyzone_core::data::{
    CircuitBreaker, CsvProvider, DataError, DataProvider, FetchResult, SyntheticProvider,
    YahooProvider,
};
use buyzone_core::domain::format_metric;
use buyzone_core::{analyze_with, AnalysisConfig, AnalysisError, AnalysisResult, Ticker};
use chrono::{Duration, Local, NaiveDate};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "buyzone",
    about = "BuyZone CLI — staged-accumulation zones from daily price history"
)]
struct Cli {
    /// Enable debug logging on stderr (overridden by RUST_LOG).
    #[arg(short, long, global = true, default_value_t = false)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze a symbol and print its buy-zone report.
    Analyze {
        /// Symbol as typed (e.g. 700.hk, 600519, brk.b). Blank falls back to AAPL.
        #[arg(default_value = "")]
        symbol: String,

        /// Years of daily history to request.
        #[arg(long, default_value_t = 3)]
        years: u32,

        /// Read bars from a CSV file instead of Yahoo Finance.
        #[arg(long, conflicts_with = "synthetic")]
        csv: Option<PathBuf>,

        /// Use a seeded synthetic random walk instead of Yahoo Finance.
        #[arg(long, default_value_t = false)]
        synthetic: bool,

        /// TOML file overriding the analysis parameters.
        #[arg(long)]
        config: Option<PathBuf>,

        /// Print the report as JSON.
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Print the canonical form of a symbol.
    Normalize {
        #[arg(default_value = "")]
        symbol: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Analyze {
            symbol,
            years,
            csv,
            synthetic,
            config,
            json,
        } => run_analyze(&symbol, years, csv, synthetic, config, json),
        Commands::Normalize { symbol } => {
            run_normalize(&symbol);
            Ok(())
        }
    }
}

fn init_logging(verbose: bool) {
    let fallback = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run_normalize(raw: &str) {
    let ticker = Ticker::normalize(raw);
    let market = ticker.market();
    println!("{ticker} ({} · {})", market.label(), market.currency_symbol());
}

fn run_analyze(
    raw: &str,
    years: u32,
    csv: Option<PathBuf>,
    synthetic: bool,
    config_path: Option<PathBuf>,
    json: bool,
) -> Result<()> {
    let config = match &config_path {
        Some(path) => AnalysisConfig::load(path)?,
        None => AnalysisConfig::default(),
    };

    let ticker = Ticker::normalize(raw);
    let (start, end) = history_window(Local::now().date_naive(), years)?;

    let breaker = Arc::new(CircuitBreaker::default_provider());
    let provider = build_provider(csv, synthetic, Arc::clone(&breaker))?;
    info!(ticker = %ticker, provider = provider.name(), %start, %end, "fetching");
    let fetched = fetch(provider.as_ref(), &breaker, &ticker, start, end)?;
    debug!(
        bars = fetched.series.len(),
        first = ?fetched.series.first_date(),
        last = ?fetched.series.last_date(),
        source = ?fetched.source,
        "fetched"
    );

    let result = match analyze_with(&fetched.series, &config) {
        Ok(result) => result,
        Err(AnalysisError::EmptySeries) => {
            bail!("no price data returned for {ticker}")
        }
        Err(e) if e.is_insufficient_history() => {
            eprintln!("not enough price history for {ticker}: {e}");
            std::process::exit(1);
        }
        Err(e) => return Err(e.into()),
    };

    if json {
        print_json(&ticker, &fetched, &result)?;
    } else {
        print_report(&ticker, &fetched, &result);
    }
    Ok(())
}

/// `years` calendar years of 365 days ending at `end`, inclusive.
fn history_window(end: NaiveDate, years: u32) -> Result<(NaiveDate, NaiveDate)> {
    if years == 0 {
        bail!("--years must be at least 1");
    }
    let start = Duration::try_days(365 * i64::from(years))
        .and_then(|span| end.checked_sub_signed(span))
        .with_context(|| format!("--years {years} reaches past the earliest supported date"))?;
    Ok((start, end))
}

fn build_provider(
    csv: Option<PathBuf>,
    synthetic: bool,
    breaker: Arc<CircuitBreaker>,
) -> Result<Box<dyn DataProvider>> {
    if let Some(path) = csv {
        let provider = CsvProvider::new(path);
        if !provider.is_available() {
            bail!("CSV file not found: {}", provider.path().display());
        }
        return Ok(Box::new(provider));
    }
    if synthetic {
        return Ok(Box::new(SyntheticProvider::new()));
    }
    Ok(Box::new(YahooProvider::new(breaker)?))
}

fn fetch(
    provider: &dyn DataProvider,
    breaker: &CircuitBreaker,
    ticker: &Ticker,
    start: NaiveDate,
    end: NaiveDate,
) -> Result<FetchResult> {
    match provider.fetch(ticker.as_str(), start, end) {
        Ok(fetched) => Ok(fetched),
        Err(DataError::CircuitBreakerTripped) => {
            let minutes = breaker.remaining_cooldown().as_secs().div_ceil(60);
            bail!(
                "{} is refusing requests; retry {ticker} in about {minutes} min, or use --csv",
                provider.name()
            )
        }
        Err(e) => Err(e).with_context(|| format!("{} could not load {ticker}", provider.name())),
    }
}

fn print_report(ticker: &Ticker, fetched: &FetchResult, result: &AnalysisResult) {
    let market = ticker.market();
    let currency = market.currency_symbol();
    let profile = &fetched.profile;

    println!();
    println!(
        "=== {} ({ticker} · {}) ===",
        profile.display_name(ticker.as_str()),
        market.label()
    );
    println!("Price:          {currency} {:.2}", result.last_price);
    println!("Action:         {}", result.tier);
    println!("                {}", result.tier.rationale());
    println!("P/E:            {}", format_metric(profile.trailing_pe));
    println!("P/S:            {}", format_metric(profile.price_to_sales));

    println!();
    println!("--- Radar ---");
    for (axis, score) in result.radar_scores().axes() {
        println!("{axis:<15} {score:>5.1} / 25");
    }

    println!();
    println!("--- Zones ---");
    for (name, band) in result.zones.iter() {
        println!(
            "{name:<15} {currency} {:.2} – {currency} {:.2}",
            band.low, band.high
        );
    }

    println!();
    println!("--- Add points ---");
    println!("First add:      {currency} {:.2}", result.add_points.first);
    println!("Pullback add:   {currency} {:.2}", result.add_points.pullback);

    println!();
    println!("--- Underlying data ---");
    let (a, b, c) = result.conditions.as_tuple();
    println!(
        "A  3y percentile: {:.1}%  {}",
        result.metrics.percentile_rank_3y * 100.0,
        mark(a)
    );
    println!("B  RSI(14):        {:.1}  {}", result.metrics.rsi_last, mark(b));
    println!(
        "C  RSI turning:    {:.1} → {:.1}  {}",
        result.metrics.rsi_prev,
        result.metrics.rsi_last,
        mark(c)
    );
    println!("ATR(14):          {:.2}", result.metrics.atr);
    println!();
}

fn mark(met: bool) -> &'static str {
    if met {
        "✔"
    } else {
        "·"
    }
}

fn print_json(ticker: &Ticker, fetched: &FetchResult, result: &AnalysisResult) -> Result<()> {
    let market = ticker.market();
    let report = serde_json::json!({
        "ticker": ticker.as_str(),
        "name": fetched.profile.display_name(ticker.as_str()),
        "market": market.label(),
        "currency": market.currency_symbol(),
        "source": fetched.source,
        "profile": fetched.profile,
        "result": result,
        "radar": result.radar_scores(),
        "fingerprint": result.fingerprint(),
    });
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
