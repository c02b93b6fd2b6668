//! finboard
//!
//! Loads candles for the configured symbols, computes indicators and squeeze
//! signals for each, and prints a short summary per symbol.

use std::sync::Arc;

use dotenvy::dotenv;
use finboard::chart::{ChartStyle, PlotSpec};
use finboard::config::AppConfig;
use finboard::core::{evaluate_batch, BatchJob, BatchResult};
use finboard::logging;
use finboard::models::{AugmentedSeries, ColumnValues};
use finboard::services::{JsonFileProvider, MarketDataProvider};
use tracing::{error, info, warn};

const SUMMARY_ROWS: usize = 10;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv().ok();
    logging::init_logging();

    let config = AppConfig::from_env();
    info!(
        environment = %config.environment,
        symbols = ?config.symbols,
        lookback = config.lookback,
        "Starting finboard"
    );

    let indicator_config = Arc::new(config.load_indicator_config()?);
    let style = ChartStyle::load(&config.style_file);
    let provider = JsonFileProvider::new(&config.data_dir);

    let mut jobs = Vec::new();
    for symbol in &config.symbols {
        match provider.get_candles(symbol, config.lookback).await {
            Ok(series) => jobs.push(BatchJob::new(symbol.clone(), series.drop_incomplete())),
            Err(e) => warn!(symbol = %symbol, error = %e, "skipping symbol"),
        }
    }

    for BatchResult { symbol, result } in evaluate_batch(jobs, indicator_config).await {
        match result {
            Ok(augmented) => {
                let plot = PlotSpec::build(&augmented, &style, &format!("{} Stock Price", symbol));
                print_summary(&symbol, &augmented, &plot);
            }
            Err(e) => error!(symbol = %symbol, error = %e, "indicator pipeline failed"),
        }
    }

    Ok(())
}

fn format_cell(values: &ColumnValues, row: usize) -> String {
    match values {
        ColumnValues::Numeric(v) => v[row].map_or("-".to_string(), |x| format!("{:.2}", x)),
        ColumnValues::Flag(v) => v[row].map_or("-".to_string(), |x| x.to_string()),
    }
}

fn print_summary(symbol: &str, series: &AugmentedSeries, plot: &PlotSpec) {
    println!("{}: {} rows, {} chart panels", symbol, series.len(), plot.panels.len());

    let recent = series.tail(SUMMARY_ROWS);
    let columns = recent.columns();
    for (row, candle) in recent.candles.iter().enumerate() {
        let cells: Vec<String> = columns
            .iter()
            .map(|c| format!("{}={}", c.name, format_cell(&c.values, row)))
            .collect();
        println!("  {} close={:.2} {}", candle.date, candle.close, cells.join(" "));
    }

    let events = series.signal_events();
    if events.is_empty() {
        println!("  No squeeze signals");
    }
    for (candle, event) in events {
        println!("  {} {:?} @ {:.2}", candle.date, event.kind, event.price);
    }
}
