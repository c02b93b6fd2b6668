//! Unit tests for multi-ticker batch evaluation

use std::sync::Arc;

use finboard::core::{evaluate_batch, BatchJob, IndicatorPipeline};
use finboard::indicators::IndicatorError;
use finboard::models::{IndicatorConfig, OhlcvSeries};

use crate::support::{candles_from_closes, noisy_candles};

#[tokio::test]
async fn test_results_keep_job_order() {
    let jobs = vec![
        BatchJob::new("AAPL", OhlcvSeries::new(noisy_candles(80))),
        BatchJob::new("MSFT", OhlcvSeries::new(noisy_candles(120))),
        BatchJob::new("SPY", OhlcvSeries::new(noisy_candles(30))),
    ];
    let results = evaluate_batch(jobs, Arc::new(IndicatorConfig::all_defaults())).await;

    let symbols: Vec<&str> = results.iter().map(|r| r.symbol.as_str()).collect();
    assert_eq!(symbols, vec!["AAPL", "MSFT", "SPY"]);

    let rows: Vec<usize> = results
        .iter()
        .map(|r| r.result.as_ref().unwrap().len())
        .collect();
    assert_eq!(rows, vec![80, 120, 30]);
}

#[tokio::test]
async fn test_failure_is_per_ticker() {
    let mut unordered = candles_from_closes(&[1.0, 2.0, 3.0]);
    unordered.reverse();

    let jobs = vec![
        BatchJob::new("GOOD", OhlcvSeries::new(noisy_candles(50))),
        BatchJob::new("BAD", OhlcvSeries::new(unordered)),
    ];
    let results = evaluate_batch(jobs, Arc::new(IndicatorConfig::all_defaults())).await;

    assert!(results[0].result.is_ok());
    assert!(matches!(
        results[1].result,
        Err(IndicatorError::InvalidInput(_))
    ));
}

#[tokio::test]
async fn test_batch_matches_direct_run() {
    let series = OhlcvSeries::new(noisy_candles(90));
    let config = IndicatorConfig::all_defaults();
    let direct = IndicatorPipeline::run(&series, &config).unwrap();

    let results = evaluate_batch(vec![BatchJob::new("X", series)], Arc::new(config)).await;
    assert_eq!(results[0].result.as_ref().unwrap(), &direct);
}

#[tokio::test]
async fn test_empty_batch() {
    let results = evaluate_batch(Vec::new(), Arc::new(IndicatorConfig::new())).await;
    assert!(results.is_empty());
}
