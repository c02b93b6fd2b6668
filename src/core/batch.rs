//! Multi-ticker evaluation on the blocking thread pool

use std::sync::Arc;

use tracing::{info, warn};

use crate::core::pipeline::IndicatorPipeline;
use crate::indicators::error::IndicatorError;
use crate::models::candle::OhlcvSeries;
use crate::models::indicators::{AugmentedSeries, IndicatorConfig};

/// One ticker's input.
#[derive(Debug, Clone)]
pub struct BatchJob {
    pub symbol: String,
    pub series: OhlcvSeries,
}

impl BatchJob {
    pub fn new(symbol: impl Into<String>, series: OhlcvSeries) -> Self {
        Self {
            symbol: symbol.into(),
            series,
        }
    }
}

/// One ticker's outcome. Failures are per ticker.
#[derive(Debug)]
pub struct BatchResult {
    pub symbol: String,
    pub result: Result<AugmentedSeries, IndicatorError>,
}

/// Run the pipeline for every job concurrently and return results in job
/// order.
pub async fn evaluate_batch(jobs: Vec<BatchJob>, config: Arc<IndicatorConfig>) -> Vec<BatchResult> {
    info!(jobs = jobs.len(), "starting batch evaluation");

    let handles: Vec<_> = jobs
        .into_iter()
        .map(|job| {
            let config = Arc::clone(&config);
            let symbol = job.symbol.clone();
            let handle =
                tokio::task::spawn_blocking(move || IndicatorPipeline::run(&job.series, &config));
            (symbol, handle)
        })
        .collect();

    let mut results = Vec::with_capacity(handles.len());
    for (symbol, handle) in handles {
        let result = match handle.await {
            Ok(result) => result,
            Err(e) => Err(IndicatorError::Task(e.to_string())),
        };
        if let Err(e) = &result {
            warn!(symbol = %symbol, error = %e, "indicator pipeline failed");
        }
        results.push(BatchResult { symbol, result });
    }
    results
}
