//! Market data provider interface and a file-backed implementation.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use thiserror::Error;
use tracing::debug;

use crate::models::candle::{Candle, OhlcvSeries};

#[derive(Error, Debug)]
pub enum MarketDataError {
    #[error("No data for symbol: {0}")]
    NotFound(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    SerdeJson(#[from] serde_json::Error),
}

#[async_trait]
pub trait MarketDataProvider: Send + Sync {
    /// Date-ordered candles for `symbol`, trailing `limit` rows at most.
    async fn get_candles(&self, symbol: &str, limit: usize) -> Result<OhlcvSeries, MarketDataError>;
}

/// Reads `<dir>/<SYMBOL>.json`, a JSON array of candles.
pub struct JsonFileProvider {
    dir: PathBuf,
}

impl JsonFileProvider {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, symbol: &str) -> PathBuf {
        self.dir.join(format!("{}.json", symbol))
    }
}

#[async_trait]
impl MarketDataProvider for JsonFileProvider {
    async fn get_candles(&self, symbol: &str, limit: usize) -> Result<OhlcvSeries, MarketDataError> {
        let path = self.path_for(symbol);
        let raw = match tokio::fs::read_to_string(&path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(MarketDataError::NotFound(symbol.to_string()))
            }
            Err(e) => return Err(e.into()),
        };

        let mut candles: Vec<Candle> = serde_json::from_str(&raw)?;
        candles.sort_by_key(|c| c.date);

        debug!(
            symbol,
            path = %path.display(),
            rows = candles.len(),
            "loaded candles from file"
        );

        Ok(OhlcvSeries::new(candles).tail(limit))
    }
}
