//! OHLCV candles and series

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};

/// A price cell as it appears in a data file.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawPrice {
    Number(f64),
    Text(String),
}

/// Missing or non-numeric cells become `NAN` so the row can be dropped by
/// [`OhlcvSeries::drop_incomplete`] instead of failing the whole file.
fn coerce_price<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<RawPrice>::deserialize(deserializer)? {
        Some(RawPrice::Number(value)) => value,
        Some(RawPrice::Text(text)) => text.trim().parse().unwrap_or(f64::NAN),
        None => f64::NAN,
    })
}

fn zero_if_null<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<u64>::deserialize(deserializer)?.unwrap_or(0))
}

/// One trading day of market data.
///
/// Serializes a `NAN` price as `null`, which deserializes back to `NAN`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candle {
    pub date: NaiveDate,
    #[serde(deserialize_with = "coerce_price")]
    pub open: f64,
    #[serde(deserialize_with = "coerce_price")]
    pub high: f64,
    #[serde(deserialize_with = "coerce_price")]
    pub low: f64,
    #[serde(deserialize_with = "coerce_price")]
    pub close: f64,
    #[serde(default, deserialize_with = "zero_if_null")]
    pub volume: u64,
}

impl Candle {
    pub fn new(date: NaiveDate, open: f64, high: f64, low: f64, close: f64, volume: u64) -> Self {
        Self {
            date,
            open,
            high,
            low,
            close,
            volume,
        }
    }

    /// Whether every price field is a finite number.
    pub fn is_complete(&self) -> bool {
        [self.open, self.high, self.low, self.close]
            .iter()
            .all(|v| v.is_finite())
    }
}

/// Date-ordered OHLCV series as handed over by a data source.
///
/// Construction does not validate; the pipeline checks ordering and bar
/// shape before computing anything.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OhlcvSeries {
    candles: Vec<Candle>,
}

impl OhlcvSeries {
    pub fn new(candles: Vec<Candle>) -> Self {
        Self { candles }
    }

    pub fn candles(&self) -> &[Candle] {
        &self.candles
    }

    pub fn into_candles(self) -> Vec<Candle> {
        self.candles
    }

    pub fn len(&self) -> usize {
        self.candles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candles.is_empty()
    }

    pub fn last(&self) -> Option<&Candle> {
        self.candles.last()
    }

    /// Keep only the trailing `limit` rows.
    pub fn tail(&self, limit: usize) -> Self {
        let start = self.candles.len().saturating_sub(limit);
        Self::new(self.candles[start..].to_vec())
    }

    /// Drop rows with a missing or non-numeric price.
    pub fn drop_incomplete(&self) -> Self {
        Self::new(
            self.candles
                .iter()
                .filter(|c| c.is_complete())
                .cloned()
                .collect(),
        )
    }
}

pub fn closes(candles: &[Candle]) -> Vec<f64> {
    candles.iter().map(|c| c.close).collect()
}

pub fn highs(candles: &[Candle]) -> Vec<f64> {
    candles.iter().map(|c| c.high).collect()
}

pub fn lows(candles: &[Candle]) -> Vec<f64> {
    candles.iter().map(|c| c.low).collect()
}

impl From<Vec<Candle>> for OhlcvSeries {
    fn from(candles: Vec<Candle>) -> Self {
        Self::new(candles)
    }
}
