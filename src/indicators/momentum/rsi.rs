//! RSI (Relative Strength Index) indicator

use crate::indicators::error::IndicatorError;
use crate::indicators::validation::validate_rsi_params;
use crate::models::candle::Candle;
use crate::models::indicators::{RsiParams, RsiSeries};

fn rsi_from_averages(avg_gain: f64, avg_loss: f64) -> f64 {
    if avg_loss == 0.0 {
        return 100.0;
    }
    let rs = avg_gain / avg_loss;
    100.0 - (100.0 / (1.0 + rs))
}

fn split_change(change: f64) -> (f64, f64) {
    if change > 0.0 {
        (change, 0.0)
    } else {
        (0.0, -change)
    }
}

/// Calculate RSI with Wilder smoothing
///
/// RSI = 100 - (100 / (1 + RS))
/// RS = Average Gain / Average Loss
///
/// The first average is the simple mean of the first `period` changes, so the
/// first defined row is `period`. After that each average is
/// `(previous * (period - 1) + current) / period`.
///
/// A non-finite change (a missing close on either side) leaves its row
/// undefined and does not enter the averages, which carry over to the next
/// finite change.
pub fn calculate_rsi(candles: &[Candle], params: &RsiParams) -> Result<RsiSeries, IndicatorError> {
    validate_rsi_params(params)?;

    let p = params.period as f64;
    let mut values = vec![None; candles.len()];

    let mut seed_gain = 0.0;
    let mut seed_loss = 0.0;
    let mut seeded = 0;
    let mut averages: Option<(f64, f64)> = None;

    for i in 1..candles.len() {
        let change = candles[i].close - candles[i - 1].close;
        if !change.is_finite() {
            continue;
        }
        let (gain, loss) = split_change(change);

        let (avg_gain, avg_loss) = match averages {
            Some((avg_gain, avg_loss)) => (
                (avg_gain * (p - 1.0) + gain) / p,
                (avg_loss * (p - 1.0) + loss) / p,
            ),
            None => {
                seed_gain += gain;
                seed_loss += loss;
                seeded += 1;
                if seeded < params.period {
                    continue;
                }
                (seed_gain / p, seed_loss / p)
            }
        };
        averages = Some((avg_gain, avg_loss));
        values[i] = Some(rsi_from_averages(avg_gain, avg_loss));
    }

    Ok(RsiSeries {
        params: *params,
        values,
    })
}

/// Calculate RSI with default period (14)
pub fn calculate_rsi_default(candles: &[Candle]) -> Result<RsiSeries, IndicatorError> {
    calculate_rsi(candles, &RsiParams::default())
}
