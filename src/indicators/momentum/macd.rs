//! MACD (Moving Average Convergence Divergence) indicator

use crate::common::math;
use crate::indicators::error::IndicatorError;
use crate::indicators::validation::validate_macd_params;
use crate::models::candle::{closes, Candle};
use crate::models::indicators::{MacdParams, MacdSeries};

/// Calculate MACD indicator
///
/// MACD = EMA(fast) - EMA(slow)
/// Signal = EMA(signal) of MACD
/// Histogram = MACD - Signal
///
/// The MACD line is left undefined until the slow EMA has seen `slow` closes.
/// The signal EMA is seeded from the first defined MACD value and is itself
/// undefined for its first `signal - 1` rows.
pub fn calculate_macd(candles: &[Candle], params: &MacdParams) -> Result<MacdSeries, IndicatorError> {
    validate_macd_params(params)?;

    let closes = closes(candles);
    let fast = math::ema(&closes, params.fast)?;
    let slow = math::ema(&closes, params.slow)?;

    let macd: Vec<f64> = fast
        .iter()
        .zip(&slow)
        .enumerate()
        .map(|(i, (f, s))| if i + 1 < params.slow { f64::NAN } else { f - s })
        .collect();

    let signal_warmup = params.slow + params.signal - 1;
    let signal: Vec<f64> = math::ema(&macd, params.signal)?
        .into_iter()
        .enumerate()
        .map(|(i, v)| if i + 1 < signal_warmup { f64::NAN } else { v })
        .collect();

    let histogram: Vec<f64> = macd.iter().zip(&signal).map(|(m, s)| m - s).collect();

    Ok(MacdSeries {
        params: *params,
        macd: math::to_options(&macd),
        signal: math::to_options(&signal),
        histogram: math::to_options(&histogram),
    })
}

/// Calculate MACD with default periods (12, 26, 9)
pub fn calculate_macd_default(candles: &[Candle]) -> Result<MacdSeries, IndicatorError> {
    calculate_macd(candles, &MacdParams::default())
}
