//! Stochastic Oscillator indicator

use crate::common::math;
use crate::indicators::error::IndicatorError;
use crate::indicators::validation::validate_stochastic_params;
use crate::models::candle::{highs, lows, Candle};
use crate::models::indicators::{StochasticParams, StochasticSeries};

/// Calculate the Stochastic Oscillator
///
/// %K = 100 * (Close - Lowest Low(k)) / (Highest High(k) - Lowest Low(k))
/// %D = SMA(%K, d)
///
/// A flat window (zero range) leaves %K undefined for that row. With
/// `smooth_k > 1` the %K line is itself an SMA of the raw value.
pub fn calculate_stochastic(
    candles: &[Candle],
    params: &StochasticParams,
) -> Result<StochasticSeries, IndicatorError> {
    validate_stochastic_params(params)?;

    let highs = highs(candles);
    let lows = lows(candles);
    let highest = math::rolling_max(&highs, params.k)?;
    let lowest = math::rolling_min(&lows, params.k)?;

    let raw_k: Vec<f64> = candles
        .iter()
        .enumerate()
        .map(|(i, c)| {
            let range = highest[i] - lowest[i];
            if range > 0.0 {
                100.0 * (c.close - lowest[i]) / range
            } else {
                f64::NAN
            }
        })
        .collect();

    let k = if params.smooth_k > 1 {
        math::rolling_mean(&raw_k, params.smooth_k)?
    } else {
        raw_k
    };
    let d = math::rolling_mean(&k, params.d)?;

    Ok(StochasticSeries {
        params: *params,
        k: math::to_options(&k),
        d: math::to_options(&d),
    })
}

/// Calculate Stochastic with default parameters (14, 3)
pub fn calculate_stochastic_default(candles: &[Candle]) -> Result<StochasticSeries, IndicatorError> {
    calculate_stochastic(candles, &StochasticParams::default())
}
