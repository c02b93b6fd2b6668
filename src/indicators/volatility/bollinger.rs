//! Bollinger Bands indicator

use crate::common::math;
use crate::indicators::error::IndicatorError;
use crate::indicators::validation::validate_bollinger_params;
use crate::models::candle::{closes, Candle};
use crate::models::indicators::{BollingerParams, BollingerSeries};

/// Calculate Bollinger Bands
///
/// Middle Band = SMA(period)
/// Upper Band = Middle + (mult * sample standard deviation)
/// Lower Band = Middle - (mult * sample standard deviation)
pub fn calculate_bollinger_bands(
    candles: &[Candle],
    params: &BollingerParams,
) -> Result<BollingerSeries, IndicatorError> {
    validate_bollinger_params(params)?;

    let closes = closes(candles);
    let middle = math::rolling_mean(&closes, params.period)?;
    let std = math::rolling_std(&closes, params.period)?;

    let upper: Vec<f64> = middle
        .iter()
        .zip(&std)
        .map(|(m, s)| m + params.mult * s)
        .collect();
    let lower: Vec<f64> = middle
        .iter()
        .zip(&std)
        .map(|(m, s)| m - params.mult * s)
        .collect();

    Ok(BollingerSeries {
        params: *params,
        upper: math::to_options(&upper),
        middle: math::to_options(&middle),
        lower: math::to_options(&lower),
    })
}

/// Calculate Bollinger Bands with default parameters (20 SMA, 2σ)
pub fn calculate_bollinger_bands_default(
    candles: &[Candle],
) -> Result<BollingerSeries, IndicatorError> {
    calculate_bollinger_bands(candles, &BollingerParams::default())
}
