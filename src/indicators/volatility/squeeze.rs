//! Squeeze Momentum indicator (LazyBear)
//!
//! Compares a Bollinger envelope with a Keltner envelope to classify each bar's
//! volatility regime, and smooths a detrended close with a rolling linear
//! regression to get the momentum histogram.
//!
//! Both envelopes use `kc_mult`. See [`SqueezeParams`].

use crate::common::math;
use crate::indicators::error::IndicatorError;
use crate::indicators::validation::validate_squeeze_params;
use crate::models::candle::{closes, highs, lows, Candle};
use crate::models::indicators::{SqueezeParams, SqueezeSeries, SqueezeState};

/// Classify one bar from its two envelopes. Undefined bounds give `None`.
pub fn classify_squeeze(
    bb_lower: f64,
    bb_upper: f64,
    kc_lower: f64,
    kc_upper: f64,
) -> Option<SqueezeState> {
    if ![bb_lower, bb_upper, kc_lower, kc_upper]
        .iter()
        .all(|v| v.is_finite())
    {
        return None;
    }

    if bb_lower > kc_lower && bb_upper < kc_upper {
        Some(SqueezeState::On)
    } else if bb_lower < kc_lower && bb_upper > kc_upper {
        Some(SqueezeState::Off)
    } else {
        Some(SqueezeState::Neither)
    }
}

/// Calculate the squeeze state and momentum series.
///
/// State is undefined for the first `max(bb_length, kc_length) - 1` rows.
/// Momentum needs `2 * kc_length - 2` rows: its source is a `kc_length`
/// window and the regression adds another.
pub fn calculate_squeeze_momentum(
    candles: &[Candle],
    params: &SqueezeParams,
) -> Result<SqueezeSeries, IndicatorError> {
    validate_squeeze_params(params)?;

    let closes = closes(candles);
    let highs = highs(candles);
    let lows = lows(candles);

    // Bollinger envelope, scaled by the Keltner multiplier
    let basis = math::rolling_mean(&closes, params.bb_length)?;
    let std = math::rolling_std(&closes, params.bb_length)?;
    let bb_upper: Vec<f64> = basis
        .iter()
        .zip(&std)
        .map(|(b, s)| b + params.kc_mult * s)
        .collect();
    let bb_lower: Vec<f64> = basis
        .iter()
        .zip(&std)
        .map(|(b, s)| b - params.kc_mult * s)
        .collect();

    // Keltner envelope
    let ma = math::rolling_mean(&closes, params.kc_length)?;
    let range: Vec<f64> = if params.use_true_range {
        math::true_range_series(&highs, &lows, &closes)
    } else {
        highs.iter().zip(&lows).map(|(h, l)| h - l).collect()
    };
    let range_ma = math::rolling_mean(&range, params.kc_length)?;
    let kc_upper: Vec<f64> = ma
        .iter()
        .zip(&range_ma)
        .map(|(m, r)| m + r * params.kc_mult)
        .collect();
    let kc_lower: Vec<f64> = ma
        .iter()
        .zip(&range_ma)
        .map(|(m, r)| m - r * params.kc_mult)
        .collect();

    let state: Vec<Option<SqueezeState>> = (0..candles.len())
        .map(|i| classify_squeeze(bb_lower[i], bb_upper[i], kc_lower[i], kc_upper[i]))
        .collect();

    // Momentum: close minus the average of the Donchian midline and the SMA
    let highest = math::rolling_max(&highs, params.kc_length)?;
    let lowest = math::rolling_min(&lows, params.kc_length)?;
    let source: Vec<f64> = (0..candles.len())
        .map(|i| closes[i] - ((highest[i] + lowest[i]) / 2.0 + ma[i]) / 2.0)
        .collect();
    let momentum = math::linreg(&source, params.kc_length)?;

    Ok(SqueezeSeries {
        params: *params,
        bb_upper: math::to_options(&bb_upper),
        bb_lower: math::to_options(&bb_lower),
        kc_upper: math::to_options(&kc_upper),
        kc_lower: math::to_options(&kc_lower),
        state,
        momentum: math::to_options(&momentum),
    })
}

/// Calculate squeeze momentum with default parameters (20, 20, 1.5, true range)
pub fn calculate_squeeze_momentum_default(
    candles: &[Candle],
) -> Result<SqueezeSeries, IndicatorError> {
    calculate_squeeze_momentum(candles, &SqueezeParams::default())
}
