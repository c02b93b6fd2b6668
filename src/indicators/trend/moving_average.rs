//! Simple and exponential moving averages of the close

use crate::common::math;
use crate::indicators::error::IndicatorError;
use crate::models::candle::{closes, Candle};
use crate::models::indicators::{MovingAverageKind, MovingAverageSeries, MovingAverageSpec};

/// Simple moving average; undefined for the first `period - 1` rows.
pub fn calculate_sma(candles: &[Candle], period: usize) -> Result<MovingAverageSeries, IndicatorError> {
    let values = math::rolling_mean(&closes(candles), period)?;
    Ok(MovingAverageSeries {
        spec: MovingAverageSpec::simple(period),
        values: math::to_options(&values),
    })
}

/// Exponential moving average; defined from the first row.
pub fn calculate_ema(candles: &[Candle], period: usize) -> Result<MovingAverageSeries, IndicatorError> {
    let values = math::ema(&closes(candles), period)?;
    Ok(MovingAverageSeries {
        spec: MovingAverageSpec::exponential(period),
        values: math::to_options(&values),
    })
}

pub fn calculate_moving_average(
    candles: &[Candle],
    spec: &MovingAverageSpec,
) -> Result<MovingAverageSeries, IndicatorError> {
    match spec.kind {
        MovingAverageKind::Simple => calculate_sma(candles, spec.period),
        MovingAverageKind::Exponential => calculate_ema(candles, spec.period),
    }
}

/// Calculate several moving averages at once, skipping duplicate specs.
pub fn calculate_moving_averages(
    candles: &[Candle],
    specs: &[MovingAverageSpec],
) -> Result<Vec<MovingAverageSeries>, IndicatorError> {
    let mut seen = Vec::with_capacity(specs.len());
    let mut out = Vec::with_capacity(specs.len());
    for spec in specs {
        if seen.contains(spec) {
            continue;
        }
        seen.push(*spec);
        out.push(calculate_moving_average(candles, spec)?);
    }
    Ok(out)
}
