//! Input and parameter validation run before any calculator.

use crate::indicators::error::IndicatorError;
use crate::models::candle::OhlcvSeries;
use crate::models::indicators::{
    BollingerParams, IndicatorConfig, MacdParams, MovingAverageSpec, RsiParams, SqueezeParams,
    StochasticParams,
};

pub fn validate_period(name: &str, period: usize) -> Result<(), IndicatorError> {
    if period == 0 {
        return Err(IndicatorError::InvalidParameter(format!(
            "{} must be > 0",
            name
        )));
    }
    Ok(())
}

pub fn validate_multiplier(name: &str, mult: f64) -> Result<(), IndicatorError> {
    if !mult.is_finite() || mult <= 0.0 {
        return Err(IndicatorError::InvalidParameter(format!(
            "{} must be a positive number, got {}",
            name, mult
        )));
    }
    Ok(())
}

/// Dates strictly increasing and `high >= low` on every bar.
pub fn validate_series(series: &OhlcvSeries) -> Result<(), IndicatorError> {
    let candles = series.candles();

    for (i, candle) in candles.iter().enumerate() {
        if candle.high < candle.low {
            return Err(IndicatorError::InvalidInput(format!(
                "row {} ({}): high {} is below low {}",
                i, candle.date, candle.high, candle.low
            )));
        }
    }

    for (i, pair) in candles.windows(2).enumerate() {
        if pair[1].date <= pair[0].date {
            return Err(IndicatorError::InvalidInput(format!(
                "row {}: date {} does not follow {}",
                i + 1,
                pair[1].date,
                pair[0].date
            )));
        }
    }

    Ok(())
}

pub fn validate_moving_average(spec: &MovingAverageSpec) -> Result<(), IndicatorError> {
    validate_period(&format!("{} period", spec.label()), spec.period)
}

pub fn validate_bollinger_params(params: &BollingerParams) -> Result<(), IndicatorError> {
    validate_period("Bollinger period", params.period)?;
    validate_multiplier("Bollinger multiplier", params.mult)
}

pub fn validate_rsi_params(params: &RsiParams) -> Result<(), IndicatorError> {
    validate_period("RSI period", params.period)
}

pub fn validate_macd_params(params: &MacdParams) -> Result<(), IndicatorError> {
    validate_period("MACD fast period", params.fast)?;
    validate_period("MACD slow period", params.slow)?;
    validate_period("MACD signal period", params.signal)?;
    if params.fast >= params.slow {
        return Err(IndicatorError::InvalidParameter(format!(
            "MACD fast period ({}) must be shorter than slow period ({})",
            params.fast, params.slow
        )));
    }
    Ok(())
}

pub fn validate_stochastic_params(params: &StochasticParams) -> Result<(), IndicatorError> {
    validate_period("Stochastic %K period", params.k)?;
    validate_period("Stochastic %D period", params.d)?;
    validate_period("Stochastic %K smoothing", params.smooth_k)
}

pub fn validate_squeeze_params(params: &SqueezeParams) -> Result<(), IndicatorError> {
    validate_period("Squeeze BB length", params.bb_length)?;
    validate_period("Squeeze KC length", params.kc_length)?;
    validate_multiplier("Squeeze KC multiplier", params.kc_mult)
}

/// Check every enabled indicator's parameters.
pub fn validate_config(config: &IndicatorConfig) -> Result<(), IndicatorError> {
    for spec in &config.moving_averages {
        validate_moving_average(spec)?;
    }
    if let Some(params) = config.bbands.resolve() {
        validate_bollinger_params(&params)?;
    }
    if let Some(params) = config.rsi.resolve() {
        validate_rsi_params(&params)?;
    }
    if let Some(params) = config.macd.resolve() {
        validate_macd_params(&params)?;
    }
    if let Some(params) = config.stochastic.resolve() {
        validate_stochastic_params(&params)?;
    }
    if let Some(params) = config.squeeze.resolve() {
        validate_squeeze_params(&params)?;
    }
    Ok(())
}
