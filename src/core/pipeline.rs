//! Indicator pipeline: raw OHLCV in, augmented series out.

use tracing::{debug, info};

use crate::indicators::error::IndicatorError;
use crate::indicators::registry::requested_kinds;
use crate::indicators::momentum::{calculate_macd, calculate_rsi, calculate_stochastic};
use crate::indicators::trend::calculate_moving_averages;
use crate::indicators::validation::{validate_config, validate_series};
use crate::indicators::volatility::{calculate_bollinger_bands, calculate_squeeze_momentum};
use crate::models::candle::OhlcvSeries;
use crate::models::indicators::{AugmentedSeries, IndicatorConfig, IndicatorOutput};
use crate::signals::derive_signals;

pub struct IndicatorPipeline;

impl IndicatorPipeline {
    /// Compute every indicator `config` asks for.
    ///
    /// The series and the configuration are both validated before any
    /// calculator runs. Rows are never dropped: values a window is too short
    /// for stay undefined. The input is only read.
    pub fn run(
        series: &OhlcvSeries,
        config: &IndicatorConfig,
    ) -> Result<AugmentedSeries, IndicatorError> {
        validate_series(series)?;
        validate_config(config)?;
        debug!(
            rows = series.len(),
            kinds = ?requested_kinds(config),
            "running indicator pipeline"
        );

        let candles = series.candles();
        let mut outputs = Vec::new();

        for ma in calculate_moving_averages(candles, &config.moving_averages)? {
            outputs.push(IndicatorOutput::MovingAverage(ma));
        }
        if let Some(params) = config.bbands.resolve() {
            outputs.push(IndicatorOutput::Bollinger(calculate_bollinger_bands(
                candles, &params,
            )?));
        }
        if let Some(params) = config.rsi.resolve() {
            outputs.push(IndicatorOutput::Rsi(calculate_rsi(candles, &params)?));
        }
        if let Some(params) = config.macd.resolve() {
            outputs.push(IndicatorOutput::Macd(calculate_macd(candles, &params)?));
        }
        if let Some(params) = config.stochastic.resolve() {
            outputs.push(IndicatorOutput::Stochastic(calculate_stochastic(
                candles, &params,
            )?));
        }

        let mut signals = None;
        if let Some(params) = config.squeeze.resolve() {
            let squeeze = calculate_squeeze_momentum(candles, &params)?;
            signals = Some(derive_signals(candles, &squeeze, config.sell_rule)?);
            outputs.push(IndicatorOutput::Squeeze(squeeze));
        }

        for output in &outputs {
            debug!(
                indicator = output.name(),
                columns = output.columns().len(),
                "computed indicator"
            );
        }

        let mut augmented = AugmentedSeries::new(candles.to_vec());
        for output in outputs {
            augmented = augmented.with_indicator(output);
        }
        if let Some(signals) = signals {
            augmented = augmented.with_signals(signals);
        }

        info!(
            rows = augmented.len(),
            indicators = augmented.indicators.len(),
            signals = augmented.signal_events().len(),
            "indicator pipeline complete"
        );

        Ok(augmented)
    }
}
