//! Indicator kinds, categories and chart placement

use serde::{Deserialize, Serialize};

use crate::models::indicators::{IndicatorConfig, IndicatorOutput};

/// Indicator category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IndicatorCategory {
    Trend,
    Momentum,
    Volatility,
}

/// Where a chart draws an indicator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Placement {
    /// Drawn over the price candles.
    Overlay,
    /// Gets its own panel below price and volume.
    Panel,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IndicatorKind {
    MovingAverage,
    Bollinger,
    Rsi,
    Macd,
    Stochastic,
    Squeeze,
}

impl IndicatorKind {
    pub fn name(&self) -> &'static str {
        match self {
            IndicatorKind::MovingAverage => "Moving Average",
            IndicatorKind::Bollinger => "Bollinger Bands",
            IndicatorKind::Rsi => "RSI",
            IndicatorKind::Macd => "MACD",
            IndicatorKind::Stochastic => "Stochastic",
            IndicatorKind::Squeeze => "Squeeze Momentum",
        }
    }

    pub fn category(&self) -> IndicatorCategory {
        match self {
            IndicatorKind::MovingAverage => IndicatorCategory::Trend,
            IndicatorKind::Rsi | IndicatorKind::Macd | IndicatorKind::Stochastic => {
                IndicatorCategory::Momentum
            }
            IndicatorKind::Bollinger | IndicatorKind::Squeeze => IndicatorCategory::Volatility,
        }
    }

    pub fn placement(&self) -> Placement {
        match self {
            IndicatorKind::MovingAverage | IndicatorKind::Bollinger => Placement::Overlay,
            _ => Placement::Panel,
        }
    }

    /// Panel order below price and volume.
    pub fn all() -> Vec<IndicatorKind> {
        vec![
            IndicatorKind::MovingAverage,
            IndicatorKind::Bollinger,
            IndicatorKind::Rsi,
            IndicatorKind::Macd,
            IndicatorKind::Stochastic,
            IndicatorKind::Squeeze,
        ]
    }
}

impl IndicatorOutput {
    pub fn kind(&self) -> IndicatorKind {
        match self {
            IndicatorOutput::MovingAverage(_) => IndicatorKind::MovingAverage,
            IndicatorOutput::Bollinger(_) => IndicatorKind::Bollinger,
            IndicatorOutput::Rsi(_) => IndicatorKind::Rsi,
            IndicatorOutput::Macd(_) => IndicatorKind::Macd,
            IndicatorOutput::Stochastic(_) => IndicatorKind::Stochastic,
            IndicatorOutput::Squeeze(_) => IndicatorKind::Squeeze,
        }
    }
}

/// The kinds a configuration switches on, in [`IndicatorKind::all`] order.
pub fn requested_kinds(config: &IndicatorConfig) -> Vec<IndicatorKind> {
    IndicatorKind::all()
        .into_iter()
        .filter(|kind| match kind {
            IndicatorKind::MovingAverage => !config.moving_averages.is_empty(),
            IndicatorKind::Bollinger => config.bbands.resolve().is_some(),
            IndicatorKind::Rsi => config.rsi.resolve().is_some(),
            IndicatorKind::Macd => config.macd.resolve().is_some(),
            IndicatorKind::Stochastic => config.stochastic.resolve().is_some(),
            IndicatorKind::Squeeze => config.squeeze.resolve().is_some(),
        })
        .collect()
}
