//! Shared data models spanning the engine layers.

pub mod candle;
pub mod indicators;
pub mod signal;

pub use candle::{Candle, OhlcvSeries};
pub use indicators::{
    AugmentedSeries, BollingerParams, BollingerSeries, Column, ColumnValues, IndicatorConfig,
    IndicatorOutput, MacdParams, MacdSeries, MovingAverageKind, MovingAverageSeries,
    MovingAverageSpec, RsiParams, RsiSeries, SellRule, SqueezeParams, SqueezeSeries,
    SqueezeState, StochasticParams, StochasticSeries, Toggle,
};
pub use signal::{SignalEvent, SignalKind};
