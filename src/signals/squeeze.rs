//! Buy/Sell markers derived from the squeeze momentum series
//!
//! Every rule looks back exactly one bar; nothing carries over further.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::indicators::error::IndicatorError;
use crate::models::candle::Candle;
use crate::models::indicators::{SellRule, SqueezeSeries, SqueezeState};
use crate::models::signal::SignalEvent;

/// Buy markers sit 2% below the bar's low.
pub const BUY_PRICE_FACTOR: f64 = 0.98;
/// Sell markers sit 2% above the bar's high.
pub const SELL_PRICE_FACTOR: f64 = 1.02;

/// Squeeze released on this bar: the previous bar was ON and this one is OFF.
pub fn squeeze_fired(states: &[Option<SqueezeState>]) -> Vec<bool> {
    (0..states.len())
        .map(|i| {
            i > 0
                && states[i - 1] == Some(SqueezeState::On)
                && states[i] == Some(SqueezeState::Off)
        })
        .collect()
}

/// `momentum[i] - momentum[i-1] >= 0`. A missing difference (first row or an
/// undefined neighbour) counts as zero, i.e. increasing.
pub fn momentum_increasing(momentum: &[Option<f64>]) -> Vec<bool> {
    (0..momentum.len())
        .map(|i| {
            let diff = match (i.checked_sub(1).and_then(|p| momentum[p]), momentum[i]) {
                (Some(prev), Some(current)) => current - prev,
                _ => 0.0,
            };
            diff >= 0.0
        })
        .collect()
}

/// Derive at most one marker per row.
///
/// Buy: squeeze fired, momentum above zero and not falling. Sell depends on
/// `rule`; see [`SellRule`].
pub fn derive_signals(
    candles: &[Candle],
    squeeze: &SqueezeSeries,
    rule: SellRule,
) -> Result<Vec<Option<SignalEvent>>, IndicatorError> {
    if squeeze.state.len() != candles.len() || squeeze.momentum.len() != candles.len() {
        return Err(IndicatorError::InvalidInput(format!(
            "squeeze series has {} rows, candles have {}",
            squeeze.state.len(),
            candles.len()
        )));
    }

    let fired = squeeze_fired(&squeeze.state);
    let increasing = momentum_increasing(&squeeze.momentum);
    let momentum = &squeeze.momentum;

    let signals: Vec<Option<SignalEvent>> = candles
        .iter()
        .enumerate()
        .map(|(i, candle)| {
            let current = momentum[i]?;

            let buy = fired[i] && current > 0.0 && increasing[i];
            let sell = match rule {
                SellRule::SqueezeFired => fired[i] && current < 0.0 && !increasing[i],
                SellRule::ZeroCross => {
                    let previous = i.checked_sub(1).and_then(|p| momentum[p]);
                    matches!(previous, Some(prev) if prev >= 0.0) && current < 0.0
                }
            };

            if buy {
                Some(SignalEvent::buy(candle.low * BUY_PRICE_FACTOR))
            } else if sell {
                Some(SignalEvent::sell(candle.high * SELL_PRICE_FACTOR))
            } else {
                None
            }
        })
        .collect();

    debug!(
        rule = ?rule,
        buys = signals.iter().flatten().filter(|s| s.is_buy()).count(),
        sells = signals.iter().flatten().filter(|s| s.is_sell()).count(),
        "derived squeeze signals"
    );

    Ok(signals)
}

/// Histogram bucket of one momentum bar (sign x direction).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MomentumBar {
    PositiveRising,
    PositiveFalling,
    NegativeRising,
    NegativeFalling,
}

/// Bucket every momentum value. Zero counts as positive; direction follows
/// [`momentum_increasing`].
pub fn momentum_bars(momentum: &[Option<f64>]) -> Vec<Option<MomentumBar>> {
    let increasing = momentum_increasing(momentum);
    momentum
        .iter()
        .zip(increasing)
        .map(|(value, rising)| {
            value.map(|v| match (v >= 0.0, rising) {
                (true, true) => MomentumBar::PositiveRising,
                (true, false) => MomentumBar::PositiveFalling,
                (false, true) => MomentumBar::NegativeRising,
                (false, false) => MomentumBar::NegativeFalling,
            })
        })
        .collect()
}
