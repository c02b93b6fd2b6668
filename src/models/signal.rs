use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SignalKind {
    Buy,
    Sell,
}

/// A chart marker for one bar.
///
/// `price` is a plotting anchor placed just outside the bar (below the low
/// for Buy, above the high for Sell), not an order price.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SignalEvent {
    pub kind: SignalKind,
    pub price: f64,
}

impl SignalEvent {
    pub fn buy(price: f64) -> Self {
        Self {
            kind: SignalKind::Buy,
            price,
        }
    }

    pub fn sell(price: f64) -> Self {
        Self {
            kind: SignalKind::Sell,
            price,
        }
    }

    pub fn is_buy(&self) -> bool {
        self.kind == SignalKind::Buy
    }

    pub fn is_sell(&self) -> bool {
        self.kind == SignalKind::Sell
    }
}
