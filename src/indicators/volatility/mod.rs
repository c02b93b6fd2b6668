//! Volatility indicators: Bollinger Bands, Squeeze Momentum

pub mod bollinger;
pub mod squeeze;

pub use bollinger::*;
pub use squeeze::*;
