//! Signal derivation from computed indicators.

pub mod squeeze;

pub use squeeze::*;
