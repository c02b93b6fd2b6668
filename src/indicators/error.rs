//! Indicator error types

use thiserror::Error;

/// Errors raised by calculators and the indicator pipeline.
///
/// A series that is too short for a window is not an error: the affected
/// values are simply undefined.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum IndicatorError {
    /// A calculator was configured with a non-positive window or an
    /// inconsistent parameter set (e.g. MACD `fast >= slow`).
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// The OHLCV series breaks a structural invariant.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Invalid numeric format: {0}")]
    InvalidNumericFormat(String),

    /// A batch task panicked or was cancelled before producing a result.
    #[error("Task failed: {0}")]
    Task(String),
}

pub type Result<T> = std::result::Result<T, IndicatorError>;
