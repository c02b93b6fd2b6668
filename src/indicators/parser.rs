use crate::indicators::error::IndicatorError;
use crate::models::indicators::{MovingAverageKind, MovingAverageSpec};

pub fn parse_f64(value: &str) -> Result<f64, IndicatorError> {
    value
        .trim()
        .parse::<f64>()
        .map_err(|_| IndicatorError::InvalidNumericFormat(value.to_string()))
}

pub fn parse_period(value: &str) -> Result<usize, IndicatorError> {
    let period = value
        .trim()
        .parse::<usize>()
        .map_err(|_| IndicatorError::InvalidNumericFormat(value.to_string()))?;
    if period == 0 {
        return Err(IndicatorError::InvalidParameter(format!(
            "period must be > 0, got '{}'",
            value
        )));
    }
    Ok(period)
}

/// Parse a dashboard moving-average label: `MA20` is a 20-day simple
/// average, `EMA12` a 12-day exponential one. Case-insensitive.
pub fn parse_moving_average_label(label: &str) -> Result<MovingAverageSpec, IndicatorError> {
    let upper = label.trim().to_ascii_uppercase();

    let (kind, digits) = if let Some(rest) = upper.strip_prefix("EMA") {
        (MovingAverageKind::Exponential, rest)
    } else if let Some(rest) = upper.strip_prefix("SMA") {
        (MovingAverageKind::Simple, rest)
    } else if let Some(rest) = upper.strip_prefix("MA") {
        (MovingAverageKind::Simple, rest)
    } else {
        return Err(IndicatorError::InvalidNumericFormat(label.to_string()));
    };

    let period = parse_period(digits.trim_start_matches('_'))?;
    Ok(MovingAverageSpec { kind, period })
}

/// Parse a comma-separated label list such as `"MA5, MA20, EMA12"`.
pub fn parse_moving_average_list(labels: &str) -> Result<Vec<MovingAverageSpec>, IndicatorError> {
    labels
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(parse_moving_average_label)
        .collect()
}
