//! Series math primitives
//!
//! Every function returns a vector the same length as its input. Rows that
//! have no defined value hold `f64::NAN`; a window that contains a non-finite
//! value produces `NAN` instead of an error.

use crate::indicators::error::{IndicatorError, Result};

fn check_period(period: usize, name: &str) -> Result<()> {
    if period == 0 {
        return Err(IndicatorError::InvalidParameter(format!(
            "{} period must be > 0",
            name
        )));
    }
    Ok(())
}

/// Apply `f` to each complete trailing window of `period` values.
fn rolling<F>(values: &[f64], period: usize, f: F) -> Vec<f64>
where
    F: Fn(&[f64]) -> f64,
{
    let mut out = vec![f64::NAN; values.len()];
    if period == 0 || values.len() < period {
        return out;
    }

    for end in period..=values.len() {
        let window = &values[end - period..end];
        if window.iter().all(|v| v.is_finite()) {
            out[end - 1] = f(window);
        }
    }
    out
}

fn mean(window: &[f64]) -> f64 {
    window.iter().sum::<f64>() / window.len() as f64
}

/// Sample standard deviation (ddof = 1).
fn sample_std(window: &[f64]) -> f64 {
    if window.len() < 2 {
        return f64::NAN;
    }
    let avg = mean(window);
    let variance =
        window.iter().map(|v| (v - avg).powi(2)).sum::<f64>() / (window.len() - 1) as f64;
    variance.sqrt()
}

/// Least-squares line over x = 0..n-1, evaluated at x = n-1.
fn regression_endpoint(window: &[f64]) -> f64 {
    if window.len() == 1 {
        return window[0];
    }
    let n = window.len() as f64;
    let sum_x = n * (n - 1.0) / 2.0;
    let sum_x2 = (n - 1.0) * n * (2.0 * n - 1.0) / 6.0;
    let (sum_y, sum_xy) = window
        .iter()
        .enumerate()
        .fold((0.0, 0.0), |(sy, sxy), (i, &y)| (sy + y, sxy + i as f64 * y));

    let slope = (n * sum_xy - sum_x * sum_y) / (n * sum_x2 - sum_x * sum_x);
    let intercept = (sum_y - slope * sum_x) / n;
    intercept + slope * (n - 1.0)
}

/// Simple moving average of the trailing `period` values.
pub fn rolling_mean(values: &[f64], period: usize) -> Result<Vec<f64>> {
    check_period(period, "rolling mean")?;
    Ok(rolling(values, period, mean))
}

/// Rolling sample standard deviation, as used by Bollinger Bands.
pub fn rolling_std(values: &[f64], period: usize) -> Result<Vec<f64>> {
    check_period(period, "rolling std")?;
    Ok(rolling(values, period, sample_std))
}

pub fn rolling_max(values: &[f64], period: usize) -> Result<Vec<f64>> {
    check_period(period, "rolling max")?;
    Ok(rolling(values, period, |w| {
        w.iter().copied().fold(f64::NEG_INFINITY, f64::max)
    }))
}

pub fn rolling_min(values: &[f64], period: usize) -> Result<Vec<f64>> {
    check_period(period, "rolling min")?;
    Ok(rolling(values, period, |w| {
        w.iter().copied().fold(f64::INFINITY, f64::min)
    }))
}

/// Rolling linear-regression endpoint: the regression-smoothed current value.
pub fn linreg(values: &[f64], period: usize) -> Result<Vec<f64>> {
    check_period(period, "linear regression")?;
    Ok(rolling(values, period, regression_endpoint))
}

/// Next EMA value given the previous one.
pub fn ema_from_previous(current: f64, previous: f64, span: usize) -> f64 {
    let alpha = 2.0 / (span as f64 + 1.0);
    alpha * current + (1.0 - alpha) * previous
}

/// Exponential moving average with `alpha = 2 / (span + 1)`.
///
/// The first finite value seeds the average, so there is no lookback gap.
/// Non-finite inputs leave the running average untouched and yield `NAN` for
/// their own row.
pub fn ema(values: &[f64], span: usize) -> Result<Vec<f64>> {
    check_period(span, "EMA")?;

    let mut out = vec![f64::NAN; values.len()];
    let mut previous: Option<f64> = None;
    for (i, &value) in values.iter().enumerate() {
        if !value.is_finite() {
            continue;
        }
        let next = match previous {
            Some(prev) => ema_from_previous(value, prev, span),
            None => value,
        };
        out[i] = next;
        previous = Some(next);
    }
    Ok(out)
}

/// True range of one bar given the previous close.
pub fn true_range(high: f64, low: f64, prev_close: f64) -> f64 {
    if !(high.is_finite() && low.is_finite() && prev_close.is_finite()) {
        return f64::NAN;
    }
    let hl = high - low;
    let hc = (high - prev_close).abs();
    let lc = (low - prev_close).abs();
    hl.max(hc).max(lc)
}

/// True range for a whole series. The first bar has no previous close and
/// falls back to `high - low`.
pub fn true_range_series(highs: &[f64], lows: &[f64], closes: &[f64]) -> Vec<f64> {
    highs
        .iter()
        .zip(lows)
        .enumerate()
        .map(|(i, (&high, &low))| {
            if i == 0 {
                high - low
            } else {
                true_range(high, low, closes.get(i - 1).copied().unwrap_or(f64::NAN))
            }
        })
        .collect()
}

/// Convert a `NAN`-marked series into explicit optional values.
pub fn to_options(values: &[f64]) -> Vec<Option<f64>> {
    values
        .iter()
        .map(|v| if v.is_finite() { Some(*v) } else { None })
        .collect()
}
