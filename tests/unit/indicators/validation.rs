//! Unit tests for input and parameter validation

use finboard::indicators::validation::{validate_config, validate_series};
use finboard::indicators::IndicatorError;
use finboard::models::{
    Candle, IndicatorConfig, MacdParams, MovingAverageSpec, OhlcvSeries, StochasticParams, Toggle,
};

use crate::support::{candles_from_closes, day, series_from_closes};

#[test]
fn test_valid_series_passes() {
    assert!(validate_series(&series_from_closes(&[1.0, 2.0, 3.0])).is_ok());
    assert!(validate_series(&OhlcvSeries::default()).is_ok());
}

#[test]
fn test_high_below_low_rejected() {
    let mut candles = candles_from_closes(&[1.0, 2.0, 3.0]);
    candles[1] = Candle::new(day(1), 2.0, 1.5, 2.5, 2.0, 0);
    assert!(matches!(
        validate_series(&OhlcvSeries::new(candles)),
        Err(IndicatorError::InvalidInput(_))
    ));
}

#[test]
fn test_dates_must_increase() {
    let mut duplicate = candles_from_closes(&[1.0, 2.0, 3.0]);
    duplicate[2].date = duplicate[1].date;
    assert!(matches!(
        validate_series(&OhlcvSeries::new(duplicate)),
        Err(IndicatorError::InvalidInput(_))
    ));

    let mut reversed = candles_from_closes(&[1.0, 2.0, 3.0]);
    reversed.reverse();
    assert!(matches!(
        validate_series(&OhlcvSeries::new(reversed)),
        Err(IndicatorError::InvalidInput(_))
    ));
}

#[test]
fn test_config_validation() {
    assert!(validate_config(&IndicatorConfig::all_defaults()).is_ok());

    let bad_ma = IndicatorConfig::new().with_moving_average(MovingAverageSpec::simple(0));
    assert!(matches!(
        validate_config(&bad_ma),
        Err(IndicatorError::InvalidParameter(_))
    ));

    let bad_macd = IndicatorConfig::new().with_macd(MacdParams {
        fast: 30,
        slow: 26,
        signal: 9,
    });
    assert!(matches!(
        validate_config(&bad_macd),
        Err(IndicatorError::InvalidParameter(_))
    ));

    let bad_stochastic = IndicatorConfig::new().with_stochastic(StochasticParams {
        d: 0,
        ..StochasticParams::default()
    });
    assert!(validate_config(&bad_stochastic).is_err());
}

#[test]
fn test_disabled_indicator_not_validated() {
    let mut config = IndicatorConfig::new();
    config.macd = Toggle::Flag(false);
    assert!(validate_config(&config).is_ok());
}
