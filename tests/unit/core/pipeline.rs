//! Unit tests for the indicator pipeline

use finboard::core::IndicatorPipeline;
use finboard::indicators::IndicatorError;
use finboard::models::{
    Candle, IndicatorConfig, MacdParams, MovingAverageSpec, OhlcvSeries, RsiParams,
};

use crate::support::{
    assert_close_opt, breakout_candles, candles_from_closes, day, noisy_candles,
    series_from_closes,
};

#[test]
fn test_row_count_preserved() {
    for count in [0, 1, 5, 30, 250] {
        let series = OhlcvSeries::new(noisy_candles(count));
        let augmented = IndicatorPipeline::run(&series, &IndicatorConfig::all_defaults()).unwrap();

        assert_eq!(augmented.len(), count);
        assert_eq!(augmented.candles, series.candles());
        assert_eq!(augmented.signals().map(<[_]>::len), Some(count));
        for column in augmented.columns() {
            let len = match column.values {
                finboard::models::ColumnValues::Numeric(v) => v.len(),
                finboard::models::ColumnValues::Flag(v) => v.len(),
            };
            assert_eq!(len, count, "column {}", column.name);
        }
    }
}

#[test]
fn test_pipeline_is_idempotent_and_does_not_touch_input() {
    let series = OhlcvSeries::new(noisy_candles(150));
    let before = series.clone();
    let config = IndicatorConfig::all_defaults();

    let first = IndicatorPipeline::run(&series, &config).unwrap();
    let second = IndicatorPipeline::run(&series, &config).unwrap();

    assert_eq!(first, second);
    assert_eq!(series, before);
}

#[test]
fn test_sma_through_pipeline() {
    let config = IndicatorConfig::new().with_moving_average(MovingAverageSpec::simple(3));
    let augmented =
        IndicatorPipeline::run(&series_from_closes(&[10.0, 20.0, 30.0, 40.0, 50.0]), &config)
            .unwrap();

    let ma = augmented.moving_average(MovingAverageSpec::simple(3)).unwrap();
    assert!(ma.values[..2].iter().all(Option::is_none));
    assert_close_opt(ma.values[2], 20.0);
    assert_close_opt(ma.values[4], 40.0);
    assert!(augmented.signals().is_none());
}

#[test]
fn test_only_requested_indicators() {
    let config = IndicatorConfig::new().with_rsi(RsiParams::default());
    let augmented = IndicatorPipeline::run(&noisy_candles(40).into(), &config).unwrap();

    assert_eq!(augmented.indicators.len(), 1);
    assert!(augmented.rsi().is_some());
    assert!(augmented.macd().is_none());
    assert!(augmented.squeeze().is_none());
    assert_eq!(augmented.moving_averages().count(), 0);
}

#[test]
fn test_short_series_is_undefined_not_an_error() {
    // shorter than the smallest window in the default set (MA5)
    let series = series_from_closes(&[100.0, 101.0, 102.0, 101.0]);
    let augmented = IndicatorPipeline::run(&series, &IndicatorConfig::all_defaults()).unwrap();

    assert_eq!(augmented.len(), 4);

    assert!(augmented
        .moving_averages()
        .all(|ma| ma.values.iter().all(Option::is_none)));
    let bb = augmented.bollinger().unwrap();
    assert!(bb.upper.iter().chain(&bb.lower).all(Option::is_none));
    assert!(augmented.rsi().unwrap().values.iter().all(Option::is_none));
    assert!(augmented.macd().unwrap().macd.iter().all(Option::is_none));
    assert!(augmented.stochastic().unwrap().k.iter().all(Option::is_none));

    let squeeze = augmented.squeeze().unwrap();
    assert!(squeeze.state.iter().all(Option::is_none));
    assert!(squeeze.momentum.iter().all(Option::is_none));
    assert!(augmented.signal_events().is_empty());
}

#[test]
fn test_breakout_signal_through_pipeline() {
    let augmented = IndicatorPipeline::run(
        &breakout_candles(130.0, 131.0, 129.0).into(),
        &IndicatorConfig::all_defaults(),
    )
    .unwrap();

    let events = augmented.signal_events();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].0.date, day(40));
    assert!(events[0].1.is_buy());
}

#[test]
fn test_unordered_dates_rejected() {
    let mut candles = candles_from_closes(&[1.0, 2.0, 3.0, 4.0]);
    candles.swap(1, 2);
    assert!(matches!(
        IndicatorPipeline::run(&candles.into(), &IndicatorConfig::all_defaults()),
        Err(IndicatorError::InvalidInput(_))
    ));
}

#[test]
fn test_high_below_low_rejected() {
    let mut candles = candles_from_closes(&[1.0, 2.0, 3.0]);
    candles.push(Candle::new(day(3), 4.0, 3.0, 5.0, 4.0, 10));
    assert!(matches!(
        IndicatorPipeline::run(&candles.into(), &IndicatorConfig::all_defaults()),
        Err(IndicatorError::InvalidInput(_))
    ));
}

#[test]
fn test_invalid_parameters_rejected() {
    let series = OhlcvSeries::new(noisy_candles(60));

    let zero_period = IndicatorConfig::new().with_moving_average(MovingAverageSpec::exponential(0));
    assert!(matches!(
        IndicatorPipeline::run(&series, &zero_period),
        Err(IndicatorError::InvalidParameter(_))
    ));

    let bad_macd = IndicatorConfig::new().with_macd(MacdParams {
        fast: 26,
        slow: 12,
        signal: 9,
    });
    assert!(matches!(
        IndicatorPipeline::run(&series, &bad_macd),
        Err(IndicatorError::InvalidParameter(_))
    ));
}
