//! Unit tests for indicator configuration and output models

use finboard::core::IndicatorPipeline;
use finboard::models::{
    AugmentedSeries, BollingerParams, ColumnValues, IndicatorConfig, MacdParams,
    MovingAverageSpec, SellRule, SignalEvent, SqueezeParams, StochasticParams, Toggle,
};

use crate::support::{candles_from_closes, noisy_candles, series_from_closes};

#[test]
fn test_config_from_json() {
    let raw = r#"{
        "moving_averages": ["MA20", "ema12", {"kind": "simple", "period": 60}],
        "bbands": true,
        "macd": {"fast": 5},
        "squeeze": {"kc_mult": 2.0},
        "sell_rule": "zero_cross"
    }"#;
    let config: IndicatorConfig = serde_json::from_str(raw).unwrap();

    assert_eq!(
        config.moving_averages,
        vec![
            MovingAverageSpec::simple(20),
            MovingAverageSpec::exponential(12),
            MovingAverageSpec::simple(60),
        ]
    );
    assert_eq!(config.bbands.resolve(), Some(BollingerParams::default()));
    assert_eq!(
        config.macd.resolve(),
        Some(MacdParams {
            fast: 5,
            slow: 26,
            signal: 9
        })
    );
    assert_eq!(config.rsi.resolve(), None);
    assert_eq!(config.squeeze.resolve().map(|p| p.kc_mult), Some(2.0));
    assert_eq!(config.sell_rule, SellRule::ZeroCross);
}

#[test]
fn test_config_rejects_bad_label() {
    let raw = r#"{"moving_averages": ["WMA20"]}"#;
    assert!(serde_json::from_str::<IndicatorConfig>(raw).is_err());
}

#[test]
fn test_empty_config_defaults() {
    let config: IndicatorConfig = serde_json::from_str("{}").unwrap();
    assert_eq!(config, IndicatorConfig::new());
    assert_eq!(config.sell_rule, SellRule::SqueezeFired);
    assert_eq!(config.squeeze, Toggle::Flag(false));
}

#[test]
fn test_moving_average_labels() {
    let spec = MovingAverageSpec::simple(20);
    assert_eq!(spec.label(), "MA20");
    assert_eq!(spec.column_name(), "MA_20");
    let spec = MovingAverageSpec::exponential(12);
    assert_eq!(spec.label(), "EMA12");
    assert_eq!(spec.column_name(), "EMA_12");
}

#[test]
fn test_column_names() {
    let config = IndicatorConfig::new()
        .with_moving_average(MovingAverageSpec::simple(5))
        .with_bbands(BollingerParams::default())
        .with_stochastic(StochasticParams::default())
        .with_squeeze(SqueezeParams::default());
    let augmented = IndicatorPipeline::run(&series_from_closes(&[10.0; 30]), &config).unwrap();

    let names: Vec<String> = augmented.columns().into_iter().map(|c| c.name).collect();
    assert_eq!(
        names,
        vec![
            "MA_5",
            "BBL_20_2.0",
            "BBM_20_2.0",
            "BBU_20_2.0",
            "STOCHk_14_3_1",
            "STOCHd_14_3_1",
            "BBU_SQZ",
            "BBL_SQZ",
            "KCU_SQZ",
            "KCL_SQZ",
            "SQZ_ON",
            "SQZ_OFF",
            "SQZ_NO",
            "SQZ_VAL",
        ]
    );
}

#[test]
fn test_squeeze_flags_are_exclusive() {
    let config = IndicatorConfig::new().with_squeeze(SqueezeParams::default());
    let augmented =
        IndicatorPipeline::run(&noisy_candles(100).into(), &config).unwrap();

    let flags: Vec<Vec<Option<bool>>> = augmented
        .columns()
        .into_iter()
        .filter_map(|c| match c.values {
            ColumnValues::Flag(values) => Some(values),
            ColumnValues::Numeric(_) => None,
        })
        .collect();
    assert_eq!(flags.len(), 3);

    for row in 0..100 {
        let set: Vec<Option<bool>> = flags.iter().map(|f| f[row]).collect();
        if set.iter().any(Option::is_none) {
            assert!(set.iter().all(Option::is_none));
        } else {
            assert_eq!(set.iter().filter(|f| **f == Some(true)).count(), 1);
        }
    }
}

#[test]
fn test_tail_keeps_columns_aligned() {
    let config = IndicatorConfig::all_defaults();
    let augmented = IndicatorPipeline::run(&noisy_candles(60).into(), &config).unwrap();
    let tail = augmented.tail(10);

    assert_eq!(tail.len(), 10);
    assert_eq!(tail.candles[0], augmented.candles[50]);
    for column in tail.columns() {
        let len = match column.values {
            ColumnValues::Numeric(v) => v.len(),
            ColumnValues::Flag(v) => v.len(),
        };
        assert_eq!(len, 10, "column {}", column.name);
    }
    assert_eq!(tail.signals().map(<[_]>::len), Some(10));
    assert_eq!(augmented.tail(1000).len(), 60);
}

#[test]
fn test_signal_events_pair_with_candles() {
    let candles = candles_from_closes(&[1.0, 2.0, 3.0]);
    let augmented = AugmentedSeries::new(candles.clone()).with_signals(vec![
        None,
        Some(SignalEvent::buy(0.98)),
        None,
    ]);

    let events = augmented.signal_events();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].0, &candles[1]);
    assert!(events[0].1.is_buy());
    assert!(AugmentedSeries::new(candles).signal_events().is_empty());
}

#[test]
fn test_augmented_series_serializes() {
    let config = IndicatorConfig::new().with_squeeze(SqueezeParams::default());
    let augmented = IndicatorPipeline::run(&series_from_closes(&[5.0; 3]), &config).unwrap();
    let json = serde_json::to_value(&augmented).unwrap();
    assert_eq!(json["indicators"][0]["kind"], "squeeze");
    assert!(json["signals"].is_array());
}
