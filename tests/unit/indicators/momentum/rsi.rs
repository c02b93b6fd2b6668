//! Unit tests for RSI indicator

use finboard::indicators::momentum::{calculate_rsi, calculate_rsi_default};
use finboard::indicators::IndicatorError;
use finboard::models::RsiParams;

use crate::support::{candles_from_closes, noisy_candles, rising_closes};

#[test]
fn test_rsi_insufficient_data() {
    let candles = candles_from_closes(&rising_closes(14, 100.0, 1.0));
    let rsi = calculate_rsi_default(&candles).unwrap();
    assert_eq!(rsi.values.len(), 14);
    assert!(rsi.values.iter().all(Option::is_none));
}

#[test]
fn test_rsi_only_gains_is_100() {
    let candles = candles_from_closes(&rising_closes(30, 1.0, 1.0));
    let rsi = calculate_rsi_default(&candles).unwrap();

    assert!(rsi.values[..14].iter().all(Option::is_none));
    for value in &rsi.values[14..] {
        assert_eq!(*value, Some(100.0));
    }
}

#[test]
fn test_rsi_only_losses_is_0() {
    let candles = candles_from_closes(&rising_closes(30, 100.0, -1.0));
    let rsi = calculate_rsi_default(&candles).unwrap();
    for value in &rsi.values[14..] {
        assert_eq!(*value, Some(0.0));
    }
}

#[test]
fn test_rsi_stays_in_range() {
    let candles = noisy_candles(200);
    let rsi = calculate_rsi(&candles, &RsiParams { period: 7 }).unwrap();

    assert_eq!(rsi.values.len(), 200);
    assert_eq!(rsi.values.iter().flatten().count(), 200 - 7);
    assert!(rsi
        .values
        .iter()
        .flatten()
        .all(|v| (0.0..=100.0).contains(v)));
}

#[test]
fn test_rsi_zero_period() {
    let candles = candles_from_closes(&[1.0, 2.0, 3.0]);
    assert!(matches!(
        calculate_rsi(&candles, &RsiParams { period: 0 }),
        Err(IndicatorError::InvalidParameter(_))
    ));
}

#[test]
fn test_rsi_recovers_after_missing_close() {
    let closes: Vec<f64> = (0..60)
        .map(|i| 100.0 + i as f64 - if i % 3 == 0 { 2.5 } else { 0.0 })
        .collect();
    let clean = calculate_rsi_default(&candles_from_closes(&closes)).unwrap();

    let mut candles = candles_from_closes(&closes);
    candles[20].close = f64::NAN;
    let gapped = calculate_rsi_default(&candles).unwrap();

    assert_eq!(&gapped.values[..20], &clean.values[..20]);
    // both changes touching the missing close are undefined
    assert_eq!(gapped.values[20], None);
    assert_eq!(gapped.values[21], None);
    assert!(gapped.values[22..].iter().all(Option::is_some));
    assert!(gapped
        .values
        .iter()
        .flatten()
        .all(|v| (0.0..=100.0).contains(v)));
}
