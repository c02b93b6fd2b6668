//! Unit tests for Bollinger Bands

use finboard::indicators::volatility::{calculate_bollinger_bands, calculate_bollinger_bands_default};
use finboard::indicators::IndicatorError;
use finboard::models::BollingerParams;

use crate::support::{assert_close_opt, candles_from_closes, noisy_candles, rising_closes};

#[test]
fn test_bollinger_values() {
    let candles = candles_from_closes(&[1.0, 2.0, 3.0, 4.0, 5.0]);
    let params = BollingerParams {
        period: 3,
        mult: 2.0,
    };
    let bb = calculate_bollinger_bands(&candles, &params).unwrap();

    assert_eq!(bb.middle[1], None);
    // sample std of three consecutive integers is 1
    assert_close_opt(bb.middle[2], 2.0);
    assert_close_opt(bb.upper[2], 4.0);
    assert_close_opt(bb.lower[2], 0.0);
    assert_close_opt(bb.middle[4], 4.0);
    assert_close_opt(bb.upper[4], 6.0);
}

#[test]
fn test_bollinger_band_ordering() {
    let candles = noisy_candles(100);
    let bb = calculate_bollinger_bands_default(&candles).unwrap();

    assert!(bb.middle[..19].iter().all(Option::is_none));
    for i in 19..candles.len() {
        let (upper, middle, lower) = (bb.upper[i].unwrap(), bb.middle[i].unwrap(), bb.lower[i].unwrap());
        assert!(lower <= middle && middle <= upper);
    }
}

#[test]
fn test_bollinger_flat_prices_collapse() {
    let candles = candles_from_closes(&[42.0; 25]);
    let bb = calculate_bollinger_bands_default(&candles).unwrap();
    assert_eq!(bb.upper[24], bb.lower[24]);
    assert_eq!(bb.middle[24], Some(42.0));
}

#[test]
fn test_bollinger_invalid_params() {
    let candles = candles_from_closes(&rising_closes(30, 10.0, 1.0));
    for params in [
        BollingerParams {
            period: 0,
            mult: 2.0,
        },
        BollingerParams {
            period: 20,
            mult: -1.0,
        },
    ] {
        assert!(matches!(
            calculate_bollinger_bands(&candles, &params),
            Err(IndicatorError::InvalidParameter(_))
        ));
    }
}
