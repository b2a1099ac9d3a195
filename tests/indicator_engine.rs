use trademind_chart_core::domain::indicators::{
    BOLLINGER_PARAMS, BollingerParams, MACD_PARAMS, MacdAlignment, calculate_atr,
    calculate_bollinger, calculate_ema, calculate_ema_group, calculate_macd, calculate_rsi,
    calculate_single_rsi, calculate_sma,
};
use trademind_chart_core::domain::market_data::{Candle, CandleSeries, Timeframe};

const STEP: i64 = 180;

fn make_candle(i: usize, close: f64) -> Candle {
    Candle::new(i as i64 * STEP, close, close + 1.0, close - 1.0, close)
}

/// Closes 100, 101, ... with high/low one point away
fn rising(n: usize) -> Vec<Candle> {
    (0..n).map(|i| make_candle(i, 100.0 + i as f64)).collect()
}

fn flat(n: usize, price: f64) -> Vec<Candle> {
    (0..n).map(|i| Candle::new(i as i64 * STEP, price, price, price, price)).collect()
}

#[test]
fn sma_over_thirty_rising_bars() {
    let sma = calculate_sma(&rising(30), 5);
    assert_eq!(sma.len(), 26);
    assert_eq!(sma[0].time, 4 * STEP);
    assert_eq!(sma[0].value, 102.0);
    assert_eq!(sma.last().map(|p| p.value), Some(127.0));
}

#[test]
fn rsi_of_a_strict_uptrend_is_100() {
    let rsi = calculate_rsi(&rising(30));
    assert_eq!(rsi.len(), 16);
    assert_eq!(rsi[0].time, 14 * STEP);
    assert!(rsi.iter().all(|p| p.rsi7 == 100.0 && p.rsi14 == 100.0));
    assert_eq!(calculate_single_rsi(&rising(30), 7).len(), 23);
}

#[test]
fn ema_tracks_a_linear_trend_with_constant_lag() {
    // lag of EMA(n) behind a slope-1 line is (n - 1) / 2
    let ema = calculate_ema(&rising(30), 20);
    assert_eq!(ema.len(), 11);
    assert_eq!(ema[0].value, 109.5);
    assert_eq!(ema.last().map(|p| p.value), Some(119.5));

    let group = calculate_ema_group(&rising(30));
    assert_eq!(group.ema20, ema);
    assert!(group.ema50.is_empty());
}

#[test]
fn macd_of_a_linear_trend_is_constant() {
    let macd = calculate_macd(&rising(60), &MACD_PARAMS);
    assert_eq!(macd.len(), 60 - 26 + 1 - 8);
    for point in &macd {
        assert_eq!(point.macd, 7.0);
        assert_eq!(point.signal, 7.0);
        assert_eq!(point.histogram, 0.0);
    }
}

#[test]
fn macd_alignments_agree_across_a_gap() {
    let mut candles = rising(80);
    let aligned = calculate_macd(&candles, &MACD_PARAMS);
    let by_time = calculate_macd(&candles, &MACD_PARAMS.with_alignment(MacdAlignment::ByTimestamp));
    assert_eq!(aligned, by_time);

    // drop one bar; series stays ordered but now has a hole
    candles.remove(10);
    let series = CandleSeries::try_from_sorted(candles).unwrap();
    let gaps = series.find_gaps(Timeframe::ThreeMinutes);
    assert_eq!(gaps.len(), 1);
    assert_eq!(gaps[0].missing_bars, 1);

    let positional = calculate_macd(series.as_slice(), &MACD_PARAMS);
    let joined =
        calculate_macd(series.as_slice(), &MACD_PARAMS.with_alignment(MacdAlignment::ByTimestamp));
    assert_eq!(positional.len(), joined.len());
    assert_eq!(positional.last().map(|p| p.time), joined.last().map(|p| p.time));
}

#[test]
fn atr_of_fixed_range_bars() {
    let atr = calculate_atr(&rising(30), 14);
    assert_eq!(atr.len(), 16);
    assert_eq!(atr[0].time, 14 * STEP);
    assert!(atr.iter().all(|p| p.value == 2.0));
}

#[test]
fn bollinger_bands_of_a_linear_window() {
    let bands = calculate_bollinger(&rising(20), &BOLLINGER_PARAMS);
    assert_eq!(bands.len(), 1);
    let b = bands[0];
    assert_eq!(b.middle, 109.5);
    assert_eq!(b.upper, 121.03);
    assert_eq!(b.lower, 97.97);
}

#[test]
fn flat_series_collapses_bands_and_momentum() {
    let candles = flat(40, 50.0);
    let bands = calculate_bollinger(&candles, &BollingerParams { period: 10, std_dev: 2.0 });
    assert!(bands.iter().all(|b| b.upper == 50.0 && b.lower == 50.0));
    assert!(calculate_atr(&candles, 14).iter().all(|p| p.value == 0.0));
    assert!(calculate_macd(&candles, &MACD_PARAMS).iter().all(|p| p.histogram == 0.0));
}

#[test]
fn insufficient_history_yields_empty_series() {
    let candles = rising(10);
    assert!(calculate_sma(&candles, 11).is_empty());
    assert!(calculate_ema(&candles, 11).is_empty());
    assert!(calculate_macd(&candles, &MACD_PARAMS).is_empty());
    assert!(calculate_rsi(&candles).is_empty());
    assert!(calculate_atr(&candles, 10).is_empty());
    assert!(calculate_bollinger(&candles, &BOLLINGER_PARAMS).is_empty());
    assert!(calculate_sma(&[], 1).is_empty());
}

#[test]
fn inputs_are_not_mutated() {
    let candles = rising(40);
    let before = candles.clone();
    let _ = calculate_macd(&candles, &MACD_PARAMS);
    let _ = calculate_bollinger(&candles, &BOLLINGER_PARAMS);
    let _ = calculate_rsi(&candles);
    assert_eq!(candles, before);
}

#[test]
fn sma_snapshot() {
    let candles = vec![make_candle(0, 1.5), make_candle(1, 2.5), make_candle(2, 3.5)];
    insta::assert_debug_snapshot!(calculate_sma(&candles, 2), @r###"
    [
        MaPoint {
            time: 180,
            value: 2.0,
        },
        MaPoint {
            time: 360,
            value: 3.0,
        },
    ]
    "###);
}

#[test]
fn later_bars_never_change_earlier_points() {
    let mut candles = rising(40);
    candles.extend((40..60).map(|i| make_candle(i, 1000.0 - i as f64 * 7.0)));
    let prefix = &candles[..40];

    let full_ema = calculate_ema(&candles, 20);
    let head = calculate_ema(prefix, 20);
    assert_eq!(&full_ema[..head.len()], head.as_slice());
    let full_macd = calculate_macd(&candles, &MACD_PARAMS);
    let head = calculate_macd(prefix, &MACD_PARAMS);
    assert_eq!(&full_macd[..head.len()], head.as_slice());
    let full_rsi = calculate_rsi(&candles);
    let head = calculate_rsi(prefix);
    assert_eq!(&full_rsi[..head.len()], head.as_slice());
}
