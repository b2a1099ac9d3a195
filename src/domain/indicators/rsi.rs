use super::metadata::RSI_PERIODS;
use super::points::{MaPoint, RsiPoint, round2};
use crate::domain::market_data::Candle;
use std::collections::HashMap;

/// RSI over one period with Wilder smoothing.
///
/// The first value averages the first `period` close-to-close changes and is
/// stamped at `candles[period].time`. Empty when `period == 0` or there are
/// fewer than `period + 1` candles.
pub fn calculate_single_rsi(candles: &[Candle], period: usize) -> Vec<MaPoint> {
    if period == 0 || candles.len() < period + 1 {
        return Vec::new();
    }

    let (gains, losses): (Vec<f64>, Vec<f64>) = candles
        .windows(2)
        .map(|pair| {
            let change = pair[1].close - pair[0].close;
            (change.max(0.0), (-change).max(0.0))
        })
        .unzip();

    let p = period as f64;
    let mut avg_gain = gains[..period].iter().sum::<f64>() / p;
    let mut avg_loss = losses[..period].iter().sum::<f64>() / p;

    let mut points = Vec::with_capacity(gains.len() - period + 1);
    points.push(MaPoint { time: candles[period].time, value: round2(rsi(avg_gain, avg_loss)) });

    for i in period..gains.len() {
        avg_gain = (avg_gain * (p - 1.0) + gains[i]) / p;
        avg_loss = (avg_loss * (p - 1.0) + losses[i]) / p;
        points.push(MaPoint { time: candles[i + 1].time, value: round2(rsi(avg_gain, avg_loss)) });
    }

    points
}

/// RSI(7) and RSI(14) joined on identical timestamps. Output follows the
/// RSI(14) series, which starts later.
pub fn calculate_rsi(candles: &[Candle]) -> Vec<RsiPoint> {
    let [short, long] = RSI_PERIODS;
    let rsi7: HashMap<i64, f64> =
        calculate_single_rsi(candles, short).into_iter().map(|p| (p.time, p.value)).collect();

    calculate_single_rsi(candles, long)
        .into_iter()
        .filter_map(|p| {
            rsi7.get(&p.time).map(|&rsi7| RsiPoint { time: p.time, rsi7, rsi14: p.value })
        })
        .collect()
}

#[inline]
fn rsi(avg_gain: f64, avg_loss: f64) -> f64 {
    if avg_loss == 0.0 { 100.0 } else { 100.0 - 100.0 / (1.0 + avg_gain / avg_loss) }
}
