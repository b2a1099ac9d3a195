use super::points::{AtrPoint, round2};
use crate::domain::market_data::Candle;

/// Average True Range with Wilder smoothing. First value is the plain mean
/// of the first `period` true ranges, stamped at `candles[period].time`.
pub fn calculate_atr(candles: &[Candle], period: usize) -> Vec<AtrPoint> {
    if period == 0 || candles.len() < period + 1 {
        return Vec::new();
    }

    let true_ranges: Vec<f64> = candles.windows(2).map(|pair| true_range(&pair[1], pair[0].close)).collect();

    let p = period as f64;
    let mut atr = true_ranges[..period].iter().sum::<f64>() / p;

    let mut points = Vec::with_capacity(true_ranges.len() - period + 1);
    points.push(AtrPoint { time: candles[period].time, value: round2(atr) });

    for (i, tr) in true_ranges.iter().enumerate().skip(period) {
        atr = (atr * (p - 1.0) + tr) / p;
        points.push(AtrPoint { time: candles[i + 1].time, value: round2(atr) });
    }

    points
}

/// `max(high - low, |high - prev_close|, |low - prev_close|)`
#[inline]
pub fn true_range(candle: &Candle, prev_close: f64) -> f64 {
    (candle.high - candle.low)
        .max((candle.high - prev_close).abs())
        .max((candle.low - prev_close).abs())
}
