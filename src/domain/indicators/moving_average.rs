use super::metadata::EMA_PERIODS;
use super::points::{EmaGroup, MaPoint, round2};
use crate::domain::market_data::Candle;

/// Simple moving average of closes.
///
/// One point per bar from index `period - 1`, so `len - period + 1` points.
/// Empty when `period == 0` or there are fewer than `period` candles.
pub fn calculate_sma(candles: &[Candle], period: usize) -> Vec<MaPoint> {
    if period == 0 || candles.len() < period {
        return Vec::new();
    }

    // summed per window, no running total
    candles
        .windows(period)
        .map(|window| {
            let sum: f64 = window.iter().map(|c| c.close).sum();
            MaPoint { time: window[period - 1].time, value: round2(sum / period as f64) }
        })
        .collect()
}

/// Exponential moving average of closes, seeded with the SMA of the first
/// `period` closes and smoothed with `k = 2 / (period + 1)`.
///
/// The recursion carries unrounded values; only emitted points are rounded.
pub fn calculate_ema(candles: &[Candle], period: usize) -> Vec<MaPoint> {
    if period == 0 || candles.len() < period {
        return Vec::new();
    }

    let k = 2.0 / (period as f64 + 1.0);
    let mut ema = candles[..period].iter().map(|c| c.close).sum::<f64>() / period as f64;

    let mut points = Vec::with_capacity(candles.len() - period + 1);
    points.push(MaPoint { time: candles[period - 1].time, value: round2(ema) });

    for candle in &candles[period..] {
        ema = (candle.close - ema) * k + ema;
        points.push(MaPoint { time: candle.time, value: round2(ema) });
    }

    points
}

/// EMA(20) and EMA(50). No alignment between the two is performed.
pub fn calculate_ema_group(candles: &[Candle]) -> EmaGroup {
    let [fast, slow] = EMA_PERIODS;
    EmaGroup { ema20: calculate_ema(candles, fast), ema50: calculate_ema(candles, slow) }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ramp(n: usize) -> Vec<Candle> {
        (0..n)
            .map(|i| {
                let close = 100.0 + i as f64;
                Candle::new(i as i64 * 180, close, close, close, close)
            })
            .collect()
    }

    #[test]
    fn sma_of_ramp_ends_at_window_mean() {
        let sma = calculate_sma(&ramp(30), 5);
        assert_eq!(sma.len(), 26);
        assert_eq!(sma.last().unwrap().value, 127.0);
        assert_eq!(sma[0], MaPoint { time: 4 * 180, value: 102.0 });
    }

    #[test]
    fn sma_period_one_is_identity() {
        let candles = ramp(10);
        let sma = calculate_sma(&candles, 1);
        let closes: Vec<f64> = candles.iter().map(|c| c.close).collect();
        let values: Vec<f64> = sma.iter().map(|p| p.value).collect();
        assert_eq!(values, closes);
    }

    #[test]
    fn ema_seed_is_sma_of_first_window() {
        let ema = calculate_ema(&ramp(12), 10);
        assert_eq!(ema.len(), 3);
        assert_eq!(ema[0], MaPoint { time: 9 * 180, value: 104.5 });
        // 104.5 + (110 - 104.5) * 2/11
        assert_eq!(ema[1].value, 105.5);
    }

    #[test]
    fn short_or_degenerate_input_is_empty() {
        assert!(calculate_sma(&ramp(4), 5).is_empty());
        assert!(calculate_ema(&ramp(4), 5).is_empty());
        assert!(calculate_sma(&ramp(4), 0).is_empty());
        assert!(calculate_ema(&ramp(4), 0).is_empty());
        assert!(calculate_sma(&[], 3).is_empty());
    }

    #[test]
    fn ema_group_uses_independent_warm_ups() {
        let group = calculate_ema_group(&ramp(60));
        assert_eq!(group.ema20.len(), 41);
        assert_eq!(group.ema50.len(), 11);
        assert_eq!(group.ema20[0].time, 19 * 180);
        assert_eq!(group.ema50[0].time, 49 * 180);
    }
}
