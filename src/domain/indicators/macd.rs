use super::metadata::{MacdAlignment, MacdParams};
use super::moving_average::calculate_ema;
use super::points::{MacdPoint, MaPoint, round2};
use crate::domain::market_data::Candle;
use std::collections::HashMap;

/// MACD line, signal line and histogram.
///
/// The MACD line is `fast EMA - slow EMA` over the emitted (rounded) EMA
/// values. The signal line smooths it with `k = 2 / (signal + 1)`, seeded by
/// the plain mean of the first `signal` MACD values, and output starts at
/// MACD index `signal - 1`. The histogram is taken from the rounded MACD and
/// signal values, so `histogram == macd - signal` for every point.
///
/// Empty when any period is zero, `fast > slow`, fewer than `slow` candles
/// are given, or the MACD line is shorter than `signal`.
pub fn calculate_macd(candles: &[Candle], params: &MacdParams) -> Vec<MacdPoint> {
    let MacdParams { fast, slow, signal, alignment } = *params;
    if fast == 0 || slow == 0 || signal == 0 || fast > slow || candles.len() < slow {
        return Vec::new();
    }

    let fast_ema = calculate_ema(candles, fast);
    let slow_ema = calculate_ema(candles, slow);
    let line = match alignment {
        MacdAlignment::Positional => align_by_position(&fast_ema, &slow_ema, slow - fast),
        MacdAlignment::ByTimestamp => align_by_timestamp(&fast_ema, &slow_ema),
    };

    if line.len() < signal {
        return Vec::new();
    }

    let k = 2.0 / (signal as f64 + 1.0);
    let mut signal_value = line[..signal].iter().map(|(_, v)| v).sum::<f64>() / signal as f64;

    let mut points = Vec::with_capacity(line.len() - signal + 1);
    for (i, &(time, macd)) in line.iter().enumerate().skip(signal - 1) {
        if i >= signal {
            signal_value = (macd - signal_value) * k + signal_value;
        }
        let macd = round2(macd);
        let signal = round2(signal_value);
        points.push(MacdPoint { time, macd, signal, histogram: round2(macd - signal) });
    }

    points
}

/// Pair `slow[i]` with `fast[i + offset]`. A missing bar in either input
/// shifts every later pair.
fn align_by_position(fast: &[MaPoint], slow: &[MaPoint], offset: usize) -> Vec<(i64, f64)> {
    slow.iter().zip(fast.iter().skip(offset)).map(|(s, f)| (s.time, f.value - s.value)).collect()
}

fn align_by_timestamp(fast: &[MaPoint], slow: &[MaPoint]) -> Vec<(i64, f64)> {
    let fast_by_time: HashMap<i64, f64> = fast.iter().map(|p| (p.time, p.value)).collect();
    slow.iter()
        .filter_map(|s| fast_by_time.get(&s.time).map(|f| (s.time, f - s.value)))
        .collect()
}
