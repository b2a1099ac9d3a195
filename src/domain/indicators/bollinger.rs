use super::metadata::BollingerParams;
use super::points::{BollingerPoint, round2};
use crate::domain::market_data::Candle;

/// Bollinger Bands around the SMA of closes.
///
/// σ is the population standard deviation (divide by `period`) of the
/// window's closes around the rounded middle band. A negative `std_dev`
/// multiplier is taken by magnitude so the bands never cross.
pub fn calculate_bollinger(candles: &[Candle], params: &BollingerParams) -> Vec<BollingerPoint> {
    let BollingerParams { period, std_dev } = *params;
    if period == 0 || candles.len() < period {
        return Vec::new();
    }

    let p = period as f64;
    let width = std_dev.abs();
    candles
        .windows(period)
        .map(|window| {
            let middle = round2(window.iter().map(|c| c.close).sum::<f64>() / p);
            let variance = window.iter().map(|c| (c.close - middle).powi(2)).sum::<f64>() / p;
            let sigma = variance.sqrt();
            BollingerPoint {
                time: window[period - 1].time,
                upper: round2(middle + width * sigma),
                middle,
                lower: round2(middle - width * sigma),
            }
        })
        .collect()
}
