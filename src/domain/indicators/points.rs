use serde::{Deserialize, Serialize};

/// Single-valued line point: SMA, EMA, single-period RSI
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MaPoint {
    pub time: i64,
    pub value: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MacdPoint {
    pub time: i64,
    pub macd: f64,
    pub signal: f64,
    pub histogram: f64,
}

/// Emitted only for bars where both RSI(7) and RSI(14) exist
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RsiPoint {
    pub time: i64,
    pub rsi7: f64,
    pub rsi14: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AtrPoint {
    pub time: i64,
    pub value: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BollingerPoint {
    pub time: i64,
    pub upper: f64,
    pub middle: f64,
    pub lower: f64,
}

/// EMA(20) and EMA(50), each with its own warm-up
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EmaGroup {
    pub ema20: Vec<MaPoint>,
    pub ema50: Vec<MaPoint>,
}

/// Round to two decimals, the display precision of every indicator value.
#[inline]
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
