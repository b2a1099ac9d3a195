//! Default parameters, reference levels and the color table the rendering
//! layer uses to draw each derived series.

use crate::domain::chart::Color;
use serde::{Deserialize, Serialize};

pub const EMA_PERIODS: [usize; 2] = [20, 50];
pub const RSI_PERIODS: [usize; 2] = [7, 14];
pub const ATR_PERIOD: usize = 14;

/// How the fast and slow EMA lines are paired before subtracting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MacdAlignment {
    /// Drop the first `slow - fast` fast points and pair by index.
    /// Assumes gap-free, one-point-per-bar input.
    #[default]
    Positional,
    /// Pair points with identical timestamps.
    ByTimestamp,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MacdParams {
    pub fast: usize,
    pub slow: usize,
    pub signal: usize,
    #[serde(default)]
    pub alignment: MacdAlignment,
}

pub const MACD_PARAMS: MacdParams =
    MacdParams { fast: 12, slow: 26, signal: 9, alignment: MacdAlignment::Positional };

impl Default for MacdParams {
    fn default() -> Self {
        MACD_PARAMS
    }
}

impl MacdParams {
    pub fn with_alignment(self, alignment: MacdAlignment) -> Self {
        Self { alignment, ..self }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BollingerParams {
    pub period: usize,
    pub std_dev: f64,
}

pub const BOLLINGER_PARAMS: BollingerParams = BollingerParams { period: 20, std_dev: 2.0 };

impl Default for BollingerParams {
    fn default() -> Self {
        BOLLINGER_PARAMS
    }
}

/// Horizontal guide lines drawn on the RSI pane
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RsiLevels {
    pub overbought: f64,
    pub oversold: f64,
    pub middle: f64,
}

pub const RSI_LEVELS: RsiLevels = RsiLevels { overbought: 70.0, oversold: 30.0, middle: 50.0 };

pub struct EmaColors {
    pub ema20: Color,
    pub ema50: Color,
}

pub const EMA_COLORS: EmaColors =
    EmaColors { ema20: Color::from_rgb8(0xf5, 0x9e, 0x0b), ema50: Color::from_rgb8(0x3b, 0x82, 0xf6) };

pub struct MacdColors {
    pub macd: Color,
    pub signal: Color,
    pub histogram_up: Color,
    pub histogram_down: Color,
}

pub const MACD_COLORS: MacdColors = MacdColors {
    macd: Color::from_rgb8(0x3b, 0x82, 0xf6),
    signal: Color::from_rgb8(0xf5, 0x9e, 0x0b),
    histogram_up: Color::from_rgb8(0x22, 0xc5, 0x5e),
    histogram_down: Color::from_rgb8(0xef, 0x44, 0x44),
};

pub struct RsiColors {
    pub rsi7: Color,
    pub rsi14: Color,
    pub overbought: Color,
    pub oversold: Color,
    pub middle: Color,
}

pub const RSI_COLORS: RsiColors = RsiColors {
    rsi7: Color::from_rgb8(0xa8, 0x55, 0xf7),
    rsi14: Color::from_rgb8(0x06, 0xb6, 0xd4),
    overbought: Color::from_rgb8(0xef, 0x44, 0x44),
    oversold: Color::from_rgb8(0x22, 0xc5, 0x5e),
    middle: Color::from_rgb8(0x6b, 0x72, 0x80),
};

pub const ATR_COLOR: Color = Color::from_rgb8(0xf9, 0x73, 0x16);

pub struct BollingerColors {
    pub upper: Color,
    pub middle: Color,
    pub lower: Color,
    pub fill: Color,
}

pub const BOLLINGER_COLORS: BollingerColors = BollingerColors {
    upper: Color::from_rgb8(0xef, 0x44, 0x44),
    middle: Color::from_rgb8(0x6b, 0x72, 0x80),
    lower: Color::from_rgb8(0x22, 0xc5, 0x5e),
    fill: Color::from_rgb8(0x6b, 0x72, 0x80).with_alpha(0.1),
};

/// Histogram bars are green at or above zero, red below.
pub fn macd_histogram_color(histogram: f64) -> Color {
    if histogram >= 0.0 { MACD_COLORS.histogram_up } else { MACD_COLORS.histogram_down }
}
