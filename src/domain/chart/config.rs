use crate::domain::market_data::Timeframe;
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, EnumIter, EnumString};

/// Where an indicator is drawn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Placement {
    /// Overlaid on the candlestick chart
    MainChart,
    /// Own pane below the main chart, time axis synced to it
    SubChart,
}

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    EnumIter,
    EnumString,
    AsRefStr,
    Serialize,
    Deserialize,
)]
#[strum(serialize_all = "UPPERCASE")]
#[serde(rename_all = "UPPERCASE")]
pub enum IndicatorType {
    Ema,
    Macd,
    Rsi,
    Atr,
    Boll,
}

impl IndicatorType {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Ema => "EMA (20/50)",
            Self::Macd => "MACD (12,26,9)",
            Self::Rsi => "RSI (7/14)",
            Self::Atr => "ATR (14)",
            Self::Boll => "BOLL (20,2)",
        }
    }

    pub fn placement(&self) -> Placement {
        match self {
            Self::Ema | Self::Boll => Placement::MainChart,
            Self::Macd | Self::Rsi | Self::Atr => Placement::SubChart,
        }
    }
}

/// What the user selected in the chart toolbar
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartConfig {
    pub timeframe: Timeframe,
    pub indicators: Vec<IndicatorType>,
    pub show_volume: bool,
    pub show_equity_curve: bool,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            timeframe: Timeframe::ThreeMinutes,
            indicators: vec![IndicatorType::Ema],
            show_volume: true,
            show_equity_curve: false,
        }
    }
}

impl ChartConfig {
    pub fn set_timeframe(&mut self, timeframe: Timeframe) {
        self.timeframe = timeframe;
    }

    /// Add the indicator if absent, remove it otherwise. Order of the
    /// remaining indicators is kept.
    pub fn toggle_indicator(&mut self, indicator: IndicatorType) {
        if let Some(pos) = self.indicators.iter().position(|i| *i == indicator) {
            self.indicators.remove(pos);
        } else {
            self.indicators.push(indicator);
        }
    }

    pub fn is_active(&self, indicator: IndicatorType) -> bool {
        self.indicators.contains(&indicator)
    }

    pub fn set_show_volume(&mut self, show: bool) {
        self.show_volume = show;
    }

    pub fn set_show_equity_curve(&mut self, show: bool) {
        self.show_equity_curve = show;
    }

    pub fn main_chart_indicators(&self) -> Vec<IndicatorType> {
        self.with_placement(Placement::MainChart)
    }

    pub fn sub_chart_indicators(&self) -> Vec<IndicatorType> {
        self.with_placement(Placement::SubChart)
    }

    fn with_placement(&self, placement: Placement) -> Vec<IndicatorType> {
        self.indicators.iter().copied().filter(|i| i.placement() == placement).collect()
    }
}
