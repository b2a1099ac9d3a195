use crate::domain::chart::{ChartConfig, IndicatorType};
use crate::domain::indicators::{
    ATR_PERIOD, AtrPoint, BOLLINGER_PARAMS, BollingerParams, BollingerPoint, EmaGroup, MACD_PARAMS,
    MacdParams, MacdPoint, RsiPoint, calculate_atr, calculate_bollinger, calculate_ema_group,
    calculate_macd, calculate_rsi,
};
use crate::domain::logging::LogComponent;
use crate::domain::market_data::Candle;
use crate::log_debug;
use serde::{Deserialize, Serialize};

const COMPONENT: LogComponent = LogComponent::Application("IndicatorService");

/// Main-chart overlays
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OverlaySeries {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ema_group: Option<EmaGroup>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bollinger: Option<Vec<BollingerPoint>>,
}

/// Sub-chart panes
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PaneSeries {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub macd: Option<Vec<MacdPoint>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rsi: Option<Vec<RsiPoint>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub atr: Option<Vec<AtrPoint>>,
}

/// Everything one chart group renders for a config. Inactive indicators are
/// `None`; an active indicator without enough data is `Some(empty)`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct IndicatorBundle {
    #[serde(flatten)]
    pub overlays: OverlaySeries,
    #[serde(flatten)]
    pub panes: PaneSeries,
}

impl IndicatorBundle {
    pub fn is_empty(&self) -> bool {
        self.overlays == OverlaySeries::default() && self.panes == PaneSeries::default()
    }
}

/// Indicator parameters the service runs with
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct IndicatorSettings {
    pub macd: MacdParams,
    pub bollinger: BollingerParams,
    pub atr_period: usize,
}

impl Default for IndicatorSettings {
    fn default() -> Self {
        Self { macd: MACD_PARAMS, bollinger: BOLLINGER_PARAMS, atr_period: ATR_PERIOD }
    }
}

#[derive(Debug, Clone, Default)]
pub struct IndicatorService {
    settings: IndicatorSettings,
}

impl IndicatorService {
    pub fn new(settings: IndicatorSettings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &IndicatorSettings {
        &self.settings
    }

    /// Compute the series for every indicator active in `config`
    pub fn compute(&self, candles: &[Candle], config: &ChartConfig) -> IndicatorBundle {
        let main = config.main_chart_indicators();
        let sub = config.sub_chart_indicators();
        log_debug!(
            COMPONENT,
            "computing {} overlays and {} panes over {} candles",
            main.len(),
            sub.len(),
            candles.len()
        );

        #[cfg(feature = "parallel")]
        let (overlays, panes) = rayon::join(
            || self.compute_overlays(candles, &main),
            || self.compute_panes(candles, &sub),
        );
        #[cfg(not(feature = "parallel"))]
        let (overlays, panes) =
            (self.compute_overlays(candles, &main), self.compute_panes(candles, &sub));

        IndicatorBundle { overlays, panes }
    }

    fn compute_overlays(&self, candles: &[Candle], active: &[IndicatorType]) -> OverlaySeries {
        let mut overlays = OverlaySeries::default();
        for indicator in active {
            match indicator {
                IndicatorType::Ema => overlays.ema_group = Some(calculate_ema_group(candles)),
                IndicatorType::Boll => {
                    overlays.bollinger = Some(calculate_bollinger(candles, &self.settings.bollinger))
                }
                _ => {}
            }
        }
        overlays
    }

    fn compute_panes(&self, candles: &[Candle], active: &[IndicatorType]) -> PaneSeries {
        let mut panes = PaneSeries::default();
        for indicator in active {
            match indicator {
                IndicatorType::Macd => panes.macd = Some(calculate_macd(candles, &self.settings.macd)),
                IndicatorType::Rsi => panes.rsi = Some(calculate_rsi(candles)),
                IndicatorType::Atr => {
                    panes.atr = Some(calculate_atr(candles, self.settings.atr_period))
                }
                _ => {}
            }
        }
        panes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn trend(n: usize) -> Vec<Candle> {
        (0..n)
            .map(|i| {
                let c = 100.0 + i as f64;
                Candle::new(i as i64 * 180, c - 0.5, c + 1.0, c - 1.0, c)
            })
            .collect()
    }

    #[test]
    fn default_config_computes_only_ema() {
        let bundle = IndicatorService::default().compute(&trend(60), &ChartConfig::default());
        let group = bundle.overlays.ema_group.as_ref().map(|g| (g.ema20.len(), g.ema50.len()));
        assert_eq!(group, Some((41, 11)));
        assert!(bundle.overlays.bollinger.is_none());
        assert_eq!(bundle.panes, PaneSeries::default());
    }

    #[test]
    fn active_indicator_without_data_is_present_but_empty() {
        let mut config = ChartConfig::default();
        config.toggle_indicator(IndicatorType::Ema);
        config.toggle_indicator(IndicatorType::Macd);
        let bundle = IndicatorService::default().compute(&trend(10), &config);
        assert_eq!(bundle.panes.macd, Some(Vec::new()));
        assert!(bundle.overlays.ema_group.is_none());
        assert!(!bundle.is_empty());
    }

    #[test]
    fn settings_override_defaults() {
        let settings = IndicatorSettings { atr_period: 3, ..IndicatorSettings::default() };
        let mut config = ChartConfig::default();
        config.toggle_indicator(IndicatorType::Atr);
        let bundle = IndicatorService::new(settings).compute(&trend(5), &config);
        assert_eq!(bundle.panes.atr.map(|a| a.len()), Some(2));
    }

    #[test]
    fn inactive_indicators_are_skipped_in_json() {
        let mut config = ChartConfig::default();
        config.toggle_indicator(IndicatorType::Ema);
        config.toggle_indicator(IndicatorType::Rsi);
        let bundle = IndicatorService::default().compute(&trend(20), &config);
        let json = serde_json::to_value(&bundle).unwrap_or_default();
        let keys: Vec<_> = json.as_object().map(|o| o.keys().cloned().collect()).unwrap_or_default();
        assert_eq!(keys, vec!["rsi".to_string()]);
    }
}
