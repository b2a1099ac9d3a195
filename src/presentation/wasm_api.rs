//! JavaScript bridge. Candles cross the boundary as JSON arrays of
//! `{ time, open, high, low, close, volume? }` and indicator series come back
//! as JSON strings.
//!
//! Each export is a thin wrapper over a plain Rust function returning
//! [`AppResult`], so the conversion logic is usable and testable off wasm.

use crate::application::{IndicatorService, IndicatorSettings};
use crate::domain::chart::{ChartConfig, Color, IndicatorType, Placement};
use crate::domain::errors::{AppError, AppResult};
use crate::domain::indicators::{
    ATR_COLOR, ATR_PERIOD, BOLLINGER_COLORS, BollingerParams, EMA_COLORS, MACD_COLORS,
    MacdParams, RSI_COLORS, RSI_LEVELS, RsiLevels, calculate_atr, calculate_bollinger,
    calculate_ema_group, calculate_macd, calculate_rsi, calculate_sma, macd_histogram_color,
};
use crate::domain::logging::LogComponent;
use crate::domain::market_data::{Candle, CandleSeries, Timeframe};
use crate::log_warn;
use serde::Serialize;
use std::collections::BTreeMap;
use std::str::FromStr;
use strum::IntoEnumIterator;
use wasm_bindgen::prelude::*;

const COMPONENT: LogComponent = LogComponent::Presentation("WasmApi");

/// Parse candle JSON into a validated series
pub fn parse_candles(candles_json: &str) -> AppResult<CandleSeries> {
    let candles: Vec<Candle> = serde_json::from_str(candles_json)?;
    let series = CandleSeries::try_from_sorted(candles)?;
    let inconsistent = series.inconsistent_count();
    if inconsistent > 0 {
        log_warn!(COMPONENT, "{} candles have open/close outside high/low", inconsistent);
    }
    Ok(series)
}

/// Parse an optional JSON object, falling back to `T::default()` for a
/// missing or blank value
fn parse_or_default<T>(json: Option<&str>) -> AppResult<T>
where
    T: serde::de::DeserializeOwned + Default,
{
    match json.map(str::trim) {
        Some(text) if !text.is_empty() => Ok(serde_json::from_str(text)?),
        _ => Ok(T::default()),
    }
}

fn to_json<T: Serialize>(value: &T) -> AppResult<String> {
    Ok(serde_json::to_string(value)?)
}

pub fn indicators_json(
    candles_json: &str,
    config_json: Option<&str>,
    settings_json: Option<&str>,
) -> AppResult<String> {
    let series = parse_candles(candles_json)?;
    let config: ChartConfig = parse_or_default(config_json)?;
    let settings: IndicatorSettings = parse_or_default(settings_json)?;
    to_json(&IndicatorService::new(settings).compute(series.as_slice(), &config))
}

pub fn sma_json(candles_json: &str, period: usize) -> AppResult<String> {
    to_json(&calculate_sma(parse_candles(candles_json)?.as_slice(), period))
}

pub fn ema_group_json(candles_json: &str) -> AppResult<String> {
    to_json(&calculate_ema_group(parse_candles(candles_json)?.as_slice()))
}

pub fn macd_json(candles_json: &str, params_json: Option<&str>) -> AppResult<String> {
    let params: MacdParams = parse_or_default(params_json)?;
    if params.fast > params.slow {
        log_warn!(COMPONENT, "MACD fast period {} exceeds slow {}", params.fast, params.slow);
    }
    to_json(&calculate_macd(parse_candles(candles_json)?.as_slice(), &params))
}

pub fn rsi_json(candles_json: &str) -> AppResult<String> {
    to_json(&calculate_rsi(parse_candles(candles_json)?.as_slice()))
}

pub fn atr_json(candles_json: &str, period: Option<usize>) -> AppResult<String> {
    let period = period.unwrap_or(ATR_PERIOD);
    to_json(&calculate_atr(parse_candles(candles_json)?.as_slice(), period))
}

pub fn bollinger_json(candles_json: &str, params_json: Option<&str>) -> AppResult<String> {
    let params: BollingerParams = parse_or_default(params_json)?;
    to_json(&calculate_bollinger(parse_candles(candles_json)?.as_slice(), &params))
}

/// Apply a toolbar toggle (`"EMA"`, `"MACD"`, ...) to a serialized config
pub fn toggle_indicator_json(config_json: Option<&str>, indicator: &str) -> AppResult<String> {
    let mut config: ChartConfig = parse_or_default(config_json)?;
    config.toggle_indicator(IndicatorType::from_str(indicator)?);
    to_json(&config)
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct TimeframeInfo {
    label: &'static str,
    minutes: u32,
    duration_secs: i64,
    fetch_limit: usize,
}

pub fn timeframe_info_json(timeframe: &str) -> AppResult<String> {
    let timeframe = Timeframe::from_str(timeframe)?;
    to_json(&TimeframeInfo {
        label: timeframe.label(),
        minutes: timeframe.minutes(),
        duration_secs: timeframe.duration_secs(),
        fetch_limit: timeframe.default_fetch_limit(),
    })
}

/// Drawing hints for one toolbar entry
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct IndicatorStyle {
    indicator: IndicatorType,
    label: &'static str,
    placement: Placement,
    colors: BTreeMap<&'static str, String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    levels: Option<RsiLevels>,
}

fn palette(indicator: IndicatorType) -> Vec<(&'static str, Color)> {
    match indicator {
        IndicatorType::Ema => vec![("ema20", EMA_COLORS.ema20), ("ema50", EMA_COLORS.ema50)],
        IndicatorType::Macd => vec![
            ("macd", MACD_COLORS.macd),
            ("signal", MACD_COLORS.signal),
            ("histogramUp", MACD_COLORS.histogram_up),
            ("histogramDown", MACD_COLORS.histogram_down),
        ],
        IndicatorType::Rsi => vec![
            ("rsi7", RSI_COLORS.rsi7),
            ("rsi14", RSI_COLORS.rsi14),
            ("overbought", RSI_COLORS.overbought),
            ("oversold", RSI_COLORS.oversold),
            ("middle", RSI_COLORS.middle),
        ],
        IndicatorType::Atr => vec![("atr", ATR_COLOR)],
        IndicatorType::Boll => vec![
            ("upper", BOLLINGER_COLORS.upper),
            ("middle", BOLLINGER_COLORS.middle),
            ("lower", BOLLINGER_COLORS.lower),
            ("fill", BOLLINGER_COLORS.fill),
        ],
    }
}

/// Labels, placement and CSS colors for every indicator, in toolbar order
pub fn indicator_styles_json() -> AppResult<String> {
    let styles: Vec<IndicatorStyle> = IndicatorType::iter()
        .map(|indicator| IndicatorStyle {
            indicator,
            label: indicator.label(),
            placement: indicator.placement(),
            colors: palette(indicator)
                .into_iter()
                .map(|(name, color)| (name, color.to_css()))
                .collect(),
            levels: (indicator == IndicatorType::Rsi).then_some(RSI_LEVELS),
        })
        .collect();
    to_json(&styles)
}

fn js_error(error: AppError) -> JsValue {
    JsValue::from_str(&error.to_string())
}

#[wasm_bindgen(js_name = calculateIndicators)]
pub fn calculate_indicators(
    candles_json: &str,
    config_json: Option<String>,
    settings_json: Option<String>,
) -> Result<String, JsValue> {
    indicators_json(candles_json, config_json.as_deref(), settings_json.as_deref())
        .map_err(js_error)
}

#[wasm_bindgen(js_name = calculateSmaJson)]
pub fn calculate_sma_json(candles_json: &str, period: usize) -> Result<String, JsValue> {
    sma_json(candles_json, period).map_err(js_error)
}

#[wasm_bindgen(js_name = calculateEmaGroupJson)]
pub fn calculate_ema_group_json(candles_json: &str) -> Result<String, JsValue> {
    ema_group_json(candles_json).map_err(js_error)
}

#[wasm_bindgen(js_name = calculateMacdJson)]
pub fn calculate_macd_json(
    candles_json: &str,
    params_json: Option<String>,
) -> Result<String, JsValue> {
    macd_json(candles_json, params_json.as_deref()).map_err(js_error)
}

#[wasm_bindgen(js_name = calculateRsiJson)]
pub fn calculate_rsi_json(candles_json: &str) -> Result<String, JsValue> {
    rsi_json(candles_json).map_err(js_error)
}

#[wasm_bindgen(js_name = calculateAtrJson)]
pub fn calculate_atr_json(candles_json: &str, period: Option<usize>) -> Result<String, JsValue> {
    atr_json(candles_json, period).map_err(js_error)
}

#[wasm_bindgen(js_name = calculateBollingerJson)]
pub fn calculate_bollinger_json(
    candles_json: &str,
    params_json: Option<String>,
) -> Result<String, JsValue> {
    bollinger_json(candles_json, params_json.as_deref()).map_err(js_error)
}

#[wasm_bindgen(js_name = toggleIndicator)]
pub fn toggle_indicator(config_json: Option<String>, indicator: &str) -> Result<String, JsValue> {
    toggle_indicator_json(config_json.as_deref(), indicator).map_err(js_error)
}

#[wasm_bindgen(js_name = timeframeInfo)]
pub fn timeframe_info(timeframe: &str) -> Result<String, JsValue> {
    timeframe_info_json(timeframe).map_err(js_error)
}

#[wasm_bindgen(js_name = defaultIndicatorParams)]
pub fn default_indicator_params() -> Result<String, JsValue> {
    to_json(&IndicatorSettings::default()).map_err(js_error)
}

#[wasm_bindgen(js_name = indicatorStyles)]
pub fn indicator_styles() -> Result<String, JsValue> {
    indicator_styles_json().map_err(js_error)
}

/// CSS color for one MACD histogram bar
#[wasm_bindgen(js_name = macdHistogramColor)]
pub fn macd_histogram_css(histogram: f64) -> String {
    macd_histogram_color(histogram).to_css()
}
