use serde_json::Value;
use trademind_chart_core::AppError;
use trademind_chart_core::presentation::wasm_api::{
    atr_json, bollinger_json, ema_group_json, indicator_styles_json, indicators_json, macd_json,
    rsi_json, sma_json, timeframe_info_json, toggle_indicator_json,
};

fn candles_json(n: usize) -> String {
    let bars: Vec<Value> = (0..n)
        .map(|i| {
            let close = 100.0 + i as f64;
            serde_json::json!({
                "time": i as i64 * 180,
                "open": close,
                "high": close + 1.0,
                "low": close - 1.0,
                "close": close,
                "volume": 12.5
            })
        })
        .collect();
    Value::Array(bars).to_string()
}

fn parse(json: &str) -> Value {
    serde_json::from_str(json).unwrap()
}

#[test]
fn full_bundle_for_every_indicator() {
    let config = r#"{"timeframe":"4h","indicators":["EMA","BOLL","MACD","RSI","ATR"],
                     "showVolume":false,"showEquityCurve":true}"#;
    let bundle = parse(&indicators_json(&candles_json(60), Some(config), None).unwrap());

    assert_eq!(bundle["emaGroup"]["ema20"].as_array().map(Vec::len), Some(41));
    assert_eq!(bundle["emaGroup"]["ema50"].as_array().map(Vec::len), Some(11));
    assert_eq!(bundle["bollinger"].as_array().map(Vec::len), Some(41));
    assert_eq!(bundle["macd"].as_array().map(Vec::len), Some(27));
    assert_eq!(bundle["rsi"].as_array().map(Vec::len), Some(46));
    assert_eq!(bundle["atr"].as_array().map(Vec::len), Some(46));
    assert_eq!(bundle["macd"][0]["histogram"], 0.0);
}

#[test]
fn missing_config_uses_the_default_toolbar() {
    let bundle = parse(&indicators_json(&candles_json(30), None, None).unwrap());
    let keys: Vec<&str> = bundle.as_object().unwrap().keys().map(String::as_str).collect();
    assert_eq!(keys, vec!["emaGroup"]);
}

#[test]
fn settings_change_indicator_periods() {
    let config =
        r#"{"timeframe":"3m","indicators":["ATR"],"showVolume":true,"showEquityCurve":false}"#;
    let settings = r#"{"atrPeriod":5}"#;
    let bundle = parse(&indicators_json(&candles_json(10), Some(config), Some(settings)).unwrap());
    assert_eq!(bundle["atr"].as_array().map(Vec::len), Some(5));
}

#[test]
fn per_indicator_exports() {
    let candles = candles_json(40);
    assert_eq!(parse(&ema_group_json(&candles).unwrap())["ema20"][0]["value"], 109.5);
    assert_eq!(parse(&rsi_json(&candles).unwrap())[0]["rsi14"], 100.0);
    assert_eq!(parse(&atr_json(&candles, None).unwrap())[0]["value"], 2.0);

    let macd = parse(&macd_json(&candles, Some(r#"{"fast":3,"slow":6,"signal":3}"#)).unwrap());
    assert_eq!(macd[0]["macd"], 1.5);

    let bands = parse(&bollinger_json(&candles, Some(r#"{"period":10,"stdDev":0}"#)).unwrap());
    assert_eq!(bands.as_array().map(Vec::len), Some(31));
    assert_eq!(bands[0]["upper"], bands[0]["lower"]);
    assert_eq!(bands[0]["middle"], 104.5);
}

#[test]
fn malformed_input_is_reported() {
    assert!(matches!(rsi_json("not json"), Err(AppError::Serialization(_))));
    let backwards = r#"[{"time":10,"open":1,"high":1,"low":1,"close":1},
                        {"time":5,"open":1,"high":1,"low":1,"close":1}]"#;
    assert!(matches!(ema_group_json(backwards), Err(AppError::Series(_))));
    assert!(matches!(timeframe_info_json("1d"), Err(AppError::Configuration(_))));
}

#[test]
fn toolbar_helpers() {
    let config = parse(&toggle_indicator_json(None, "MACD").unwrap());
    assert_eq!(config["indicators"], serde_json::json!(["EMA", "MACD"]));
    assert_eq!(config["timeframe"], "3m");

    let info = parse(&timeframe_info_json("4h").unwrap());
    assert_eq!(info["minutes"], 240);
    assert_eq!(info["fetchLimit"], 100);
    assert_eq!(info["durationSecs"], 14_400);
}

#[test]
fn zero_periods_degrade_to_empty_series() {
    let candles = candles_json(30);
    assert_eq!(sma_json(&candles, 0).unwrap(), "[]");
    assert_eq!(atr_json(&candles, Some(0)).unwrap(), "[]");
    assert_eq!(bollinger_json(&candles, Some(r#"{"period":0,"stdDev":2}"#)).unwrap(), "[]");
    assert_eq!(parse(&sma_json(&candles, 5).unwrap()).as_array().map(Vec::len), Some(26));
}

#[test]
fn styles_cover_the_toolbar_in_order() {
    let styles = parse(&indicator_styles_json().unwrap());
    let names: Vec<&str> = styles
        .as_array()
        .unwrap()
        .iter()
        .map(|style| style["indicator"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["EMA", "MACD", "RSI", "ATR", "BOLL"]);

    assert_eq!(styles[0]["placement"], "mainChart");
    assert_eq!(styles[0]["colors"]["ema20"], "#f59e0b");
    assert_eq!(styles[0]["colors"]["ema50"], "#3b82f6");
    assert_eq!(styles[2]["placement"], "subChart");
    assert_eq!(styles[2]["levels"]["overbought"], 70.0);
    assert!(styles[0].get("levels").is_none());
    assert_eq!(styles[4]["label"], "BOLL (20,2)");
    assert_eq!(styles[4]["colors"]["fill"], "rgba(107, 114, 128, 0.1)");
}
