//! Browser smoke tests for the WASM binding
//!
//! Run with `wasm-pack test --headless --chrome`.

#![cfg(target_arch = "wasm32")]

use emphcore::{version, EmphasisAnalyzer};
use wasm_bindgen::JsValue;
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

fn get(obj: &JsValue, key: &str) -> JsValue {
    js_sys::Reflect::get(obj, &JsValue::from_str(key)).unwrap()
}

#[wasm_bindgen_test]
fn test_version() {
    assert!(version().starts_with("emphcore v"));
}

#[wasm_bindgen_test]
fn test_analyze_returns_object() {
    let analyzer = EmphasisAnalyzer::js_new(JsValue::UNDEFINED).unwrap();
    let result = analyzer.js_analyze("cat dog cat dog cat", JsValue::NULL);

    assert!(result.is_object());
    assert_eq!(get(&result, "is_empty").as_bool(), Some(false));
    let counts = get(&result, "counts");
    assert_eq!(get(&counts, "repeat").as_f64(), Some(2.0));
}

#[wasm_bindgen_test]
fn test_garbage_config_uses_defaults() {
    let analyzer = EmphasisAnalyzer::js_new(JsValue::NULL).unwrap();
    let config = js_sys::JSON::parse(r#"{ "minRepeatCount": "abc", "minTokenLength": null }"#).unwrap();
    let result = analyzer.js_analyze("cat dog cat dog cat", config);
    let counts = get(&result, "counts");
    assert_eq!(get(&counts, "repeat").as_f64(), Some(2.0));
}

#[wasm_bindgen_test]
fn test_render_html() {
    let analyzer = EmphasisAnalyzer::js_new(JsValue::UNDEFINED).unwrap();
    let html = analyzer.js_render_html("**핵심** 정리", JsValue::UNDEFINED).unwrap();

    let highlighted = get(&html, "highlighted").as_string().unwrap();
    assert!(highlighted.contains("highlight"));
    assert!(get(&html, "repeatList").as_string().unwrap().contains("반복된 항목"));
}

#[wasm_bindgen_test]
fn test_custom_lexicon_json() {
    let analyzer = EmphasisAnalyzer::js_new(JsValue::from_str(r#"{ "emphasis_keywords": ["must"] }"#)).unwrap();
    assert_eq!(analyzer.markup_rule_count(), 0);
    let result = analyzer.js_analyze("You must read this.", JsValue::UNDEFINED);
    assert_eq!(get(&get(&result, "counts"), "context").as_f64(), Some(1.0));
}

#[wasm_bindgen_test]
fn test_invalid_lexicon_rejected() {
    assert!(EmphasisAnalyzer::js_new(JsValue::from_str("not json")).is_err());
}
