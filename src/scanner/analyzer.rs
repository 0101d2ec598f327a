//! EmphasisAnalyzer: single entry point for highlight analysis
//!
//! One `analyze()` call runs every detector and returns spans, merged
//! segments and summary lists:
//! 1. Markup emphasis (MarkupCortex)
//! 2. Context phrases and keyword sentences (ContextCortex)
//! 3. Repeated words and phrases (RepetitionCortex)
//! 4. Summary lists and counts
//! 5. Span merging into a gapless segmentation
//!
//! Cortexes are compiled once when the analyzer is built and never mutated
//! afterwards, so every call is an independent, pure computation. Each
//! result carries a generation number; only the latest one is current.

use std::cell::Cell;

use serde::Serialize;
use wasm_bindgen::prelude::*;

use super::config::AnalysisConfig;
use super::context::ContextCortex;
use super::lexicon::{Lexicon, LexiconError};
use super::markup::MarkupCortex;
use super::merge;
use super::offsets::OffsetIndex;
use super::render::{self, RenderedHtml};
use super::repetition::RepetitionCortex;
use super::summary;
use super::types::{AnalysisResult, AnalysisStats, AnalysisTimings};

// =============================================================================
// EmphasisAnalyzer
// =============================================================================

/// Emphasis and repetition analyzer
#[wasm_bindgen]
pub struct EmphasisAnalyzer {
    markup: MarkupCortex,
    context: ContextCortex,
    repetition: RepetitionCortex,
    generation: Cell<u64>,
}

impl Default for EmphasisAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

#[wasm_bindgen]
impl EmphasisAnalyzer {
    /// Create an analyzer
    ///
    /// # Arguments
    /// * `lexicon` - Optional lexicon (JSON string or object). Omitted uses
    ///   the built-in Korean lexicon.
    #[wasm_bindgen(constructor)]
    pub fn js_new(lexicon: JsValue) -> Result<EmphasisAnalyzer, JsValue> {
        if lexicon.is_null() || lexicon.is_undefined() {
            return Ok(Self::new());
        }
        let lexicon = lexicon_from_js(lexicon)?;
        Self::with_lexicon(&lexicon).map_err(|e| JsValue::from_str(&format!("Invalid lexicon: {}", e)))
    }

    /// Create an analyzer from the built-in lexicon plus extra tables
    #[wasm_bindgen(js_name = withExtraLexicon)]
    pub fn js_with_extra_lexicon(extra: JsValue) -> Result<EmphasisAnalyzer, JsValue> {
        let extra = lexicon_from_js(extra)?;
        let lexicon = Lexicon::korean().with(extra);

        #[cfg(target_arch = "wasm32")]
        web_sys::console::log_1(&format!(
            "[EmphasisAnalyzer] Extended lexicon: {} keywords, {} stopwords, {} particles",
            lexicon.emphasis_keywords.len(),
            lexicon.stopwords.len(),
            lexicon.particles.len()
        ).into());

        Self::with_lexicon(&lexicon).map_err(|e| JsValue::from_str(&format!("Invalid lexicon: {}", e)))
    }

    /// Analyze text (JS binding)
    ///
    /// `config` may be omitted; thresholds that are missing or not numeric
    /// fall back to 2.
    #[wasm_bindgen(js_name = analyze)]
    pub fn js_analyze(&self, text: &str, config: JsValue) -> JsValue {
        let config = config_from_js(config);
        let result = self.analyze(text, &config);
        to_js(&result)
    }

    /// Analyze and render every view as HTML (JS binding)
    ///
    /// Returns `{ generation, highlighted, summary, emphasisList, repeatList }`.
    #[wasm_bindgen(js_name = renderHtml)]
    pub fn js_render_html(&self, text: &str, config: JsValue) -> Result<JsValue, JsValue> {
        let config = config_from_js(config);
        let (result, html) = self.render(text, &config);

        let out = js_sys::Object::new();
        js_sys::Reflect::set(&out, &"generation".into(), &JsValue::from_f64(result.generation as f64))?;
        js_sys::Reflect::set(&out, &"highlighted".into(), &JsValue::from_str(&html.highlighted))?;
        js_sys::Reflect::set(&out, &"summary".into(), &JsValue::from_str(&html.summary))?;
        js_sys::Reflect::set(&out, &"emphasisList".into(), &JsValue::from_str(&html.emphasis_list))?;
        js_sys::Reflect::set(&out, &"repeatList".into(), &JsValue::from_str(&html.repeat_list))?;
        Ok(out.into())
    }

    /// Generation number of the most recent analysis (0 before the first)
    #[wasm_bindgen(js_name = currentGeneration)]
    pub fn current_generation(&self) -> f64 {
        self.generation.get() as f64
    }

    /// Number of compiled markup rules
    #[wasm_bindgen(js_name = markupRuleCount)]
    pub fn markup_rule_count(&self) -> usize {
        self.markup.rule_count()
    }

    /// Number of compiled context phrase templates
    #[wasm_bindgen(js_name = contextPatternCount)]
    pub fn context_pattern_count(&self) -> usize {
        self.context.pattern_count()
    }
}

impl EmphasisAnalyzer {
    /// Analyzer over the built-in Korean lexicon
    pub fn new() -> Self {
        Self::with_lexicon(&Lexicon::korean()).expect("built-in lexicon patterns must compile")
    }

    /// Compile every detector for `lexicon`
    pub fn with_lexicon(lexicon: &Lexicon) -> Result<Self, LexiconError> {
        Ok(Self {
            markup: MarkupCortex::new(lexicon)?,
            context: ContextCortex::new(lexicon)?,
            repetition: RepetitionCortex::new(lexicon),
            generation: Cell::new(0),
        })
    }

    fn next_generation(&self) -> u64 {
        let next = self.generation.get() + 1;
        self.generation.set(next);
        next
    }

    /// Run the full analysis
    pub fn analyze(&self, text: &str, config: &AnalysisConfig) -> AnalysisResult {
        let overall_start = instant::Instant::now();
        let generation = self.next_generation();

        if text.trim().is_empty() {
            return AnalysisResult {
                generation,
                ..AnalysisResult::empty()
            };
        }

        let config = config.clamped();
        let index = OffsetIndex::new(text);
        let mut timings = AnalysisTimings::default();

        // Phase 1: Markup emphasis
        let markup_start = instant::Instant::now();
        let markup_spans = self.markup.scan(text, &index);
        timings.markup_us = markup_start.elapsed().as_micros() as u64;

        // Phase 2: Context phrases, then keyword sentences
        let context_start = instant::Instant::now();
        let phrase_spans = self.context.scan_phrases(text, &index);
        let sentence_spans = self.context.scan_sentences(text, &index);
        timings.context_us = context_start.elapsed().as_micros() as u64;

        // Phase 3: Repetition
        let repetition_start = instant::Instant::now();
        let report = self
            .repetition
            .analyze(text, &index, config.min_repeat_count, config.min_token_length);
        timings.repetition_us = repetition_start.elapsed().as_micros() as u64;

        // Detection order matters for the emphasis list
        let mut spans = markup_spans;
        spans.extend(phrase_spans);
        spans.extend(sentence_spans);
        spans.extend(report.spans());

        // Phase 4: Summary
        let summary = summary::summarize(&spans, &report.terms, &config);

        // Phase 5: Merge
        let merge_start = instant::Instant::now();
        let segments = merge::merge(&spans, &index, config.merge_strategy);
        timings.merge_us = merge_start.elapsed().as_micros() as u64;

        spans.sort_by_key(|s| (s.byte_start, s.byte_end));
        timings.total_us = overall_start.elapsed().as_micros() as u64;

        AnalysisResult {
            is_empty: false,
            generation,
            segments,
            spans,
            emphasis_items: summary.emphasis_items,
            repeated_items: summary.repeated_items,
            repeated_terms: summary.repeated_terms,
            counts: summary.counts,
            stats: AnalysisStats {
                timings,
                text_length: index.char_len(),
                token_count: report.tokens.len(),
            },
        }
    }

    /// Analyze and render HTML for every view
    pub fn render(&self, text: &str, config: &AnalysisConfig) -> (AnalysisResult, RenderedHtml) {
        let result = self.analyze(text, config);
        let html = render::render(text, &result);
        (result, html)
    }
}

/// Analyze with a fresh analyzer over the built-in Korean lexicon
pub fn analyze(text: &str, config: &AnalysisConfig) -> AnalysisResult {
    EmphasisAnalyzer::new().analyze(text, config)
}

// =============================================================================
// JS conversion helpers
// =============================================================================

fn lexicon_from_js(value: JsValue) -> Result<Lexicon, JsValue> {
    if let Some(json) = value.as_string() {
        return Lexicon::from_json(&json).map_err(|e| JsValue::from_str(&format!("Invalid lexicon: {}", e)));
    }
    serde_wasm_bindgen::from_value(value)
        .map_err(|e| JsValue::from_str(&format!("Invalid lexicon: {}", e)))
}

/// Bad or missing config never fails an analysis
fn config_from_js(value: JsValue) -> AnalysisConfig {
    if value.is_null() || value.is_undefined() {
        return AnalysisConfig::default();
    }
    match serde_wasm_bindgen::from_value::<AnalysisConfig>(value) {
        Ok(config) => config.clamped(),
        Err(_e) => {
            #[cfg(target_arch = "wasm32")]
            web_sys::console::warn_1(&format!("[EmphasisAnalyzer] Ignoring invalid config: {}", _e).into());
            AnalysisConfig::default()
        }
    }
}

fn to_js<T: Serialize>(value: &T) -> JsValue {
    match serde_wasm_bindgen::to_value(value) {
        Ok(v) => v,
        Err(_e) => {
            #[cfg(target_arch = "wasm32")]
            web_sys::console::error_1(&format!("[EmphasisAnalyzer] Serialization failed: {:?}", _e).into());
            JsValue::NULL
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
