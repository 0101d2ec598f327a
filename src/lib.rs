//! EmphCore: Emphasis & Repetition Highlighter
//!
//! A Rust/WASM engine that finds emphasized passages and salient repeated
//! words or phrases in Korean (and partly English) text, then resolves the
//! overlapping ranges into one layered segmentation ready for rendering.
//!
//! # Architecture
//!
//! ## Scanner Components
//! - `analyzer.rs` - EmphasisAnalyzer: **Unified entry point** - single analyze() for all detectors
//! - `markup.rs` - MarkupCortex: `**bold**`, `*italic*`, `__underline__`, `==highlight==`, HTML tags
//! - `context.rs` - ContextCortex: Context phrase templates + keyword sentences (Aho-Corasick)
//! - `repetition.rs` - RepetitionCortex: Tokenizer, unigram/bigram frequency, phrase precedence
//! - `normalize.rs` - Normalizer: Case folding, particle stripping, stopwords
//! - `merge.rs` - Span merging: simple interval merge or boundary-sweep layering
//! - `summary.rs` - Counts and ranked summary lists
//! - `render.rs` - Reference HTML renderer
//! - `lexicon.rs` - Injectable keyword/stopword/particle/pattern tables
//!
//! # Usage (WASM)
//! ```javascript,ignore
//! import init, { EmphasisAnalyzer } from 'emphcore';
//!
//! await init();
//!
//! const analyzer = new EmphasisAnalyzer();
//! const result = analyzer.analyze("중요한 내용입니다. 중요한 내용입니다.", {
//!   minRepeatCount: 2,
//!   minTokenLength: 2,
//! });
//!
//! console.log(result.segments);       // Layered, gapless segmentation
//! console.log(result.repeated_items); // ["중요한 내용입니다 (2회)"]
//!
//! const html = analyzer.renderHtml(text);
//! output.innerHTML = html.highlighted;
//! ```
//!
//! # Usage (Rust)
//! ```
//! use emphcore::{analyze, AnalysisConfig, Category};
//!
//! let result = analyze("cat dog cat dog cat", &AnalysisConfig::default());
//! assert_eq!(result.spans_of(Category::Repeat).count(), 2);
//! ```

pub mod scanner;

pub use scanner::*;

use wasm_bindgen::prelude::*;

// When the `wee_alloc` feature is enabled, use `wee_alloc` as the global
// allocator for smaller WASM bundle size.
#[cfg(feature = "wee_alloc")]
#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc = wee_alloc::WeeAlloc::INIT;

/// Initialize panic hook for better error messages in browser console
#[wasm_bindgen(start)]
pub fn main() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// Get version information
#[wasm_bindgen]
pub fn version() -> String {
    format!("emphcore v{}", env!("CARGO_PKG_VERSION"))
}
