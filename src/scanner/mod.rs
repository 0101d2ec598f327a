pub mod types;
pub mod offsets;
pub mod lexicon;
pub mod config;
pub mod markup;
pub mod context;
pub mod normalize;
pub mod repetition;
pub mod merge;
pub mod summary;
pub mod render;
pub mod analyzer;

pub use types::*;
pub use offsets::OffsetIndex;
pub use lexicon::{Lexicon, LexiconError, MarkupRule, MarkupTag, PatternRule, SpanLabels};
pub use config::{AnalysisConfig, MergeStrategy};
pub use markup::MarkupCortex;
pub use context::{ContextCortex, SentenceRange};
pub use normalize::Normalizer;
pub use repetition::{FrequencyTable, RepetitionCortex, RepetitionReport, TokenOccurrence};
pub use summary::Summary;
pub use render::RenderedHtml;
pub use analyzer::{analyze, EmphasisAnalyzer};

#[cfg(test)]
mod tests;
