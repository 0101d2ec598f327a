//! Core data structures shared by every detector
//!
//! - `Category` - which family of detector produced a span
//! - `Span` - a half-open candidate range tagged with a category and label
//! - `LabeledSegment` - one unit of the merged, gapless segmentation
//! - `AnalysisResult` - everything a renderer needs for one analysis

use serde::{Deserialize, Serialize};
use std::ops::Range;

use super::offsets::OffsetIndex;

// =============================================================================
// Category
// =============================================================================

/// Detection category.
///
/// Ordering doubles as display precedence: `Repeat` wins over `Context`,
/// which wins over `Emphasis`.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Emphasis,
    Context,
    Repeat,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Emphasis => "emphasis",
            Category::Context => "context",
            Category::Repeat => "repeat",
        }
    }
}

// =============================================================================
// Span
// =============================================================================

/// A candidate highlight range.
///
/// `start`/`end` are character offsets, `byte_start`/`byte_end` the same
/// range in UTF-8 bytes. Always `start < end`.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Span {
    pub start: usize,
    pub end: usize,
    pub byte_start: usize,
    pub byte_end: usize,
    pub category: Category,
    pub label: String,
    pub source_text: String,
    /// Trimmed source text, used for summary lists
    pub snippet: String,
}

impl Span {
    /// Build a span from a byte range of `text`.
    ///
    /// Returns `None` for empty or out-of-bounds ranges, and for ranges whose
    /// content is only whitespace.
    pub fn from_bytes(
        text: &str,
        index: &OffsetIndex,
        range: Range<usize>,
        category: Category,
        label: impl Into<String>,
    ) -> Option<Span> {
        if range.start >= range.end || range.end > text.len() {
            return None;
        }
        let source = text.get(range.clone())?;
        let snippet = source.trim();
        if snippet.is_empty() {
            return None;
        }

        Some(Span {
            start: index.char_offset(range.start),
            end: index.char_offset(range.end),
            byte_start: range.start,
            byte_end: range.end,
            category,
            label: label.into(),
            source_text: source.to_string(),
            snippet: snippet.to_string(),
        })
    }

    pub fn byte_range(&self) -> Range<usize> {
        self.byte_start..self.byte_end
    }

    pub fn char_len(&self) -> usize {
        self.end - self.start
    }
}

// =============================================================================
// LabeledSegment
// =============================================================================

/// One atomic piece of the merged segmentation.
///
/// Segments partition the text; an unlabeled segment has empty
/// `categories` and `labels`.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct LabeledSegment {
    pub start: usize,
    pub end: usize,
    pub byte_start: usize,
    pub byte_end: usize,
    /// Sorted by precedence, lowest first
    pub categories: Vec<Category>,
    /// First-seen order, no duplicates
    pub labels: Vec<String>,
}

impl LabeledSegment {
    pub fn is_labeled(&self) -> bool {
        !self.categories.is_empty()
    }

    /// Category used for styling: Repeat > Context > Emphasis
    pub fn primary_category(&self) -> Option<Category> {
        self.categories.iter().copied().max()
    }

    pub fn has_category(&self, category: Category) -> bool {
        self.categories.contains(&category)
    }

    pub fn byte_range(&self) -> Range<usize> {
        self.byte_start..self.byte_end
    }

    /// Slice this segment out of the analyzed text
    pub fn text<'a>(&self, source: &'a str) -> &'a str {
        source.get(self.byte_range()).unwrap_or("")
    }
}

// =============================================================================
// Analysis Result
// =============================================================================

/// A repeated term or phrase with its total count
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct RepeatedTerm {
    pub term: String,
    pub count: usize,
    pub is_phrase: bool,
}

impl RepeatedTerm {
    /// Display form used in summary lists, e.g. `중요 (3회)`
    pub fn display(&self) -> String {
        format!("{} ({}회)", self.term, self.count)
    }
}

/// Aggregate counts
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct AnalysisCounts {
    pub emphasis: usize,
    pub context: usize,
    pub repeat: usize,
    /// Distinct repeated terms and phrases, before truncation
    pub repeated_terms: usize,
}

/// Timing statistics for each analysis phase
#[derive(Serialize, Deserialize, Clone, Debug, Default)]
pub struct AnalysisTimings {
    pub total_us: u64,
    pub markup_us: u64,
    pub context_us: u64,
    pub repetition_us: u64,
    pub merge_us: u64,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default)]
pub struct AnalysisStats {
    pub timings: AnalysisTimings,
    /// Length in characters
    pub text_length: usize,
    pub token_count: usize,
}

/// Result of one analysis
#[derive(Serialize, Deserialize, Clone, Debug, Default)]
pub struct AnalysisResult {
    /// True when the input was empty or whitespace-only
    pub is_empty: bool,
    /// Analyzer call sequence number; only the highest one is current
    pub generation: u64,
    pub segments: Vec<LabeledSegment>,
    /// All candidate spans, sorted by start then end
    pub spans: Vec<Span>,
    pub emphasis_items: Vec<String>,
    pub repeated_items: Vec<String>,
    pub repeated_terms: Vec<RepeatedTerm>,
    pub counts: AnalysisCounts,
    pub stats: AnalysisStats,
}

impl AnalysisResult {
    pub fn empty() -> Self {
        Self {
            is_empty: true,
            ..Self::default()
        }
    }

    pub fn spans_of(&self, category: Category) -> impl Iterator<Item = &Span> {
        self.spans.iter().filter(move |s| s.category == category)
    }
}

// =============================================================================
// Tests
// =============================================================================
