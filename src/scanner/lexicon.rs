//! Lexicon: injectable detection tables
//!
//! Keywords, stopwords, particles and pattern templates are data, not code.
//! The default Korean lexicon is embedded from `data/lexicon_ko.json`; callers
//! can load their own JSON or extend the default before building an analyzer.

use serde::{Deserialize, Serialize};

const KOREAN_LEXICON_JSON: &str = include_str!("../../data/lexicon_ko.json");

// =============================================================================
// Types
// =============================================================================

/// A labeled regex template
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct PatternRule {
    pub label: String,
    pub pattern: String,
}

/// A delimiter-style markup rule. Capture group 1 is the emphasized content.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct MarkupRule {
    pub label: String,
    pub pattern: String,
    /// Reject matches whose delimiters touch another copy of this string,
    /// so `*x*` does not fire inside `**x**`.
    #[serde(default)]
    pub exclusive_delimiter: Option<String>,
}

/// An inline tag such as `<b>`, matched case-insensitively
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct MarkupTag {
    pub tag: String,
    pub label: String,
}

/// Labels for spans whose label is not tied to a single rule
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct SpanLabels {
    #[serde(default = "default_sentence_label")]
    pub sentence: String,
    #[serde(default = "default_repeat_label")]
    pub repeat: String,
    #[serde(default = "default_repeat_phrase_label")]
    pub repeat_phrase: String,
}

fn default_sentence_label() -> String { "문맥상 강조 문장".to_string() }
fn default_repeat_label() -> String { "반복".to_string() }
fn default_repeat_phrase_label() -> String { "반복 구절".to_string() }

impl Default for SpanLabels {
    fn default() -> Self {
        Self {
            sentence: default_sentence_label(),
            repeat: default_repeat_label(),
            repeat_phrase: default_repeat_phrase_label(),
        }
    }
}

/// All tables used by the detectors
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct Lexicon {
    #[serde(default)]
    pub emphasis_keywords: Vec<String>,
    #[serde(default)]
    pub stopwords: Vec<String>,
    #[serde(default)]
    pub particles: Vec<String>,
    #[serde(default)]
    pub context_patterns: Vec<PatternRule>,
    #[serde(default)]
    pub markup_rules: Vec<MarkupRule>,
    #[serde(default)]
    pub markup_tags: Vec<MarkupTag>,
    #[serde(default)]
    pub labels: SpanLabels,
}

// =============================================================================
// Errors
// =============================================================================

/// Errors raised while loading a lexicon or compiling its tables
#[derive(Debug, Clone, PartialEq)]
pub enum LexiconError {
    InvalidJson(String),
    InvalidPattern { label: String, message: String },
    Automaton(String),
}

impl std::fmt::Display for LexiconError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LexiconError::InvalidJson(msg) => write!(f, "invalid lexicon JSON: {}", msg),
            LexiconError::InvalidPattern { label, message } => {
                write!(f, "invalid pattern for '{}': {}", label, message)
            }
            LexiconError::Automaton(msg) => write!(f, "keyword automaton build failed: {}", msg),
        }
    }
}

impl std::error::Error for LexiconError {}

// =============================================================================
// Loading
// =============================================================================

impl Lexicon {
    /// The built-in Korean lexicon
    pub fn korean() -> Self {
        // Embedded at compile time and covered by tests
        Self::from_json(KOREAN_LEXICON_JSON).expect("embedded Korean lexicon must parse")
    }

    /// Parse a lexicon from JSON. Missing tables default to empty.
    pub fn from_json(json: &str) -> Result<Self, LexiconError> {
        serde_json::from_str(json).map_err(|e| LexiconError::InvalidJson(e.to_string()))
    }

    pub fn to_json(&self) -> Result<String, LexiconError> {
        serde_json::to_string_pretty(self).map_err(|e| LexiconError::InvalidJson(e.to_string()))
    }

    /// Append every table of `other`, skipping entries already present.
    /// Labels are taken from `self`.
    pub fn extend(&mut self, other: Lexicon) {
        extend_unique(&mut self.emphasis_keywords, other.emphasis_keywords);
        extend_unique(&mut self.stopwords, other.stopwords);
        extend_unique(&mut self.particles, other.particles);
        extend_unique(&mut self.context_patterns, other.context_patterns);
        extend_unique(&mut self.markup_rules, other.markup_rules);
        extend_unique(&mut self.markup_tags, other.markup_tags);
    }

    /// Builder-style variant of [`Lexicon::extend`]
    pub fn with(mut self, other: Lexicon) -> Self {
        self.extend(other);
        self
    }
}

fn extend_unique<T: PartialEq>(target: &mut Vec<T>, items: Vec<T>) {
    for item in items {
        if !target.contains(&item) {
            target.push(item);
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
