//! Analysis configuration
//!
//! Thresholds arrive from form inputs, so deserialization is lenient:
//! numbers, numeric strings, `null` or garbage are all accepted. Anything
//! that is not a finite number falls back to the default, and every
//! threshold is clamped to its minimum.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Lower bound for both repetition thresholds
pub const MIN_THRESHOLD: usize = 2;
pub const DEFAULT_MAX_EMPHASIS_ITEMS: usize = 20;
pub const DEFAULT_MAX_REPEATED_ITEMS: usize = 30;

/// How overlapping spans are resolved into segments
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum MergeStrategy {
    /// Overlapping or touching spans collapse into one segment
    Coalesce,
    /// Every distinct boundary starts a new segment (multi-label per range)
    #[default]
    Layered,
}

/// Configuration for a single analysis
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisConfig {
    #[serde(default = "default_threshold", deserialize_with = "lenient_threshold")]
    pub min_repeat_count: usize,
    #[serde(default = "default_threshold", deserialize_with = "lenient_threshold")]
    pub min_token_length: usize,
    #[serde(default)]
    pub merge_strategy: MergeStrategy,
    #[serde(default = "default_max_emphasis_items")]
    pub max_emphasis_items: usize,
    #[serde(default = "default_max_repeated_items")]
    pub max_repeated_items: usize,
}

fn default_threshold() -> usize { MIN_THRESHOLD }
fn default_max_emphasis_items() -> usize { DEFAULT_MAX_EMPHASIS_ITEMS }
fn default_max_repeated_items() -> usize { DEFAULT_MAX_REPEATED_ITEMS }

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            min_repeat_count: MIN_THRESHOLD,
            min_token_length: MIN_THRESHOLD,
            merge_strategy: MergeStrategy::Layered,
            max_emphasis_items: DEFAULT_MAX_EMPHASIS_ITEMS,
            max_repeated_items: DEFAULT_MAX_REPEATED_ITEMS,
        }
    }
}

impl AnalysisConfig {
    pub fn new(min_repeat_count: usize, min_token_length: usize) -> Self {
        Self {
            min_repeat_count,
            min_token_length,
            ..Self::default()
        }
        .clamped()
    }

    pub fn with_strategy(mut self, strategy: MergeStrategy) -> Self {
        self.merge_strategy = strategy;
        self
    }

    /// Copy with both thresholds raised to at least `MIN_THRESHOLD`
    pub fn clamped(&self) -> Self {
        Self {
            min_repeat_count: self.min_repeat_count.max(MIN_THRESHOLD),
            min_token_length: self.min_token_length.max(MIN_THRESHOLD),
            ..self.clone()
        }
    }

    /// Parse a threshold typed into a form field
    pub fn parse_threshold(raw: &str) -> usize {
        threshold_from_value(&Value::String(raw.to_string()))
    }
}

/// Interpret an arbitrary JSON value as a threshold
fn threshold_from_value(value: &Value) -> usize {
    let parsed = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };

    match parsed {
        // Zero and NaN are treated as missing, then clamped
        Some(n) if n.is_finite() && n >= 1.0 => (n.trunc() as usize).max(MIN_THRESHOLD),
        _ => MIN_THRESHOLD,
    }
}

fn lenient_threshold<'de, D>(deserializer: D) -> Result<usize, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(threshold_from_value(&value))
}

// =============================================================================
// Tests
// =============================================================================
