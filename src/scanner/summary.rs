//! Summary builder
//!
//! Pure aggregation over detector output: per-category counts and the two
//! display lists, truncated without reordering.

use super::config::AnalysisConfig;
use super::types::{AnalysisCounts, Category, RepeatedTerm, Span};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Summary {
    pub emphasis_items: Vec<String>,
    pub repeated_items: Vec<String>,
    pub repeated_terms: Vec<RepeatedTerm>,
    pub counts: AnalysisCounts,
}

/// Build the summary.
///
/// `detected` must be in detection order (markup, context phrases, context
/// sentences, repeats); `terms` must already be ranked.
pub fn summarize(detected: &[Span], terms: &[RepeatedTerm], config: &AnalysisConfig) -> Summary {
    let mut counts = AnalysisCounts {
        repeated_terms: terms.len(),
        ..AnalysisCounts::default()
    };
    for span in detected {
        match span.category {
            Category::Emphasis => counts.emphasis += 1,
            Category::Context => counts.context += 1,
            Category::Repeat => counts.repeat += 1,
        }
    }

    let emphasis_items = detected
        .iter()
        .filter(|s| s.category != Category::Repeat)
        .take(config.max_emphasis_items)
        .map(|s| format!("{}: {}", s.label, s.snippet))
        .collect();

    let repeated_terms: Vec<RepeatedTerm> = terms.iter().take(config.max_repeated_items).cloned().collect();
    let repeated_items = repeated_terms.iter().map(RepeatedTerm::display).collect();

    Summary {
        emphasis_items,
        repeated_items,
        repeated_terms,
        counts,
    }
}

// =============================================================================
// Tests
// =============================================================================
