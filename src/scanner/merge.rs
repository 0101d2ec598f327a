//! Span merging
//!
//! Turns overlapping candidate spans into a gapless segmentation of the text.
//!
//! - `coalesce`: overlapping or touching spans collapse into one segment that
//!   carries the union of their categories and labels.
//! - `layer`: every span boundary is a cut point. Each atomic piece between
//!   two cut points carries exactly the spans active over it, so one
//!   character range can be both Context and Repeat at once.
//!
//! Both work in byte offsets and report character offsets through the
//! `OffsetIndex`. Spans with `start >= end` or past the end of the text are
//! dropped before merging.

use std::collections::BTreeSet;

use super::config::MergeStrategy;
use super::offsets::OffsetIndex;
use super::types::{Category, LabeledSegment, Span};

/// Merge spans with the given strategy
pub fn merge(spans: &[Span], index: &OffsetIndex, strategy: MergeStrategy) -> Vec<LabeledSegment> {
    match strategy {
        MergeStrategy::Coalesce => coalesce(spans, index),
        MergeStrategy::Layered => layer(spans, index),
    }
}

/// Valid spans sorted by start, then end
fn sorted_valid<'a>(spans: &'a [Span], text_len: usize) -> Vec<&'a Span> {
    let mut sorted: Vec<&Span> = spans
        .iter()
        .filter(|s| s.byte_start < s.byte_end && s.byte_end <= text_len)
        .collect();
    sorted.sort_by_key(|s| (s.byte_start, s.byte_end));
    sorted
}

fn segment(
    index: &OffsetIndex,
    byte_start: usize,
    byte_end: usize,
    categories: BTreeSet<Category>,
    labels: Vec<String>,
) -> LabeledSegment {
    LabeledSegment {
        start: index.char_offset(byte_start),
        end: index.char_offset(byte_end),
        byte_start,
        byte_end,
        categories: categories.into_iter().collect(),
        labels,
    }
}

fn push_label(labels: &mut Vec<String>, label: &str) {
    if !labels.iter().any(|l| l == label) {
        labels.push(label.to_string());
    }
}

// =============================================================================
// Coalesce
// =============================================================================

struct Group {
    start: usize,
    end: usize,
    categories: BTreeSet<Category>,
    labels: Vec<String>,
}

/// Simple interval merge: overlapping or touching spans become one segment
pub fn coalesce(spans: &[Span], index: &OffsetIndex) -> Vec<LabeledSegment> {
    let text_len = index.byte_len();
    let mut groups: Vec<Group> = Vec::new();

    for span in sorted_valid(spans, text_len) {
        match groups.last_mut() {
            Some(last) if span.byte_start <= last.end => {
                last.end = last.end.max(span.byte_end);
                last.categories.insert(span.category);
                push_label(&mut last.labels, &span.label);
            }
            _ => groups.push(Group {
                start: span.byte_start,
                end: span.byte_end,
                categories: BTreeSet::from([span.category]),
                labels: vec![span.label.clone()],
            }),
        }
    }

    let mut segments = Vec::with_capacity(groups.len() * 2 + 1);
    let mut cursor = 0;
    for group in groups {
        if group.start > cursor {
            segments.push(segment(index, cursor, group.start, BTreeSet::new(), Vec::new()));
        }
        cursor = group.end;
        segments.push(segment(index, group.start, group.end, group.categories, group.labels));
    }
    if cursor < text_len {
        segments.push(segment(index, cursor, text_len, BTreeSet::new(), Vec::new()));
    }

    segments
}

// =============================================================================
// Layer (boundary sweep)
// =============================================================================

/// Boundary-sweep layering: one segment per pair of consecutive cut points
pub fn layer(spans: &[Span], index: &OffsetIndex) -> Vec<LabeledSegment> {
    let text_len = index.byte_len();
    let sorted = sorted_valid(spans, text_len);

    let mut cuts: BTreeSet<usize> = BTreeSet::from([0, text_len]);
    for span in &sorted {
        cuts.insert(span.byte_start);
        cuts.insert(span.byte_end);
    }
    let cuts: Vec<usize> = cuts.into_iter().collect();

    let mut segments = Vec::with_capacity(cuts.len().saturating_sub(1));
    let mut active: Vec<&Span> = Vec::new();
    let mut next = 0;

    for window in cuts.windows(2) {
        let (start, end) = (window[0], window[1]);

        // Evict spans that ended, then admit spans starting here
        active.retain(|s| s.byte_end > start);
        while next < sorted.len() && sorted[next].byte_start <= start {
            if sorted[next].byte_end > start {
                active.push(sorted[next]);
            }
            next += 1;
        }

        let mut categories = BTreeSet::new();
        let mut labels = Vec::new();
        for span in &active {
            categories.insert(span.category);
            push_label(&mut labels, &span.label);
        }

        segments.push(segment(index, start, end, categories, labels));
    }

    segments
}

// =============================================================================
// Tests
// =============================================================================
