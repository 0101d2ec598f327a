//! RepetitionCortex - Repeated word and phrase detection
//!
//! # Pipeline
//! 1. Tokenize: Latin words (`[A-Za-z][A-Za-z'-]+`) and Hangul runs of 2+
//!    syllables, leftmost, non-overlapping.
//! 2. Normalize each token (lowercase, particle stripping) and mark it valid
//!    or not (length, stopwords). Invalid tokens keep their position.
//! 3. Count unigrams over valid tokens and bigrams over pairs of consecutive
//!    valid tokens separated only by same-line whitespace.
//! 4. Emit phrase spans for repeated bigrams, left to right, each token used
//!    at most once. Forms inside any repeated bigram are claimed.
//! 5. Emit unigram spans for repeated, unclaimed forms on unconsumed tokens.
//!
//! Normalized forms are interned with `lasso` for the lifetime of one
//! analysis, so counting compares `Spur` keys instead of strings.

use lasso::{Rodeo, Spur};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

use super::lexicon::{Lexicon, SpanLabels};
use super::normalize::Normalizer;
use super::offsets::OffsetIndex;
use super::types::{Category, RepeatedTerm, Span};

const TOKEN_PATTERN: &str = r"[A-Za-z][A-Za-z'\-]+|[가-힣]{2,}";

// =============================================================================
// Types
// =============================================================================

/// One token found by the tokenizer
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct TokenOccurrence {
    pub start: usize,
    pub end: usize,
    pub byte_start: usize,
    pub byte_end: usize,
    pub raw_text: String,
    pub normalized_form: String,
    pub is_valid: bool,
}

#[derive(Debug, Clone, Copy)]
struct TermStats {
    count: usize,
    /// Token index of the first occurrence, used to break count ties
    first_seen: usize,
}

/// Occurrence counts keyed by interned normalized form
#[derive(Debug, Default)]
pub struct FrequencyTable {
    interner: Rodeo,
    entries: HashMap<Spur, TermStats>,
}

impl FrequencyTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one occurrence of `key` seen at token index `position`
    pub fn record(&mut self, key: &str, position: usize) -> Spur {
        let spur = self.interner.get_or_intern(key);
        self.entries
            .entry(spur)
            .and_modify(|stats| stats.count += 1)
            .or_insert(TermStats { count: 1, first_seen: position });
        spur
    }

    pub fn count(&self, key: &str) -> usize {
        self.interner
            .get(key)
            .map(|spur| self.count_of(spur))
            .unwrap_or(0)
    }

    pub fn count_of(&self, spur: Spur) -> usize {
        self.entries.get(&spur).map(|s| s.count).unwrap_or(0)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Keys counted at least `min_count` times, by descending count, ties
    /// broken by first occurrence
    pub fn ranked(&self, min_count: usize) -> Vec<(&str, usize)> {
        let mut ranked: Vec<(&Spur, &TermStats)> = self
            .entries
            .iter()
            .filter(|(_, stats)| stats.count >= min_count)
            .collect();
        ranked.sort_by(|a, b| {
            b.1.count
                .cmp(&a.1.count)
                .then_with(|| a.1.first_seen.cmp(&b.1.first_seen))
        });
        ranked
            .into_iter()
            .map(|(spur, stats)| (self.interner.resolve(spur), stats.count))
            .collect()
    }
}

/// Everything the frequency analysis produced for one text
#[derive(Debug, Default)]
pub struct RepetitionReport {
    pub tokens: Vec<TokenOccurrence>,
    pub unigrams: FrequencyTable,
    pub bigrams: FrequencyTable,
    pub phrase_spans: Vec<Span>,
    pub unigram_spans: Vec<Span>,
    /// Repeated phrases first, then unclaimed unigrams; each ranked by count
    pub terms: Vec<RepeatedTerm>,
}

impl RepetitionReport {
    /// Phrase and unigram spans together, in text order
    pub fn spans(&self) -> Vec<Span> {
        let mut spans: Vec<Span> = self
            .phrase_spans
            .iter()
            .chain(self.unigram_spans.iter())
            .cloned()
            .collect();
        spans.sort_by_key(|s| (s.byte_start, s.byte_end));
        spans
    }
}

// =============================================================================
// RepetitionCortex
// =============================================================================

/// Tokenizer + frequency analyzer
#[derive(Debug, Clone)]
pub struct RepetitionCortex {
    token_re: Regex,
    normalizer: Normalizer,
    labels: SpanLabels,
}

impl RepetitionCortex {
    pub fn new(lexicon: &Lexicon) -> Self {
        Self {
            // Static pattern
            token_re: Regex::new(TOKEN_PATTERN).unwrap(),
            normalizer: Normalizer::new(lexicon),
            labels: lexicon.labels.clone(),
        }
    }

    pub fn normalizer(&self) -> &Normalizer {
        &self.normalizer
    }

    /// Find every token and classify it
    pub fn tokenize(&self, text: &str, index: &OffsetIndex, min_token_length: usize) -> Vec<TokenOccurrence> {
        self.token_re
            .find_iter(text)
            .map(|m| {
                let raw = m.as_str();
                let normalized = self.normalizer.normalize(raw);
                let is_valid = self.normalizer.is_valid(raw, &normalized, min_token_length);
                TokenOccurrence {
                    start: index.char_offset(m.start()),
                    end: index.char_offset(m.end()),
                    byte_start: m.start(),
                    byte_end: m.end(),
                    raw_text: raw.to_string(),
                    normalized_form: normalized,
                    is_valid,
                }
            })
            .collect()
    }

    /// Run the full frequency analysis
    pub fn analyze(
        &self,
        text: &str,
        index: &OffsetIndex,
        min_count: usize,
        min_token_length: usize,
    ) -> RepetitionReport {
        let tokens = self.tokenize(text, index, min_token_length);

        // Unigram counts over valid tokens only
        let mut unigrams = FrequencyTable::new();
        for (i, token) in tokens.iter().enumerate() {
            if token.is_valid {
                unigrams.record(&token.normalized_form, i);
            }
        }

        // Bigram counts; pair_keys[i] is the pair (i, i + 1) when adjacent
        let mut bigrams = FrequencyTable::new();
        let mut pair_keys: Vec<Option<Spur>> = vec![None; tokens.len()];
        for (i, pair) in tokens.windows(2).enumerate() {
            let (a, b) = (&pair[0], &pair[1]);
            if a.is_valid && b.is_valid && is_adjacent(text, a, b) {
                let key = format!("{} {}", a.normalized_form, b.normalized_form);
                pair_keys[i] = Some(bigrams.record(&key, i));
            }
        }

        let is_repeated_pair = |i: usize| {
            pair_keys
                .get(i)
                .copied()
                .flatten()
                .map_or(false, |spur| bigrams.count_of(spur) >= min_count)
        };

        // Claim every form that takes part in a repeated bigram
        let mut claimed: HashSet<&str> = HashSet::new();
        for i in 0..tokens.len().saturating_sub(1) {
            if is_repeated_pair(i) {
                claimed.insert(tokens[i].normalized_form.as_str());
                claimed.insert(tokens[i + 1].normalized_form.as_str());
            }
        }

        let mut phrase_spans = Vec::new();
        let mut consumed = vec![false; tokens.len()];

        // Phrase spans, left to right, no token reused
        let mut i = 0;
        while i + 1 < tokens.len() {
            if !is_repeated_pair(i) {
                i += 1;
                continue;
            }
            let (a, b) = (&tokens[i], &tokens[i + 1]);
            let label = format!(
                "{}: {} {}",
                self.labels.repeat_phrase, a.normalized_form, b.normalized_form
            );
            if let Some(span) = Span::from_bytes(text, index, a.byte_start..b.byte_end, Category::Repeat, label) {
                phrase_spans.push(span);
            }
            consumed[i] = true;
            consumed[i + 1] = true;
            i += 2;
        }

        // Unigram spans for whatever the phrases left over
        let mut unigram_spans = Vec::new();
        for (i, token) in tokens.iter().enumerate() {
            if !token.is_valid || consumed[i] || claimed.contains(token.normalized_form.as_str()) {
                continue;
            }
            if unigrams.count(&token.normalized_form) < min_count {
                continue;
            }
            let label = format!("{}: {}", self.labels.repeat, token.normalized_form);
            if let Some(span) = Span::from_bytes(
                text,
                index,
                token.byte_start..token.byte_end,
                Category::Repeat,
                label,
            ) {
                unigram_spans.push(span);
            }
        }

        let mut terms: Vec<RepeatedTerm> = bigrams
            .ranked(min_count)
            .into_iter()
            .map(|(term, count)| RepeatedTerm { term: term.to_string(), count, is_phrase: true })
            .collect();
        terms.extend(
            unigrams
                .ranked(min_count)
                .into_iter()
                .filter(|(term, _)| !claimed.contains(term))
                .map(|(term, count)| RepeatedTerm { term: term.to_string(), count, is_phrase: false }),
        );

        RepetitionReport {
            tokens,
            unigrams,
            bigrams,
            phrase_spans,
            unigram_spans,
            terms,
        }
    }
}

/// Only same-line whitespace may sit between two tokens of a bigram
fn is_adjacent(text: &str, a: &TokenOccurrence, b: &TokenOccurrence) -> bool {
    text.get(a.byte_end..b.byte_start)
        .map(|gap| gap.chars().all(|c| c.is_whitespace() && c != '\n' && c != '\r'))
        .unwrap_or(false)
}
