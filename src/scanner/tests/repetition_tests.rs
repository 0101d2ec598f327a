//! Tests for RepetitionCortex
//!
//! Counting, phrase precedence and adjacency rules of the frequency analyzer.

use crate::scanner::lexicon::Lexicon;
use crate::scanner::offsets::OffsetIndex;
use crate::scanner::repetition::{RepetitionCortex, RepetitionReport};
use crate::scanner::types::Span;

fn run(text: &str, min_count: usize) -> RepetitionReport {
    let cortex = RepetitionCortex::new(&Lexicon::korean());
    let index = OffsetIndex::new(text);
    cortex.analyze(text, &index, min_count, 2)
}

fn bounds(spans: &[Span]) -> Vec<(usize, usize)> {
    spans.iter().map(|s| (s.start, s.end)).collect()
}

// ============================================================================
// Phrase precedence
// ============================================================================

#[test]
fn test_phrases_claim_their_words() {
    let report = run("cat dog cat dog cat", 2);

    assert_eq!(report.unigrams.count("cat"), 3);
    assert_eq!(report.unigrams.count("dog"), 2);
    assert_eq!(report.bigrams.count("cat dog"), 2);
    assert_eq!(report.bigrams.count("dog cat"), 2);

    // Left to right, no token reused: (cat dog) (cat dog) cat
    assert_eq!(bounds(&report.phrase_spans), vec![(0, 7), (8, 15)]);
    assert_eq!(report.phrase_spans[0].label, "반복 구절: cat dog");
    // The trailing cat is a claimed form
    assert!(report.unigram_spans.is_empty());
}

#[test]
fn test_terms_list_phrases_then_unclaimed_words() {
    let report = run("cat dog cat dog cat", 2);
    let terms: Vec<(&str, usize, bool)> = report
        .terms
        .iter()
        .map(|t| (t.term.as_str(), t.count, t.is_phrase))
        .collect();
    assert_eq!(terms, vec![("cat dog", 2, true), ("dog cat", 2, true)]);
}

#[test]
fn test_higher_threshold_falls_back_to_words() {
    let report = run("cat dog cat dog cat", 3);
    assert!(report.phrase_spans.is_empty());
    assert_eq!(bounds(&report.unigram_spans), vec![(0, 3), (8, 11), (16, 19)]);
    assert_eq!(report.terms.len(), 1);
    assert_eq!(report.terms[0].term, "cat");
}

// ============================================================================
// Normalization
// ============================================================================

#[test]
fn test_particles_merge_forms() {
    // 학교에서 and 학교는 both count as 학교
    let text = "학교에서 공부하고 학교는 좋다";
    let report = run(text, 2);

    assert_eq!(report.unigrams.count("학교"), 2);
    assert_eq!(bounds(&report.unigram_spans), vec![(0, 4), (10, 13)]);
    assert!(report.unigram_spans.iter().all(|s| s.label == "반복: 학교"));
    assert_eq!(report.unigram_spans[1].source_text, "학교는");
}

#[test]
fn test_nouns_ending_in_particle_syllables() {
    let report = run("도로 도로 사과 사과 나이 나이", 2);
    let terms: Vec<String> = report.terms.iter().map(|t| t.display()).collect();
    assert_eq!(terms, vec!["도로 (2회)", "사과 (2회)", "나이 (2회)"]);
    assert_eq!(report.unigram_spans.len(), 6);
    assert!(report.phrase_spans.is_empty());
}

#[test]
fn test_case_folding() {
    let report = run("Apple pie. apple tart.", 2);
    assert_eq!(report.unigrams.count("apple"), 2);
    assert_eq!(report.unigram_spans.len(), 2);
    assert_eq!(report.unigram_spans[0].label, "반복: apple");
}

#[test]
fn test_stopwords_never_counted() {
    let report = run("the cat and the dog", 2);
    assert_eq!(report.unigrams.count("the"), 0);
    assert!(report.unigram_spans.is_empty());
    assert!(report.tokens.iter().filter(|t| t.raw_text == "the").all(|t| !t.is_valid));
}

#[test]
fn test_min_token_length() {
    let cortex = RepetitionCortex::new(&Lexicon::korean());
    let text = "ab ab abc abc";
    let index = OffsetIndex::new(text);
    let report = cortex.analyze(text, &index, 2, 3);

    assert_eq!(report.unigrams.count("ab"), 0);
    assert_eq!(report.unigrams.count("abc"), 2);
}

// ============================================================================
// Adjacency
// ============================================================================

#[test]
fn test_invalid_token_breaks_phrase() {
    // "the" is a stopword, so cat/dog are never adjacent valid tokens
    let report = run("cat the dog. cat the dog.", 2);
    assert_eq!(report.bigrams.len(), 0);
    assert!(report.phrase_spans.is_empty());
    assert_eq!(report.unigram_spans.len(), 4);
}

#[test]
fn test_newline_breaks_phrase() {
    let report = run("big\ncat big\ncat", 2);
    assert_eq!(report.bigrams.count("big cat"), 0);
    assert_eq!(report.bigrams.count("cat big"), 1);
    assert!(report.phrase_spans.is_empty());
    assert_eq!(report.unigram_spans.len(), 4);
}

#[test]
fn test_punctuation_breaks_phrase() {
    let report = run("중요한 내용입니다. 중요한 내용입니다.", 2);
    assert_eq!(report.bigrams.count("중요한 내용입니다"), 2);
    assert_eq!(report.bigrams.count("내용입니다 중요한"), 0);
    assert_eq!(report.phrase_spans.len(), 2);
}

// ============================================================================
// Ranking
// ============================================================================

#[test]
fn test_ties_break_by_first_occurrence() {
    let report = run("beta alpha. alpha beta.", 2);
    let terms: Vec<&str> = report.terms.iter().map(|t| t.term.as_str()).collect();
    assert_eq!(terms, vec!["beta", "alpha"]);
}

#[test]
fn test_higher_count_ranks_first() {
    let report = run("one. two. two. one. two.", 2);
    let terms: Vec<(&str, usize)> = report.terms.iter().map(|t| (t.term.as_str(), t.count)).collect();
    assert_eq!(terms, vec![("two", 3), ("one", 2)]);
}

#[test]
fn test_spans_are_in_text_order() {
    let report = run("red fox. red fox. blue sky blue", 2);
    let spans = report.spans();
    assert!(spans.windows(2).all(|w| w[0].byte_start <= w[1].byte_start));
    assert_eq!(spans.len(), report.phrase_spans.len() + report.unigram_spans.len());
}
