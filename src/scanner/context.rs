//! ContextCortex - Contextual emphasis detection
//!
//! Two detectors share one cortex:
//! - **Phrase templates**: regexes anchored on discourse markers such as
//!   "꼭 알아두어야 하는 것은 ..." or "... 는 바로 ...".
//! - **Keyword sentences**: the text is cut into sentences at terminal
//!   punctuation (ASCII and full-width) or newlines, and any sentence that
//!   contains an emphasis keyword as a plain substring is emitted.
//!
//! Keyword containment runs through an Aho-Corasick automaton so the cost
//! does not grow with the keyword table.

use aho_corasick::{AhoCorasick, AhoCorasickBuilder, MatchKind};
use regex::Regex;

use super::lexicon::{Lexicon, LexiconError, PatternRule};
use super::offsets::OffsetIndex;
use super::types::{Category, Span};

/// A sentence runs up to and including its terminator, or to end of text
const SENTENCE_PATTERN: &str = r"[^.\n!?。！？]+[.\n!?。！？]?";

// =============================================================================
// Types
// =============================================================================

#[derive(Debug, Clone)]
struct CompiledPattern {
    label: String,
    regex: Regex,
}

/// A raw sentence as cut by the segmenter, in byte offsets
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SentenceRange {
    pub start: usize,
    pub end: usize,
}

impl SentenceRange {
    pub fn text<'a>(&self, source: &'a str) -> &'a str {
        &source[self.start..self.end]
    }
}

// =============================================================================
// ContextCortex
// =============================================================================

/// Contextual phrase and sentence detector
#[derive(Debug, Clone)]
pub struct ContextCortex {
    patterns: Vec<CompiledPattern>,
    sentence_re: Regex,
    /// None when the keyword table is empty
    keywords: Option<AhoCorasick>,
    sentence_label: String,
}

impl ContextCortex {
    pub fn new(lexicon: &Lexicon) -> Result<Self, LexiconError> {
        let patterns = lexicon
            .context_patterns
            .iter()
            .map(compile_pattern)
            .collect::<Result<Vec<_>, _>>()?;

        let keywords: Vec<&str> = lexicon
            .emphasis_keywords
            .iter()
            .map(String::as_str)
            .filter(|k| !k.is_empty())
            .collect();

        let keywords = if keywords.is_empty() {
            None
        } else {
            let automaton = AhoCorasickBuilder::new()
                .match_kind(MatchKind::LeftmostFirst)
                .build(&keywords)
                .map_err(|e| LexiconError::Automaton(e.to_string()))?;
            Some(automaton)
        };

        let sentence_re = Regex::new(SENTENCE_PATTERN).map_err(|e| LexiconError::InvalidPattern {
            label: "sentence".to_string(),
            message: e.to_string(),
        })?;

        Ok(Self {
            patterns,
            sentence_re,
            keywords,
            sentence_label: lexicon.labels.sentence.clone(),
        })
    }

    pub fn pattern_count(&self) -> usize {
        self.patterns.len()
    }

    /// Run every phrase template, in template order
    pub fn scan_phrases(&self, text: &str, index: &OffsetIndex) -> Vec<Span> {
        let mut spans = Vec::new();

        for pattern in &self.patterns {
            for cap in pattern.regex.captures_iter(text) {
                let Some(full) = cap.get(0) else { continue };
                // Group 1 when the template defines one, else the whole match
                let body = cap.get(1).unwrap_or(full);

                if let Some(span) = Span::from_bytes(
                    text,
                    index,
                    body.start()..body.end(),
                    Category::Context,
                    pattern.label.as_str(),
                ) {
                    spans.push(span);
                }
            }
        }

        spans
    }

    /// Emit one span per sentence that contains an emphasis keyword
    pub fn scan_sentences(&self, text: &str, index: &OffsetIndex) -> Vec<Span> {
        let Some(keywords) = &self.keywords else {
            return Vec::new();
        };

        self.sentences(text)
            .filter(|sentence| {
                let trimmed = sentence.text(text).trim();
                !trimmed.is_empty() && keywords.is_match(trimmed)
            })
            .filter_map(|sentence| {
                Span::from_bytes(
                    text,
                    index,
                    sentence.start..sentence.end,
                    Category::Context,
                    self.sentence_label.as_str(),
                )
            })
            .collect()
    }

    /// Lazily cut text into sentences
    pub fn sentences<'a>(&'a self, text: &'a str) -> impl Iterator<Item = SentenceRange> + 'a {
        self.sentence_re.find_iter(text).map(|m| SentenceRange {
            start: m.start(),
            end: m.end(),
        })
    }

    /// Keywords found in `text`, in match order
    pub fn keywords_in<'a>(&self, text: &'a str) -> Vec<&'a str> {
        match &self.keywords {
            Some(ac) => ac.find_iter(text).map(|m| &text[m.start()..m.end()]).collect(),
            None => Vec::new(),
        }
    }
}

fn compile_pattern(rule: &PatternRule) -> Result<CompiledPattern, LexiconError> {
    let regex = Regex::new(&rule.pattern).map_err(|e| LexiconError::InvalidPattern {
        label: rule.label.clone(),
        message: e.to_string(),
    })?;
    Ok(CompiledPattern {
        label: rule.label.clone(),
        regex,
    })
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn cortex() -> ContextCortex {
        ContextCortex::new(&Lexicon::korean()).unwrap()
    }

    fn phrases(text: &str) -> Vec<Span> {
        cortex().scan_phrases(text, &OffsetIndex::new(text))
    }

    fn sentences(text: &str) -> Vec<Span> {
        cortex().scan_sentences(text, &OffsetIndex::new(text))
    }

    #[test]
    fn test_must_know_phrase() {
        let spans = phrases("꼭 알아두어야 하는 것은 안전 수칙입니다. 그 외는 생략.");
        assert_eq!(spans.len(), 1);
        assert_eq!(spans[0].source_text, "꼭 알아두어야 하는 것은 안전 수칙입니다");
        assert_eq!(spans[0].label, "문맥상 강조: 꼭 알아두어야 하는 것은");
    }

    #[test]
    fn test_precisely_phrase_stops_at_terminator() {
        let spans = phrases("오늘의 주제는 바로 안전이다! 다음 문제");
        assert_eq!(spans.len(), 1);
        assert_eq!(spans[0].source_text, "주제는 바로 안전이다");
        assert_eq!(spans[0].category, Category::Context);
    }

    #[test]
    fn test_full_width_terminator() {
        let spans = phrases("이유는 바로 이것！나머지");
        assert_eq!(spans[0].source_text, "이유는 바로 이것");
    }

    #[test]
    fn test_what_it_is_phrase() {
        let spans = phrases("그 이유는 무엇입니다");
        assert_eq!(spans.len(), 1);
        assert_eq!(spans[0].label, "문맥상 강조: ~는 무엇입니다");
    }

    #[test]
    fn test_keyword_sentences() {
        let text = "이 부분은 중요합니다. 그냥 문장입니다. 반드시 확인하세요!";
        let spans = sentences(text);
        assert_eq!(spans.len(), 2);
        assert_eq!(spans[0].snippet, "이 부분은 중요합니다.");
        assert_eq!(spans[1].snippet, "반드시 확인하세요!");
        assert_eq!(spans[1].label, "문맥상 강조 문장");
    }

    #[test]
    fn test_sentence_span_includes_terminator() {
        let text = "중요.";
        let spans = sentences(text);
        assert_eq!((spans[0].start, spans[0].end), (0, 3));
    }

    #[test]
    fn test_keyword_substring_not_word_bounded() {
        // "바로" inside "바로미터" still counts
        assert_eq!(sentences("경제의 바로미터").len(), 1);
    }

    #[test]
    fn test_keyword_case_sensitive() {
        let lexicon = Lexicon {
            emphasis_keywords: vec!["Important".into()],
            ..Lexicon::default()
        };
        let cortex = ContextCortex::new(&lexicon).unwrap();
        let text = "this is important. This is Important.";
        let spans = cortex.scan_sentences(text, &OffsetIndex::new(text));
        assert_eq!(spans.len(), 1);
        assert_eq!(spans[0].snippet, "This is Important.");
    }

    #[test]
    fn test_sentence_segmentation() {
        let cortex = cortex();
        let text = "하나. 둘!\n셋";
        let cut: Vec<&str> = cortex.sentences(text).map(|s| s.text(text)).collect();
        assert_eq!(cut, vec!["하나.", " 둘!", "셋"]);
    }

    #[test]
    fn test_punctuation_only_input() {
        assert!(sentences("...!!!???").is_empty());
        assert!(phrases("。。。").is_empty());
    }

    #[test]
    fn test_empty_keyword_table() {
        let cortex = ContextCortex::new(&Lexicon::default()).unwrap();
        let text = "중요합니다.";
        assert!(cortex.scan_sentences(text, &OffsetIndex::new(text)).is_empty());
        assert!(cortex.keywords_in(text).is_empty());
    }

    #[test]
    fn test_keywords_in() {
        let found = cortex().keywords_in("핵심과 필수");
        assert_eq!(found, vec!["핵심", "필수"]);
    }
}
