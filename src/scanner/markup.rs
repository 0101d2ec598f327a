//! MarkupCortex - Typographic emphasis detection via Regex
//!
//! Detects emphasized passages written with markup:
//! - Delimiters: **bold**, *italic*, __underline__, ==highlight==
//! - Inline tags: <b>, <strong>, <em>, <i>, <u>, <mark>
//!
//! The span covers the inner content only, never the delimiters.
//! Rules are independent: a tag nested inside a delimiter pair yields two
//! spans over the same text, and both are kept.

use regex::Regex;

use super::lexicon::{Lexicon, LexiconError, MarkupRule, MarkupTag};
use super::offsets::OffsetIndex;
use super::types::{Category, Span};

// ==================== TYPE DEFINITIONS ====================

/// A compiled markup rule
#[derive(Debug, Clone)]
struct CompiledRule {
    label: String,
    regex: Regex,
    exclusive_delimiter: Option<String>,
}

// ==================== MAIN IMPLEMENTATION ====================

/// MarkupCortex - Markup emphasis detector
#[derive(Debug, Clone)]
pub struct MarkupCortex {
    rules: Vec<CompiledRule>,
}

impl MarkupCortex {
    /// Compile every delimiter rule and one regex per tag
    pub fn new(lexicon: &Lexicon) -> Result<Self, LexiconError> {
        let mut rules = Vec::with_capacity(lexicon.markup_rules.len() + lexicon.markup_tags.len());

        for rule in &lexicon.markup_rules {
            rules.push(compile_rule(rule)?);
        }
        for tag in &lexicon.markup_tags {
            rules.push(compile_tag(tag)?);
        }

        Ok(Self { rules })
    }

    pub fn rule_count(&self) -> usize {
        self.rules.len()
    }

    /// Scan text for markup emphasis, in rule order then position order
    pub fn scan(&self, text: &str, index: &OffsetIndex) -> Vec<Span> {
        let mut spans = Vec::new();

        for rule in &self.rules {
            let mut pos = 0;
            while pos <= text.len() {
                let Some(cap) = rule.regex.captures_at(text, pos) else { break };
                let Some(full) = cap.get(0) else { break };
                let inner = cap.get(1).unwrap_or(full);

                if let Some(delim) = &rule.exclusive_delimiter {
                    if touches_delimiter(text, full.start(), full.end(), delim) {
                        // A rejected match must not swallow the delimiter of a later one
                        pos = next_char(text, full.start());
                        continue;
                    }
                }

                pos = if full.end() > full.start() {
                    full.end()
                } else {
                    next_char(text, full.end())
                };

                if let Some(span) = Span::from_bytes(
                    text,
                    index,
                    inner.start()..inner.end(),
                    Category::Emphasis,
                    rule.label.as_str(),
                ) {
                    spans.push(span);
                }
            }
        }

        spans
    }
}

fn compile_rule(rule: &MarkupRule) -> Result<CompiledRule, LexiconError> {
    let regex = Regex::new(&rule.pattern).map_err(|e| LexiconError::InvalidPattern {
        label: rule.label.clone(),
        message: e.to_string(),
    })?;

    Ok(CompiledRule {
        label: rule.label.clone(),
        regex,
        exclusive_delimiter: rule.exclusive_delimiter.clone().filter(|d| !d.is_empty()),
    })
}

/// `regex` has no backreferences, so each tag gets its own pattern.
/// Group 1 is the tag content; attributes on the opening tag are allowed.
fn compile_tag(tag: &MarkupTag) -> Result<CompiledRule, LexiconError> {
    let name = regex::escape(&tag.tag);
    let pattern = format!(r"(?is)<{name}(?:\s[^>]*)?>(.*?)</{name}\s*>");
    let regex = Regex::new(&pattern).map_err(|e| LexiconError::InvalidPattern {
        label: tag.label.clone(),
        message: e.to_string(),
    })?;

    Ok(CompiledRule {
        label: tag.label.clone(),
        regex,
        exclusive_delimiter: None,
    })
}

/// True if the match is directly preceded or followed by `delim`
fn touches_delimiter(text: &str, start: usize, end: usize, delim: &str) -> bool {
    text[..start].ends_with(delim) || text[end..].starts_with(delim)
}

/// Byte offset of the char boundary after `at`
fn next_char(text: &str, at: usize) -> usize {
    at + text[at..].chars().next().map_or(1, char::len_utf8)
}

// ==================== TESTS ====================

#[cfg(test)]
mod tests {
    use super::*;

    fn scan(text: &str) -> Vec<Span> {
        let cortex = MarkupCortex::new(&Lexicon::korean()).unwrap();
        cortex.scan(text, &OffsetIndex::new(text))
    }

    #[test]
    fn test_bold_excludes_delimiters() {
        let spans = scan("**bold text**");
        assert_eq!(spans.len(), 1);
        assert_eq!(spans[0].source_text, "bold text");
        assert_eq!((spans[0].start, spans[0].end), (2, 11));
        assert_eq!(spans[0].label, "강조 표시: 굵게");
    }

    #[test]
    fn test_empty_markup_discarded() {
        assert!(scan("****").is_empty());
        assert!(scan("** **").is_empty());
        assert!(scan("<b>  </b>").is_empty());
    }

    #[test]
    fn test_italic() {
        let spans = scan("an *italic* word");
        assert_eq!(spans.len(), 1);
        assert_eq!(spans[0].source_text, "italic");
        assert_eq!(spans[0].label, "강조 표시: 기울임");
    }

    #[test]
    fn test_adjacent_italics() {
        let spans = scan("*a* *b*");
        let texts: Vec<_> = spans.iter().map(|s| s.source_text.as_str()).collect();
        assert_eq!(texts, vec!["a", "b"]);
    }

    #[test]
    fn test_italic_after_bold_on_same_line() {
        let spans = scan("**a** and *b*");
        let found: Vec<(&str, &str)> = spans
            .iter()
            .map(|s| (s.label.as_str(), s.source_text.as_str()))
            .collect();
        assert_eq!(found, vec![("강조 표시: 굵게", "a"), ("강조 표시: 기울임", "b")]);

        let spans = scan("**굵게** 그리고 *기울임*");
        let texts: Vec<_> = spans.iter().map(|s| s.source_text.as_str()).collect();
        assert_eq!(texts, vec!["굵게", "기울임"]);
        assert_eq!((spans[1].start, spans[1].end), (12, 15));
    }

    #[test]
    fn test_unterminated_markup() {
        assert!(scan("**never closed").is_empty());
        assert!(scan("<b>never closed").is_empty());
    }

    #[test]
    fn test_delimiters_do_not_cross_lines() {
        assert!(scan("**first\nsecond**").is_empty());
    }

    #[test]
    fn test_tags_case_insensitive_with_attributes() {
        let spans = scan(r#"<STRONG class="x">핵심</STRONG> and <mark>형광</mark>"#);
        let texts: Vec<_> = spans.iter().map(|s| s.source_text.as_str()).collect();
        assert_eq!(texts, vec!["핵심", "형광"]);
    }

    #[test]
    fn test_nested_tag_and_marker_both_kept() {
        let text = "**<u>겹침</u>**";
        let spans = scan(text);
        assert_eq!(spans.len(), 2);
        assert!(spans.iter().any(|s| s.source_text == "<u>겹침</u>"));
        assert!(spans.iter().any(|s| s.source_text == "겹침"));
    }

    #[test]
    fn test_hangul_char_offsets() {
        let spans = scan("가 ==형광펜== 나");
        assert_eq!(spans.len(), 1);
        assert_eq!((spans[0].start, spans[0].end), (4, 7));
        assert_eq!(spans[0].byte_start, 6);
    }

    #[test]
    fn test_invalid_rule_reports_label() {
        let lexicon = Lexicon {
            markup_rules: vec![MarkupRule {
                label: "broken".into(),
                pattern: "(unclosed".into(),
                exclusive_delimiter: None,
            }],
            ..Lexicon::default()
        };
        match MarkupCortex::new(&lexicon) {
            Err(LexiconError::InvalidPattern { label, .. }) => assert_eq!(label, "broken"),
            other => panic!("expected InvalidPattern, got {:?}", other.map(|c| c.rule_count())),
        }
    }
}
