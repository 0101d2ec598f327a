//! Token normalization
//!
//! Latin tokens are lowercased. Tokens containing Hangul additionally lose
//! trailing grammatical particles (은/는/이/가/에서/...) until no particle
//! suffix remains, so 학교에서 and 학교는 both count as 학교.
//!
//! A particle is only stripped when at least `MIN_STEM_CHARS` characters
//! remain, so nouns ending in a particle-like syllable (도로, 사과, 나이)
//! keep their full form.

use std::collections::HashSet;

use super::lexicon::Lexicon;

/// Shortest stem a particle strip may leave behind
pub const MIN_STEM_CHARS: usize = 2;

/// Hangul syllables block (가..힣)
pub fn is_hangul_syllable(c: char) -> bool {
    ('\u{AC00}'..='\u{D7A3}').contains(&c)
}

pub fn contains_hangul(s: &str) -> bool {
    s.chars().any(is_hangul_syllable)
}

/// Case folding, particle stripping and stopword lookup
#[derive(Debug, Clone, Default)]
pub struct Normalizer {
    /// Sorted longest first
    particles: Vec<String>,
    stopwords: HashSet<String>,
}

impl Normalizer {
    pub fn new(lexicon: &Lexicon) -> Self {
        let mut particles: Vec<String> = lexicon
            .particles
            .iter()
            .filter(|p| !p.is_empty())
            .cloned()
            .collect();
        particles.sort_by(|a, b| b.chars().count().cmp(&a.chars().count()).then_with(|| a.cmp(b)));
        particles.dedup();

        let stopwords = lexicon.stopwords.iter().map(|w| w.to_lowercase()).collect();

        Self { particles, stopwords }
    }

    /// Normalized counting key for a raw token
    pub fn normalize(&self, raw: &str) -> String {
        let lowered = raw.to_lowercase();
        if contains_hangul(&lowered) {
            self.strip_particles(&lowered)
        } else {
            lowered
        }
    }

    /// Strip trailing particles until the string stops changing.
    /// Each step takes the longest particle whose removal leaves a stem of
    /// at least `MIN_STEM_CHARS` characters.
    pub fn strip_particles(&self, token: &str) -> String {
        let mut current = token;
        loop {
            let stripped = self.particles.iter().find_map(|p| {
                current
                    .strip_suffix(p.as_str())
                    .filter(|rest| rest.chars().count() >= MIN_STEM_CHARS)
            });
            match stripped {
                Some(rest) => current = rest,
                None => return current.to_string(),
            }
        }
    }

    pub fn is_stopword(&self, word: &str) -> bool {
        self.stopwords.contains(word)
    }

    /// A token counts when its normalized form is long enough and neither
    /// the form nor the lowercased raw token is a stopword
    pub fn is_valid(&self, raw: &str, normalized: &str, min_token_length: usize) -> bool {
        if normalized.is_empty() || normalized.chars().count() < min_token_length {
            return false;
        }
        !self.is_stopword(normalized) && !self.is_stopword(&raw.to_lowercase())
    }
}

// =============================================================================
// Tests
// =============================================================================
