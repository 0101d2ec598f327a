//! OffsetIndex: byte offset -> character offset conversion
//!
//! `regex` reports UTF-8 byte offsets, while highlight consumers count
//! characters. The index is built once per analysis and answers each lookup
//! with a binary search over character boundaries.

/// Byte-to-character offset lookup for a single text
#[derive(Debug, Clone)]
pub struct OffsetIndex {
    /// Byte offset of every char boundary, plus the final `text.len()`.
    /// Empty when the text is pure ASCII (identity mapping).
    boundaries: Vec<usize>,
    byte_len: usize,
    char_len: usize,
}

impl OffsetIndex {
    pub fn new(text: &str) -> Self {
        if text.is_ascii() {
            return Self {
                boundaries: Vec::new(),
                byte_len: text.len(),
                char_len: text.len(),
            };
        }

        let mut boundaries: Vec<usize> = text.char_indices().map(|(i, _)| i).collect();
        let char_len = boundaries.len();
        boundaries.push(text.len());

        Self {
            boundaries,
            byte_len: text.len(),
            char_len,
        }
    }

    /// Number of characters in the indexed text
    pub fn char_len(&self) -> usize {
        self.char_len
    }

    pub fn byte_len(&self) -> usize {
        self.byte_len
    }

    /// Character offset for a byte offset.
    ///
    /// Byte offsets inside a multi-byte character resolve to the character
    /// that contains them; offsets past the end clamp to `char_len`.
    pub fn char_offset(&self, byte: usize) -> usize {
        if byte >= self.byte_len {
            return self.char_len;
        }
        if self.boundaries.is_empty() {
            return byte;
        }
        match self.boundaries.binary_search(&byte) {
            Ok(i) => i,
            Err(i) => i.saturating_sub(1),
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
