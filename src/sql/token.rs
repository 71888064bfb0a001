//! Token model tying a `TokenKind` to its text and span.
//!
//! Spans are *character* offsets (not bytes) into the tokenized string, the
//! same unit the input store uses for caret positions. Tokens are rebuilt on
//! every text change and never mutated.
use crate::sql::token_kind::TokenKind;

/// A display token with its inclusive start and exclusive end character offsets.
///
/// Invariants:
/// - `end > start`
/// - `text.chars().count() == end - start`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
    pub start: usize,
    pub end: usize,
}

impl Token {
    pub fn new(kind: TokenKind, text: impl Into<String>, start: usize, end: usize) -> Self {
        Self {
            kind,
            text: text.into(),
            start,
            end,
        }
    }

    /// Character length of this token.
    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn is_separator(&self) -> bool {
        self.kind.is_separator()
    }

    /// True if the character offset lies within this token's span.
    ///
    /// NOTE: End is exclusive, so `offset == end` returns false.
    pub fn contains(&self, offset: usize) -> bool {
        offset >= self.start && offset < self.end
    }

    pub const fn span(&self) -> (usize, usize) {
        (self.start, self.end)
    }

    /// The first `chars` characters of the token text.
    pub fn prefix(&self, chars: usize) -> &str {
        match self.text.char_indices().nth(chars) {
            Some((byte, _)) => &self.text[..byte],
            None => &self.text,
        }
    }
}
