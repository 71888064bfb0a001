//! Token kind definitions for the display tokenizer.
//!
//! The three kinds are mutually exclusive and cover every character:
//! a comma, a single space (regular or non-breaking), or a run of anything
//! else.

/// Non-breaking space, the canonical form of a space inside a clause.
pub const NBSP: char = '\u{00A0}';

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// Maximal run of characters that are neither comma nor space.
    Word,
    /// A single `,`.
    Comma,
    /// A single space character.
    Space,
}

impl TokenKind {
    /// Kind of the token a character belongs to.
    pub fn of(c: char) -> Self {
        match c {
            ',' => TokenKind::Comma,
            ' ' | NBSP => TokenKind::Space,
            _ => TokenKind::Word,
        }
    }

    /// True for commas and spaces, the characters that end a word.
    pub fn is_separator(self) -> bool {
        !matches!(self, TokenKind::Word)
    }
}
