use crate::sql::{token::Token, token_kind::TokenKind};

/// Split a clause's text into display tokens.
///
/// Every comma and every space (regular or non-breaking) is its own token;
/// any maximal run of other characters is one `Word`. Concatenating the token
/// texts reproduces the input exactly.
///
/// Guarantees:
/// - Total over all strings; empty input yields no tokens.
/// - Spans are character offsets and tile the input without gaps.
///
/// Complexity:
/// - O(n) time, O(t) space where `t` is number of tokens.
pub fn tokenize(text: &str) -> Vec<Token> {
    let mut out = Vec::new();
    let mut word = String::new();
    let mut word_start = 0;

    for (i, c) in text.chars().enumerate() {
        match TokenKind::of(c) {
            TokenKind::Word => {
                if word.is_empty() {
                    word_start = i;
                }
                word.push(c);
            }
            kind => {
                if !word.is_empty() {
                    out.push(Token::new(TokenKind::Word, std::mem::take(&mut word), word_start, i));
                }
                out.push(Token::new(kind, c, i, i + 1));
            }
        }
    }

    if !word.is_empty() {
        let end = word_start + word.chars().count();
        out.push(Token::new(TokenKind::Word, word, word_start, end));
    }

    out
}
