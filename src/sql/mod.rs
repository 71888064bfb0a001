//! Display tokenization and highlighting for query clauses.
//!
//! Unlike a SQL lexer, nothing here is dropped: whitespace and punctuation
//! become tokens of their own because every token is drawn and measured as a
//! separate text run.
//!
//! Modules:
//! - `keyword`    : The fixed keyword set (`select`, `from`).
//! - `token_kind` : Word / comma / space classification.
//! - `token`      : Token struct pairing a kind with its text and character span.
//! - `tokenizer`  : Single pass O(n) tokenizer producing a `Vec<Token>`.
//! - `style`      : Priority rules mapping a token to a `StyleClass`.
//!
//! Example:
//! ```rust
//! use qcanvas::sql::prelude::*;
//!
//! let tokens = tokenize("SELECT a, b");
//! assert_eq!(tokens.len(), 6);
//! assert_eq!(style_of(&tokens[0].text, &qcanvas::NoColumns), StyleClass::Keyword);
//! ```

pub mod keyword;
pub mod style;
pub mod token;
pub mod token_kind;
pub mod tokenizer;

pub use keyword::Keyword;
pub use style::{StyleClass, style_of};
pub use token::Token;
pub use token_kind::{NBSP, TokenKind};
pub use tokenizer::tokenize;

/// Convenience prelude re-exporting the most commonly used items.
pub mod prelude {
    pub use super::{Keyword, StyleClass, Token, TokenKind, style_of, tokenize};
}
