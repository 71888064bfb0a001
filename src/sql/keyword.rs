//! Keywords highlighted by the query panel.
//!
//! The set is fixed and deliberately tiny: the panel only knows the clauses it
//! renders. Matching is case-insensitive via `from_lower`, which expects an
//! already lower-cased slice.

use derive_more::Display;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum Keyword {
    #[display("select")]
    Select,
    #[display("from")]
    From,
}

impl Keyword {
    pub const ALL: [Self; 2] = [Keyword::Select, Keyword::From];

    /// Attempt to classify a *lower-cased* word slice into a `Keyword`.
    /// Returns `None` if the word is not a recognized keyword.
    pub fn from_lower(word: &str) -> Option<Self> {
        use Keyword::*;
        let kw = match word {
            "select" => Select,
            "from" => From,
            _ => return None,
        };
        Some(kw)
    }

    /// Case-insensitive classification of an arbitrary word.
    pub fn parse(word: &str) -> Option<Self> {
        Self::from_lower(&word.to_lowercase())
    }

    /// Canonical lowercase string form of the keyword.
    pub const fn as_str(self) -> &'static str {
        match self {
            Keyword::Select => "select",
            Keyword::From => "from",
        }
    }

    /// Upper-case form used as a clause label.
    pub const fn label(self) -> &'static str {
        match self {
            Keyword::Select => "SELECT",
            Keyword::From => "FROM",
        }
    }
}
