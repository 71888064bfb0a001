//! Token classification for highlighting.
//!
//! Rules are applied in priority order and the first match wins:
//! keyword, wildcard `*`, known column label, plain. A column literally named
//! `select` therefore renders as a keyword.

use crate::{ColumnLookup, PaletteConfig, TextStyle, sql::keyword::Keyword};
use derive_more::Display;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum StyleClass {
    Keyword,
    Wildcard,
    ColumnReference,
    Plain,
}

impl StyleClass {
    /// Visual style for this class.
    pub fn text_style(self, palette: &PaletteConfig) -> TextStyle {
        match self {
            StyleClass::Keyword => TextStyle::bold().italic().with_fill(&palette.keyword),
            StyleClass::Wildcard | StyleClass::ColumnReference => TextStyle::bold(),
            StyleClass::Plain => TextStyle::default(),
        }
    }
}

/// Classify a token's text. The column lookup is consulted on every call.
pub fn style_of(token: &str, columns: &dyn ColumnLookup) -> StyleClass {
    if Keyword::parse(token).is_some() {
        StyleClass::Keyword
    } else if token == "*" {
        StyleClass::Wildcard
    } else if columns.is_column_label(token) {
        StyleClass::ColumnReference
    } else {
        StyleClass::Plain
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{NoColumns, config};
    use rstest::rstest;

    struct Labels(&'static [&'static str]);

    impl ColumnLookup for Labels {
        fn is_column_label(&self, candidate: &str) -> bool {
            self.0.iter().any(|l| l.eq_ignore_ascii_case(candidate))
        }
    }

    #[rstest]
    #[case("SELECT", StyleClass::Keyword)]
    #[case("from", StyleClass::Keyword)]
    #[case("*", StyleClass::Wildcard)]
    #[case("Revenue", StyleClass::ColumnReference)]
    #[case("revenue", StyleClass::ColumnReference)]
    #[case("foo", StyleClass::Plain)]
    #[case(",", StyleClass::Plain)]
    #[case("**", StyleClass::Plain)]
    fn classifies_by_priority(#[case] token: &str, #[case] expected: StyleClass) {
        assert_eq!(style_of(token, &Labels(&["Revenue"])), expected);
    }

    #[test]
    fn keyword_wins_over_column_with_the_same_name() {
        assert_eq!(style_of("Select", &Labels(&["select"])), StyleClass::Keyword);
    }

    #[test]
    fn empty_lookup_degrades_to_plain() {
        assert_eq!(style_of("Revenue", &NoColumns), StyleClass::Plain);
    }

    #[test]
    fn styles_follow_the_palette() {
        let palette = &config().palette;
        let keyword = StyleClass::Keyword.text_style(palette);
        assert!(keyword.is_bold() && keyword.italic);
        assert_eq!(keyword.fill.as_deref(), Some(palette.keyword.as_str()));
        assert!(StyleClass::ColumnReference.text_style(palette).is_bold());
        assert_eq!(StyleClass::Plain.text_style(palette), TextStyle::default());
    }
}
