//! [`FuzzPattern`] definition.

use derive_more::Display;
use itertools::Itertools as _;
use postgres_types::{FromSql, ToSql};

/// SQL pattern for fuzzy searching case numbers and party names.
///
/// Splits on Unicode whitespace, so search input pasted from Chinese
/// documents (full-width spaces included) still breaks into words.
#[derive(Clone, Debug, Display, Eq, FromSql, PartialEq, ToSql)]
#[postgres(transparent)]
pub struct FuzzPattern(String);

impl FuzzPattern {
    /// Creates a new [`FuzzPattern`] out of the given `input`.
    #[must_use]
    pub fn new(input: &str) -> Self {
        Self(format!(
            "({})",
            input.split_whitespace().format_with("|", |word, f| {
                f(&format_args!(
                    "%{}%",
                    word.replace('\\', r"\\")
                        .replace('%', r"\%")
                        .replace('|', r"\|")
                        .replace('*', r"\*")
                        .replace('+', r"\+")
                        .replace('?', r"\?")
                        .replace('{', r"\{")
                        .replace('}', r"\}")
                        .replace('(', r"\(")
                        .replace(')', r"\)")
                        .replace('[', r"\[")
                        .replace(']', r"\]")
                        .replace('_', r"\_")
                ))
            }),
        ))
    }
}

#[cfg(test)]
mod spec {
    use super::FuzzPattern;

    #[test]
    fn splits_words_into_alternatives() {
        assert_eq!(
            FuzzPattern::new("王小明 114-0042").to_string(),
            "(%王小明%|%114-0042%)",
        );
    }

    #[test]
    fn escapes_pattern_metacharacters() {
        assert_eq!(FuzzPattern::new("100%").to_string(), r"(%100\%%)");
    }
}
