//! Type decomposer
//!
//! Splits a `Tipologia` field into a category token and a free-text remainder.
//! The bank separates the two with either ` - ` or ` *`:
//!
//! ```text
//! Stipendio - STIPENDIO MESE CORRENTE        -> "Stipendio" | "STIPENDIO MESE CORRENTE"
//! Pagam. POS *PAYPAL123 A (ITA) NEGOZIO      -> "Pagam. POS" | "PAYPAL123 A (ITA) NEGOZIO"
//! cont. ATM                                  -> "cont. ATM" | (none)
//! ```
//!
//! The category token is at most two words. Extra leading words are moved to
//! the remainder when a separator exists and dropped otherwise.

use crate::core::traits::Matcher;
use crate::types::DecomposedType;
use regex::Regex;
use std::sync::LazyLock;

/// ` - ` (hyphen between whitespace) or ` *` (whitespace then asterisk)
static SEPARATOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s-\s|\s\*").expect("valid separator pattern"));

/// First one or two whitespace-delimited words
static TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*(\S+(?:\s+\S+)?)").expect("valid token pattern"));

/// Matcher for the separated form of a transaction type
///
/// Captures only when a separator with a non-empty category before it and a
/// non-empty remainder after it is found. The leftmost such separator wins.
#[derive(Debug, Clone, Copy, Default)]
pub struct SeparatorMatcher;

impl Matcher for SeparatorMatcher {
    type Capture = DecomposedType;

    fn captures(&self, text: &str) -> Option<DecomposedType> {
        let mut start = 0;
        while let Some(separator) = SEPARATOR.find_at(text, start) {
            let head = &text[..separator.start()];
            let tail = &text[separator.end()..];

            if !tail.is_empty() {
                if let Some(token) = TOKEN.captures(head).and_then(|caps| caps.get(1)) {
                    let remainder = if token.end() == head.trim_end().len() {
                        tail
                    } else {
                        text[token.end()..].trim_start()
                    };
                    return Some(DecomposedType {
                        category_token: token.as_str().to_string(),
                        remainder: Some(remainder.to_string()),
                    });
                }
            }

            // Separators start with one whitespace character; retry just past it
            start = separator.start()
                + text[separator.start()..]
                    .chars()
                    .next()
                    .map_or(1, char::len_utf8);
        }
        None
    }
}

/// Split a transaction type into category token and remainder
///
/// Never fails: without a separator the whole (trimmed) text is the category
/// token, capped at two words, and the remainder is `None`.
pub fn decompose(type_text: &str) -> DecomposedType {
    SeparatorMatcher
        .captures(type_text)
        .unwrap_or_else(|| DecomposedType {
            category_token: TOKEN
                .captures(type_text)
                .and_then(|caps| caps.get(1))
                .map(|token| token.as_str().to_string())
                .unwrap_or_default(),
            remainder: None,
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::salary(
        "Stipendio - STIPENDIO MESE CORRENTE",
        "Stipendio",
        Some("STIPENDIO MESE CORRENTE")
    )]
    #[case::two_word_token_hyphen(
        "Bonif. v/fav. - RIF:123BEN. MARIO ROSSI",
        "Bonif. v/fav.",
        Some("RIF:123BEN. MARIO ROSSI")
    )]
    #[case::asterisk(
        "Pagam. POS *MERCHANT123 A (ITA) Supermercato Srl",
        "Pagam. POS",
        Some("MERCHANT123 A (ITA) Supermercato Srl")
    )]
    #[case::leftmost_separator_wins(
        "Addebito SDD - SDD - Acme Utility SRL recurring",
        "Addebito SDD",
        Some("SDD - Acme Utility SRL recurring")
    )]
    #[case::hyphen_inside_word("POS-PAYPAL *EBAY123", "POS-PAYPAL", Some("EBAY123"))]
    #[case::no_separator("cont. ATM", "cont. ATM", None)]
    #[case::single_word("Bancomat", "Bancomat", None)]
    #[case::no_separator_trimmed("  Bancomat  ", "Bancomat", None)]
    #[case::empty_remainder_is_no_separator("Bancomat *", "Bancomat *", None)]
    fn test_decompose(
        #[case] text: &str,
        #[case] token: &str,
        #[case] remainder: Option<&str>,
    ) {
        let decomposed = decompose(text);
        assert_eq!(decomposed.category_token, token);
        assert_eq!(decomposed.remainder.as_deref(), remainder);
    }

    #[test]
    fn test_extra_leading_words_move_to_remainder() {
        let decomposed = decompose("Addebito canone mensile - CONTO");
        assert_eq!(decomposed.category_token, "Addebito canone");
        assert_eq!(decomposed.remainder.as_deref(), Some("mensile - CONTO"));
    }

    #[test]
    fn test_extra_leading_words_dropped_without_separator() {
        let decomposed = decompose("Prelievo contanti sportello");
        assert_eq!(decomposed.category_token, "Prelievo contanti");
        assert_eq!(decomposed.remainder, None);
    }

    #[test]
    fn test_separator_without_token_is_skipped() {
        // Nothing precedes the first separator, so the next one is used
        let decomposed = decompose(" *X Disposizione - BONIFICO");
        assert_eq!(decomposed.category_token, "*X Disposizione");
        assert_eq!(decomposed.remainder.as_deref(), Some("BONIFICO"));
    }

    #[test]
    fn test_token_never_exceeds_two_words() {
        for text in [
            "a b c d - e",
            "a b c d",
            "one two three *X",
            "Stipendio - A B C D",
        ] {
            let token = decompose(text).category_token;
            assert!(token.split_whitespace().count() <= 2, "{text} -> {token}");
        }
    }

    #[test]
    fn test_empty_text() {
        let decomposed = decompose("");
        assert_eq!(decomposed.category_token, "");
        assert_eq!(decomposed.remainder, None);
    }

    #[test]
    fn test_matcher_does_not_capture_without_separator() {
        assert_eq!(SeparatorMatcher.captures("cont. ATM"), None);
    }
}
