//! First-occurrence text utilities shared by the guards, the syntax scorer and
//! the document rewriter.

use once_cell::sync::Lazy;
use regex::Regex;
use std::ops::Range;

static TOKEN_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\S+").expect("static regex"));

/// Strip leading/trailing punctuation, keeping inner apostrophes and hyphens
pub fn strip_punctuation(token: &str) -> &str {
    token.trim_matches(|c: char| !c.is_alphanumeric())
}

/// Whitespace tokens with their byte ranges
pub fn tokens_with_offsets(text: &str) -> Vec<(Range<usize>, &str)> {
    TOKEN_RE
        .find_iter(text)
        .map(|m| (m.range(), m.as_str()))
        .collect()
}

fn whole_word_regex(phrase: &str) -> Option<Regex> {
    let phrase = phrase.trim();
    if phrase.is_empty() {
        return None;
    }
    let pattern = format!(r"(?i)\b{}\b", regex::escape(phrase));
    match Regex::new(&pattern) {
        Ok(re) => Some(re),
        Err(err) => {
            log::warn!("Cannot build matcher for '{}': {}", phrase, err);
            None
        }
    }
}

/// Byte range of the first case-insensitive whole-word occurrence of `phrase`
pub fn find_first_word(text: &str, phrase: &str) -> Option<Range<usize>> {
    whole_word_regex(phrase)?.find(text).map(|m| m.range())
}

/// Replace the first case-insensitive whole-word occurrence of `phrase`.
///
/// Returns `None` when the phrase does not occur. The replacement is inserted
/// literally; no case adjustment happens here.
pub fn replace_first_word(text: &str, phrase: &str, replacement: &str) -> Option<String> {
    let range = find_first_word(text, phrase)?;
    let mut out = String::with_capacity(text.len() + replacement.len());
    out.push_str(&text[..range.start]);
    out.push_str(replacement);
    out.push_str(&text[range.end..]);
    Some(out)
}

/// Up to `window` tokens immediately before byte offset `start`, stripped of
/// punctuation and lowercased, in reading order.
///
/// A fragment glued to the occurrence (an opening quote, a bracket) is not a
/// token of its own and is skipped.
pub fn preceding_tokens(text: &str, start: usize, window: usize) -> Vec<String> {
    let before = &text[..start];
    let mut raw: Vec<&str> = before.split_whitespace().collect();
    if !before.is_empty() && !before.ends_with(char::is_whitespace) {
        raw.pop();
    }

    let mut tokens: Vec<String> = raw
        .iter()
        .rev()
        .map(|t| strip_punctuation(t).to_lowercase())
        .filter(|t| !t.is_empty())
        .take(window)
        .collect();
    tokens.reverse();
    tokens
}

/// The raw whitespace token immediately before byte offset `start`, if any
pub(crate) fn previous_raw_token(text: &str, start: usize) -> Option<&str> {
    let before = &text[..start];
    let mut raw: Vec<&str> = before.split_whitespace().collect();
    if !before.is_empty() && !before.ends_with(char::is_whitespace) {
        raw.pop();
    }
    raw.pop()
}

/// Whether a raw token closes a sentence (`end.`, `"Stop!"`, `(why?)`)
pub(crate) fn ends_sentence(token: &str) -> bool {
    token
        .trim_end_matches(|c: char| matches!(c, '"' | '\'' | ')' | ']' | '\u{201d}' | '\u{2019}'))
        .ends_with(['.', '!', '?'])
}

/// Whether the first letter of `token` is uppercase
pub(crate) fn starts_uppercase(token: &str) -> bool {
    token
        .chars()
        .find(|c| c.is_alphabetic())
        .is_some_and(char::is_uppercase)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_strip_punctuation() {
        assert_eq!(strip_punctuation("\"hot,\""), "hot");
        assert_eq!(strip_punctuation("isn't."), "isn't");
        assert_eq!(strip_punctuation("..."), "");
    }

    #[test]
    fn test_find_first_word_is_whole_word_and_case_insensitive() {
        let text = "Hotel guests like HOT tea and hot soup.";
        assert_eq!(find_first_word(text, "hot"), Some(18..21));
        assert_eq!(find_first_word(text, "tel"), None);
        assert_eq!(find_first_word(text, "  "), None);
    }

    #[test]
    fn test_find_first_word_escapes_metacharacters() {
        assert_eq!(find_first_word("aab a+b", "a+b"), Some(4..7));
        assert_eq!(find_first_word("x (a) y", "a"), Some(3..4));
    }

    #[test]
    fn test_replace_first_word_only_first() {
        let out = replace_first_word("hot and hot", "HOT", "scorching").unwrap();
        assert_eq!(out, "scorching and hot");
        assert_eq!(replace_first_word("cold", "hot", "x"), None);
    }

    #[test]
    fn test_preceding_tokens_window() {
        let text = "He was not, truly, very hot today.";
        let start = find_first_word(text, "hot").unwrap().start;
        assert_eq!(preceding_tokens(text, start, 4), vec!["was", "not", "truly", "very"]);
        assert_eq!(preceding_tokens(text, start, 1), vec!["very"]);
        assert!(preceding_tokens(text, 0, 4).is_empty());
    }

    #[test]
    fn test_preceding_tokens_skips_glued_prefix() {
        let text = "she said \"hot\" twice";
        let start = find_first_word(text, "hot").unwrap().start;
        assert_eq!(preceding_tokens(text, start, 2), vec!["she", "said"]);
        assert_eq!(previous_raw_token(text, start), Some("said"));
    }

    #[test]
    fn test_ends_sentence() {
        assert!(ends_sentence("end."));
        assert!(ends_sentence("\"Stop!\""));
        assert!(ends_sentence("(why?)"));
        assert!(!ends_sentence("Mr"));
        assert!(!ends_sentence("and,"));
    }
}
