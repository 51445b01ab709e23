//! Biography text to cleaned words: lowercase, split, strip punctuation, drop stopwords.

use crate::stopwords::StopwordSet;

/// Characters that end a token in addition to whitespace.
const SEPARATORS: &[char] = &[',', '.', ';', ':', '(', ')', '/', '"'];

/// Punctuation trimmed from both ends of each token.
const TRIMMED: &[char] = &[',', '.', '!', '?', '(', ')', ':', ';', '"', '\'', '-'];

fn is_separator(c: char) -> bool {
    c.is_whitespace() || SEPARATORS.contains(&c)
}

/// Split text into words: lowercase, split on whitespace and separators,
/// strip punctuation, drop empties and stopwords. Never fails.
pub fn tokenize(text: &str, stopwords: &StopwordSet) -> Vec<String> {
    text.to_lowercase()
        .split(is_separator)
        .map(|s| s.trim_matches(TRIMMED))
        .filter(|s| !s.is_empty() && !s.starts_with([',', '.']))
        .filter(|s| !stopwords.contains(s))
        .map(str::to_string)
        .collect()
}

/// Cleaned words joined by single spaces, in original order.
pub fn normalize(text: &str, stopwords: &StopwordSet) -> String {
    tokenize(text, stopwords).join(" ")
}
