//! Keyword extraction for relevance scoring.
//!
//! Maps free text to a short, ordered list of significant terms. Pure and
//! total: any input string produces a (possibly empty) keyword list.

use std::collections::HashSet;

/// Maximum number of keywords kept per text.
pub const MAX_KEYWORDS: usize = 10;

/// English function words excluded from keyword sets. Tokens of length <= 2
/// are dropped before this filter applies, so two-letter function words
/// ("of", "to", "in", ...) need no entry.
const STOP_WORDS: &[&str] = &[
    "the", "and", "are", "but", "nor", "for", "yet", "was", "were", "been", "being", "has", "had",
    "have", "having", "does", "did", "doing", "will", "would", "shall", "should", "can", "could",
    "may", "might", "must", "this", "that", "these", "those", "there", "here", "where", "when",
    "which", "what", "who", "whom", "whose", "why", "how", "all", "any", "both", "each", "few",
    "more", "most", "other", "some", "such", "not", "only", "own", "same", "than", "too", "very",
    "just", "then", "else", "with", "without", "within", "into", "onto", "about", "above", "after",
    "again", "against", "before", "below", "between", "down", "during", "from", "once", "over",
    "under", "until", "through", "she", "her", "hers", "him", "his", "its", "our", "ours", "you",
    "your", "yours", "they", "them", "their", "theirs",
];

/// Extracts up to [`MAX_KEYWORDS`] significant terms from `text`.
///
/// Lower-cases the input, treats every non-alphanumeric character as a
/// separator, and drops tokens of length <= 2, stop-words, and repeats.
/// Surviving tokens keep their first-occurrence order; everything past the
/// cap is ignored (no frequency weighting).
pub fn extract_keywords(text: &str) -> Vec<String> {
    let normalized: String = text
        .to_lowercase()
        .chars()
        .map(|c| if c.is_alphanumeric() { c } else { ' ' })
        .collect();

    let mut seen = HashSet::new();
    let mut keywords = Vec::new();
    for token in normalized.split_whitespace() {
        if token.len() <= 2 || STOP_WORDS.contains(&token) {
            continue;
        }
        if seen.insert(token.to_string()) {
            keywords.push(token.to_string());
            if keywords.len() == MAX_KEYWORDS {
                break;
            }
        }
    }
    keywords
}
