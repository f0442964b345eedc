//! Relevance scoring: keyword overlap and recency bonus.
//!
//! Both functions are pure and total; the assembler combines them as
//! `keyword_score + recency_weight * recency_bonus`.

use std::collections::HashSet;

/// Overlap score between two keyword sets, in `[0, 1]`.
///
/// Returns 0 when either set is empty, otherwise the intersection size
/// normalized by the LARGER set (not the union). Order within the sets is
/// irrelevant here.
pub fn keyword_score(a: &[String], b: &[String]) -> f32 {
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }
    let a_set: HashSet<&str> = a.iter().map(String::as_str).collect();
    let b_set: HashSet<&str> = b.iter().map(String::as_str).collect();
    let intersection = a_set.intersection(&b_set).count();
    intersection as f32 / a_set.len().max(b_set.len()) as f32
}

/// Rank-based recency bonus in `[0, 1)` for a candidate at
/// `index_from_newest` within a newest-first list of `total` entries.
///
/// Note this is `index / total` over list position, NOT a time-decay: the
/// bonus grows for entries further from the front of the newest-first list.
/// Ranking depends on this exact shape; do not replace it with a
/// timestamp-delta function.
pub fn recency_bonus(index_from_newest: usize, total: usize) -> f32 {
    if total == 0 {
        return 0.0;
    }
    index_from_newest as f32 / total as f32
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kw(words: &[&str]) -> Vec<String> {
        words.iter().map(|w| w.to_string()).collect()
    }

    #[test]
    fn test_empty_sets_score_zero() {
        assert_eq!(keyword_score(&[], &kw(&["cat"])), 0.0);
        assert_eq!(keyword_score(&kw(&["cat"]), &[]), 0.0);
        assert_eq!(keyword_score(&[], &[]), 0.0);
    }

    #[test]
    fn test_identical_sets_score_one() {
        let a = kw(&["sunset", "beach"]);
        assert_eq!(keyword_score(&a, &a), 1.0);
    }

    #[test]
    fn test_normalized_by_larger_set() {
        let a = kw(&["sunset"]);
        let b = kw(&["sunset", "beach", "palm", "tree"]);
        assert_eq!(keyword_score(&a, &b), 0.25);
    }

    #[test]
    fn test_score_is_symmetric_and_bounded() {
        let a = kw(&["red", "dragon", "castle"]);
        let b = kw(&["dragon", "knight"]);
        let ab = keyword_score(&a, &b);
        let ba = keyword_score(&b, &a);
        assert_eq!(ab, ba);
        assert!((0.0..=1.0).contains(&ab));
    }

    #[test]
    fn test_recency_bonus_shape() {
        assert_eq!(recency_bonus(0, 10), 0.0);
        assert_eq!(recency_bonus(5, 10), 0.5);
        assert!(recency_bonus(9, 10) < 1.0);
        assert_eq!(recency_bonus(3, 0), 0.0);
    }
}
