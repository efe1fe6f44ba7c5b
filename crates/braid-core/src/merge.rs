//! Union merge of ranked lists keeping the best score per identity.
//!
//! Where fusion re-scores by rank, this utility assumes the input lists
//! already score on one comparable scale (typically same-backend batches)
//! and simply keeps each identity's highest-scoring occurrence.

use std::cmp::Ordering;
use std::collections::HashMap;
use std::collections::hash_map::Entry;

use crate::result::SearchResult;

/// Merge any number of result lists, deduplicating by identity.
///
/// For each identity the occurrence with the strictly highest score is kept;
/// on an exact score tie the first-seen occurrence wins, payload and source
/// included. The kept set is sorted by score descending with a stable sort
/// (equal scores keep first-seen order) and truncated to `limit`.
///
/// Scores must be comparable across the inputs; that is the caller's
/// responsibility and generally only holds for batches from one backend.
///
/// # Example
///
/// ```
/// use braid_core::merge::merge_deduplicate;
/// use braid_core::result::SearchResult;
/// use serde_json::Value;
///
/// let first = vec![SearchResult::keyword("p1", Value::Null, 0.9)];
/// let second = vec![
///     SearchResult::keyword("p1", Value::Null, 0.4),
///     SearchResult::keyword("p2", Value::Null, 0.95),
/// ];
///
/// let merged = merge_deduplicate(&[&first, &second], 10);
/// assert_eq!(merged[0].id, "p2");
/// assert_eq!(merged[1].id, "p1");
/// assert!((merged[1].score - 0.9).abs() < 1e-6);
/// ```
#[must_use]
pub fn merge_deduplicate(lists: &[&[SearchResult]], limit: usize) -> Vec<SearchResult> {
    let mut kept: Vec<SearchResult> = Vec::new();
    let mut slots: HashMap<&str, usize> = HashMap::new();

    for list in lists {
        for candidate in *list {
            match slots.entry(candidate.id.as_str()) {
                Entry::Occupied(slot) => {
                    let slot = *slot.get();
                    // Strictly greater: ties keep the first-seen occurrence.
                    if candidate.score > kept[slot].score {
                        kept[slot] = candidate.clone();
                    }
                }
                Entry::Vacant(slot) => {
                    slot.insert(kept.len());
                    kept.push(candidate.clone());
                }
            }
        }
    }

    kept.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));
    kept.truncate(limit);
    kept
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::result::Source;
    use serde_json::json;

    fn result(id: &str, score: f32) -> SearchResult {
        SearchResult::keyword(id, json!({ "id": id }), score)
    }

    fn ids(results: &[SearchResult]) -> Vec<&str> {
        results.iter().map(|r| r.id.as_str()).collect()
    }

    #[test]
    fn no_lists_yields_empty() {
        assert!(merge_deduplicate(&[], 10).is_empty());
    }

    #[test]
    fn empty_lists_yield_empty() {
        let merged = merge_deduplicate(&[&[], &[]], 10);
        assert!(merged.is_empty());
    }

    #[test]
    fn highest_score_wins_across_lists() {
        let first = vec![result("p1", 0.9)];
        let second = vec![result("p1", 0.4), result("p2", 0.95)];

        let merged = merge_deduplicate(&[&first, &second], 10);

        assert_eq!(ids(&merged), vec!["p2", "p1"]);
        assert!((merged[0].score - 0.95).abs() < 1e-6);
        assert!((merged[1].score - 0.9).abs() < 1e-6);
    }

    #[test]
    fn later_higher_score_replaces_earlier_occurrence() {
        let first = vec![result("p1", 0.2)];
        let second = vec![SearchResult::vector("p1", json!({ "richer": true }), 0.8)];

        let merged = merge_deduplicate(&[&first, &second], 10);

        assert_eq!(merged.len(), 1);
        assert!((merged[0].score - 0.8).abs() < 1e-6);
        // The whole occurrence is replaced, payload and source included.
        assert_eq!(merged[0].payload["richer"], true);
        assert_eq!(merged[0].source, Source::Vector);
    }

    #[test]
    fn exact_score_tie_keeps_first_seen() {
        let first = vec![SearchResult::keyword("p1", json!({ "from": 1 }), 0.5)];
        let second = vec![SearchResult::keyword("p1", json!({ "from": 2 }), 0.5)];

        let merged = merge_deduplicate(&[&first, &second], 10);

        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].payload["from"], 1);
    }

    #[test]
    fn output_is_resorted_by_score() {
        // A single list arriving in ascending order comes out descending.
        let list = vec![result("low", 0.1), result("high", 0.9), result("mid", 0.5)];
        let merged = merge_deduplicate(&[&list], 10);
        assert_eq!(ids(&merged), vec!["high", "mid", "low"]);
    }

    #[test]
    fn equal_scores_stay_in_first_seen_order() {
        let first = vec![result("a", 0.5), result("b", 0.5)];
        let second = vec![result("c", 0.5)];

        let merged = merge_deduplicate(&[&first, &second], 10);
        assert_eq!(ids(&merged), vec!["a", "b", "c"]);
    }

    #[test]
    fn limit_truncates_after_sorting() {
        let list = vec![result("low", 0.1), result("high", 0.9), result("mid", 0.5)];
        let merged = merge_deduplicate(&[&list], 2);
        assert_eq!(ids(&merged), vec!["high", "mid"]);
    }

    #[test]
    fn zero_limit_yields_empty() {
        let list = vec![result("a", 0.9)];
        assert!(merge_deduplicate(&[&list], 0).is_empty());
    }

    #[test]
    fn three_way_union() {
        let first = vec![result("a", 0.3), result("b", 0.6)];
        let second = vec![result("b", 0.9), result("c", 0.1)];
        let third = vec![result("c", 0.7), result("a", 0.2)];

        let merged = merge_deduplicate(&[&first, &second, &third], 10);

        assert_eq!(ids(&merged), vec!["b", "c", "a"]);
        assert!((merged[0].score - 0.9).abs() < 1e-6);
        assert!((merged[1].score - 0.7).abs() < 1e-6);
        assert!((merged[2].score - 0.3).abs() < 1e-6);
    }
}
