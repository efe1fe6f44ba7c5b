//! Min-max score normalization for a single result batch.
//!
//! Backends score on arbitrary scales; this rescales one batch into `[0, 1]`
//! using the batch's own minimum and maximum. It changes scores only, never
//! ordering, identities, payloads, or source tags.

#![allow(clippy::cast_possible_truncation)]

use crate::result::SearchResult;

/// Linearly rescale a batch's scores into `[0, 1]`.
///
/// A degenerate batch where every score is equal (including the one-element
/// batch) maps every score to `1.0`: the results are equally relevant, and
/// this avoids a zero-range division. The empty batch yields an empty batch.
///
/// Pure; inputs are untouched and a new vector is returned.
///
/// # Example
///
/// ```
/// use braid_core::normalize::normalize_scores;
/// use braid_core::result::SearchResult;
/// use serde_json::Value;
///
/// let batch = vec![
///     SearchResult::keyword("a", Value::Null, 5.0),
///     SearchResult::keyword("b", Value::Null, 3.0),
///     SearchResult::keyword("c", Value::Null, 1.0),
/// ];
/// let scaled = normalize_scores(&batch);
/// assert!((scaled[0].score - 1.0).abs() < 1e-6);
/// assert!((scaled[1].score - 0.5).abs() < 1e-6);
/// assert!((scaled[2].score - 0.0).abs() < 1e-6);
/// ```
#[must_use]
pub fn normalize_scores(results: &[SearchResult]) -> Vec<SearchResult> {
    let mut min = f32::INFINITY;
    let mut max = f32::NEG_INFINITY;
    for result in results {
        min = min.min(result.score);
        max = max.max(result.score);
    }

    // The span is computed in f64 so scores near the f32 extremes cannot
    // overflow it to infinity.
    let min = f64::from(min);
    let range = f64::from(max) - min;
    results
        .iter()
        .map(|result| {
            let mut rescaled = result.clone();
            rescaled.score = if range <= 0.0 {
                1.0
            } else {
                ((f64::from(result.score) - min) / range) as f32
            };
            rescaled
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
