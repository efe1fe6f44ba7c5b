//! Weighted Reciprocal Rank Fusion over two ranked candidate lists.
//!
//! This module merges a lexical/keyword result list and a vector-similarity
//! result list into one ranked list. Raw scores from the two backends live
//! on incomparable scales (pattern-match relevance vs cosine similarity), so
//! fusion uses only each candidate's rank position within its own list.
//!
//! # Algorithm Overview
//!
//! **Reciprocal Rank Fusion (RRF)** scores each identity by where it sits in
//! each list:
//!
//! ```text
//! fused(id) = sum over lists containing id of: w_list / (k + rank_in_list)
//! ```
//!
//! Where:
//! - `k` is a damping constant (default 60). Larger `k` flattens the gap
//!   between adjacent ranks; smaller `k` privileges the top ranks sharply.
//! - `w_list` is the list's weight after normalizing the configured weights
//!   to sum to 1.
//! - Ranks are 1-based in the order the backend returned the list. Input
//!   lists are never re-sorted before ranking.
//! - Identities absent from a list contribute 0 for that list.
//!
//! An identity confirmed by both backends sums both contributions and floats
//! above identities seen by only one, which is the point of the technique.
//!
//! # Example
//!
//! ```
//! use braid_core::fusion::{RrfConfig, fuse};
//! use braid_core::result::SearchResult;
//! use serde_json::json;
//!
//! let lexical = vec![
//!     SearchResult::keyword("sku-7", json!({"name": "hex bolt"}), 5.0),
//!     SearchResult::keyword("sku-2", json!({"name": "bolt cutter"}), 3.0),
//! ];
//! let vector = vec![
//!     SearchResult::vector("sku-2", json!({"name": "bolt cutter"}), 0.93),
//! ];
//!
//! let fused = fuse(&lexical, &vector, &RrfConfig::default()).expect("valid config");
//! // sku-2 is confirmed by both lists and outranks sku-7.
//! assert_eq!(fused[0].id, "sku-2");
//! assert_eq!(fused.len(), 2);
//! ```

#![allow(clippy::module_name_repetitions)]
#![allow(clippy::cast_precision_loss)]

use std::cmp::Ordering;
use std::collections::HashMap;
use std::collections::hash_map::Entry;

use serde::{Deserialize, Serialize};

use crate::result::{SearchResult, Source};

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Contract violations detected before any fusion work happens.
///
/// These are programming errors in the caller's parameters, not recoverable
/// runtime conditions; they surface eagerly and are never clamped away.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FusionError {
    /// The damping constant must be at least 1. `k = 0` makes the rank-1
    /// contribution `w / 1` and destabilizes the weighting.
    #[error("rrf constant k must be at least 1, got {0}")]
    InvalidK(usize),

    /// Weights must be finite numbers.
    #[error("fusion weights must be finite, got lexical={lexical}, vector={vector}")]
    NonFiniteWeight {
        /// Configured lexical weight.
        lexical: f32,
        /// Configured vector weight.
        vector: f32,
    },

    /// Weights must be non-negative.
    #[error("fusion weights must be non-negative, got lexical={lexical}, vector={vector}")]
    NegativeWeight {
        /// Configured lexical weight.
        lexical: f32,
        /// Configured vector weight.
        vector: f32,
    },

    /// At least one weight must be positive, otherwise no list can
    /// contribute and normalization would divide by zero.
    #[error("fusion weights must not both be zero")]
    ZeroWeights,
}

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Tunables for [`fuse`].
///
/// All fields default so a partial configuration section deserializes
/// cleanly: `k = 60` with equal weights `0.5 / 0.5`. Weights do not need to
/// sum to 1; [`fuse`] normalizes them by their sum so callers can write
/// `3 / 1` just as well as `0.75 / 0.25`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RrfConfig {
    /// RRF damping constant; higher values reduce the impact of rank gaps.
    #[serde(default = "default_k")]
    pub k: usize,

    /// Weight of the lexical/keyword list.
    #[serde(default = "default_weight")]
    pub lexical_weight: f32,

    /// Weight of the vector-similarity list.
    #[serde(default = "default_weight")]
    pub vector_weight: f32,
}

impl RrfConfig {
    /// Check the parameter contract without running a fusion.
    ///
    /// # Errors
    ///
    /// Returns [`FusionError::InvalidK`] for `k < 1`,
    /// [`FusionError::NonFiniteWeight`] for NaN or infinite weights,
    /// [`FusionError::NegativeWeight`] for a weight below zero, and
    /// [`FusionError::ZeroWeights`] when both weights are zero.
    pub const fn validate(&self) -> Result<(), FusionError> {
        if self.k < 1 {
            return Err(FusionError::InvalidK(self.k));
        }
        if !self.lexical_weight.is_finite() || !self.vector_weight.is_finite() {
            return Err(FusionError::NonFiniteWeight {
                lexical: self.lexical_weight,
                vector: self.vector_weight,
            });
        }
        if self.lexical_weight < 0.0 || self.vector_weight < 0.0 {
            return Err(FusionError::NegativeWeight {
                lexical: self.lexical_weight,
                vector: self.vector_weight,
            });
        }
        if self.lexical_weight + self.vector_weight <= 0.0 {
            return Err(FusionError::ZeroWeights);
        }
        Ok(())
    }
}

impl Default for RrfConfig {
    fn default() -> Self {
        Self {
            k: default_k(),
            lexical_weight: default_weight(),
            vector_weight: default_weight(),
        }
    }
}

const fn default_k() -> usize {
    60
}

const fn default_weight() -> f32 {
    0.5
}

// ---------------------------------------------------------------------------
// Fusion
// ---------------------------------------------------------------------------

/// Fuse a lexical and a vector candidate list into one ranked list.
///
/// Both inputs must already be ordered best-first by their own backend's
/// notion of relevance; rank position is the only signal used. Empty lists
/// are valid and take the same code path, so a caller whose vector backend
/// failed can pass an empty vector list and receive the lexical order
/// unchanged (rank transformation is monotonic).
///
/// When an identity appears in both lists its contributions are summed and
/// its payload is taken from the list that produced it first. The lexical
/// list is processed first, so on collision the lexical payload wins; this
/// tie-break is fixed and relied upon by callers.
///
/// Output is sorted by fused score descending with a stable sort. Equal
/// scores keep first-encountered order; there is no secondary sort key. All
/// emitted results carry [`Source::Hybrid`].
///
/// # Errors
///
/// Returns a [`FusionError`] when `config` violates the parameter contract;
/// see [`RrfConfig::validate`].
pub fn fuse(
    lexical: &[SearchResult],
    vector: &[SearchResult],
    config: &RrfConfig,
) -> Result<Vec<SearchResult>, FusionError> {
    config.validate()?;

    let weight_sum = config.lexical_weight + config.vector_weight;
    let lexical_weight = config.lexical_weight / weight_sum;
    let vector_weight = config.vector_weight / weight_sum;
    let k = config.k as f32;

    // Accumulate in first-encounter order. The slot map lets a later
    // occurrence of an identity add to its existing entry without
    // disturbing the entry's position, which the final stable sort relies
    // on for tie ordering.
    let capacity = lexical.len() + vector.len();
    let mut fused: Vec<SearchResult> = Vec::with_capacity(capacity);
    let mut slots: HashMap<&str, usize> = HashMap::with_capacity(capacity);

    for (list, weight) in [(lexical, lexical_weight), (vector, vector_weight)] {
        for (idx, candidate) in list.iter().enumerate() {
            let rank = (idx + 1) as f32; // 1-based
            let contribution = weight / (k + rank);
            match slots.entry(candidate.id.as_str()) {
                Entry::Occupied(slot) => fused[*slot.get()].score += contribution,
                Entry::Vacant(slot) => {
                    slot.insert(fused.len());
                    fused.push(SearchResult::new(
                        candidate.id.clone(),
                        candidate.payload.clone(),
                        contribution,
                        Source::Hybrid,
                    ));
                }
            }
        }
    }

    // Stable descending sort: ties stay in accumulation order.
    fused.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));

    Ok(fused)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
