//! The candidate record exchanged between search backends and fusion.
//!
//! Every backend adapter wraps its raw rows into [`SearchResult`] values so
//! that fusion can recognize the same entity across independently produced
//! lists. The `id` is the only field fusion keys on: the same real-world
//! entity must carry the same `id` whether it came from the keyword backend
//! or the vector backend.

#![allow(clippy::module_name_repetitions)]

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Provenance of a [`SearchResult`].
///
/// Backends tag their own output; fusion always emits [`Source::Hybrid`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Source {
    /// Produced by a lexical/keyword backend (pattern match, full text,
    /// trigram similarity).
    Keyword,

    /// Produced by a vector-similarity backend (nearest neighbour over
    /// embeddings).
    Vector,

    /// Produced by rank fusion over the two lists above.
    Hybrid,
}

/// One candidate from one search backend.
///
/// `score` semantics are backend-specific (lexical relevance vs cosine
/// similarity) and are NOT comparable across backends in raw form. Rank
/// fusion exists precisely because of that; see [`crate::fusion::fuse`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    /// Opaque comparable key identifying the underlying entity (a SKU, a
    /// customer id, a delivery id). Must be identical across backends for
    /// the same entity.
    pub id: String,

    /// Displayable attribute bag for the entity. Owned by the result; a
    /// shallow copy is safe to carry forward.
    pub payload: Value,

    /// Non-negative relevance in the producing backend's own scale.
    pub score: f32,

    /// Which layer produced this result.
    pub source: Source,
}

impl SearchResult {
    /// Build a result with an explicit source tag.
    #[must_use]
    pub fn new(id: impl Into<String>, payload: Value, score: f32, source: Source) -> Self {
        Self {
            id: id.into(),
            payload,
            score,
            source,
        }
    }

    /// Shorthand for a keyword-backend candidate.
    #[must_use]
    pub fn keyword(id: impl Into<String>, payload: Value, score: f32) -> Self {
        Self::new(id, payload, score, Source::Keyword)
    }

    /// Shorthand for a vector-backend candidate.
    #[must_use]
    pub fn vector(id: impl Into<String>, payload: Value, score: f32) -> Self {
        Self::new(id, payload, score, Source::Vector)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
