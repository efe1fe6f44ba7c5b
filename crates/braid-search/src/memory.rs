//! In-memory reference backend implementing both retrieval seams.
//!
//! Useful for tests, demos, and small corpora. Keyword relevance is field
//! precedence: a title substring match scores 3.0, a body match 2.0, a tag
//! match 1.0, and only the strongest matching field counts per document.
//! The vector side is brute-force cosine over stored embeddings. Both
//! sides order ties by id so results are deterministic.

use anyhow::{Result, bail};
use braid_core::SearchResult;
use serde_json::{Value, json};
use tracing::debug;

use crate::backend::{KeywordSearch, VectorSearch};

const TITLE_RELEVANCE: f32 = 3.0;
const BODY_RELEVANCE: f32 = 2.0;
const TAG_RELEVANCE: f32 = 1.0;

/// One indexed document.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub id: String,
    pub title: String,
    pub body: String,
    pub tags: Vec<String>,
    /// Precomputed embedding. Documents without one are invisible to the
    /// vector side but still match by keyword.
    pub embedding: Option<Vec<f32>>,
}

/// Brute-force index over a list of [`Document`]s.
#[derive(Debug, Clone)]
pub struct MemoryIndex {
    documents: Vec<Document>,
    dimension: usize,
}

impl MemoryIndex {
    /// Create an empty index expecting embeddings of width `dimension`.
    #[must_use]
    pub const fn new(dimension: usize) -> Self {
        Self {
            documents: Vec::new(),
            dimension,
        }
    }

    #[must_use]
    pub const fn dimension(&self) -> usize {
        self.dimension
    }

    #[must_use]
    pub const fn len(&self) -> usize {
        self.documents.len()
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    /// Insert `document`, replacing any existing document with the same id.
    pub fn insert(&mut self, document: Document) {
        for existing in &mut self.documents {
            if existing.id == document.id {
                *existing = document;
                return;
            }
        }
        self.documents.push(document);
    }

    fn payload(document: &Document) -> Value {
        json!({
            "id": document.id,
            "title": document.title,
            "body": document.body,
            "tags": document.tags,
        })
    }
}

impl KeywordSearch for MemoryIndex {
    fn keyword_search(&self, query: &str, limit: usize) -> Result<Vec<SearchResult>> {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() || limit == 0 {
            return Ok(Vec::new());
        }

        let mut hits: Vec<SearchResult> = Vec::new();
        for document in &self.documents {
            let relevance = if document.title.to_lowercase().contains(&needle) {
                TITLE_RELEVANCE
            } else if document.body.to_lowercase().contains(&needle) {
                BODY_RELEVANCE
            } else if document
                .tags
                .iter()
                .any(|tag| tag.to_lowercase().contains(&needle))
            {
                TAG_RELEVANCE
            } else {
                continue;
            };
            hits.push(SearchResult::keyword(
                document.id.clone(),
                Self::payload(document),
                relevance,
            ));
        }

        hits.sort_by(|a, b| {
            b.score
                .partial_cmp(&a.score)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| a.id.cmp(&b.id))
        });
        hits.truncate(limit);

        Ok(hits)
    }
}

impl VectorSearch for MemoryIndex {
    fn vector_search(&self, query_vector: &[f32], limit: usize) -> Result<Vec<SearchResult>> {
        if query_vector.len() != self.dimension {
            bail!(
                "query vector dimension mismatch: expected {}, got {}",
                self.dimension,
                query_vector.len()
            );
        }

        if limit == 0 {
            return Ok(Vec::new());
        }

        let mut hits: Vec<SearchResult> = Vec::new();
        for document in &self.documents {
            let Some(stored) = document.embedding.as_deref() else {
                continue;
            };

            if stored.len() != self.dimension {
                debug!(
                    "skipping stored embedding for {} due to dimension {}",
                    document.id,
                    stored.len()
                );
                continue;
            }

            let Some(cosine) = cosine_similarity(query_vector, stored) else {
                debug!("skipping zero-magnitude embedding for {}", document.id);
                continue;
            };
            // Map cosine [-1, 1] to [0, 1] so vector scores share a scale
            // with the rest of the pipeline.
            let score = ((cosine + 1.0) * 0.5).clamp(0.0, 1.0);
            hits.push(SearchResult::vector(
                document.id.clone(),
                Self::payload(document),
                score,
            ));
        }

        hits.sort_by(|a, b| {
            b.score
                .partial_cmp(&a.score)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| a.id.cmp(&b.id))
        });
        hits.truncate(limit);

        Ok(hits)
    }

    fn vector_of(&self, id: &str) -> Result<Option<Vec<f32>>> {
        Ok(self
            .documents
            .iter()
            .find(|document| document.id == id)
            .and_then(|document| document.embedding.clone()))
    }
}

/// Cosine similarity between two vectors, clamped to `[-1, 1]`.
///
/// Returns `None` for mismatched lengths, empty input, or a vector with
/// (near) zero magnitude, where the quantity is undefined.
#[must_use]
pub fn cosine_similarity(left: &[f32], right: &[f32]) -> Option<f32> {
    if left.len() != right.len() || left.is_empty() {
        return None;
    }

    let mut dot = 0.0_f32;
    let mut left_norm_sq = 0.0_f32;
    let mut right_norm_sq = 0.0_f32;

    for (a, b) in left.iter().zip(right.iter()) {
        dot = a.mul_add(*b, dot);
        left_norm_sq = a.mul_add(*a, left_norm_sq);
        right_norm_sq = b.mul_add(*b, right_norm_sq);
    }

    let denom = left_norm_sq.sqrt() * right_norm_sq.sqrt();
    if denom <= f32::EPSILON {
        return None;
    }

    Some((dot / denom).clamp(-1.0, 1.0))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
