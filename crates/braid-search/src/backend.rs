//! Backend seams consumed by the hybrid pipeline.
//!
//! The pipeline never talks to a store directly. A keyword backend and a
//! vector backend each hand over an ordered candidate list wrapped as
//! [`SearchResult`]; whether that list came from `LIKE` patterns, a
//! full-text index, trigram similarity, or a vector database is the
//! adapter's business. Both backends must key the same entity with the
//! same id or fusion cannot recognize it as one item.

use anyhow::Result;
use braid_core::SearchResult;

/// A lexical/keyword retrieval layer.
pub trait KeywordSearch {
    /// Return up to `limit` candidates for `query`, best first, tagged
    /// [`braid_core::Source::Keyword`].
    ///
    /// # Errors
    ///
    /// Backend or transport failures. The pipeline propagates these to the
    /// caller unchanged.
    fn keyword_search(&self, query: &str, limit: usize) -> Result<Vec<SearchResult>>;
}

/// A vector-similarity retrieval layer.
pub trait VectorSearch {
    /// Return up to `limit` nearest candidates for `query_vector`, best
    /// first, tagged [`braid_core::Source::Vector`].
    ///
    /// # Errors
    ///
    /// Backend or transport failures, including a query vector whose
    /// dimension the backend cannot serve. The pipeline treats these as a
    /// degraded vector leg rather than a failed request.
    fn vector_search(&self, query_vector: &[f32], limit: usize) -> Result<Vec<SearchResult>>;

    /// The stored embedding for one identity, if the backend holds one.
    /// Drives similar-item lookups; see [`crate::hybrid::find_similar`].
    ///
    /// # Errors
    ///
    /// Backend or transport failures. An entity without a stored embedding
    /// is `Ok(None)`, not an error.
    fn vector_of(&self, id: &str) -> Result<Option<Vec<f32>>>;
}
