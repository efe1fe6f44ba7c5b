//! Hybrid search orchestration over the backend seams.
//!
//! One request fans out to the keyword backend and, when an embedding
//! provider is supplied, to the vector backend. The two ranked lists are
//! fused by weighted reciprocal rank and truncated to the caller's limit.
//!
//! Degradation policy:
//! - the keyword leg always runs and its failures propagate
//! - the vector leg is best-effort: a failed embedding call or vector
//!   backend substitutes an empty list, so the request still succeeds
//!   with rank-fused lexical results instead of failing outright

use anyhow::{Context, Result};
use braid_core::{SearchResult, fuse};
use tracing::{debug, warn};

use crate::backend::{KeywordSearch, VectorSearch};
use crate::config::SearchConfig;
use crate::embedding::EmbeddingProvider;

/// Run one hybrid search for `query`.
///
/// `limit` is clamped to `config.pipeline.max_limit`. Both backends are
/// asked for `limit * config.pipeline.overfetch_factor` candidates so an
/// identity ranked deep in one list can still be confirmed by the other
/// before the final cut.
///
/// Every returned result is tagged [`braid_core::Source::Hybrid`], even
/// when the vector leg contributed nothing.
///
/// # Errors
///
/// Keyword backend failures and invalid fusion parameters.
pub fn hybrid_search(
    query: &str,
    keyword: &impl KeywordSearch,
    vector: &impl VectorSearch,
    embedder: Option<&dyn EmbeddingProvider>,
    limit: usize,
    config: &SearchConfig,
) -> Result<Vec<SearchResult>> {
    let limit = limit.min(config.pipeline.max_limit);
    if limit == 0 {
        return Ok(Vec::new());
    }
    let fetch = limit
        .saturating_mul(config.pipeline.overfetch_factor)
        .max(limit);

    let lexical_hits = keyword
        .keyword_search(query, fetch)
        .context("keyword search failed")?;

    let vector_hits = if let Some(embedder) = embedder {
        match embedder
            .embed(query)
            .and_then(|embedding| vector.vector_search(&embedding, fetch))
        {
            Ok(hits) => hits,
            Err(e) => {
                warn!("vector layer unavailable, falling back to lexical-only fusion: {e}");
                Vec::new()
            }
        }
    } else {
        debug!("no embedding provider configured, lexical-only fusion");
        Vec::new()
    };

    let mut fused = fuse(&lexical_hits, &vector_hits, &config.fusion)?;
    fused.truncate(limit);
    Ok(fused)
}

/// Find items similar to the one identified by `id`, using its stored
/// embedding as the query vector.
///
/// The anchor item itself is removed from the output. An item without a
/// stored embedding has no similarity neighborhood and yields an empty
/// list rather than an error.
///
/// # Errors
///
/// Vector backend failures.
pub fn find_similar(
    id: &str,
    vector: &impl VectorSearch,
    limit: usize,
) -> Result<Vec<SearchResult>> {
    if limit == 0 {
        return Ok(Vec::new());
    }

    let Some(anchor) = vector
        .vector_of(id)
        .with_context(|| format!("fetching stored vector for {id}"))?
    else {
        debug!("no stored vector for {id}, nothing similar to return");
        return Ok(Vec::new());
    };

    // Fetch one extra candidate because the anchor ranks first against its
    // own vector.
    let mut hits = vector
        .vector_search(&anchor, limit.saturating_add(1))
        .context("similar-item vector search failed")?;
    hits.retain(|hit| hit.id != id);
    hits.truncate(limit);

    Ok(hits)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
