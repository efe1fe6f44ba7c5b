//! Embedding provider seam with in-process memoization.
//!
//! Turning text into a vector is the expensive step of the vector leg,
//! usually a model inference or a network round trip. [`CachedEmbedder`]
//! wraps any provider and memoizes results by a digest of the provider
//! dimension and the normalized text, so repeated queries skip the round
//! trip entirely.

use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};

use anyhow::Result;
use sha2::{Digest, Sha256};
use tracing::debug;

/// Anything that can map text to a fixed-width vector.
pub trait EmbeddingProvider {
    /// Width of the vectors this provider produces.
    fn dimension(&self) -> usize;

    /// Embed a single text.
    ///
    /// # Errors
    ///
    /// Model or transport failures.
    fn embed(&self, text: &str) -> Result<Vec<f32>>;

    /// Embed several texts. The default implementation embeds one at a
    /// time; providers with a real batch endpoint should override it.
    ///
    /// # Errors
    ///
    /// Fails on the first text that cannot be embedded.
    fn embed_batch(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>> {
        texts.iter().map(|text| self.embed(text)).collect()
    }
}

/// Memoizing wrapper around an [`EmbeddingProvider`].
///
/// Only successful embeddings are cached. Failures pass through and the
/// next call for the same text retries the inner provider.
pub struct CachedEmbedder<P> {
    provider: P,
    cache: Mutex<HashMap<String, Vec<f32>>>,
}

impl<P: EmbeddingProvider> CachedEmbedder<P> {
    /// Wrap `provider` with an empty cache.
    #[must_use]
    pub fn new(provider: P) -> Self {
        Self {
            provider,
            cache: Mutex::new(HashMap::new()),
        }
    }

    /// Number of distinct embeddings currently memoized.
    #[must_use]
    pub fn cached_count(&self) -> usize {
        self.cache
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}

impl<P: EmbeddingProvider> EmbeddingProvider for CachedEmbedder<P> {
    fn dimension(&self) -> usize {
        self.provider.dimension()
    }

    fn embed(&self, text: &str) -> Result<Vec<f32>> {
        let key = cache_key(text, self.provider.dimension());
        {
            let cache = self.cache.lock().unwrap_or_else(PoisonError::into_inner);
            if let Some(hit) = cache.get(&key) {
                debug!("embedding cache hit");
                return Ok(hit.clone());
            }
        }
        let vector = self.provider.embed(text)?;
        self.cache
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key, vector.clone());
        Ok(vector)
    }
}

/// Cache key for one (text, dimension) pair.
///
/// The text is trimmed and lowercased first, so `"Rust "` and `"rust"`
/// share an entry. The dimension is mixed in because the same text embeds
/// differently under providers of different widths.
fn cache_key(text: &str, dimension: usize) -> String {
    let normalized = text.trim().to_lowercase();
    let mut hasher = Sha256::new();
    hasher.update(format!("{dimension}:{normalized}").as_bytes());
    format!("{:x}", hasher.finalize())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;

    /// Provider that counts how many times the underlying embed ran and
    /// rejects blank text.
    struct CountingProvider {
        dimension: usize,
        calls: AtomicUsize,
    }

    impl CountingProvider {
        fn new(dimension: usize) -> Self {
            Self {
                dimension,
                calls: AtomicUsize::new(0),
            }
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    impl EmbeddingProvider for CountingProvider {
        fn dimension(&self) -> usize {
            self.dimension
        }

        fn embed(&self, text: &str) -> Result<Vec<f32>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            anyhow::ensure!(!text.trim().is_empty(), "cannot embed blank text");
            Ok(vec![1.0; self.dimension])
        }
    }

    #[test]
    fn repeated_embed_hits_the_cache() {
        let embedder = CachedEmbedder::new(CountingProvider::new(4));

        let first = embedder.embed("rust").expect("first embed");
        let second = embedder.embed("rust").expect("second embed");

        assert_eq!(first, second);
        assert_eq!(embedder.provider.calls(), 1);
        assert_eq!(embedder.cached_count(), 1);
    }

    #[test]
    fn normalization_collapses_case_and_whitespace() {
        let embedder = CachedEmbedder::new(CountingProvider::new(4));

        embedder.embed("  Hybrid Search  ").expect("embed original");
        embedder.embed("hybrid search").expect("embed normalized");

        assert_eq!(embedder.provider.calls(), 1);
    }

    #[test]
    fn distinct_texts_embed_separately() {
        let embedder = CachedEmbedder::new(CountingProvider::new(4));

        embedder.embed("alpha").expect("embed alpha");
        embedder.embed("beta").expect("embed beta");

        assert_eq!(embedder.provider.calls(), 2);
        assert_eq!(embedder.cached_count(), 2);
    }

    #[test]
    fn batch_embedding_reuses_cached_entries() {
        let embedder = CachedEmbedder::new(CountingProvider::new(4));

        let vectors = embedder
            .embed_batch(&["alpha", "beta", "alpha"])
            .expect("batch embed");

        assert_eq!(vectors.len(), 3);
        assert_eq!(embedder.provider.calls(), 2);
    }

    #[test]
    fn provider_errors_are_not_cached() {
        let embedder = CachedEmbedder::new(CountingProvider::new(4));

        embedder.embed("   ").expect_err("blank text must fail");
        embedder.embed("   ").expect_err("blank text must fail again");

        // Both attempts reached the provider; nothing was memoized.
        assert_eq!(embedder.provider.calls(), 2);
        assert_eq!(embedder.cached_count(), 0);
    }

    #[test]
    fn dimension_passes_through_the_wrapper() {
        let embedder = CachedEmbedder::new(CountingProvider::new(384));
        assert_eq!(embedder.dimension(), 384);
    }

    #[test]
    fn cache_key_distinguishes_provider_dimension() {
        assert_ne!(cache_key("query", 384), cache_key("query", 768));
    }

    #[test]
    fn cache_key_normalizes_before_hashing() {
        assert_eq!(cache_key("  Query  ", 8), cache_key("query", 8));
    }
}
