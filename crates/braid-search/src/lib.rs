#![forbid(unsafe_code)]
//! braid-search library.
//!
//! Orchestration around `braid-core`'s rank fusion: trait seams for
//! keyword and vector backends, an embedding provider with in-process
//! caching, the hybrid pipeline with graceful vector-leg degradation,
//! result shaping, and an in-memory reference backend.
//!
//! # Conventions
//!
//! - **Errors**: public functions return `anyhow::Result` with context on
//!   backend and provider failures. Fusion parameter violations stay
//!   typed as [`braid_core::FusionError`] underneath.
//! - **Logging**: `tracing` macros only. Degradation paths log `warn!`,
//!   skipped data and cache hits log `debug!`. No subscriber is installed
//!   here; binaries choose their own.

pub mod backend;
pub mod config;
pub mod embedding;
pub mod hybrid;
pub mod memory;
pub mod results;

pub use backend::{KeywordSearch, VectorSearch};
pub use braid_core::{FusionError, RrfConfig, SearchResult, Source};
pub use config::{PipelineConfig, SearchConfig, load_config};
pub use embedding::{CachedEmbedder, EmbeddingProvider};
pub use hybrid::{find_similar, hybrid_search};
pub use memory::{Document, MemoryIndex, cosine_similarity};
pub use results::{Page, paginate, sort_by_field};
