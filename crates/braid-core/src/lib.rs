#![forbid(unsafe_code)]
//! braid-core library.
//!
//! Weighted Reciprocal Rank Fusion over independently ranked candidate
//! lists, plus the ranked-list utilities that support hybrid search: min-max
//! score normalization and max-score union merging. Everything here is pure
//! and request-scoped; backends, embedding services, and orchestration live
//! in `braid-search`.
//!
//! # Conventions
//!
//! - **Errors**: contract violations return typed errors ([`FusionError`]);
//!   there are no recoverable runtime failures in this crate.
//! - **Logging**: none. These functions are pure and run in microseconds;
//!   observability belongs to the calling pipeline.

pub mod fusion;
pub mod merge;
pub mod normalize;
pub mod result;

pub use fusion::{FusionError, RrfConfig, fuse};
pub use merge::merge_deduplicate;
pub use normalize::normalize_scores;
pub use result::{SearchResult, Source};
