//! # Lexis Scoring
//!
//! Model-backed scores for a (sentence, original, candidate) triple.
//!
//! ## Architecture
//!
//! ```text
//! Scorer
//!     │
//!     ├──> Embedding similarity
//!     │      └─ EmbeddingCache (word → unit vector) ──> EmbeddingProvider
//!     │
//!     ├──> Syntax score
//!     │      └─ masked sentence ──> MaskPredictor (top-K) ──> ln(p + ε) | floor
//!     │
//!     └──> Semantic score
//!            └─ ContextCache (candidate → example vectors) ──> EmbeddingProvider
//! ```
//!
//! Provider calls are serialized: at most one is in flight per scorer.
//! Caches only grow; they assume the model behind each provider never changes
//! for the scorer's lifetime.

mod cache;
mod error;
mod provider;
mod scorer;
mod stub;
mod vector;

pub use cache::{CacheStats, ContextCache, EmbeddingCache};
pub use error::{Result, ScoringError};
pub use provider::{EmbeddingProvider, MaskPredictor, TokenPrediction, DEFAULT_MASK_TOKEN};
pub use scorer::{Scorer, ScorerSettings, LOG_PROB_EPSILON, SYNTAX_SCORE_FLOOR};
pub use stub::{StubEmbedder, StubMaskPredictor};
pub use vector::{dot, mean_pool, normalize, unit_vector, Vector};
