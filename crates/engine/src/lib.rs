//! # Lexis Engine
//!
//! Decides whether a simple word may be swapped for a sophisticated synonym,
//! and rewrites whole documents under a substitution budget.
//!
//! ```text
//! process_document(text, density)
//!     │
//!     ├──> DocumentPlan: distinct vocabulary words, budget = max(1, ⌈N·d⌉)
//!     ├──> per word: DecisionPolicy over every candidate ──> best by syntax
//!     ├──> rank winners by syntax, keep `budget`
//!     └──> replace first occurrences, skipping ones already consumed
//! ```
//!
//! ## Example
//!
//! ```rust
//! use lexis_engine::SubstitutionEngine;
//! use lexis_scoring::{StubEmbedder, StubMaskPredictor};
//! use std::sync::Arc;
//!
//! let runtime = tokio::runtime::Runtime::new().unwrap();
//! runtime.block_on(async {
//!     let engine = SubstitutionEngine::with_defaults(
//!         Arc::new(StubEmbedder::new(64)),
//!         Arc::new(StubMaskPredictor::new()),
//!     );
//!     let rewrite = engine.process_document("It was a hot day.", 0.5).await;
//!     assert!(rewrite.substitutions_made <= 3);
//! });
//! ```

mod config;
mod engine;
mod error;
mod policy;
mod selector;
mod types;

pub use config::EngineConfig;
pub use engine::SubstitutionEngine;
pub use error::{EngineError, Result};
pub use policy::{combine, DecisionPolicy, SentenceContext};
pub use selector::{density_budget, lookup_key, DocumentPlan};
pub use types::{AppliedSubstitution, DocumentRewrite, Reason, Scores, SubstitutionResult};
