//! # Lexis Vocabulary
//!
//! Simple-word → sophisticated-synonym tables backing the substitution engine.
//!
//! ## Layers
//!
//! ```text
//! lookup("Hot")
//!     │
//!     ├──> normalize key ("hot")
//!     │
//!     ├──> Builtin table (immutable, loaded once)
//!     │      └─> [scorching, sweltering, ...]
//!     │
//!     └──> Custom table (user supplied, snapshot-on-read)
//!            └─> [... appended in ingestion order]
//! ```
//!
//! Builtin candidates always come first. Neither layer deduplicates.
//!
//! ## Example
//!
//! ```rust
//! use lexis_vocabulary::{VocabularyRecord, VocabularyStore};
//!
//! let store = VocabularyStore::new();
//! store
//!     .add_custom(&[VocabularyRecord::new("hot", "torrid")])
//!     .unwrap();
//!
//! let words: Vec<String> = store.lookup("HOT").into_iter().map(|c| c.word).collect();
//! assert_eq!(words.last().map(String::as_str), Some("torrid"));
//! ```

mod builtin;
mod error;
mod store;
mod types;

pub use builtin::{builtin_vocabulary, BUILTIN_VOCABULARY};
pub use error::{Result, VocabularyError};
pub use store::{normalize_key, VocabularyStore};
pub use types::{Candidate, PartOfSpeech, VocabularyRecord, CUSTOM_DOMAIN};
