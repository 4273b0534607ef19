use crate::vector::Vector;
use serde::Serialize;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

/// Word (lowercased) → unit vector. Append-only, never evicted.
#[derive(Debug, Default)]
pub struct EmbeddingCache {
    entries: Mutex<HashMap<String, Vector>>,
}

impl EmbeddingCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn key(word: &str) -> String {
        word.trim().to_lowercase()
    }

    pub fn get(&self, word: &str) -> Option<Vector> {
        let entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        entries.get(&Self::key(word)).cloned()
    }

    /// Insert unless present; the first vector stored for a key wins
    pub fn insert(&self, word: &str, vector: Vector) -> Vector {
        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        entries.entry(Self::key(word)).or_insert(vector).clone()
    }

    pub fn len(&self) -> usize {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Candidate word → context vectors of its example sentences.
///
/// Built once per candidate, on first use. Append-only.
#[derive(Debug, Default)]
pub struct ContextCache {
    entries: Mutex<HashMap<String, Arc<[Vector]>>>,
}

impl ContextCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, candidate: &str) -> Option<Arc<[Vector]>> {
        let entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        entries.get(&EmbeddingCache::key(candidate)).cloned()
    }

    pub fn insert(&self, candidate: &str, vectors: Vec<Vector>) -> Arc<[Vector]> {
        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        entries
            .entry(EmbeddingCache::key(candidate))
            .or_insert_with(|| vectors.into())
            .clone()
    }

    pub fn len(&self) -> usize {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Cache sizes, for diagnostics
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CacheStats {
    pub embeddings: usize,
    pub contexts: usize,
}
