//! Deterministic in-process providers for offline runs and tests.

use crate::error::{Result, ScoringError};
use crate::provider::{EmbeddingProvider, MaskPredictor, TokenPrediction};
use crate::vector::normalize;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;

const STUB_MODEL_ID: &str = "stub-hash";

/// Hash-seeded embedder.
///
/// Unknown texts map to pseudo-random unit vectors (stable across runs);
/// pinned texts return exactly the vector they were pinned to.
#[derive(Clone)]
pub struct StubEmbedder {
    dimension: usize,
    pinned: HashMap<String, Vec<f32>>,
    ready: Arc<AtomicBool>,
    failing: Arc<AtomicBool>,
    calls: Arc<AtomicUsize>,
}

impl StubEmbedder {
    pub fn new(dimension: usize) -> Self {
        Self {
            dimension: dimension.max(1),
            pinned: HashMap::new(),
            ready: Arc::new(AtomicBool::new(true)),
            failing: Arc::new(AtomicBool::new(false)),
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Builder: pin the vector returned for `text` (matched case-insensitively)
    #[must_use]
    pub fn with_vector(mut self, text: &str, vector: Vec<f32>) -> Self {
        self.pinned.insert(text.trim().to_lowercase(), vector);
        self
    }

    /// Toggle readiness; clones share the flag
    pub fn set_ready(&self, ready: bool) {
        self.ready.store(ready, Ordering::SeqCst);
    }

    /// Make every `embed` call fail; clones share the flag
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    /// Number of `embed` calls served so far
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::Relaxed)
    }

    pub const fn dimension(&self) -> usize {
        self.dimension
    }
}

#[async_trait]
impl EmbeddingProvider for StubEmbedder {
    fn is_ready(&self) -> bool {
        self.ready.load(Ordering::SeqCst)
    }

    fn model_id(&self) -> &str {
        STUB_MODEL_ID
    }

    async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        self.calls.fetch_add(1, Ordering::Relaxed);
        if self.failing.load(Ordering::SeqCst) {
            return Err(ScoringError::EmbeddingError(format!(
                "stub embedder failing for '{text}'"
            )));
        }
        if let Some(vector) = self.pinned.get(&text.trim().to_lowercase()) {
            return Ok(vector.clone());
        }
        Ok(stub_embed(text, self.dimension))
    }
}

fn stub_embed(text: &str, dimension: usize) -> Vec<f32> {
    let mut state =
        fnv1a_64(text.as_bytes()) ^ (dimension as u64).wrapping_mul(0x9E37_79B9_7F4A_7C15);
    let mut vec = Vec::with_capacity(dimension);
    for _ in 0..dimension {
        let bits = splitmix64(&mut state);
        let high = (bits >> 32) as u32;
        let mantissa = high >> 9;
        let unit = f32::from_bits(0x3f80_0000 | mantissa) - 1.0;
        vec.push(unit.mul_add(2.0, -1.0));
    }
    normalize(&mut vec);
    vec
}

fn fnv1a_64(bytes: &[u8]) -> u64 {
    let mut hash: u64 = 0xcbf2_9ce4_8422_2325;
    for byte in bytes {
        hash ^= u64::from(*byte);
        hash = hash.wrapping_mul(0x0000_0100_0000_01b3);
    }
    hash
}

const fn splitmix64(state: &mut u64) -> u64 {
    *state = state.wrapping_add(0x9E37_79B9_7F4A_7C15);
    let mut z = *state;
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}

/// Table-driven fill-mask predictor.
///
/// Rules are checked in insertion order: the first rule whose needle occurs in
/// the masked text supplies the predictions; otherwise the default list does.
#[derive(Clone, Default)]
pub struct StubMaskPredictor {
    default: Vec<TokenPrediction>,
    rules: Vec<(String, Vec<TokenPrediction>)>,
    failing: Arc<AtomicBool>,
    calls: Arc<AtomicUsize>,
    last_masked: Arc<std::sync::Mutex<Option<String>>>,
}

impl StubMaskPredictor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder: add a prediction to the default list
    #[must_use]
    pub fn with_prediction(mut self, token: &str, probability: f32) -> Self {
        self.default.push(TokenPrediction::new(token, probability));
        self
    }

    /// Builder: predictions used when the masked text contains `needle`
    #[must_use]
    pub fn with_rule(mut self, needle: &str, predictions: Vec<TokenPrediction>) -> Self {
        self.rules.push((needle.to_string(), predictions));
        self
    }

    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::Relaxed)
    }

    /// Masked text of the most recent request
    pub fn last_masked(&self) -> Option<String> {
        self.last_masked
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .clone()
    }
}

#[async_trait]
impl MaskPredictor for StubMaskPredictor {
    async fn predict_top_k(&self, masked_text: &str, k: usize) -> Result<Vec<TokenPrediction>> {
        self.calls.fetch_add(1, Ordering::Relaxed);
        *self
            .last_masked
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner) = Some(masked_text.to_string());

        if self.failing.load(Ordering::SeqCst) {
            return Err(ScoringError::PredictionError(
                "stub predictor failing".to_string(),
            ));
        }

        let predictions = self
            .rules
            .iter()
            .find(|(needle, _)| masked_text.contains(needle.as_str()))
            .map_or(&self.default, |(_, predictions)| predictions);
        Ok(predictions.iter().take(k).cloned().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vector::dot;

    #[tokio::test]
    async fn test_stub_embed_is_deterministic_unit_vector() {
        let embedder = StubEmbedder::new(32);
        let a = embedder.embed("hello").await.unwrap();
        let b = embedder.embed("hello").await.unwrap();

        assert_eq!(a, b);
        assert_eq!(a.len(), 32);
        assert!((dot(&a, &a) - 1.0).abs() < 1e-5);
        assert_eq!(embedder.calls(), 2);
        assert_eq!(embedder.model_id(), "stub-hash");
    }

    #[tokio::test]
    async fn test_pinned_vectors_and_failure() {
        let embedder = StubEmbedder::new(2).with_vector("Hot", vec![1.0, 0.0]);
        assert_eq!(embedder.embed("hot").await.unwrap(), vec![1.0, 0.0]);

        embedder.set_failing(true);
        assert!(embedder.embed("hot").await.is_err());

        let clone = embedder.clone();
        clone.set_ready(false);
        assert!(!embedder.is_ready());
    }

    #[tokio::test]
    async fn test_mask_rules_and_top_k() {
        let predictor = StubMaskPredictor::new()
            .with_prediction("warm", 0.5)
            .with_prediction("cool", 0.2)
            .with_rule("coffee", vec![TokenPrediction::new("scorching", 0.1)]);

        let default = predictor.predict_top_k("the [MASK] day", 1).await.unwrap();
        assert_eq!(default, vec![TokenPrediction::new("warm", 0.5)]);

        let ruled = predictor
            .predict_top_k("the [MASK] coffee", 10)
            .await
            .unwrap();
        assert_eq!(ruled[0].token, "scorching");
        assert_eq!(predictor.last_masked().as_deref(), Some("the [MASK] coffee"));
        assert_eq!(predictor.calls(), 2);
    }
}
