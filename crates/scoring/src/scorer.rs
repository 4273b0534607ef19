use crate::cache::{CacheStats, ContextCache, EmbeddingCache};
use crate::provider::{EmbeddingProvider, MaskPredictor};
use crate::vector::{dot, unit_vector, Vector};
use lexis_guards::text::replace_first_word;
use std::sync::Arc;
use tokio::sync::Mutex as AsyncMutex;

/// Syntax score when the candidate is absent from the predictions, or the
/// predictor failed
pub const SYNTAX_SCORE_FLOOR: f32 = -10.0;

/// Added to a probability before taking its log
pub const LOG_PROB_EPSILON: f64 = 1e-10;

/// Knobs the scorer needs from the engine configuration
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScorerSettings {
    /// Number of fill-mask predictions requested
    pub mask_top_k: usize,

    /// Maximum example sentences turned into context vectors per candidate
    pub context_examples: usize,

    /// Embedding similarity at which it also counts as semantic evidence
    pub trust_threshold: f32,
}

impl Default for ScorerSettings {
    fn default() -> Self {
        Self {
            mask_top_k: 100,
            context_examples: 3,
            trust_threshold: 0.60,
        }
    }
}

/// Embedding, syntax and semantic scoring over external providers.
///
/// Every provider call goes through `in_flight`, so one scorer never has more
/// than one request outstanding, even when shared between tasks.
pub struct Scorer {
    embedder: Arc<dyn EmbeddingProvider>,
    predictor: Arc<dyn MaskPredictor>,
    embeddings: EmbeddingCache,
    contexts: ContextCache,
    settings: ScorerSettings,
    in_flight: AsyncMutex<()>,
}

impl Scorer {
    pub fn new(
        embedder: Arc<dyn EmbeddingProvider>,
        predictor: Arc<dyn MaskPredictor>,
        settings: ScorerSettings,
    ) -> Self {
        Self {
            embedder,
            predictor,
            embeddings: EmbeddingCache::new(),
            contexts: ContextCache::new(),
            settings,
            in_flight: AsyncMutex::new(()),
        }
    }

    pub const fn settings(&self) -> &ScorerSettings {
        &self.settings
    }

    /// Both providers report ready
    pub fn is_ready(&self) -> bool {
        self.embedder.is_ready() && self.predictor.is_ready()
    }

    pub fn cache_stats(&self) -> CacheStats {
        CacheStats {
            embeddings: self.embeddings.len(),
            contexts: self.contexts.len(),
        }
    }

    async fn embed_uncached(&self, text: &str) -> Option<Vector> {
        let _permit = self.in_flight.lock().await;
        match self.embedder.embed(text).await {
            Ok(vector) => match unit_vector(vector) {
                Some(unit) => Some(unit.into()),
                None => {
                    log::warn!("Unusable embedding for '{}'", text);
                    None
                }
            },
            Err(err) => {
                log::warn!("Embedding failed for '{}': {}", text, err);
                None
            }
        }
    }

    /// Cached unit vector for a word; `None` when the provider cannot supply one.
    ///
    /// Failures are not cached, so a later call may succeed.
    pub async fn embedding(&self, word: &str) -> Option<Vector> {
        if let Some(hit) = self.embeddings.get(word) {
            return Some(hit);
        }
        let vector = self.embed_uncached(&EmbeddingCache::key(word)).await?;
        Some(self.embeddings.insert(word, vector))
    }

    /// Fill the embedding cache for `word` ahead of use
    pub async fn precompute(&self, word: &str) -> bool {
        self.embedding(word).await.is_some()
    }

    /// Cosine similarity of two words, 0 when either vector is unavailable
    pub async fn similarity(&self, a: &str, b: &str) -> f32 {
        let Some(va) = self.embedding(a).await else {
            return 0.0;
        };
        let Some(vb) = self.embedding(b).await else {
            return 0.0;
        };
        dot(&va, &vb)
    }

    /// Log-probability of `candidate` filling the slot left by the first
    /// target phrase that occurs in `sentence`.
    ///
    /// `targets` are tried in order (expanded phrase first, bare word after).
    /// Never fails: anything short of a ranked hit yields
    /// [`SYNTAX_SCORE_FLOOR`].
    pub async fn syntax_score(&self, sentence: &str, targets: &[&str], candidate: &str) -> f32 {
        let mask = self.predictor.mask_token().to_string();
        let Some(masked) = targets
            .iter()
            .find_map(|target| replace_first_word(sentence, target, &mask))
        else {
            log::debug!("No maskable target {:?} in sentence", targets);
            return SYNTAX_SCORE_FLOOR;
        };

        let predictions = {
            let _permit = self.in_flight.lock().await;
            self.predictor
                .predict_top_k(&masked, self.settings.mask_top_k)
                .await
        };
        let predictions = match predictions {
            Ok(predictions) => predictions,
            Err(err) => {
                log::warn!("Mask prediction failed: {}", err);
                return SYNTAX_SCORE_FLOOR;
            }
        };

        let wanted = candidate.trim().to_lowercase();
        predictions
            .iter()
            .find(|p| p.token.trim().to_lowercase() == wanted)
            .filter(|p| p.probability.is_finite() && p.probability >= 0.0)
            .map_or(SYNTAX_SCORE_FLOOR, |p| {
                (f64::from(p.probability) + LOG_PROB_EPSILON).ln() as f32
            })
    }

    /// Mean-pooled context vector of a whole sentence (not cached)
    pub async fn context_vector(&self, sentence: &str) -> Option<Vector> {
        if sentence.trim().is_empty() {
            return None;
        }
        self.embed_uncached(sentence).await
    }

    /// Context vectors for a candidate's first few example sentences.
    ///
    /// Built once per candidate. A provider failure while building leaves the
    /// cache untouched so the next call retries.
    pub async fn candidate_contexts(&self, candidate: &str, examples: &[String]) -> Arc<[Vector]> {
        if let Some(hit) = self.contexts.get(candidate) {
            return hit;
        }

        let mut vectors = Vec::new();
        for example in examples.iter().take(self.settings.context_examples) {
            match self.context_vector(example).await {
                Some(vector) => vectors.push(vector),
                None => return vectors.into(),
            }
        }
        self.contexts.insert(candidate, vectors)
    }

    /// Best match between the sentence context and the candidate's example
    /// contexts, raised to the embedding similarity when that is trusted.
    pub async fn semantic_score(
        &self,
        sentence_vector: Option<&[f32]>,
        candidate: &str,
        examples: &[String],
        similarity: f32,
    ) -> f32 {
        let mut score = 0.0f32;
        if let Some(sentence_vector) = sentence_vector {
            let contexts = self.candidate_contexts(candidate, examples).await;
            score = contexts
                .iter()
                .map(|context| dot(sentence_vector, context))
                .fold(score, f32::max);
        }

        if similarity >= self.settings.trust_threshold {
            score = score.max(similarity);
        }
        score
    }
}
