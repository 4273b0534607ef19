use crate::config::EngineConfig;
use crate::error::Result;
use crate::policy::{pick_best, DecisionPolicy, SentenceContext};
use crate::selector::{apply_substitutions, rank_and_cap, DocumentPlan};
use crate::types::{DocumentRewrite, SubstitutionResult};
use lexis_guards::Guards;
use lexis_scoring::{CacheStats, EmbeddingProvider, MaskPredictor, Scorer};
use lexis_vocabulary::{Candidate, PartOfSpeech, VocabularyRecord, VocabularyStore};
use std::sync::Arc;

/// Owns the vocabulary, guard tables, providers and caches of one engine
/// instance. Caches live as long as the engine.
pub struct SubstitutionEngine {
    config: EngineConfig,
    vocabulary: VocabularyStore,
    guards: Guards,
    scorer: Scorer,
}

impl SubstitutionEngine {
    pub fn new(
        config: EngineConfig,
        vocabulary: VocabularyStore,
        guards: Guards,
        embedder: Arc<dyn EmbeddingProvider>,
        predictor: Arc<dyn MaskPredictor>,
    ) -> Result<Self> {
        config.validate()?;
        log::debug!(
            "Engine ready: {} builtin words, {} antonym pairs",
            vocabulary.builtin_words().len(),
            guards.tables().antonym_count()
        );
        Ok(Self::assemble(config, vocabulary, guards, embedder, predictor))
    }

    /// Default knobs over the builtin vocabulary and guard tables
    pub fn with_defaults(
        embedder: Arc<dyn EmbeddingProvider>,
        predictor: Arc<dyn MaskPredictor>,
    ) -> Self {
        Self::assemble(
            EngineConfig::default(),
            VocabularyStore::new(),
            Guards::new(),
            embedder,
            predictor,
        )
    }

    fn assemble(
        config: EngineConfig,
        vocabulary: VocabularyStore,
        guards: Guards,
        embedder: Arc<dyn EmbeddingProvider>,
        predictor: Arc<dyn MaskPredictor>,
    ) -> Self {
        let scorer = Scorer::new(embedder, predictor, config.scorer_settings());
        Self {
            config,
            vocabulary,
            guards,
            scorer,
        }
    }

    pub const fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub const fn vocabulary(&self) -> &VocabularyStore {
        &self.vocabulary
    }

    pub const fn guards(&self) -> &Guards {
        &self.guards
    }

    pub fn is_ready(&self) -> bool {
        self.scorer.is_ready()
    }

    fn policy(&self) -> DecisionPolicy<'_> {
        DecisionPolicy::new(&self.config, &self.guards, &self.scorer)
    }

    /// Judge a single candidate for `original` in `sentence`
    pub async fn evaluate(
        &self,
        sentence: &str,
        original: &str,
        candidate: &Candidate,
    ) -> SubstitutionResult {
        let mut ctx = SentenceContext::new(sentence);
        self.policy().evaluate(&mut ctx, original, candidate).await
    }

    /// Like [`Self::evaluate`] for a bare candidate word. Example sentences
    /// come from the vocabulary when the pair is known there.
    pub async fn evaluate_pair(
        &self,
        sentence: &str,
        original: &str,
        candidate: &str,
    ) -> SubstitutionResult {
        let wanted = candidate.trim().to_lowercase();
        let known = self
            .vocabulary
            .lookup(original)
            .into_iter()
            .find(|c| c.word.to_lowercase() == wanted)
            .unwrap_or_else(|| Candidate::new(candidate.trim(), PartOfSpeech::Unknown));
        self.evaluate(sentence, original, &known).await
    }

    /// Every candidate's verdict for `word`, in vocabulary order
    pub async fn evaluate_word(&self, sentence: &str, word: &str) -> Vec<SubstitutionResult> {
        let candidates = self.vocabulary.lookup(word);
        let mut ctx = SentenceContext::new(sentence);
        self.policy()
            .evaluate_all(&mut ctx, word.trim(), &candidates)
            .await
    }

    /// Best passing candidate for `word`, if any
    pub async fn best_candidate(&self, sentence: &str, word: &str) -> Option<SubstitutionResult> {
        let candidates = self.vocabulary.lookup(word);
        if candidates.is_empty() {
            return None;
        }
        let mut ctx = SentenceContext::new(sentence);
        self.policy()
            .best_candidate(&mut ctx, word.trim(), &candidates)
            .await
    }

    /// Rewrite `text`, substituting at most `max(1, ceil(tokens × density))`
    /// words. Every decision is made against the unmodified text.
    pub async fn process_document(&self, text: &str, max_density: f32) -> DocumentRewrite {
        let density = if max_density > 0.0 && max_density <= 1.0 {
            max_density
        } else {
            let clamped = if max_density > 1.0 { 1.0 } else { self.config.max_density };
            log::warn!(
                "Density {} outside (0, 1], using {}",
                max_density,
                clamped
            );
            clamped
        };

        let plan = DocumentPlan::build(
            text,
            &self.vocabulary,
            density,
            self.config.max_words_per_batch,
        );

        let policy = self.policy();
        let mut ctx = SentenceContext::new(text);
        let mut winners = Vec::new();
        for key in &plan.keys {
            let candidates = self.vocabulary.lookup(key);
            let results = policy.evaluate_all(&mut ctx, key, &candidates).await;
            if let Some(winner) = pick_best(results) {
                log::debug!(
                    "Winner for '{}': {} (syntax {:.3})",
                    key,
                    winner.candidate,
                    winner.syntax_score
                );
                winners.push(winner);
            }
        }

        let found = winners.len();
        let selected = rank_and_cap(winners, plan.budget);
        let (modified_text, substitutions) = apply_substitutions(text, &selected);

        log::info!(
            "Document pass: {} tokens, {} words checked, {} winners, {} applied (budget {})",
            plan.token_count,
            plan.keys.len(),
            found,
            substitutions.len(),
            plan.budget
        );

        DocumentRewrite {
            original_text: text.to_string(),
            modified_text,
            substitutions_made: substitutions.len(),
            substitutions,
        }
    }

    /// [`Self::process_document`] at the configured default density
    pub async fn process_document_default(&self, text: &str) -> DocumentRewrite {
        self.process_document(text, self.config.max_density).await
    }

    /// Ingest custom entries, stopping at the first invalid one, and
    /// precompute embeddings for the accepted synonyms.
    pub async fn add_custom(&self, records: &[VocabularyRecord]) -> Result<usize> {
        for (index, record) in records.iter().enumerate() {
            let candidate = self.vocabulary.add_custom_entry(index, record)?;
            if !self.scorer.precompute(&candidate.word).await {
                log::warn!("Could not precompute embedding for '{}'", candidate.word);
            }
        }
        log::info!("Added {} custom vocabulary entries", records.len());
        Ok(records.len())
    }

    pub fn clear_custom(&self) {
        self.vocabulary.clear_custom();
    }

    /// Precompute embeddings for every builtin word and candidate.
    ///
    /// Returns how many words now have a cached embedding.
    pub async fn warm_up(&self) -> usize {
        let mut words = self.vocabulary.builtin_words();
        words.extend(
            self.vocabulary
                .builtin_candidates()
                .into_iter()
                .map(|c| c.word.to_lowercase()),
        );
        words.sort();
        words.dedup();

        let mut cached = 0;
        for word in &words {
            if self.scorer.precompute(word).await {
                cached += 1;
            }
        }
        log::info!("Warm-up cached {}/{} embeddings", cached, words.len());
        cached
    }

    pub fn cache_stats(&self) -> CacheStats {
        self.scorer.cache_stats()
    }
}
