//! Per-candidate decision policy.
//!
//! ```text
//! ready? ─> antonym? ─> [similarity] ─> min/max ─> proper noun? ─> idiom? ─> negated?
//!                                                                              │
//!                           [syntax + semantic] <──────────────────────────────┘
//!                                  │
//!            syntax > floor ? semantic > floor : semantic > override
//! ```
//!
//! Gates are plain functions over a [`Probe`]; each stage list is folded with
//! short-circuit semantics, so the first failing gate decides the reason.

use crate::config::EngineConfig;
use crate::types::{Reason, Scores, SubstitutionResult};
use lexis_guards::Guards;
use lexis_scoring::{Scorer, Vector};
use lexis_vocabulary::Candidate;

/// Everything a gate may look at
pub struct Probe<'a> {
    pub ready: bool,
    pub sentence: &'a str,
    pub original: &'a str,
    pub candidate: &'a str,
    pub similarity: f32,
    pub guards: &'a Guards,
    pub config: &'a EngineConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateOutcome {
    Continue,
    Fail(Reason),
}

pub type Gate = fn(&Probe<'_>) -> GateOutcome;

fn fail_if(condition: bool, reason: Reason) -> GateOutcome {
    if condition {
        GateOutcome::Fail(reason)
    } else {
        GateOutcome::Continue
    }
}

pub fn readiness_gate(probe: &Probe<'_>) -> GateOutcome {
    fail_if(!probe.ready, Reason::ModelNotReady)
}

pub fn antonym_gate(probe: &Probe<'_>) -> GateOutcome {
    fail_if(
        probe.guards.is_antonym(probe.original, probe.candidate),
        Reason::AntonymDetected,
    )
}

pub fn similarity_gate(probe: &Probe<'_>) -> GateOutcome {
    if probe.similarity.is_nan() || probe.similarity < probe.config.embedding_min {
        GateOutcome::Fail(Reason::NotSimilarEnough)
    } else if probe.similarity > probe.config.embedding_max {
        GateOutcome::Fail(Reason::TooSimilar)
    } else {
        GateOutcome::Continue
    }
}

pub fn proper_noun_gate(probe: &Probe<'_>) -> GateOutcome {
    fail_if(
        probe.guards.is_proper_noun(probe.sentence, probe.original),
        Reason::ProperNoun,
    )
}

pub fn idiom_gate(probe: &Probe<'_>) -> GateOutcome {
    fail_if(
        probe.guards.is_idiom(probe.sentence, probe.original),
        Reason::IdiomDetected,
    )
}

pub fn negation_gate(probe: &Probe<'_>) -> GateOutcome {
    let verdict = probe
        .guards
        .negation(probe.sentence, probe.original, probe.config.negation_window);
    fail_if(verdict.negated, Reason::NegationContext)
}

/// Gates that need no model output
pub const PRE_MODEL_GATES: &[Gate] = &[readiness_gate, antonym_gate];

/// Gates run once the embedding similarity is known
pub const CONTEXT_GATES: &[Gate] = &[similarity_gate, proper_noun_gate, idiom_gate, negation_gate];

/// First failing gate, if any
pub fn run_gates(gates: &[Gate], probe: &Probe<'_>) -> Option<Reason> {
    gates.iter().find_map(|gate| match gate(probe) {
        GateOutcome::Continue => None,
        GateOutcome::Fail(reason) => Some(reason),
    })
}

/// Combine syntax and semantic evidence into the final verdict
pub fn combine(config: &EngineConfig, syntax: f32, semantic: f32) -> Reason {
    if syntax > config.syntax_floor {
        if semantic > config.semantic_floor {
            Reason::Passed
        } else {
            Reason::SemanticFailed
        }
    } else if semantic > config.semantic_override {
        Reason::Passed
    } else {
        Reason::SyntaxFailed
    }
}

/// Sentence under evaluation plus its lazily computed context vector, shared
/// by every candidate evaluated against the same text
pub struct SentenceContext<'a> {
    sentence: &'a str,
    vector: Option<Option<Vector>>,
}

impl<'a> SentenceContext<'a> {
    pub const fn new(sentence: &'a str) -> Self {
        Self {
            sentence,
            vector: None,
        }
    }

    pub const fn sentence(&self) -> &'a str {
        self.sentence
    }

    async fn vector(&mut self, scorer: &Scorer) -> Option<Vector> {
        if let Some(cached) = &self.vector {
            return cached.clone();
        }
        let computed = scorer.context_vector(self.sentence).await;
        // Only a successful computation is memoized; a failure is retried.
        if computed.is_some() {
            self.vector = Some(computed.clone());
        }
        computed
    }
}

/// Borrowing view over the engine parts the policy needs
pub struct DecisionPolicy<'a> {
    config: &'a EngineConfig,
    guards: &'a Guards,
    scorer: &'a Scorer,
}

impl<'a> DecisionPolicy<'a> {
    pub const fn new(config: &'a EngineConfig, guards: &'a Guards, scorer: &'a Scorer) -> Self {
        Self {
            config,
            guards,
            scorer,
        }
    }

    /// Judge one candidate for `original` in `ctx`'s sentence
    pub async fn evaluate(
        &self,
        ctx: &mut SentenceContext<'_>,
        original: &str,
        candidate: &Candidate,
    ) -> SubstitutionResult {
        let sentence = ctx.sentence();
        let mut probe = Probe {
            ready: self.scorer.is_ready(),
            sentence,
            original,
            candidate: &candidate.word,
            similarity: 0.0,
            guards: self.guards,
            config: self.config,
        };
        let mut scores = Scores::default();

        if let Some(reason) = run_gates(PRE_MODEL_GATES, &probe) {
            log::debug!("{} -> {}: {}", original, candidate.word, reason);
            return SubstitutionResult::new(original, &candidate.word, reason, scores);
        }

        scores.similarity = self.scorer.similarity(original, &candidate.word).await;
        probe.similarity = scores.similarity;

        if let Some(reason) = run_gates(CONTEXT_GATES, &probe) {
            log::debug!(
                "{} -> {}: {} (similarity {:.3})",
                original,
                candidate.word,
                reason,
                scores.similarity
            );
            return SubstitutionResult::new(original, &candidate.word, reason, scores);
        }

        let target = self
            .guards
            .negation(sentence, original, self.config.negation_window)
            .target;
        scores.syntax = self
            .scorer
            .syntax_score(sentence, &[target.as_str(), original], &candidate.word)
            .await;

        let sentence_vector = ctx.vector(self.scorer).await;
        scores.semantic = self
            .scorer
            .semantic_score(
                sentence_vector.as_deref(),
                &candidate.word,
                &candidate.examples,
                scores.similarity,
            )
            .await;

        let reason = combine(self.config, scores.syntax, scores.semantic);
        log::debug!(
            "{} -> {}: {} (similarity {:.3}, syntax {:.3}, semantic {:.3})",
            original,
            candidate.word,
            reason,
            scores.similarity,
            scores.syntax,
            scores.semantic
        );
        SubstitutionResult::new(original, &candidate.word, reason, scores)
    }

    /// Evaluate every candidate, in order
    pub async fn evaluate_all(
        &self,
        ctx: &mut SentenceContext<'_>,
        original: &str,
        candidates: &[Candidate],
    ) -> Vec<SubstitutionResult> {
        let mut results = Vec::with_capacity(candidates.len());
        for candidate in candidates {
            results.push(self.evaluate(ctx, original, candidate).await);
        }
        results
    }

    /// Highest-syntax passing candidate; the earliest one wins a tie
    pub async fn best_candidate(
        &self,
        ctx: &mut SentenceContext<'_>,
        original: &str,
        candidates: &[Candidate],
    ) -> Option<SubstitutionResult> {
        let results = self.evaluate_all(ctx, original, candidates).await;
        pick_best(results)
    }
}

pub fn pick_best(results: Vec<SubstitutionResult>) -> Option<SubstitutionResult> {
    let mut best: Option<SubstitutionResult> = None;
    for result in results.into_iter().filter(|r| r.passed) {
        match &best {
            Some(current) if result.syntax_score <= current.syntax_score => {}
            _ => best = Some(result),
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use lexis_guards::GuardTables;
    use lexis_scoring::{StubEmbedder, StubMaskPredictor};
    use lexis_vocabulary::PartOfSpeech;
    use pretty_assertions::assert_eq;
    use std::sync::Arc;

    fn probe<'a>(guards: &'a Guards, config: &'a EngineConfig, sentence: &'a str) -> Probe<'a> {
        Probe {
            ready: true,
            sentence,
            original: "hot",
            candidate: "scorching",
            similarity: 0.7,
            guards,
            config,
        }
    }

    fn result(candidate: &str, reason: Reason, syntax: f32) -> SubstitutionResult {
        SubstitutionResult::new(
            "hot",
            candidate,
            reason,
            Scores {
                similarity: 0.5,
                syntax,
                semantic: 0.5,
            },
        )
    }

    #[test]
    fn test_combine_paths() {
        let config = EngineConfig::default();
        assert_eq!(combine(&config, -2.0, 0.50), Reason::Passed);
        assert_eq!(combine(&config, -2.0, 0.40), Reason::SemanticFailed);
        assert_eq!(combine(&config, -4.0, 0.85), Reason::Passed);
        assert_eq!(combine(&config, -4.0, 0.50), Reason::SyntaxFailed);
        assert_eq!(combine(&config, -3.5, 0.50), Reason::SyntaxFailed);
    }

    #[test]
    fn test_similarity_gate_bounds() {
        let guards = Guards::new();
        let config = EngineConfig::default();
        let mut p = probe(&guards, &config, "a hot day");

        p.similarity = 0.2;
        assert_eq!(similarity_gate(&p), GateOutcome::Fail(Reason::NotSimilarEnough));

        p.similarity = f32::NAN;
        assert_eq!(similarity_gate(&p), GateOutcome::Fail(Reason::NotSimilarEnough));
        p.similarity = 0.99;
        assert_eq!(similarity_gate(&p), GateOutcome::Fail(Reason::TooSimilar));
        p.similarity = config.embedding_min;
        assert_eq!(similarity_gate(&p), GateOutcome::Continue);
        p.similarity = config.embedding_max;
        assert_eq!(similarity_gate(&p), GateOutcome::Continue);
    }

    #[test]
    fn test_gate_order_is_short_circuit() {
        let guards = Guards::new();
        let config = EngineConfig::default();
        let sentence = "Hot Springs got itself in hot water, not hot.";
        let mut p = probe(&guards, &config, sentence);

        assert_eq!(run_gates(CONTEXT_GATES, &p), Some(Reason::ProperNoun));

        p.ready = false;
        p.candidate = "cold";
        assert_eq!(run_gates(PRE_MODEL_GATES, &p), Some(Reason::ModelNotReady));

        p.ready = true;
        assert_eq!(run_gates(PRE_MODEL_GATES, &p), Some(Reason::AntonymDetected));

        p.similarity = 0.0;
        assert_eq!(run_gates(CONTEXT_GATES, &p), Some(Reason::NotSimilarEnough));
    }

    #[test]
    fn test_pick_best_prefers_syntax_then_first_seen() {
        let best = pick_best(vec![
            result("a", Reason::Passed, -3.0),
            result("b", Reason::SyntaxFailed, 5.0),
            result("c", Reason::Passed, -1.0),
            result("d", Reason::Passed, -1.0),
        ])
        .expect("winner");
        assert_eq!(best.candidate, "c");

        assert!(pick_best(vec![result("x", Reason::IdiomDetected, 0.0)]).is_none());
        assert!(pick_best(Vec::new()).is_none());
    }

    #[tokio::test]
    async fn test_failed_result_carries_reached_scores() {
        let embedder = StubEmbedder::new(2)
            .with_vector("hot", vec![1.0, 0.0])
            .with_vector("scorching", vec![0.8, 0.6]);
        let predictor = StubMaskPredictor::new().with_prediction("scorching", 0.5);
        let scorer = Scorer::new(
            Arc::new(embedder),
            Arc::new(predictor.clone()),
            EngineConfig::default().scorer_settings(),
        );
        let guards = Guards::with_tables(GuardTables::default().idiom("hot", "hot water", "trouble"));
        let config = EngineConfig::default();
        let policy = DecisionPolicy::new(&config, &guards, &scorer);
        let candidate = Candidate::new("scorching", PartOfSpeech::Adjective);

        let mut ctx = SentenceContext::new("in hot water again");
        let result = policy.evaluate(&mut ctx, "hot", &candidate).await;

        assert_eq!(result.reason, Reason::IdiomDetected);
        assert!(!result.passed);
        assert!((result.similarity - 0.8).abs() < 1e-6);
        assert_eq!(result.syntax_score, 0.0);
        assert_eq!(result.semantic_score, 0.0);
        assert_eq!(predictor.calls(), 0);
    }
}
