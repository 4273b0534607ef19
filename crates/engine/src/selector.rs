//! Document-level selection: which words to look at, how many substitutions
//! the density allows, and conflict-free application to the text.

use crate::types::{AppliedSubstitution, SubstitutionResult};
use lexis_guards::text::{replace_first_word, strip_punctuation};
use lexis_vocabulary::VocabularyStore;
use std::collections::HashSet;

/// Shortest lookup key worth a vocabulary probe
const MIN_KEY_LEN: usize = 2;

/// Words to evaluate in one document pass
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentPlan {
    /// Whitespace tokens in the whole document
    pub token_count: usize,

    /// Maximum substitutions this pass may apply
    pub budget: usize,

    /// Distinct lookup keys with candidates, in first-seen order
    pub keys: Vec<String>,
}

/// Lowercased token with surrounding punctuation removed
pub fn lookup_key(token: &str) -> Option<String> {
    let key = strip_punctuation(token).to_lowercase();
    (key.chars().count() >= MIN_KEY_LEN).then_some(key)
}

/// Absorbs the f32 representation error of densities like 0.15
const BUDGET_EPSILON: f64 = 1e-6;

/// `max(1, ceil(tokens × density))`
pub fn density_budget(token_count: usize, density: f32) -> usize {
    let raw = (token_count as f64 * f64::from(density) - BUDGET_EPSILON).ceil();
    (raw.max(0.0) as usize).max(1)
}

impl DocumentPlan {
    pub fn build(
        text: &str,
        vocabulary: &VocabularyStore,
        density: f32,
        max_words: usize,
    ) -> Self {
        let tokens: Vec<&str> = text.split_whitespace().collect();
        let mut seen = HashSet::new();
        let mut keys = Vec::new();

        for token in tokens.iter().take(max_words) {
            let Some(key) = lookup_key(token) else {
                continue;
            };
            if !seen.insert(key.clone()) {
                continue;
            }
            if vocabulary.contains(&key) {
                keys.push(key);
            }
        }

        Self {
            token_count: tokens.len(),
            budget: density_budget(tokens.len(), density),
            keys,
        }
    }
}

/// Order winners by syntax score, best first, and keep at most `budget`
pub fn rank_and_cap(mut winners: Vec<SubstitutionResult>, budget: usize) -> Vec<SubstitutionResult> {
    winners.sort_by(|a, b| b.syntax_score.total_cmp(&a.syntax_score));
    winners.truncate(budget);
    winners
}

/// Apply winners in order to a working copy; winners whose word no longer
/// occurs are skipped
pub fn apply_substitutions(
    text: &str,
    winners: &[SubstitutionResult],
) -> (String, Vec<AppliedSubstitution>) {
    let mut working = text.to_string();
    let mut applied = Vec::with_capacity(winners.len());

    for winner in winners {
        match replace_first_word(&working, &winner.original, &winner.candidate) {
            Some(next) => {
                working = next;
                applied.push(AppliedSubstitution::from(winner));
            }
            None => {
                log::debug!(
                    "skipping {} -> {}: no remaining occurrence",
                    winner.original,
                    winner.candidate
                );
            }
        }
    }

    (working, applied)
}
