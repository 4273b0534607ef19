use serde::{Deserialize, Serialize};
use std::fmt;

/// Terminal state of one candidate evaluation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Reason {
    Passed,
    ModelNotReady,
    AntonymDetected,
    NotSimilarEnough,
    TooSimilar,
    ProperNoun,
    IdiomDetected,
    NegationContext,
    SemanticFailed,
    SyntaxFailed,
}

impl Reason {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Passed => "PASSED",
            Self::ModelNotReady => "MODEL_NOT_READY",
            Self::AntonymDetected => "ANTONYM_DETECTED",
            Self::NotSimilarEnough => "NOT_SIMILAR_ENOUGH",
            Self::TooSimilar => "TOO_SIMILAR",
            Self::ProperNoun => "PROPER_NOUN",
            Self::IdiomDetected => "IDIOM_DETECTED",
            Self::NegationContext => "NEGATION_CONTEXT",
            Self::SemanticFailed => "SEMANTIC_FAILED",
            Self::SyntaxFailed => "SYNTAX_FAILED",
        }
    }

    pub const fn is_passed(self) -> bool {
        matches!(self, Self::Passed)
    }
}

impl fmt::Display for Reason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Scores gathered so far; unreached stages stay 0
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Scores {
    pub similarity: f32,
    pub syntax: f32,
    pub semantic: f32,
}

/// Verdict on one (original, candidate) pair. Never mutated after creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubstitutionResult {
    pub original: String,
    pub candidate: String,
    pub passed: bool,
    pub reason: Reason,
    pub similarity: f32,
    pub syntax_score: f32,
    pub semantic_score: f32,
}

impl SubstitutionResult {
    pub fn new(original: &str, candidate: &str, reason: Reason, scores: Scores) -> Self {
        Self {
            original: original.to_string(),
            candidate: candidate.to_string(),
            passed: reason.is_passed(),
            reason,
            similarity: scores.similarity,
            syntax_score: scores.syntax,
            semantic_score: scores.semantic,
        }
    }
}

/// A substitution actually written into the document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppliedSubstitution {
    pub original: String,
    pub replacement: String,
    pub similarity: f32,
    pub syntax_score: f32,
    pub semantic_score: f32,
}

impl From<&SubstitutionResult> for AppliedSubstitution {
    fn from(result: &SubstitutionResult) -> Self {
        Self {
            original: result.original.clone(),
            replacement: result.candidate.clone(),
            similarity: result.similarity,
            syntax_score: result.syntax_score,
            semantic_score: result.semantic_score,
        }
    }
}

/// Output contract handed to the rendering layer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentRewrite {
    pub original_text: String,
    pub modified_text: String,
    pub substitutions: Vec<AppliedSubstitution>,
    pub substitutions_made: usize,
}
