use crate::error::{EngineError, Result};
use lexis_scoring::ScorerSettings;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Thresholds and limits governing the substitution engine
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Candidates less similar than this to the original are rejected
    pub embedding_min: f32,

    /// Candidates more similar than this are near-duplicates and rejected
    pub embedding_max: f32,

    /// Similarity at or above which the embedding doubles as semantic evidence
    pub embedding_trust_threshold: f32,

    /// Syntax score above which the plain semantic floor applies
    pub syntax_floor: f32,

    /// Semantic score needed when the syntax score clears its floor
    pub semantic_floor: f32,

    /// Semantic score that passes a candidate despite a low syntax score
    pub semantic_override: f32,

    /// Default fraction of document tokens that may be substituted
    pub max_density: f32,

    /// Tokens scanned per document pass
    pub max_words_per_batch: usize,

    /// Fill-mask predictions requested per candidate
    pub mask_top_k: usize,

    /// Tokens inspected before a word for negators/diminishers
    pub negation_window: usize,

    /// Example sentences turned into context vectors per candidate
    pub context_examples_per_candidate: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            embedding_min: 0.35,
            embedding_max: 0.92,
            embedding_trust_threshold: 0.60,
            syntax_floor: -3.5,
            semantic_floor: 0.45,
            semantic_override: 0.80,
            max_density: 0.15,
            max_words_per_batch: 1000,
            mask_top_k: 100,
            negation_window: 4,
            context_examples_per_candidate: 3,
        }
    }
}

impl EngineConfig {
    /// Fewer, safer substitutions
    pub fn conservative() -> Self {
        Self {
            embedding_min: 0.45,
            syntax_floor: -3.0,
            semantic_floor: 0.55,
            semantic_override: 0.85,
            max_density: 0.08,
            ..Default::default()
        }
    }

    /// More substitutions, looser gates
    pub fn aggressive() -> Self {
        Self {
            embedding_min: 0.30,
            embedding_max: 0.95,
            syntax_floor: -4.5,
            semantic_floor: 0.40,
            semantic_override: 0.75,
            max_density: 0.25,
            ..Default::default()
        }
    }

    /// Parse a TOML document; missing keys keep their defaults
    pub fn from_toml_str(raw: &str) -> Result<Self> {
        let config: Self = toml::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_toml_file(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_toml_str(&raw)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        let similarities = [
            ("embedding_min", self.embedding_min),
            ("embedding_max", self.embedding_max),
            ("embedding_trust_threshold", self.embedding_trust_threshold),
        ];
        for (name, value) in similarities {
            if !(-1.0..=1.0).contains(&value) {
                return Err(EngineError::invalid_config(format!(
                    "{name} ({value}) must lie in [-1, 1]"
                )));
            }
        }

        if self.embedding_min > self.embedding_max {
            return Err(EngineError::invalid_config(format!(
                "embedding_min ({}) cannot exceed embedding_max ({})",
                self.embedding_min, self.embedding_max
            )));
        }

        let floors = [
            ("semantic_floor", self.semantic_floor),
            ("semantic_override", self.semantic_override),
            ("syntax_floor", self.syntax_floor),
        ];
        for (name, value) in floors {
            if !value.is_finite() {
                return Err(EngineError::invalid_config(format!("{name} must be finite")));
            }
        }

        if self.semantic_override < self.semantic_floor {
            return Err(EngineError::invalid_config(format!(
                "semantic_override ({}) cannot be below semantic_floor ({})",
                self.semantic_override, self.semantic_floor
            )));
        }

        if !(self.max_density > 0.0 && self.max_density <= 1.0) {
            return Err(EngineError::invalid_config(format!(
                "max_density ({}) must lie in (0, 1]",
                self.max_density
            )));
        }

        let limits = [
            ("max_words_per_batch", self.max_words_per_batch),
            ("mask_top_k", self.mask_top_k),
            ("negation_window", self.negation_window),
        ];
        for (name, value) in limits {
            if value == 0 {
                return Err(EngineError::invalid_config(format!("{name} must be > 0")));
            }
        }

        Ok(())
    }

    /// The subset of knobs the scorer consumes
    pub const fn scorer_settings(&self) -> ScorerSettings {
        ScorerSettings {
            mask_top_k: self.mask_top_k,
            context_examples: self.context_examples_per_candidate,
            trust_threshold: self.embedding_trust_threshold,
        }
    }
}
