use crate::error::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Placeholder substituted for the target phrase before asking the predictor
pub const DEFAULT_MASK_TOKEN: &str = "[MASK]";

/// One ranked fill-mask prediction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenPrediction {
    pub token: String,
    pub probability: f32,
}

impl TokenPrediction {
    pub fn new(token: impl Into<String>, probability: f32) -> Self {
        Self {
            token: token.into(),
            probability,
        }
    }
}

/// Text → embedding vector.
///
/// Must be deterministic for a fixed model version. Vectors need not be
/// normalized; the scorer normalizes everything it caches.
#[async_trait]
pub trait EmbeddingProvider: Send + Sync {
    /// Whether the model is loaded and can serve requests
    fn is_ready(&self) -> bool {
        true
    }

    /// Identifier of the model behind this provider
    fn model_id(&self) -> &str;

    /// Embed `text` (a word or a whole sentence; sentences are mean-pooled)
    async fn embed(&self, text: &str) -> Result<Vec<f32>>;
}

/// Masked-language-model slot filler
#[async_trait]
pub trait MaskPredictor: Send + Sync {
    fn is_ready(&self) -> bool {
        true
    }

    /// Token the predictor expects in place of the masked slot
    fn mask_token(&self) -> &str {
        DEFAULT_MASK_TOKEN
    }

    /// Top-`k` predictions for the mask slot, most probable first
    async fn predict_top_k(&self, masked_text: &str, k: usize) -> Result<Vec<TokenPrediction>>;
}
