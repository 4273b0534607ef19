use anyhow::{Context as AnyhowContext, Result};
use async_trait::async_trait;
use clap::ValueEnum;
use lexis_scoring::{
    mean_pool, EmbeddingProvider, MaskPredictor, ScoringError, StubEmbedder, StubMaskPredictor,
    TokenPrediction,
};
use ndarray::Array2;
use serde::{Deserialize, Serialize};
use std::env;
use std::sync::Arc;
use std::time::Duration;

pub const EMBEDDING_MODE_ENV: &str = "LEXIS_EMBEDDING_MODE";
pub const PROVIDER_URL_ENV: &str = "LEXIS_PROVIDER_URL";
const DEFAULT_PROVIDER_URL: &str = "http://127.0.0.1:8088";
const STUB_DIMENSION: usize = 64;
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum EmbedMode {
    Stub,
    Http,
}

impl EmbedMode {
    pub const fn as_str(self) -> &'static str {
        match self {
            EmbedMode::Stub => "stub",
            EmbedMode::Http => "http",
        }
    }

    /// Flag first, then `LEXIS_EMBEDDING_MODE`, then stub
    pub fn resolve(flag: Option<Self>) -> Result<Self> {
        if let Some(mode) = flag {
            return Ok(mode);
        }
        match env::var(EMBEDDING_MODE_ENV) {
            Ok(raw) => Self::from_str(raw.trim(), true)
                .map_err(|_| anyhow::anyhow!("Unsupported {EMBEDDING_MODE_ENV}: {raw}")),
            Err(_) => Ok(EmbedMode::Stub),
        }
    }
}

pub fn resolve_provider_url(flag: Option<&str>) -> String {
    flag.map(str::to_string)
        .or_else(|| env::var(PROVIDER_URL_ENV).ok())
        .unwrap_or_else(|| DEFAULT_PROVIDER_URL.to_string())
        .trim_end_matches('/')
        .to_string()
}

pub type Providers = (Arc<dyn EmbeddingProvider>, Arc<dyn MaskPredictor>);

pub fn build_providers(mode: EmbedMode, base_url: &str) -> Result<Providers> {
    let providers: Providers = match mode {
        EmbedMode::Stub => (
            Arc::new(StubEmbedder::new(STUB_DIMENSION)),
            Arc::new(StubMaskPredictor::new()),
        ),
        EmbedMode::Http => {
            let client = reqwest::Client::builder()
                .timeout(REQUEST_TIMEOUT)
                .build()
                .context("Failed to build HTTP client")?;
            log::info!("Using HTTP providers at {}", base_url);
            (
                Arc::new(HttpEmbeddingProvider::new(client.clone(), base_url)),
                Arc::new(HttpMaskPredictor::new(client, base_url)),
            )
        }
    };
    Ok(providers)
}

#[derive(Serialize)]
struct EmbedRequest<'a> {
    text: &'a str,
}

/// Either a pooled vector or per-token hidden states to pool locally
#[derive(Deserialize)]
#[serde(untagged)]
enum EmbedResponse {
    Pooled { vector: Vec<f32> },
    Tokens { tokens: Vec<Vec<f32>> },
}

impl EmbedResponse {
    fn into_vector(self) -> lexis_scoring::Result<Vec<f32>> {
        match self {
            EmbedResponse::Pooled { vector } => Ok(vector),
            EmbedResponse::Tokens { tokens } => {
                let rows = tokens.len();
                let hidden = tokens.first().map_or(0, Vec::len);
                if let Some(bad) = tokens.iter().find(|row| row.len() != hidden) {
                    return Err(ScoringError::InvalidDimension {
                        expected: hidden,
                        actual: bad.len(),
                    });
                }
                let flat: Vec<f32> = tokens.into_iter().flatten().collect();
                let matrix = Array2::from_shape_vec((rows, hidden), flat)
                    .map_err(|err| ScoringError::EmbeddingError(err.to_string()))?;
                Ok(mean_pool(matrix.view()))
            }
        }
    }
}

/// `POST {base}/embed`
pub struct HttpEmbeddingProvider {
    client: reqwest::Client,
    url: String,
}

impl HttpEmbeddingProvider {
    pub fn new(client: reqwest::Client, base_url: &str) -> Self {
        Self {
            client,
            url: format!("{base_url}/embed"),
        }
    }
}

#[async_trait]
impl EmbeddingProvider for HttpEmbeddingProvider {
    fn model_id(&self) -> &str {
        &self.url
    }

    async fn embed(&self, text: &str) -> lexis_scoring::Result<Vec<f32>> {
        let response = self
            .client
            .post(&self.url)
            .json(&EmbedRequest { text })
            .send()
            .await
            .and_then(reqwest::Response::error_for_status)
            .map_err(|err| ScoringError::EmbeddingError(format!("POST {}: {err}", self.url)))?;

        let body: EmbedResponse = response
            .json()
            .await
            .map_err(|err| ScoringError::EmbeddingError(format!("Invalid /embed body: {err}")))?;
        body.into_vector()
    }
}

#[derive(Serialize)]
struct FillMaskRequest<'a> {
    text: &'a str,
    top_k: usize,
}

/// `POST {base}/fill-mask`
pub struct HttpMaskPredictor {
    client: reqwest::Client,
    url: String,
}

impl HttpMaskPredictor {
    pub fn new(client: reqwest::Client, base_url: &str) -> Self {
        Self {
            client,
            url: format!("{base_url}/fill-mask"),
        }
    }
}

#[async_trait]
impl MaskPredictor for HttpMaskPredictor {
    async fn predict_top_k(
        &self,
        masked_text: &str,
        k: usize,
    ) -> lexis_scoring::Result<Vec<TokenPrediction>> {
        let response = self
            .client
            .post(&self.url)
            .json(&FillMaskRequest {
                text: masked_text,
                top_k: k,
            })
            .send()
            .await
            .and_then(reqwest::Response::error_for_status)
            .map_err(|err| ScoringError::PredictionError(format!("POST {}: {err}", self.url)))?;

        let mut predictions: Vec<TokenPrediction> = response.json().await.map_err(|err| {
            ScoringError::PredictionError(format!("Invalid /fill-mask body: {err}"))
        })?;
        predictions.truncate(k);
        Ok(predictions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_pooled_response() {
        let body: EmbedResponse = serde_json::from_str(r#"{"vector":[0.5,0.5]}"#).unwrap();
        assert_eq!(body.into_vector().unwrap(), vec![0.5, 0.5]);
    }

    #[test]
    fn test_token_response_is_mean_pooled() {
        let body: EmbedResponse =
            serde_json::from_str(r#"{"tokens":[[1.0,0.0],[0.0,1.0],[2.0,2.0]]}"#).unwrap();
        assert_eq!(body.into_vector().unwrap(), vec![1.0, 1.0]);
    }

    #[test]
    fn test_ragged_tokens_rejected() {
        let body: EmbedResponse = serde_json::from_str(r#"{"tokens":[[1.0,0.0],[1.0]]}"#).unwrap();
        assert!(matches!(
            body.into_vector(),
            Err(ScoringError::InvalidDimension {
                expected: 2,
                actual: 1
            })
        ));
    }

    #[test]
    fn test_provider_url_trims_slash() {
        assert_eq!(
            resolve_provider_url(Some("http://models:9000/")),
            "http://models:9000"
        );
    }

    #[test]
    fn test_embed_mode_flag_wins() {
        assert_eq!(EmbedMode::resolve(Some(EmbedMode::Http)).unwrap(), EmbedMode::Http);
    }
}
