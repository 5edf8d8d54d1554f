//! Client for a local Ollama-compatible text-completion service.
//!
//! Two endpoints are consumed:
//! - `GET {endpoint}/api/tags` — the service's local model catalog, used
//!   as a preflight check before generating.
//! - `POST {endpoint}/api/generate` — non-streaming generation
//!   (`stream=false`) with sampling options.
//!
//! Failures are non-retryable and reported distinctly: a refused
//! connection is [`QuillError::ServiceUnreachable`], a missing model is
//! [`QuillError::ModelNotFound`], anything else is
//! [`QuillError::Generation`]. Transient failures surface immediately so
//! the caller can decide what to do (e.g. tell the operator to start the
//! service).

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::GenerationConfig;
use crate::error::{QuillError, Result};

/// Seam between the pipeline and the completion service.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// The model this generator targets.
    fn model(&self) -> &str;

    /// List the models present in the service's local catalog.
    async fn list_models(&self) -> Result<Vec<String>>;

    /// Send a prompt and return the raw completion. `num_predict` caps
    /// the token budget for the response.
    async fn generate(&self, prompt: &str, num_predict: u32) -> Result<String>;
}

/// Thin client for the Ollama HTTP API.
pub struct OllamaClient {
    client: reqwest::Client,
    cfg: GenerationConfig,
    url_generate: String,
    url_tags: String,
}

impl OllamaClient {
    /// Build a client from config, validating the endpoint.
    pub fn new(cfg: GenerationConfig) -> Result<Self> {
        let endpoint = cfg.endpoint.trim();
        if endpoint.is_empty()
            || !(endpoint.starts_with("http://") || endpoint.starts_with("https://"))
        {
            return Err(QuillError::InvalidRequest(format!(
                "generation endpoint '{}' must start with http:// or https://",
                cfg.endpoint
            )));
        }

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(cfg.timeout_secs))
            .build()
            .map_err(|e| QuillError::Generation {
                reason: format!("failed to build HTTP client: {}", e),
            })?;

        let base = endpoint.trim_end_matches('/').to_string();
        let url_generate = format!("{}/api/generate", base);
        let url_tags = format!("{}/api/tags", base);

        Ok(Self {
            client,
            cfg,
            url_generate,
            url_tags,
        })
    }

    fn map_transport_error(&self, e: reqwest::Error) -> QuillError {
        if e.is_connect() {
            QuillError::ServiceUnreachable {
                endpoint: self.cfg.endpoint.clone(),
            }
        } else {
            QuillError::Generation {
                reason: e.to_string(),
            }
        }
    }
}

#[async_trait]
impl TextGenerator for OllamaClient {
    fn model(&self) -> &str {
        &self.cfg.model
    }

    async fn list_models(&self) -> Result<Vec<String>> {
        debug!("GET {}", self.url_tags);
        let resp = self
            .client
            .get(&self.url_tags)
            .send()
            .await
            .map_err(|e| self.map_transport_error(e))?;

        if !resp.status().is_success() {
            let status = resp.status();
            let snippet = body_snippet(resp).await;
            return Err(QuillError::Generation {
                reason: format!("model catalog returned HTTP {}: {}", status, snippet),
            });
        }

        let tags: TagsResponse = resp.json().await.map_err(|e| QuillError::Generation {
            reason: format!("failed to decode model catalog: {}", e),
        })?;

        Ok(tags.models.into_iter().map(|m| m.name).collect())
    }

    async fn generate(&self, prompt: &str, num_predict: u32) -> Result<String> {
        let body = GenerateRequest {
            model: &self.cfg.model,
            prompt,
            stream: false,
            options: GenerateOptions {
                temperature: self.cfg.temperature,
                top_p: self.cfg.top_p,
                num_predict,
            },
        };

        debug!(model = %self.cfg.model, num_predict, "POST {}", self.url_generate);
        let resp = self
            .client
            .post(&self.url_generate)
            .json(&body)
            .send()
            .await
            .map_err(|e| self.map_transport_error(e))?;

        if !resp.status().is_success() {
            let status = resp.status();
            let snippet = body_snippet(resp).await;
            return Err(QuillError::Generation {
                reason: format!("HTTP {} from generation service: {}", status, snippet),
            });
        }

        let out: GenerateResponse = resp.json().await.map_err(|e| QuillError::Generation {
            reason: format!("failed to decode completion: {}", e),
        })?;

        Ok(out.response)
    }
}

async fn body_snippet(resp: reqwest::Response) -> String {
    let text = resp.text().await.unwrap_or_default();
    text.chars().take(240).collect()
}

/// Request body for `/api/generate` (non-streaming).
#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    stream: bool,
    options: GenerateOptions,
}

/// Subset of Ollama decoding options used by the pipeline.
#[derive(Debug, Serialize)]
struct GenerateOptions {
    temperature: f32,
    top_p: f32,
    num_predict: u32,
}

/// Response body for `/api/generate`; the completion is in `response`.
#[derive(Debug, Deserialize)]
struct GenerateResponse {
    response: String,
}

/// Response body for `/api/tags`.
#[derive(Debug, Deserialize)]
struct TagsResponse {
    #[serde(default)]
    models: Vec<TagModel>,
}

#[derive(Debug, Deserialize)]
struct TagModel {
    name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_schemeless_endpoint() {
        let cfg = GenerationConfig {
            endpoint: "localhost:11434".to_string(),
            ..GenerationConfig::default()
        };
        assert!(matches!(
            OllamaClient::new(cfg),
            Err(QuillError::InvalidRequest(_))
        ));
    }

    #[test]
    fn strips_trailing_slash_from_endpoint() {
        let cfg = GenerationConfig {
            endpoint: "http://localhost:11434/".to_string(),
            ..GenerationConfig::default()
        };
        let client = OllamaClient::new(cfg).unwrap();
        assert_eq!(client.url_generate, "http://localhost:11434/api/generate");
        assert_eq!(client.url_tags, "http://localhost:11434/api/tags");
    }
}
