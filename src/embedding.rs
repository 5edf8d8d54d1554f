//! Embedding backend abstraction and the fastembed implementation.
//!
//! The [`Embedder`] trait is the seam between the pipeline and the
//! embedding model: the same instance embeds chunk batches at index-build
//! time and single queries at retrieval time, so build and query vectors
//! always come from the same model. Embedding is deterministic — the same
//! text yields the same vector for a given model.
//!
//! [`FastembedEmbedder`] runs a sentence-transformer locally on CPU via
//! fastembed (bundled ONNX runtime; the model is downloaded from Hugging
//! Face on first use and cached). Inference runs on a blocking thread so
//! it never stalls the async runtime.

use async_trait::async_trait;
use tracing::debug;

use crate::config::EmbeddingConfig;
use crate::error::{QuillError, Result};

/// Text → fixed-dimension vector backend.
#[async_trait]
pub trait Embedder: Send + Sync {
    /// Model identifier (e.g. `"all-minilm-l6-v2"`).
    fn model_name(&self) -> &str;

    /// Embedding vector dimensionality (e.g. `384`).
    fn dims(&self) -> usize;

    /// Embed a batch of texts, returning one vector per input in order.
    async fn embed(&self, texts: &[String]) -> Result<Vec<Vec<f32>>>;
}

/// Local CPU embedding via fastembed.
pub struct FastembedEmbedder {
    model_name: String,
    dims: usize,
    batch_size: usize,
}

impl FastembedEmbedder {
    pub fn new(config: &EmbeddingConfig) -> Result<Self> {
        // Fail on unknown model names up front rather than at first embed.
        resolve_model(&config.model)?;
        Ok(Self {
            model_name: config.model.clone(),
            dims: config.dims,
            batch_size: config.batch_size,
        })
    }
}

#[async_trait]
impl Embedder for FastembedEmbedder {
    fn model_name(&self) -> &str {
        &self.model_name
    }

    fn dims(&self) -> usize {
        self.dims
    }

    async fn embed(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        let model = resolve_model(&self.model_name)?;
        let batch_size = self.batch_size;
        let texts = texts.to_vec();

        debug!(model = %self.model_name, count = texts.len(), "embedding batch");

        tokio::task::spawn_blocking(move || {
            let mut embedder = fastembed::TextEmbedding::try_new(
                fastembed::InitOptions::new(model).with_show_download_progress(false),
            )
            .map_err(|e| QuillError::Embedding {
                reason: format!("failed to initialize embedding model: {}", e),
            })?;

            embedder
                .embed(texts, Some(batch_size))
                .map_err(|e| QuillError::Embedding {
                    reason: e.to_string(),
                })
        })
        .await
        .map_err(|e| QuillError::Embedding {
            reason: format!("embedding task panicked: {}", e),
        })?
    }
}

fn resolve_model(name: &str) -> Result<fastembed::EmbeddingModel> {
    match name {
        "all-minilm-l6-v2" => Ok(fastembed::EmbeddingModel::AllMiniLML6V2),
        "bge-small-en-v1.5" => Ok(fastembed::EmbeddingModel::BGESmallENV15),
        "bge-base-en-v1.5" => Ok(fastembed::EmbeddingModel::BGEBaseENV15),
        "multilingual-e5-small" => Ok(fastembed::EmbeddingModel::MultilingualE5Small),
        other => Err(QuillError::Embedding {
            reason: format!(
                "unknown embedding model '{}'; supported: all-minilm-l6-v2, \
                 bge-small-en-v1.5, bge-base-en-v1.5, multilingual-e5-small",
                other
            ),
        }),
    }
}

/// Compute cosine similarity between two embedding vectors.
///
/// Returns a value in `[-1.0, 1.0]`; `0.0` for empty vectors or vectors
/// of different lengths.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() || a.is_empty() {
        return 0.0;
    }

    let mut dot = 0.0f32;
    let mut norm_a = 0.0f32;
    let mut norm_b = 0.0f32;

    for (x, y) in a.iter().zip(b.iter()) {
        dot += x * y;
        norm_a += x * x;
        norm_b += y * y;
    }

    let denom = norm_a.sqrt() * norm_b.sqrt();
    if denom < f32::EPSILON {
        return 0.0;
    }

    dot / denom
}
