//! In-memory vector index with brute-force cosine similarity search.
//!
//! Built once per document batch and replaced wholesale on re-upload —
//! there is no incremental update or per-document deletion, and the index
//! does not persist across sessions. Search scores every stored vector
//! against the query; at the scale of one upload batch this is faster and
//! simpler than an approximate structure.

use tracing::debug;

use crate::embedding::{cosine_similarity, Embedder};
use crate::error::{QuillError, Result};
use crate::models::Chunk;

/// Searchable collection of (chunk, embedding) pairs.
#[derive(Debug)]
pub struct VectorIndex {
    entries: Vec<(Chunk, Vec<f32>)>,
}

impl VectorIndex {
    /// Embed every chunk (one batched call) and build the index.
    ///
    /// Deterministic and side-effect-free beyond the returned index: a
    /// failure here leaves any previously held index untouched, because
    /// the caller only swaps its index on success.
    pub async fn build(chunks: Vec<Chunk>, embedder: &dyn Embedder) -> Result<Self> {
        if chunks.is_empty() {
            return Err(QuillError::NoValidDocuments);
        }

        let texts: Vec<String> = chunks.iter().map(|c| c.text.clone()).collect();
        let vectors = embedder.embed(&texts).await?;

        if vectors.len() != chunks.len() {
            return Err(QuillError::Embedding {
                reason: format!(
                    "embedder returned {} vectors for {} chunks",
                    vectors.len(),
                    chunks.len()
                ),
            });
        }

        debug!(chunks = chunks.len(), model = embedder.model_name(), "built index");

        Ok(Self {
            entries: chunks.into_iter().zip(vectors).collect(),
        })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Return the `k` chunks most similar to `text`, most similar first.
    ///
    /// The query is embedded with the same model used at build time and
    /// compared by cosine similarity. Ties keep insertion order (stable
    /// sort). If `k` exceeds the number of stored chunks, all of them are
    /// returned.
    pub async fn query(&self, embedder: &dyn Embedder, text: &str, k: usize) -> Result<Vec<Chunk>> {
        if self.entries.is_empty() {
            return Err(QuillError::EmptyIndex);
        }
        debug_assert!(k >= 1, "retrieval.top_k is validated to be >= 1");

        let query_vec = embedder
            .embed(&[text.to_string()])
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| QuillError::Embedding {
                reason: "empty embedding response for query".to_string(),
            })?;

        let mut scored: Vec<(f32, &Chunk)> = self
            .entries
            .iter()
            .map(|(chunk, vec)| (cosine_similarity(&query_vec, vec), chunk))
            .collect();

        // Stable sort: equal scores keep original insertion order.
        scored.sort_by(|a, b| b.0.partial_cmp(&a.0).unwrap_or(std::cmp::Ordering::Equal));
        scored.truncate(k);

        Ok(scored.into_iter().map(|(_, chunk)| chunk.clone()).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    struct ZeroEmbedder;

    #[async_trait]
    impl Embedder for ZeroEmbedder {
        fn model_name(&self) -> &str {
            "zero-test"
        }

        fn dims(&self) -> usize {
            1
        }

        async fn embed(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
            Ok(texts.iter().map(|_| vec![0.0]).collect())
        }
    }

    #[tokio::test]
    async fn build_rejects_empty_chunk_list() {
        let err = VectorIndex::build(Vec::new(), &ZeroEmbedder)
            .await
            .unwrap_err();
        assert!(matches!(err, QuillError::NoValidDocuments));
    }

    #[tokio::test]
    async fn query_on_zero_entry_index_is_an_error() {
        // Unreachable through `build` (it rejects empty input), so the
        // guard is exercised on a directly constructed index.
        let index = VectorIndex {
            entries: Vec::new(),
        };
        let err = index
            .query(&ZeroEmbedder, "anything", 3)
            .await
            .unwrap_err();
        assert!(matches!(err, QuillError::EmptyIndex));
    }
}
