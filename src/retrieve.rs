//! Top-K retrieval over the vector index.
//!
//! Thin composition layer: runs the similarity query and extracts the
//! deduplicated set of source documents from the returned passages. An
//! absent index is the designed fallback path — generation proceeds with
//! empty grounding context rather than failing.

use crate::embedding::Embedder;
use crate::error::Result;
use crate::index::VectorIndex;
use crate::models::RetrievalResult;

/// Retrieve the `k` most relevant passages for `query`.
///
/// With no index (no documents uploaded yet), returns an empty
/// [`RetrievalResult`]. Source IDs are deduplicated in first-seen order.
pub async fn retrieve(
    index: Option<&VectorIndex>,
    embedder: &dyn Embedder,
    query: &str,
    k: usize,
) -> Result<RetrievalResult> {
    let Some(index) = index else {
        return Ok(RetrievalResult::default());
    };

    let passages = index.query(embedder, query, k).await?;

    let mut source_ids: Vec<String> = Vec::new();
    for passage in &passages {
        if !source_ids.contains(&passage.source_id) {
            source_ids.push(passage.source_id.clone());
        }
    }

    Ok(RetrievalResult {
        passages,
        source_ids,
    })
}
