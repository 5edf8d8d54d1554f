//! Session orchestrator: wires ingestion, chunking, indexing, retrieval,
//! prompting, generation, and sentiment scoring together.
//!
//! A [`Pipeline`] is the only component holding process-wide state — the
//! current vector index and the append-only run history — and it owns
//! both exclusively for the lifetime of one session. With no index built,
//! generation runs proceed with empty grounding context; building an
//! index from a new batch replaces the old one wholesale, and a failed
//! build leaves the previous state untouched.

use chrono::Utc;
use tracing::{info, warn};

use crate::chunk::chunk_document;
use crate::config::Config;
use crate::embedding::Embedder;
use crate::error::{QuillError, Result};
use crate::generate::TextGenerator;
use crate::index::VectorIndex;
use crate::ingest::{ingest_batch, RawFile};
use crate::models::{GenerationRequest, GenerationResult, HistoryEntry, RetrievalResult};
use crate::prompt::compose;
use crate::retrieve::retrieve;
use crate::sentiment::analyze;

/// Words-to-tokens budget ratio for `num_predict`.
const TOKENS_PER_WORD: u32 = 4;

/// Allowed range for `target_word_count`.
const WORD_COUNT_RANGE: std::ops::RangeInclusive<u32> = 100..=5000;

/// Outcome of one document-indexing batch.
#[derive(Debug)]
pub struct IndexReport {
    /// Documents successfully ingested.
    pub documents: usize,
    /// Chunks stored in the new index.
    pub chunks: usize,
    /// Files that failed ingestion, with the reason each was skipped.
    pub skipped: Vec<(String, String)>,
}

/// One generation session: current index plus run history.
pub struct Pipeline {
    config: Config,
    embedder: Box<dyn Embedder>,
    generator: Box<dyn TextGenerator>,
    index: Option<VectorIndex>,
    history: Vec<HistoryEntry>,
}

impl Pipeline {
    pub fn new(
        config: Config,
        embedder: Box<dyn Embedder>,
        generator: Box<dyn TextGenerator>,
    ) -> Self {
        Self {
            config,
            embedder,
            generator,
            index: None,
            history: Vec::new(),
        }
    }

    /// Whether a document index is currently available for retrieval.
    pub fn is_indexed(&self) -> bool {
        self.index.is_some()
    }

    /// Ingest a batch of uploaded files and build a fresh index from them.
    ///
    /// Per-file failures are reported in the returned [`IndexReport`]
    /// without aborting the batch. If every file fails, or embedding the
    /// chunks fails, the error is returned and the previously held index
    /// (if any) remains in place. On success the new index replaces the
    /// old one wholesale.
    pub async fn index_documents(&mut self, files: &[RawFile]) -> Result<IndexReport> {
        let (documents, errors) = ingest_batch(files);
        if documents.is_empty() {
            return Err(QuillError::NoValidDocuments);
        }

        let chunks: Vec<_> = documents
            .iter()
            .flat_map(|doc| chunk_document(doc, &self.config.chunking))
            .collect();

        let index = VectorIndex::build(chunks, self.embedder.as_ref()).await?;

        info!(
            documents = documents.len(),
            chunks = index.len(),
            skipped = errors.len(),
            "index replaced"
        );

        let report = IndexReport {
            documents: documents.len(),
            chunks: index.len(),
            skipped: errors.iter().map(|e| (file_of(e), e.to_string())).collect(),
        };

        self.index = Some(index);
        Ok(report)
    }

    /// Run one generation request end to end.
    ///
    /// Sequence: optional retrieval → prompt composition → model preflight
    /// → generation → sentiment analysis → history append. Any generation
    /// failure aborts the run without appending a history entry.
    pub async fn run(&mut self, request: GenerationRequest) -> Result<GenerationResult> {
        validate_request(&request)?;

        let retrieval = if request.use_retrieval {
            retrieve(
                self.index.as_ref(),
                self.embedder.as_ref(),
                &request.topic,
                self.config.retrieval.top_k,
            )
            .await?
        } else {
            RetrievalResult::default()
        };

        if request.use_retrieval && retrieval.is_empty() {
            warn!("no grounding context available; generating from general knowledge");
        }

        let prompt = compose(
            &retrieval.context_text(),
            &request.topic,
            request.target_word_count,
            request.style,
        );

        // Preflight: the service must be up and the model present before
        // spending a generation call.
        let available = self.generator.list_models().await?;
        let model = self.generator.model();
        if !available.iter().any(|m| m == model) {
            return Err(QuillError::ModelNotFound {
                model: model.to_string(),
            });
        }

        let text = self
            .generator
            .generate(&prompt, request.target_word_count * TOKENS_PER_WORD)
            .await?;

        let sentiment = analyze(&text);
        let result = GenerationResult { text, sentiment };

        self.history.push(HistoryEntry {
            timestamp: Utc::now(),
            request,
            result: result.clone(),
            sources: retrieval.source_ids,
        });

        Ok(result)
    }

    /// Ordered run history, oldest first.
    pub fn history(&self) -> &[HistoryEntry] {
        &self.history
    }

    pub fn clear_history(&mut self) {
        self.history.clear();
    }
}

fn validate_request(request: &GenerationRequest) -> Result<()> {
    if request.topic.trim().is_empty() {
        return Err(QuillError::InvalidRequest(
            "topic must not be empty".to_string(),
        ));
    }
    if !WORD_COUNT_RANGE.contains(&request.target_word_count) {
        return Err(QuillError::InvalidRequest(format!(
            "target_word_count {} outside allowed range {}-{}",
            request.target_word_count,
            WORD_COUNT_RANGE.start(),
            WORD_COUNT_RANGE.end()
        )));
    }
    Ok(())
}

fn file_of(error: &QuillError) -> String {
    match error {
        QuillError::Extraction { file, .. } | QuillError::Decode { file } => file.clone(),
        _ => String::new(),
    }
}
