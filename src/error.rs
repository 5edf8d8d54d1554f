//! Unified error taxonomy for Quillgen.
//!
//! One closed enum covers every failure the pipeline can surface. Ingestion
//! errors are collected per file without aborting a batch; all other
//! variants abort only the current operation (index build or generation
//! run) and leave prior valid state intact. Every message is specific and
//! actionable — the caller can always tell "service down" from "model
//! missing" from "bad input".

use thiserror::Error;

/// Result alias used throughout the library.
pub type Result<T> = std::result::Result<T, QuillError>;

/// All errors produced by the Quillgen pipeline.
#[derive(Debug, Error)]
pub enum QuillError {
    /// Per-file text extraction failure (malformed PDF, missing text
    /// layer, empty file). Reported per file; the batch continues.
    #[error("failed to extract text from '{file}': {reason}")]
    Extraction { file: String, reason: String },

    /// Per-file UTF-8 decode failure for a plain-text upload.
    #[error("'{file}' is not valid UTF-8 text")]
    Decode { file: String },

    /// Every file in a batch failed ingestion. Fatal for the batch; any
    /// previously built index is left unchanged.
    #[error("no valid documents were processed")]
    NoValidDocuments,

    /// Similarity search against an index holding zero entries. The
    /// pipeline never produces one (an absent index skips retrieval and
    /// building from zero chunks is rejected), so this guards direct
    /// [`crate::index::VectorIndex`] callers.
    #[error("no document index has been built yet; index documents first")]
    EmptyIndex,

    /// Embedding backend failure (model init or inference).
    #[error("embedding failed: {reason}")]
    Embedding { reason: String },

    /// The generation service refused the connection.
    #[error("generation service unreachable at {endpoint}; is the server running?")]
    ServiceUnreachable { endpoint: String },

    /// The requested model is not in the service's local catalog.
    #[error("model '{model}' not found on the generation service; pull it and retry")]
    ModelNotFound { model: String },

    /// Any other failure during a generation call. Not retried.
    #[error("generation failed: {reason}")]
    Generation { reason: String },

    /// A style string outside the four recognized values. Unreachable
    /// through the typed API; surfaced at the string-parsing boundary.
    #[error("unknown writing style '{0}'; expected academic, technical, conversational, or journalistic")]
    UnknownStyle(String),

    /// Request parameters outside their documented ranges.
    #[error("invalid request: {0}")]
    InvalidRequest(String),
}
