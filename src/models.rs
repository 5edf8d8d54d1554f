//! Core data models used throughout Quillgen.
//!
//! These types represent the documents, chunks, retrieval results, and
//! generation records that flow through the indexing and generation pipeline.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::error::QuillError;

/// Declared type of an uploaded reference file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum DocumentKind {
    PlainText,
    Pdf,
}

impl DocumentKind {
    /// Infer the kind from a filename extension (`.pdf` → [`DocumentKind::Pdf`],
    /// everything else is treated as plain text).
    pub fn from_filename(name: &str) -> Self {
        let lower = name.to_lowercase();
        if lower.ends_with(".pdf") {
            DocumentKind::Pdf
        } else {
            DocumentKind::PlainText
        }
    }
}

/// A reference document produced by ingestion from one uploaded file.
///
/// Immutable once created; discarded after chunking (only chunks live in
/// the index).
#[derive(Debug, Clone)]
pub struct Document {
    pub content: String,
    pub source_id: String,
    pub kind: DocumentKind,
}

/// A bounded, possibly overlapping span of a document's text — the unit
/// of embedding and retrieval.
#[derive(Debug, Clone, Serialize)]
pub struct Chunk {
    pub text: String,
    /// Identifier of the originating document (its filename).
    pub source_id: String,
    /// Byte offset of the chunk's start within the source document.
    pub offset: usize,
}

/// Ranked passages returned for a query, plus the deduplicated set of
/// source documents they came from (first-seen order).
#[derive(Debug, Clone, Default)]
pub struct RetrievalResult {
    /// Most similar first.
    pub passages: Vec<Chunk>,
    pub source_ids: Vec<String>,
}

impl RetrievalResult {
    pub fn is_empty(&self) -> bool {
        self.passages.is_empty()
    }

    /// Join passage texts into a single grounding-context block for the
    /// prompt composer.
    pub fn context_text(&self) -> String {
        self.passages
            .iter()
            .map(|p| p.text.as_str())
            .collect::<Vec<_>>()
            .join("\n\n")
    }
}

/// Writing style requested by the caller.
///
/// Closed enum: every match over it is exhaustive, so adding a style is a
/// compile-time-checked change. Unknown style strings are rejected at the
/// parsing boundary with [`QuillError::UnknownStyle`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum WritingStyle {
    Academic,
    Technical,
    Conversational,
    Journalistic,
}

impl FromStr for WritingStyle {
    type Err = QuillError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "academic" => Ok(WritingStyle::Academic),
            "technical" => Ok(WritingStyle::Technical),
            "conversational" => Ok(WritingStyle::Conversational),
            "journalistic" => Ok(WritingStyle::Journalistic),
            other => Err(QuillError::UnknownStyle(other.to_string())),
        }
    }
}

impl fmt::Display for WritingStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            WritingStyle::Academic => "academic",
            WritingStyle::Technical => "technical",
            WritingStyle::Conversational => "conversational",
            WritingStyle::Journalistic => "journalistic",
        };
        write!(f, "{}", name)
    }
}

/// One article-generation request.
#[derive(Debug, Clone, Serialize)]
pub struct GenerationRequest {
    pub topic: String,
    /// Approximate length of the article, 100–5000 words.
    pub target_word_count: u32,
    pub style: WritingStyle,
    /// When false, generation proceeds with empty grounding context even
    /// if an index exists.
    pub use_retrieval: bool,
}

/// Categorical sentiment of a generated article.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SentimentLabel {
    Positive,
    Negative,
    Neutral,
}

/// Categorical tone derived from subjectivity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ToneLabel {
    Objective,
    Balanced,
    Subjective,
}

impl fmt::Display for SentimentLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SentimentLabel::Positive => "Positive",
            SentimentLabel::Negative => "Negative",
            SentimentLabel::Neutral => "Neutral",
        };
        write!(f, "{}", name)
    }
}

impl fmt::Display for ToneLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ToneLabel::Objective => "Objective",
            ToneLabel::Balanced => "Balanced",
            ToneLabel::Subjective => "Subjective",
        };
        write!(f, "{}", name)
    }
}

/// Polarity/subjectivity scores plus their categorical labels.
///
/// Derived purely from the generated text; see [`crate::sentiment::analyze`].
#[derive(Debug, Clone, Copy, Serialize)]
pub struct SentimentScore {
    /// Emotional valence in `[-1.0, 1.0]`.
    pub polarity: f32,
    /// Degree of opinion vs. fact in `[0.0, 1.0]`.
    pub subjectivity: f32,
    pub sentiment: SentimentLabel,
    pub tone: ToneLabel,
}

/// The generated article and its sentiment scoring.
#[derive(Debug, Clone, Serialize)]
pub struct GenerationResult {
    pub text: String,
    pub sentiment: SentimentScore,
}

/// Append-only record of one completed generation run.
///
/// Owned exclusively by the pipeline for the lifetime of a session and
/// cleared only by explicit caller action.
#[derive(Debug, Clone, Serialize)]
pub struct HistoryEntry {
    pub timestamp: DateTime<Utc>,
    pub request: GenerationRequest,
    pub result: GenerationResult,
    /// Source documents whose passages grounded this run (empty when
    /// retrieval was disabled or no index existed).
    pub sources: Vec<String>,
}
