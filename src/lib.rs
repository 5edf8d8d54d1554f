//! # Quillgen
//!
//! A document-grounded article generator: retrieval-augmented prompting
//! against a local text-completion service, with post-hoc sentiment
//! scoring of every generated article.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────┐   ┌─────────┐   ┌──────────────┐
//! │ Ingestor │──▶│ Chunker │──▶│ Vector Index │   (index time)
//! └──────────┘   └─────────┘   └──────┬───────┘
//!                                     │
//!        ┌──────────┐   ┌─────────┐   │   ┌────────┐   ┌───────────┐
//!        │ Retrieve │◀──┤ Pipeline├───┴──▶│ Ollama │──▶│ Sentiment │
//!        └──────────┘   └─────────┘       └────────┘   └───────────┘
//!                                          (generation time)
//! ```
//!
//! Uploaded reference documents are extracted, split into overlapping
//! chunks, embedded locally, and held in an in-memory vector index for
//! the session. Each generation request retrieves the most similar
//! passages, folds them into a style-templated prompt, sends it to the
//! completion service, and scores the result for polarity and
//! subjectivity. With no documents uploaded, generation proceeds with
//! empty context.
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`config`] | TOML configuration parsing |
//! | [`models`] | Core data types |
//! | [`error`] | Error taxonomy |
//! | [`ingest`] | File bytes → plain-text documents |
//! | [`chunk`] | Overlapping text chunking |
//! | [`embedding`] | Embedding backend abstraction |
//! | [`index`] | In-memory vector index |
//! | [`retrieve`] | Top-K passage retrieval |
//! | [`prompt`] | Style-templated prompt composition |
//! | [`generate`] | Text-completion service client |
//! | [`sentiment`] | Polarity/subjectivity scoring |
//! | [`pipeline`] | Session orchestration |

pub mod chunk;
pub mod config;
pub mod embedding;
pub mod error;
pub mod generate;
pub mod index;
pub mod ingest;
pub mod models;
pub mod pipeline;
pub mod prompt;
pub mod retrieve;
pub mod sentiment;
