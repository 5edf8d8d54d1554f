//! # Quillgen CLI (`quill`)
//!
//! Generates document-grounded articles from the command line.
//!
//! ## Usage
//!
//! ```bash
//! # Generate an article grounded in two reference documents
//! quill generate "Rust memory safety" --docs paper.pdf notes.txt --words 800 --style technical
//!
//! # Generate without reference documents (general knowledge only)
//! quill generate "The history of tea" --style journalistic
//!
//! # Score arbitrary text for sentiment and tone
//! quill analyze "This release is a remarkable improvement."
//!
//! # List models available on the generation service
//! quill models
//! ```
//!
//! All commands accept a `--config` flag pointing to a TOML configuration
//! file; missing files fall back to built-in defaults (see
//! `config/quill.example.toml`).

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use quillgen::config::load_config_or_default;
use quillgen::embedding::FastembedEmbedder;
use quillgen::generate::{OllamaClient, TextGenerator};
use quillgen::ingest::RawFile;
use quillgen::models::{GenerationRequest, WritingStyle};
use quillgen::pipeline::Pipeline;
use quillgen::sentiment;

/// Quillgen — a document-grounded article generator with sentiment scoring.
#[derive(Parser)]
#[command(
    name = "quill",
    about = "Quillgen — a document-grounded article generator with sentiment scoring",
    version,
    long_about = "Quillgen retrieves relevant passages from your reference documents, folds them \
    into a style-templated prompt, generates an article through a local Ollama-compatible \
    completion service, and scores the result for sentiment and tone."
)]
struct Cli {
    /// Path to configuration file (TOML). Falls back to defaults if absent.
    #[arg(long, global = true, default_value = "./config/quill.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate an article about a topic.
    Generate {
        /// Topic or prompt for the article.
        topic: String,

        /// Approximate article length in words (100-5000).
        #[arg(long, default_value_t = 500)]
        words: u32,

        /// Writing style: academic, technical, conversational, or journalistic.
        #[arg(long, default_value = "conversational")]
        style: String,

        /// Reference documents (.txt or .pdf) to ground the article in.
        #[arg(long, num_args = 1..)]
        docs: Vec<PathBuf>,

        /// Skip retrieval even when reference documents are given.
        #[arg(long)]
        no_retrieval: bool,
    },

    /// Score a piece of text for sentiment and tone.
    Analyze {
        /// Text to score.
        text: String,
    },

    /// List models available on the generation service.
    Models,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = load_config_or_default(&cli.config)?;

    match cli.command {
        Commands::Generate {
            topic,
            words,
            style,
            docs,
            no_retrieval,
        } => {
            let style: WritingStyle = style.parse()?;
            let embedder = FastembedEmbedder::new(&config.embedding)?;
            let generator = OllamaClient::new(config.generation.clone())?;
            let mut pipeline = Pipeline::new(config, Box::new(embedder), Box::new(generator));

            if !docs.is_empty() {
                let files: Vec<RawFile> = docs
                    .iter()
                    .map(|path| RawFile::from_path(path))
                    .collect::<std::result::Result<_, _>>()
                    .context("failed to read reference documents")?;

                let report = pipeline.index_documents(&files).await?;
                println!("indexed {} documents ({} chunks)", report.documents, report.chunks);
                for (file, reason) in &report.skipped {
                    println!("  skipped {}: {}", file, reason);
                }
            }

            let request = GenerationRequest {
                topic,
                target_word_count: words,
                style,
                use_retrieval: !no_retrieval,
            };

            let result = pipeline.run(request).await?;

            println!("\n{}\n", result.text);
            println!("sentiment: {}", result.sentiment.sentiment);
            println!("tone: {}", result.sentiment.tone);
            println!("polarity: {:.2}", result.sentiment.polarity);
            println!("subjectivity: {:.2}", result.sentiment.subjectivity);

            if let Some(entry) = pipeline.history().last() {
                if !entry.sources.is_empty() {
                    println!("sources:");
                    for source in &entry.sources {
                        println!("  - {}", source);
                    }
                }
            }
        }

        Commands::Analyze { text } => {
            let score = sentiment::analyze(&text);
            println!("sentiment: {}", score.sentiment);
            println!("tone: {}", score.tone);
            println!("polarity: {:.2}", score.polarity);
            println!("subjectivity: {:.2}", score.subjectivity);
        }

        Commands::Models => {
            let client = OllamaClient::new(config.generation.clone())?;
            let models = client.list_models().await?;
            if models.is_empty() {
                println!("no models installed on {}", config.generation.endpoint);
            } else {
                for model in models {
                    println!("{}", model);
                }
            }
        }
    }

    Ok(())
}
