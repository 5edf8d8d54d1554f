//! Document ingestion: uploaded file bytes → plain-text [`Document`]s.
//!
//! PDF extraction uses `pdf-extract` on the in-memory bytes; plain text is
//! decoded as strict UTF-8. Per-file failures are collected and reported
//! without aborting the rest of the batch. A batch in which every file
//! fails is fatal ([`QuillError::NoValidDocuments`]).

use std::path::Path;

use tracing::{debug, warn};

use crate::error::{QuillError, Result};
use crate::models::{Document, DocumentKind};

/// One uploaded file, as received from the caller.
#[derive(Debug, Clone)]
pub struct RawFile {
    pub name: String,
    pub bytes: Vec<u8>,
    pub kind: DocumentKind,
}

impl RawFile {
    /// Read a file from disk, inferring its kind from the extension.
    pub fn from_path(path: &Path) -> Result<Self> {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        let bytes = std::fs::read(path).map_err(|e| QuillError::Extraction {
            file: name.clone(),
            reason: e.to_string(),
        })?;
        let kind = DocumentKind::from_filename(&name);
        Ok(Self { name, bytes, kind })
    }
}

/// Extract a single file into a [`Document`].
///
/// Fails with [`QuillError::Extraction`] for malformed PDFs, PDFs with no
/// text layer, or files that are empty after extraction, and with
/// [`QuillError::Decode`] for plain-text files that are not valid UTF-8.
pub fn extract_document(file: &RawFile) -> Result<Document> {
    let content = match file.kind {
        DocumentKind::Pdf => pdf_extract::extract_text_from_mem(&file.bytes).map_err(|e| {
            QuillError::Extraction {
                file: file.name.clone(),
                reason: e.to_string(),
            }
        })?,
        DocumentKind::PlainText => String::from_utf8(file.bytes.clone())
            .map_err(|_| QuillError::Decode {
                file: file.name.clone(),
            })?,
    };

    if content.trim().is_empty() {
        return Err(QuillError::Extraction {
            file: file.name.clone(),
            reason: "no text content".to_string(),
        });
    }

    debug!(file = %file.name, bytes = content.len(), "extracted document");

    Ok(Document {
        content,
        source_id: file.name.clone(),
        kind: file.kind,
    })
}

/// Extract a whole batch, collecting per-file errors instead of aborting.
///
/// Returns the successfully extracted documents alongside the errors for
/// the files that failed, in input order. The caller decides whether an
/// all-failed batch is fatal (the pipeline treats it as
/// [`QuillError::NoValidDocuments`]).
pub fn ingest_batch(files: &[RawFile]) -> (Vec<Document>, Vec<QuillError>) {
    let mut documents = Vec::new();
    let mut errors = Vec::new();

    for file in files {
        match extract_document(file) {
            Ok(doc) => documents.push(doc),
            Err(e) => {
                warn!(file = %file.name, error = %e, "skipping file");
                errors.push(e);
            }
        }
    }

    (documents, errors)
}
