//! Recursive overlapping text chunker.
//!
//! Splits document text into [`Chunk`]s of at most `max_chars` bytes, with
//! consecutive chunks from the same document overlapping by `overlap_chars`
//! bytes. Split points are chosen from a separator priority list —
//! paragraph breaks first, then line breaks, then sentence breaks, then
//! word boundaries — falling back to an arbitrary character boundary only
//! when no separator lands in the usable part of the window.
//!
//! Each chunk records the byte offset of its start within the source
//! document, so the original text can be reconstructed by concatenating
//! the non-overlapping tails of consecutive chunks.
//!
//! # Guarantees
//!
//! - A document no longer than `max_chars` yields exactly one chunk equal
//!   to the whole text, with no overlap.
//! - Every chunk is at most `max_chars` bytes.
//! - Consecutive chunks overlap by `overlap_chars` bytes, within
//!   boundary-snapping tolerance.
//! - All split points land on valid UTF-8 char boundaries.
//! - Document order is preserved.

use crate::config::ChunkingConfig;
use crate::models::{Chunk, Document};

/// Separators tried in priority order when choosing a split point.
const SEPARATORS: [&str; 4] = ["\n\n", "\n", ". ", " "];

/// Split a document into tagged, overlapping chunks.
pub fn chunk_document(doc: &Document, config: &ChunkingConfig) -> Vec<Chunk> {
    split_spans(&doc.content, config.max_chars, config.overlap_chars)
        .into_iter()
        .map(|(start, end)| Chunk {
            text: doc.content[start..end].to_string(),
            source_id: doc.source_id.clone(),
            offset: start,
        })
        .collect()
}

/// Compute `(start, end)` byte ranges for the chunks of `text`.
///
/// At least one span is always returned. `overlap` must be strictly less
/// than `max_chars` (enforced by config validation) or progress through
/// the text could stall.
pub fn split_spans(text: &str, max_chars: usize, overlap: usize) -> Vec<(usize, usize)> {
    debug_assert!(max_chars > 0 && overlap < max_chars);

    if text.len() <= max_chars {
        return vec![(0, text.len())];
    }

    let mut spans = Vec::new();
    let mut start = 0usize;

    loop {
        let remaining = text.len() - start;
        if remaining <= max_chars {
            spans.push((start, text.len()));
            break;
        }

        let window = snap_back(text, start + max_chars);
        let end = pick_break(text, start, window);
        spans.push((start, end));

        // Back off by the overlap amount, but always advance.
        let mut next = end.saturating_sub(overlap);
        if next <= start {
            next = start + 1;
        }
        start = snap_forward(text, next);
    }

    spans
}

/// Choose the split point inside `(start, window]`.
///
/// Each separator is accepted only if it lands in the latter half of the
/// window, so chunks stay close to their target size; otherwise the next
/// finer separator is tried. Falls back to a hard cut at `window`.
fn pick_break(text: &str, start: usize, window: usize) -> usize {
    let slice = &text[start..window];
    let min_fill = start + (window - start) / 2;

    for sep in SEPARATORS {
        if let Some(pos) = slice.rfind(sep) {
            let cut = start + pos + sep.len();
            if cut > min_fill && cut <= window {
                return cut;
            }
        }
    }

    if window > start {
        window
    } else {
        // Degenerate window (multibyte char wider than max_chars): take one char.
        snap_forward(text, start + 1)
    }
}

/// Snap a byte index back to the nearest valid UTF-8 char boundary.
fn snap_back(s: &str, index: usize) -> usize {
    if index >= s.len() {
        return s.len();
    }
    let mut i = index;
    while i > 0 && !s.is_char_boundary(i) {
        i -= 1;
    }
    i
}

/// Snap a byte index forward to the nearest valid UTF-8 char boundary.
fn snap_forward(s: &str, index: usize) -> usize {
    if index >= s.len() {
        return s.len();
    }
    let mut i = index;
    while i < s.len() && !s.is_char_boundary(i) {
        i += 1;
    }
    i
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::DocumentKind;

    const MAX: usize = 1000;
    const OVERLAP: usize = 200;

    fn doc(content: &str) -> Document {
        Document {
            content: content.to_string(),
            source_id: "test.txt".to_string(),
            kind: DocumentKind::PlainText,
        }
    }

    fn cfg() -> ChunkingConfig {
        ChunkingConfig {
            max_chars: MAX,
            overlap_chars: OVERLAP,
        }
    }

    fn long_text() -> String {
        (0..400)
            .map(|i| format!("Sentence number {} talks about something. ", i))
            .collect()
    }

    #[test]
    fn short_document_single_chunk() {
        let d = doc("A short note that fits comfortably in one chunk.");
        let chunks = chunk_document(&d, &cfg());
        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0].text, d.content);
        assert_eq!(chunks[0].offset, 0);
    }

    #[test]
    fn document_at_exact_limit_single_chunk() {
        let text = "x".repeat(MAX);
        let spans = split_spans(&text, MAX, OVERLAP);
        assert_eq!(spans, vec![(0, MAX)]);
    }

    #[test]
    fn chunks_respect_max_size() {
        let text = long_text();
        for (start, end) in split_spans(&text, MAX, OVERLAP) {
            assert!(end - start <= MAX, "chunk of {} bytes exceeds max", end - start);
        }
    }

    #[test]
    fn consecutive_chunks_overlap() {
        let text = long_text();
        let spans = split_spans(&text, MAX, OVERLAP);
        assert!(spans.len() > 1);
        for pair in spans.windows(2) {
            let (_, prev_end) = pair[0];
            let (next_start, _) = pair[1];
            assert!(next_start < prev_end, "chunks must overlap");
            let got = prev_end - next_start;
            assert!(
                got <= OVERLAP,
                "overlap {} exceeds configured {}",
                got,
                OVERLAP
            );
        }
    }

    #[test]
    fn overlap_is_exact_away_from_boundaries() {
        // Uniform text, so no snapping adjustments apply.
        let text = long_text();
        let spans = split_spans(&text, MAX, OVERLAP);
        for pair in spans.windows(2) {
            assert_eq!(pair[0].1 - pair[1].0, OVERLAP);
        }
    }

    #[test]
    fn spans_reconstruct_original_text() {
        let text = long_text();
        let spans = split_spans(&text, MAX, OVERLAP);

        assert_eq!(spans[0].0, 0);
        assert_eq!(spans.last().unwrap().1, text.len());
        // Coverage is contiguous once overlaps are removed.
        let mut rebuilt = String::new();
        let mut covered = 0usize;
        for (start, end) in spans {
            assert!(start <= covered, "gap before offset {}", start);
            if end > covered {
                rebuilt.push_str(&text[covered..end]);
                covered = end;
            }
        }
        assert_eq!(rebuilt, text);
    }

    #[test]
    fn prefers_paragraph_breaks() {
        let mut text = "a".repeat(800);
        text.push_str("\n\n");
        text.push_str(&"b".repeat(600));
        let spans = split_spans(&text, MAX, OVERLAP);
        // First chunk should end right after the paragraph break.
        assert_eq!(spans[0].1, 802);
    }

    #[test]
    fn multibyte_text_splits_on_char_boundaries() {
        let text = "é".repeat(900); // 1800 bytes of 2-byte chars
        let spans = split_spans(&text, MAX, OVERLAP);
        assert!(spans.len() > 1);
        for (start, end) in spans {
            assert!(text.is_char_boundary(start));
            assert!(text.is_char_boundary(end));
        }
    }

    #[test]
    fn chunks_tagged_with_source_id() {
        let d = doc(&long_text());
        let chunks = chunk_document(&d, &cfg());
        assert!(chunks.len() > 1);
        for c in &chunks {
            assert_eq!(c.source_id, "test.txt");
            assert_eq!(c.text, &d.content[c.offset..c.offset + c.text.len()]);
        }
    }

    #[test]
    fn deterministic() {
        let text = long_text();
        assert_eq!(
            split_spans(&text, MAX, OVERLAP),
            split_spans(&text, MAX, OVERLAP)
        );
    }
}
