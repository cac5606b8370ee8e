//! Overlapping-window chunking for retrieval.
//!
//! Splits a text into fixed-size windows that share a configured number of
//! characters with their neighbors, so no sentence is cut without context
//! on at least one side. Window arithmetic is done in characters; the
//! recorded offsets are byte offsets into the source, always on `char`
//! boundaries.

use serde::{Deserialize, Serialize};

/// A bounded contiguous slice of the knowledge text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chunk {
    /// The chunk text, including the overlap shared with the previous
    /// chunk.
    pub text: String,

    /// Byte offset of the chunk's first character in the source text.
    pub source_offset: usize,
}

impl Chunk {
    /// Length of the chunk in characters.
    pub fn char_len(&self) -> usize {
        self.text.chars().count()
    }
}

/// Configuration for the chunker.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ChunkerConfig {
    /// Maximum chunk length in characters.
    pub max_chars: usize,

    /// Characters shared between adjacent chunks.
    pub overlap_chars: usize,
}

impl Default for ChunkerConfig {
    fn default() -> Self {
        Self {
            max_chars: 600,
            overlap_chars: 100,
        }
    }
}

/// Splits text into overlapping fixed-size windows.
///
/// Each chunk starts `max_chars - overlap_chars` characters after the
/// previous one, so adjacent chunks share exactly `overlap_chars`
/// characters of content (the final chunk may be shorter than
/// `max_chars`). Concatenating the first chunk with the non-overlapping
/// suffix of every later chunk reconstructs the source exactly.
#[derive(Debug, Clone)]
pub struct WindowChunker {
    config: ChunkerConfig,
}

impl WindowChunker {
    /// Create a chunker with the default configuration.
    pub fn new() -> Self {
        Self {
            config: ChunkerConfig::default(),
        }
    }

    /// Create a chunker with a custom configuration.
    pub fn with_config(config: ChunkerConfig) -> Self {
        Self { config }
    }

    /// Split `text` into overlapping chunks covering the whole input.
    ///
    /// Empty input yields no chunks. A degenerate configuration
    /// (`overlap_chars >= max_chars`) still terminates: the window
    /// advances at least one character per chunk.
    pub fn chunk(&self, text: &str) -> Vec<Chunk> {
        if text.is_empty() {
            return Vec::new();
        }

        // Byte offset of every character, plus the end of the text, so
        // windows counted in characters can be sliced on byte boundaries.
        let mut boundaries: Vec<usize> = text.char_indices().map(|(offset, _)| offset).collect();
        boundaries.push(text.len());
        let total_chars = boundaries.len() - 1;

        let max_chars = self.config.max_chars.max(1);
        let step = max_chars.saturating_sub(self.config.overlap_chars).max(1);

        let mut chunks = Vec::new();
        let mut start = 0;
        loop {
            let end = (start + max_chars).min(total_chars);
            chunks.push(Chunk {
                text: text[boundaries[start]..boundaries[end]].to_string(),
                source_offset: boundaries[start],
            });
            if end == total_chars {
                break;
            }
            start += step;
        }
        chunks
    }
}

impl Default for WindowChunker {
    fn default() -> Self {
        Self::new()
    }
}
