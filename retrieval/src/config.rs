//! Configuration for the retrieval pipeline.

use serde::{Deserialize, Serialize};

use folio_knowledge::ChunkerConfig;

/// Configuration for the retrieval pipeline.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct RagConfig {
    /// Maximum chunk length in characters.
    pub max_chunk_chars: usize,

    /// Characters shared between adjacent chunks.
    pub overlap_chars: usize,

    /// How many chunks to retrieve per question.
    pub top_k: usize,
}

impl RagConfig {
    /// Set the retrieval depth.
    pub fn with_top_k(mut self, top_k: usize) -> Self {
        self.top_k = top_k;
        self
    }

    /// Set the chunk window size and overlap.
    pub fn with_chunking(mut self, max_chunk_chars: usize, overlap_chars: usize) -> Self {
        self.max_chunk_chars = max_chunk_chars;
        self.overlap_chars = overlap_chars;
        self
    }

    /// The chunker configuration this pipeline config implies.
    pub fn chunker(&self) -> ChunkerConfig {
        ChunkerConfig {
            max_chars: self.max_chunk_chars,
            overlap_chars: self.overlap_chars,
        }
    }
}

impl Default for RagConfig {
    fn default() -> Self {
        Self {
            max_chunk_chars: 600,
            overlap_chars: 100,
            top_k: 4,
        }
    }
}
