//! Error types for the retrieval pipeline.

use thiserror::Error;

/// Result type alias for retrieval operations.
pub type Result<T> = std::result::Result<T, RetrievalError>;

/// Errors that can occur in the retrieval pipeline.
#[derive(Error, Debug)]
pub enum RetrievalError {
    /// The question was empty or whitespace.
    #[error("question is empty")]
    EmptyQuestion,

    /// Embedding error.
    #[error("embedding error: {0}")]
    Embedding(#[from] folio_embeddings::EmbeddingError),

    /// Generation error.
    #[error("generation error: {0}")]
    Generation(#[from] folio_generation::GenerationError),
}
