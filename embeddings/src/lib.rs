//! # Embeddings
//!
//! Embedding generation and similarity search for the folio chat service.
//!
//! ## Features
//!
//! - **Embedding Generation**: convert text to dense vectors via a hosted
//!   embedding model
//! - **Similarity Search**: cosine similarity and stable top-k ranking
//! - **Ephemeral Index**: a per-request index pairing items with their
//!   vectors, rebuilt from scratch on every call
//!
//! The index is deliberately not persistent: the corpus it serves (a short
//! profile text) is small enough that statelessness beats cache
//! invalidation.

pub mod error;
pub mod index;
pub mod provider;
pub mod similarity;

pub use error::{EmbeddingError, Result};
pub use index::{EphemeralIndex, Hit};
pub use provider::{EmbeddingProvider, GeminiEmbeddings};
pub use similarity::cosine_similarity;

/// A dense vector embedding.
pub type Embedding = Vec<f32>;

/// Dimension of embeddings produced by the default model (`embedding-001`).
pub const DEFAULT_DIMENSION: usize = 768;
