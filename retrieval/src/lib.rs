//! # Retrieval
//!
//! The retrieval-augmented answer pipeline for the folio chat service.
//!
//! ## Architecture
//!
//! ```text
//! question ──► chunk knowledge ──► embed chunks + question
//!                                        │
//!                                        ▼
//!                               ephemeral vector index
//!                                        │ top-k
//!                                        ▼
//!                               grounded answer generation
//! ```
//!
//! Every request runs the full pipeline against fresh state: the knowledge
//! text is re-chunked and re-indexed, the providers are called once each,
//! and nothing survives the call. That keeps concurrent requests free of
//! shared mutable state at the cost of repeated embedding calls — the
//! right trade for a corpus this small.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use folio_retrieval::RagEngine;
//!
//! let engine = RagEngine::new(folio_knowledge::ABOUT_ME, embeddings, generator);
//! let answer = engine.answer("What does he know?").await?;
//! ```

pub mod config;
pub mod engine;
pub mod error;

pub use config::RagConfig;
pub use engine::{RagEngine, ScoredChunk};
pub use error::{Result, RetrievalError};

// Re-export from dependencies for convenience
pub use folio_embeddings::EmbeddingProvider;
pub use folio_generation::AnswerProvider;
pub use folio_knowledge::Chunk;
