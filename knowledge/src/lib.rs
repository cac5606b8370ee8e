//! # Knowledge
//!
//! The fixed knowledge document and the chunker that prepares it for
//! retrieval.
//!
//! The chat service answers questions about a single, compile-time text (a
//! professional profile). This crate owns that text and the logic that
//! splits it into overlapping windows suitable for embedding and
//! similarity search. Chunking is pure: no I/O, no error conditions.

pub mod chunker;
pub mod document;

pub use chunker::{Chunk, ChunkerConfig, WindowChunker};
pub use document::ABOUT_ME;
