//! Per-request similarity index.

use tracing::debug;

use crate::Embedding;
use crate::error::{EmbeddingError, Result};
use crate::similarity::rank_top_k;

/// A retrieval hit: an indexed item with its similarity to the query.
#[derive(Debug)]
pub struct Hit<'a, T> {
    /// The matched item.
    pub item: &'a T,

    /// Position of the item in the build order.
    pub ordinal: usize,

    /// Cosine similarity to the query.
    pub score: f32,
}

/// An in-memory vector index that lives for one request.
///
/// Pairs each item with its embedding at build time and answers top-k
/// similarity queries. The index is rebuilt from scratch on every request
/// rather than cached: all state stays request-local, so concurrent
/// requests need no coordination.
pub struct EphemeralIndex<T> {
    entries: Vec<(T, Embedding)>,
    dimension: usize,
}

impl<T> EphemeralIndex<T> {
    /// Pair items with their embedding vectors.
    ///
    /// Fails if the counts differ or the vectors are not all the same
    /// dimension.
    pub fn build(items: Vec<T>, vectors: Vec<Embedding>) -> Result<Self> {
        if items.len() != vectors.len() {
            return Err(EmbeddingError::ItemCountMismatch {
                items: items.len(),
                vectors: vectors.len(),
            });
        }

        let dimension = vectors.first().map(Vec::len).unwrap_or(0);
        for vector in &vectors {
            if vector.len() != dimension {
                return Err(EmbeddingError::DimensionMismatch {
                    expected: dimension,
                    actual: vector.len(),
                });
            }
        }

        let entries: Vec<(T, Embedding)> = items.into_iter().zip(vectors).collect();
        debug!("built ephemeral index with {} entries", entries.len());

        Ok(Self {
            entries,
            dimension,
        })
    }

    /// Number of indexed items.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the index holds no items.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Dimension of the indexed vectors.
    pub fn dimension(&self) -> usize {
        self.dimension
    }

    /// Return the `k` items most similar to `query`, best first.
    ///
    /// Results are sorted by descending cosine similarity; items with equal
    /// scores keep their build order. Fewer than `k` hits are returned when
    /// the index is smaller than `k`.
    pub fn query(&self, query: &Embedding, k: usize) -> Result<Vec<Hit<'_, T>>> {
        if !self.entries.is_empty() && query.len() != self.dimension {
            return Err(EmbeddingError::DimensionMismatch {
                expected: self.dimension,
                actual: query.len(),
            });
        }

        let vectors: Vec<Embedding> = self.entries.iter().map(|(_, v)| v.clone()).collect();
        let ranked = rank_top_k(query, &vectors, k)?;

        Ok(ranked
            .into_iter()
            .map(|scored| Hit {
                item: &self.entries[scored.ordinal].0,
                ordinal: scored.ordinal,
                score: scored.score,
            })
            .collect())
    }
}
