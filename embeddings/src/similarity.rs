//! Similarity computation for embeddings.

use ordered_float::OrderedFloat;

use crate::Embedding;
use crate::error::{EmbeddingError, Result};

/// Compute the cosine similarity between two embeddings.
///
/// Returns a value between -1.0 and 1.0, where:
/// - 1.0 means identical direction
/// - 0.0 means orthogonal vectors
/// - -1.0 means opposite direction
///
/// A zero-magnitude vector yields 0.0 rather than a division error.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> Result<f32> {
    if a.len() != b.len() {
        return Err(EmbeddingError::DimensionMismatch {
            expected: a.len(),
            actual: b.len(),
        });
    }

    let mut dot = 0.0f32;
    let mut norm_a = 0.0f32;
    let mut norm_b = 0.0f32;
    for (x, y) in a.iter().zip(b.iter()) {
        dot += x * y;
        norm_a += x * x;
        norm_b += y * y;
    }

    let denominator = norm_a.sqrt() * norm_b.sqrt();
    if denominator == 0.0 {
        return Ok(0.0);
    }

    Ok(dot / denominator)
}

/// An item ranked by similarity to a query.
#[derive(Debug, Clone, PartialEq)]
pub struct Scored {
    /// Position of the item in the candidate list.
    pub ordinal: usize,

    /// Cosine similarity to the query.
    pub score: f32,
}

/// Rank candidates by descending cosine similarity to the query.
///
/// The sort is stable, so candidates with equal scores keep their original
/// order. At most `k` results are returned.
pub fn rank_top_k(query: &Embedding, candidates: &[Embedding], k: usize) -> Result<Vec<Scored>> {
    let mut scores: Vec<(OrderedFloat<f32>, usize)> = Vec::with_capacity(candidates.len());
    for (ordinal, candidate) in candidates.iter().enumerate() {
        scores.push((OrderedFloat(cosine_similarity(query, candidate)?), ordinal));
    }

    // Stable descending sort keeps insertion order for ties.
    scores.sort_by(|a, b| b.0.cmp(&a.0));

    Ok(scores
        .into_iter()
        .take(k)
        .map(|(score, ordinal)| Scored {
            ordinal,
            score: score.0,
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn cosine_similarity_identical() {
        let a = vec![1.0, 0.0, 0.0];
        let b = vec![1.0, 0.0, 0.0];
        let sim = cosine_similarity(&a, &b).unwrap();
        assert!((sim - 1.0).abs() < 1e-6);
    }

    #[test]
    fn cosine_similarity_orthogonal() {
        let a = vec![1.0, 0.0, 0.0];
        let b = vec![0.0, 1.0, 0.0];
        let sim = cosine_similarity(&a, &b).unwrap();
        assert!(sim.abs() < 1e-6);
    }

    #[test]
    fn cosine_similarity_opposite() {
        let a = vec![1.0, 0.0, 0.0];
        let b = vec![-1.0, 0.0, 0.0];
        let sim = cosine_similarity(&a, &b).unwrap();
        assert!((sim + 1.0).abs() < 1e-6);
    }

    #[test]
    fn cosine_similarity_zero_vector_is_zero() {
        let a = vec![0.0, 0.0];
        let b = vec![1.0, 1.0];
        assert_eq!(cosine_similarity(&a, &b).unwrap(), 0.0);
    }

    #[test]
    fn dimension_mismatch_is_an_error() {
        let a = vec![1.0, 0.0];
        let b = vec![1.0, 0.0, 0.0];
        assert!(cosine_similarity(&a, &b).is_err());
    }

    #[test]
    fn rank_top_k_orders_by_descending_score() {
        let query = vec![1.0, 0.0, 0.0];
        let candidates = vec![
            vec![0.0, 1.0, 0.0],
            vec![1.0, 0.0, 0.0],
            vec![0.7, 0.7, 0.0],
        ];

        let ranked = rank_top_k(&query, &candidates, 2).unwrap();
        assert_eq!(ranked.len(), 2);
        assert_eq!(ranked[0].ordinal, 1);
        assert_eq!(ranked[1].ordinal, 2);
        assert!(ranked[0].score >= ranked[1].score);
    }

    #[test]
    fn rank_top_k_breaks_ties_by_insertion_order() {
        let query = vec![1.0, 0.0];
        let candidates = vec![
            vec![2.0, 0.0],
            vec![1.0, 0.0],
            vec![3.0, 0.0],
        ];

        // All three have cosine similarity 1.0 to the query.
        let ranked = rank_top_k(&query, &candidates, 3).unwrap();
        let ordinals: Vec<usize> = ranked.iter().map(|s| s.ordinal).collect();
        assert_eq!(ordinals, vec![0, 1, 2]);
    }

    #[test]
    fn rank_top_k_never_exceeds_k() {
        let query = vec![1.0];
        let candidates = vec![vec![1.0], vec![0.5]];
        assert_eq!(rank_top_k(&query, &candidates, 5).unwrap().len(), 2);
        assert_eq!(rank_top_k(&query, &candidates, 1).unwrap().len(), 1);
    }
}
