//! Embedding vectors: the fixed dimension, the provider seam, the blob codec used by
//! the SQLite backend, and the cosine comparator used by in-process search.

use crate::error::{RecallError, Result};

/// Number of dimensions in every stored embedding (all-MiniLM-L6-v2).
pub const EMBEDDING_DIM: usize = 384;

/// Turns text into an embedding vector.
///
/// The model itself lives outside this crate. Implementations must return vectors of
/// exactly [`EMBEDDING_DIM`] dimensions; callers check this before storing anything.
pub trait EmbeddingProvider: Send + Sync {
    /// Embed a single text string into a vector.
    fn embed(&self, text: &str) -> anyhow::Result<Vec<f32>>;

    /// Embed a batch of text strings. Implementations may override for batched inference.
    fn embed_batch(&self, texts: &[&str]) -> anyhow::Result<Vec<Vec<f32>>> {
        texts.iter().map(|t| self.embed(t)).collect()
    }

    /// Return the number of dimensions this provider produces.
    fn dimensions(&self) -> usize {
        EMBEDDING_DIM
    }
}

/// Reject vectors whose length differs from [`EMBEDDING_DIM`].
pub fn check_dimensions(embedding: &[f32]) -> Result<()> {
    if embedding.len() != EMBEDDING_DIM {
        return Err(RecallError::DimensionMismatch {
            expected: EMBEDDING_DIM,
            actual: embedding.len(),
        });
    }
    Ok(())
}

/// Encode an embedding as little-endian f32 bytes (the SQLite BLOB format, also what
/// sqlite-vec reads).
pub fn embedding_to_bytes(embedding: &[f32]) -> Vec<u8> {
    embedding.iter().flat_map(|x| x.to_le_bytes()).collect()
}

/// Decode a little-endian f32 blob. Returns `None` if the length is not a multiple of 4.
pub fn embedding_from_bytes(bytes: &[u8]) -> Option<Vec<f32>> {
    if bytes.len() % 4 != 0 {
        return None;
    }
    Some(
        bytes
            .chunks_exact(4)
            .map(|c| f32::from_le_bytes([c[0], c[1], c[2], c[3]]))
            .collect(),
    )
}

/// Cosine similarity `dot(a, b) / (|a| * |b|)`.
///
/// Returns 0.0 when either vector has zero norm. Only the common prefix is compared
/// if the lengths differ.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    let mut dot = 0.0f64;
    let mut norm_a = 0.0f64;
    let mut norm_b = 0.0f64;
    for (x, y) in a.iter().zip(b.iter()) {
        let (x, y) = (f64::from(*x), f64::from(*y));
        dot += x * y;
        norm_a += x * x;
        norm_b += y * y;
    }
    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    (dot / (norm_a.sqrt() * norm_b.sqrt())) as f32
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spike(i: usize) -> Vec<f32> {
        let mut v = vec![0.0f32; EMBEDDING_DIM];
        v[i] = 1.0;
        v
    }

    #[test]
    fn identical_vectors_have_similarity_one() {
        let v: Vec<f32> = (0..EMBEDDING_DIM).map(|i| (i as f32 + 1.0) / 7.0).collect();
        assert!((cosine_similarity(&v, &v) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn similarity_is_symmetric() {
        let a: Vec<f32> = (0..EMBEDDING_DIM).map(|i| (i % 5) as f32 - 2.0).collect();
        let b: Vec<f32> = (0..EMBEDDING_DIM).map(|i| (i % 3) as f32 * 0.5).collect();
        assert_eq!(cosine_similarity(&a, &b), cosine_similarity(&b, &a));
    }

    #[test]
    fn orthogonal_and_opposite() {
        assert_eq!(cosine_similarity(&spike(0), &spike(1)), 0.0);
        let neg: Vec<f32> = spike(0).iter().map(|x| -x).collect();
        assert!((cosine_similarity(&spike(0), &neg) + 1.0).abs() < 1e-6);
    }

    #[test]
    fn scale_does_not_change_similarity() {
        let a = vec![1.0f32, 2.0, 3.0];
        let b: Vec<f32> = a.iter().map(|x| x * 10.0).collect();
        assert!((cosine_similarity(&a, &b) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn zero_vector_has_zero_similarity() {
        let zero = vec![0.0f32; EMBEDDING_DIM];
        assert_eq!(cosine_similarity(&zero, &spike(3)), 0.0);
        assert_eq!(cosine_similarity(&zero, &zero), 0.0);
    }

    #[test]
    fn bytes_round_trip_exactly() {
        let v: Vec<f32> = (0..EMBEDDING_DIM)
            .map(|i| (i as f32).sin() * 1e-3 + f32::EPSILON * i as f32)
            .collect();
        let bytes = embedding_to_bytes(&v);
        assert_eq!(bytes.len(), EMBEDDING_DIM * 4);
        let back = embedding_from_bytes(&bytes).unwrap();
        assert_eq!(back.len(), v.len());
        for (x, y) in v.iter().zip(back.iter()) {
            assert_eq!(x.to_bits(), y.to_bits());
        }
    }

    #[test]
    fn truncated_blob_is_rejected() {
        assert!(embedding_from_bytes(&[0u8, 1, 2]).is_none());
        assert_eq!(embedding_from_bytes(&[]), Some(vec![]));
    }

    #[test]
    fn check_dimensions_rejects_wrong_length() {
        assert!(check_dimensions(&spike(0)).is_ok());
        let err = check_dimensions(&[0.1, 0.2, 0.3]).unwrap_err();
        assert!(matches!(
            err,
            RecallError::DimensionMismatch {
                expected: EMBEDDING_DIM,
                actual: 3
            }
        ));
    }
}
