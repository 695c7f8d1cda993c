//! Cosine similarity, cosine distance, and centroid helpers.

/// Cosine similarity between two vectors.
/// Returns 0.0 for mismatched, zero-length, or zero-magnitude vectors.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f64 {
    if a.len() != b.len() || a.is_empty() {
        return 0.0;
    }
    let (mut dot, mut mag_a, mut mag_b) = (0.0f64, 0.0f64, 0.0f64);
    for (x, y) in a.iter().zip(b.iter()) {
        let (x, y) = (*x as f64, *y as f64);
        dot += x * y;
        mag_a += x * x;
        mag_b += y * y;
    }
    let denom = mag_a.sqrt() * mag_b.sqrt();
    if denom < f64::EPSILON {
        0.0
    } else {
        (dot / denom).clamp(-1.0, 1.0)
    }
}

/// Cosine distance: `1 - cosine_similarity`, in `[0, 2]`.
pub fn cosine_distance(a: &[f32], b: &[f32]) -> f64 {
    (1.0 - cosine_similarity(a, b)).clamp(0.0, 2.0)
}

/// Component-wise mean of equal-length vectors. Empty input yields an empty vector.
pub fn centroid<V: AsRef<[f32]>>(vectors: &[V]) -> Vec<f32> {
    let Some(first) = vectors.first() else {
        return Vec::new();
    };
    let dims = first.as_ref().len();
    let mut sums = vec![0.0f64; dims];
    for v in vectors {
        for (sum, &x) in sums.iter_mut().zip(v.as_ref()) {
            *sum += x as f64;
        }
    }
    let n = vectors.len() as f64;
    sums.into_iter().map(|s| (s / n) as f32).collect()
}
