use ndarray::{ArrayView2, Axis};
use std::sync::Arc;

/// Shared, immutable unit vector
pub type Vector = Arc<[f32]>;

/// L2-normalize in place; zero vectors are left untouched
pub fn normalize(vec: &mut [f32]) {
    let norm = vec.iter().map(|v| v * v).sum::<f32>().sqrt();
    if norm == 0.0 {
        return;
    }
    for value in vec {
        *value /= norm;
    }
}

/// Normalized copy of `vec`, or `None` when it has a non-finite component or
/// no usable length
pub fn unit_vector(mut vec: Vec<f32>) -> Option<Vec<f32>> {
    if vec.is_empty() || vec.iter().any(|v| !v.is_finite()) {
        return None;
    }
    let norm = vec.iter().map(|v| v * v).sum::<f32>().sqrt();
    if norm == 0.0 || !norm.is_finite() {
        return None;
    }
    for value in &mut vec {
        *value /= norm;
    }
    Some(vec)
}

/// Dot product, clamped to [-1, 1]; 0 on dimension mismatch or a
/// non-finite result.
///
/// For unit vectors this is the cosine similarity.
pub fn dot(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() || a.is_empty() {
        return 0.0;
    }
    let product: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    if !product.is_finite() {
        return 0.0;
    }
    product.clamp(-1.0, 1.0)
}

/// Mean over token rows (`tokens × hidden`), returning a `hidden`-sized vector
pub fn mean_pool(tokens: ArrayView2<'_, f32>) -> Vec<f32> {
    if tokens.is_empty() {
        return Vec::new();
    }
    tokens
        .mean_axis(Axis(0))
        .map(|pooled| pooled.to_vec())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_normalize() {
        let mut v = vec![3.0, 4.0];
        normalize(&mut v);
        assert!((v[0] - 0.6).abs() < 1e-6);
        assert!((v[1] - 0.8).abs() < 1e-6);

        let mut zero = vec![0.0, 0.0];
        normalize(&mut zero);
        assert_eq!(zero, vec![0.0, 0.0]);
    }

    #[test]
    fn test_dot() {
        assert!((dot(&[1.0, 0.0], &[1.0, 0.0]) - 1.0).abs() < 1e-6);
        assert!(dot(&[1.0, 0.0], &[0.0, 1.0]).abs() < 1e-6);
        assert_eq!(dot(&[1.0], &[1.0, 0.0]), 0.0);
        assert_eq!(dot(&[], &[]), 0.0);
        assert_eq!(dot(&[f32::NAN, 0.0], &[1.0, 0.0]), 0.0);
    }

    #[test]
    fn test_unit_vector_rejects_unusable_input() {
        let unit = unit_vector(vec![3.0, 4.0]).unwrap();
        assert!((unit[0] - 0.6).abs() < 1e-6);
        assert!((unit[1] - 0.8).abs() < 1e-6);

        assert_eq!(unit_vector(vec![f32::NAN, 0.0]), None);
        assert_eq!(unit_vector(vec![f32::INFINITY, 1.0]), None);
        assert_eq!(unit_vector(vec![0.0, 0.0]), None);
        assert_eq!(unit_vector(vec![f32::MAX, f32::MAX]), None);
        assert_eq!(unit_vector(Vec::new()), None);
    }

    #[test]
    fn test_mean_pool() {
        let tokens = array![[1.0f32, 2.0], [3.0, 4.0]];
        assert_eq!(mean_pool(tokens.view()), vec![2.0, 3.0]);

        let empty = ndarray::Array2::<f32>::zeros((0, 4));
        assert!(mean_pool(empty.view()).is_empty());
    }
}
