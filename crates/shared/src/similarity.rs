//! Vector primitives for embedding comparison.
//!
//! Normalization never fails: a vector whose L2 norm is below [`NORM_EPSILON`]
//! is divided by the epsilon instead, so degenerate (all-zero) embeddings score
//! `0.0` against everything rather than producing NaN.

/// Floor applied to L2 norms before dividing.
pub const NORM_EPSILON: f32 = 1e-8;

/// L2 norm, computed on components scaled by the largest magnitude so that
/// squaring cannot overflow.
#[must_use]
pub fn l2_norm(v: &[f32]) -> f32 {
  let scale = v.iter().fold(0.0_f32, |max, x| max.max(x.abs()));
  if scale == 0.0 {
    return 0.0;
  }
  scale * v.iter().map(|x| (x / scale).powi(2)).sum::<f32>().sqrt()
}

/// Return `v` scaled to unit length, dividing by `max(norm, NORM_EPSILON)`.
#[must_use]
pub fn normalize(v: &[f32]) -> Vec<f32> {
  let norm = l2_norm(v).max(NORM_EPSILON);
  v.iter().map(|x| x / norm).collect()
}

#[must_use]
pub fn dot(a: &[f32], b: &[f32]) -> f32 {
  debug_assert_eq!(a.len(), b.len(), "embedding dimensions must match");
  a.iter().zip(b.iter()).map(|(x, y)| x * y).sum()
}

/// Dot product of two already-normalized vectors, clamped into the cosine range.
#[must_use]
pub fn unit_dot(a: &[f32], b: &[f32]) -> f32 {
  dot(a, b).clamp(-1.0, 1.0)
}

#[cfg(test)]
mod tests {
  use super::*;

  fn cosine(a: &[f32], b: &[f32]) -> f32 {
    unit_dot(&normalize(a), &normalize(b))
  }

  #[test]
  fn normalize_produces_unit_vectors() {
    let n = normalize(&[3.0, 4.0]);
    assert!((n[0] - 0.6).abs() < 1e-6);
    assert!((n[1] - 0.8).abs() < 1e-6);
    assert!((l2_norm(&n) - 1.0).abs() < 1e-6);
  }

  #[test]
  fn zero_vector_stays_zero() {
    let n = normalize(&[0.0, 0.0, 0.0]);
    assert_eq!(n, vec![0.0, 0.0, 0.0]);
    assert_eq!(l2_norm(&[]), 0.0);
    assert_eq!(cosine(&[0.0, 0.0], &[1.0, 0.0]), 0.0);
  }

  #[test]
  fn huge_components_do_not_overflow() {
    assert!((l2_norm(&[3e20, 4e20]) / 5e20 - 1.0).abs() < 1e-6);

    let n = normalize(&[3e20, 0.0]);
    assert!((n[0] - 1.0).abs() < 1e-6);
    assert_eq!(n[1], 0.0);
    assert!((cosine(&[3e20, 0.0], &[1.0, 0.0]) - 1.0).abs() < 1e-6);
  }

  #[test]
  fn cosine_of_axis_vectors() {
    assert_eq!(cosine(&[1.0, 0.0], &[1.0, 0.0]), 1.0);
    assert_eq!(cosine(&[1.0, 0.0], &[0.0, 1.0]), 0.0);
    assert_eq!(cosine(&[1.0, 0.0], &[-1.0, 0.0]), -1.0);
  }

  #[test]
  fn cosine_ignores_magnitude() {
    let a = cosine(&[1.0, 2.0, 3.0], &[2.0, 1.0, 0.5]);
    let b = cosine(&[10.0, 20.0, 30.0], &[0.2, 0.1, 0.05]);
    assert!((a - b).abs() < 1e-6);
  }

  #[test]
  fn unit_dot_stays_in_range() {
    let a = [0.1_f32, 0.7, -0.3, 1e-3];
    let s = cosine(&a, &a);
    assert!((-1.0..=1.0).contains(&s));
    assert!((s - 1.0).abs() < 1e-6);
    assert_eq!(unit_dot(&[1.0, 1.0], &[1.0, 1.0]), 1.0);
  }
}
