use anyhow::anyhow;
use antipode_shared::{
  AppError,
  similarity::{normalize, unit_dot},
};

use super::Recommendation;
use crate::collection::GetResult;

/// Fetched embeddings known to share one dimension.
#[derive(Debug, Clone)]
pub struct EmbeddingMatrix {
  ids: Vec<String>,
  rows: Vec<Vec<f32>>,
  dim: usize,
}

impl EmbeddingMatrix {
  /// Fails when an id has no embedding, a row holds a non-finite value, or the
  /// rows are ragged.
  pub fn from_result(result: GetResult) -> Result<Self, AppError> {
    let (ids, embeddings) = result.into_parts();
    let mut rows = Vec::with_capacity(embeddings.len());
    let mut dim = None;

    for (id, embedding) in ids.iter().zip(embeddings) {
      let row = embedding.ok_or_else(|| anyhow!("no embedding for {id}"))?;
      if !row.iter().all(|x| x.is_finite()) {
        return Err(anyhow!("non-finite value in embedding for {id}").into());
      }
      let expected = *dim.get_or_insert(row.len());
      if row.len() != expected {
        return Err(
          anyhow!(
            "ragged embeddings: {id} has {} dimensions, expected {expected}",
            row.len()
          )
          .into(),
        );
      }
      rows.push(row);
    }

    Ok(Self {
      ids,
      rows,
      dim: dim.unwrap_or(0),
    })
  }

  #[must_use]
  pub fn ids(&self) -> &[String] {
    &self.ids
  }

  /// Cosine similarity of every row against `reference`, in row order.
  pub fn similarities(&self, reference: &[f32]) -> Result<Vec<f32>, AppError> {
    if self.dim == 0 || reference.len() != self.dim {
      return Err(
        anyhow!(
          "reference has {} dimensions, candidates have {}",
          reference.len(),
          self.dim
        )
        .into(),
      );
    }

    let reference = normalize(reference);
    Ok(
      self
        .rows
        .iter()
        .map(|row| unit_dot(&normalize(row), &reference))
        .collect(),
    )
  }
}

/// The `top_k` entries with the lowest similarity, least similar first.
///
/// Equal scores keep their input order.
#[must_use]
pub fn select_least_similar(ids: &[String], similarities: &[f32], top_k: usize) -> Vec<Recommendation> {
  let mut order: Vec<usize> = (0..ids.len().min(similarities.len())).collect();
  order.sort_by(|&a, &b| similarities[a].total_cmp(&similarities[b]));

  order
    .into_iter()
    .take(top_k)
    .map(|idx| Recommendation::scored(ids[idx].clone(), similarities[idx]))
    .collect()
}
