use std::collections::HashSet;

use antipode_shared::AppError;
use serde::Serialize;
use utoipa::ToSchema;

use crate::collection::CollectionAccessor;

mod sampling;
pub use sampling::{draw_sample, sample_target};

mod scoring;
pub use scoring::{EmbeddingMatrix, select_least_similar};

pub const DEFAULT_TOP_K: usize = 10;
pub const DEFAULT_SAMPLE_SIZE: usize = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecommendParams {
  /// Maximum recommendations to return.
  pub top_k: usize,
  /// Minimum number of candidates to score (raised for large `top_k`).
  pub sample_size: usize,
  /// Fixes the candidate sample; random per call when `None`.
  pub seed: Option<u64>,
}

impl Default for RecommendParams {
  fn default() -> Self {
    Self {
      top_k: DEFAULT_TOP_K,
      sample_size: DEFAULT_SAMPLE_SIZE,
      seed: None,
    }
  }
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct Recommendation {
  pub id: String,
  /// Cosine similarity to the reference item, `null` when scoring was not possible.
  pub score: Option<f32>,
}

impl Recommendation {
  #[must_use]
  pub const fn scored(id: String, score: f32) -> Self {
    Self {
      id,
      score: Some(score),
    }
  }

  #[must_use]
  pub const fn unscored(id: String) -> Self {
    Self { id, score: None }
  }
}

/// Why a recommendation came back empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum EmptyReason {
  /// The reference item is absent, has no embedding, or its embedding holds a
  /// non-finite value.
  ReferenceMissing,
  /// The collection holds nothing but the reference item.
  EmptyPool,
  /// None of the sampled ids came back from the batch fetch.
  NoSamples,
  /// The collection accessor returned an error.
  AccessorFailed,
  /// Reference and candidates have different dimensions.
  DimensionMismatch,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
  /// Scored candidates, least similar first.
  Ranked(Vec<Recommendation>),
  Empty(EmptyReason),
  /// Candidate ids without scores, returned when the embeddings could not be scored.
  Degraded(Vec<Recommendation>),
}

impl Outcome {
  #[must_use]
  pub fn recommendations(&self) -> &[Recommendation] {
    match self {
      Self::Ranked(list) | Self::Degraded(list) => list,
      Self::Empty(_) => &[],
    }
  }

  #[must_use]
  pub fn into_recommendations(self) -> Vec<Recommendation> {
    match self {
      Self::Ranked(list) | Self::Degraded(list) => list,
      Self::Empty(_) => Vec::new(),
    }
  }
}

/// Recommend the items of `collection` least similar to `reference_id`.
///
/// Only a missing reference id or a zero count is an error (status 400). Every
/// other failure is logged and turned into [`Outcome::Empty`] or
/// [`Outcome::Degraded`].
pub async fn recommend_least_similar<C>(
  collection: &C,
  reference_id: Option<&str>,
  params: &RecommendParams,
) -> Result<Outcome, AppError>
where
  C: CollectionAccessor + ?Sized,
{
  let reference_id = match reference_id {
    Some(id) if !id.is_empty() => id,
    _ => {
      return Err(AppError::invalid_request(
        "node_id is required for least-similar recommendation",
      ));
    }
  };
  if params.top_k == 0 {
    return Err(AppError::invalid_request("top_k must be positive"));
  }
  if params.sample_size == 0 {
    return Err(AppError::invalid_request("sample_size must be positive"));
  }

  Ok(rank(collection, reference_id, params).await)
}

async fn rank<C>(collection: &C, reference_id: &str, params: &RecommendParams) -> Outcome
where
  C: CollectionAccessor + ?Sized,
{
  let top_k = params.top_k;

  // 1. Reference embedding
  let reference = match collection.get_embeddings(&[reference_id.to_owned()]).await {
    Ok(result) => match result.embedding_of(reference_id) {
      Some(embedding) if embedding.iter().any(|x| !x.is_finite()) => {
        tracing::warn!(reference_id = %reference_id, "Reference embedding holds non-finite values");
        return Outcome::Empty(EmptyReason::ReferenceMissing);
      }
      Some(embedding) if !embedding.is_empty() => embedding.to_vec(),
      _ => {
        tracing::warn!(reference_id = %reference_id, "Reference embedding not found");
        return Outcome::Empty(EmptyReason::ReferenceMissing);
      }
    },
    Err(err) => {
      tracing::warn!(reference_id = %reference_id, error = %err, "Failed to fetch reference embedding");
      return Outcome::Empty(EmptyReason::AccessorFailed);
    }
  };

  // 2. Candidate pool
  let all_ids = match collection.list_ids(None).await {
    Ok(ids) => ids,
    Err(err) => {
      tracing::warn!(reference_id = %reference_id, error = %err, "Failed to list collection ids");
      return Outcome::Empty(EmptyReason::AccessorFailed);
    }
  };
  let total_ids = all_ids.len();
  let pool = candidate_pool(all_ids, reference_id);
  tracing::info!(reference_id = %reference_id, total_ids, pool_size = pool.len(), "Candidate pool built");
  if pool.is_empty() {
    return Outcome::Empty(EmptyReason::EmptyPool);
  }

  // 3. Sample
  let target = sample_target(pool.len(), top_k, params.sample_size);
  let sampled = draw_sample(&pool, target, params.seed);

  // 4. Batch fetch
  let fetched = match collection.get_embeddings(&sampled).await {
    Ok(result) => {
      let mut seen = HashSet::new();
      result.without(|id| id == reference_id || !seen.insert(id.to_owned()))
    }
    Err(err) => {
      tracing::warn!(reference_id = %reference_id, error = %err, "Failed to fetch sampled embeddings");
      return Outcome::Empty(EmptyReason::AccessorFailed);
    }
  };
  tracing::info!(
    reference_id = %reference_id,
    sample_size = sampled.len(),
    fetched_ids = fetched.len(),
    fetched_embeddings = fetched.embedding_count(),
    "Sampled embeddings fetched"
  );
  if fetched.is_empty() {
    return Outcome::Empty(EmptyReason::NoSamples);
  }

  let fallback: Vec<Recommendation> = fetched
    .ids()
    .iter()
    .take(top_k)
    .cloned()
    .map(Recommendation::unscored)
    .collect();

  // 5. Matrix
  let matrix = match EmbeddingMatrix::from_result(fetched) {
    Ok(matrix) => matrix,
    Err(err) => {
      tracing::warn!(reference_id = %reference_id, error = %err, "Cannot score sampled embeddings, returning ids only");
      return Outcome::Degraded(fallback);
    }
  };

  // 6-7. Normalize and score
  let similarities = match matrix.similarities(&reference) {
    Ok(similarities) => similarities,
    Err(err) => {
      tracing::warn!(reference_id = %reference_id, error = %err, "Reference does not match candidate dimension");
      return Outcome::Empty(EmptyReason::DimensionMismatch);
    }
  };

  // 8-9. Select
  let picked = select_least_similar(matrix.ids(), &similarities, top_k);
  if picked.is_empty() {
    tracing::warn!(reference_id = %reference_id, "Similarity empty, returning sampled ids");
    return Outcome::Degraded(fallback);
  }

  Outcome::Ranked(picked)
}

/// All ids except the reference, first occurrence kept.
fn candidate_pool(ids: Vec<String>, reference_id: &str) -> Vec<String> {
  let mut seen = HashSet::with_capacity(ids.len());
  ids
    .into_iter()
    .filter(|id| id != reference_id && seen.insert(id.clone()))
    .collect()
}
