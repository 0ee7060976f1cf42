use antipode_core::{
  DEFAULT_SAMPLE_SIZE, DEFAULT_TOP_K, EmptyReason, Outcome, RecommendParams, Recommendation,
  recommend_least_similar,
};
use antipode_shared::AppError;
use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::utils::AppState;

// --- Shared ---

const fn default_top_k() -> usize {
  DEFAULT_TOP_K
}

const fn default_sample_size() -> usize {
  DEFAULT_SAMPLE_SIZE
}

#[derive(Deserialize, ToSchema)]
pub struct LeastSimilar {
  /// Reference item id (required)
  pub node_id: Option<String>,
  /// Maximum recommendations to return (default: 10)
  #[serde(default = "default_top_k")]
  pub top_k: usize,
  /// Minimum candidates to score (default: 100)
  #[serde(default = "default_sample_size")]
  pub sample_size: usize,
  /// Fix the candidate sample for reproducible results
  pub seed: Option<u64>,
}

impl LeastSimilar {
  const fn params(&self) -> RecommendParams {
    RecommendParams {
      top_k: self.top_k,
      sample_size: self.sample_size,
      seed: self.seed,
    }
  }
}

async fn recommend(state: &AppState, payload: &LeastSimilar) -> Result<Outcome, AppError> {
  recommend_least_similar(
    state.collection.as_ref(),
    payload.node_id.as_deref(),
    &payload.params(),
  )
  .await
}

// --- List endpoint ---

/// Recommend the items least similar to `node_id`
#[utoipa::path(
  post,
  path = "/api/v0/recommend/least_similar",
  request_body = LeastSimilar,
  responses(
    (status = 200, description = "Least similar items first; scores are null when scoring failed", body = Vec<Recommendation>),
    (status = 400, description = "node_id is missing or a count is zero")
  )
)]
#[axum::debug_handler]
pub async fn least_similar(
  State(state): State<AppState>,
  Json(payload): Json<LeastSimilar>,
) -> Result<Json<Vec<Recommendation>>, AppError> {
  let outcome = recommend(&state, &payload).await?;
  Ok(Json(outcome.into_recommendations()))
}

// --- Raw endpoint ---

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum OutcomeStatus {
  Ranked,
  Empty,
  Degraded,
}

#[derive(Serialize, ToSchema)]
pub struct LeastSimilarRawResult {
  pub status: OutcomeStatus,
  /// Set when `status` is `empty`
  #[serde(skip_serializing_if = "Option::is_none")]
  pub reason: Option<EmptyReason>,
  pub recommendations: Vec<Recommendation>,
}

impl From<Outcome> for LeastSimilarRawResult {
  fn from(outcome: Outcome) -> Self {
    let (status, reason, recommendations) = match outcome {
      Outcome::Ranked(list) => (OutcomeStatus::Ranked, None, list),
      Outcome::Empty(reason) => (OutcomeStatus::Empty, Some(reason), Vec::new()),
      Outcome::Degraded(list) => (OutcomeStatus::Degraded, None, list),
    };
    Self {
      status,
      reason,
      recommendations,
    }
  }
}

/// Recommend least similar items, telling ranked, empty and degraded results apart
#[utoipa::path(
  post,
  path = "/api/v0/recommend/least_similar/raw",
  request_body = LeastSimilar,
  responses(
    (status = 200, description = "Outcome with its status", body = LeastSimilarRawResult),
    (status = 400, description = "node_id is missing or a count is zero")
  )
)]
#[axum::debug_handler]
pub async fn least_similar_raw(
  State(state): State<AppState>,
  Json(payload): Json<LeastSimilar>,
) -> Result<Json<LeastSimilarRawResult>, AppError> {
  let outcome = recommend(&state, &payload).await?;
  Ok(Json(outcome.into()))
}
