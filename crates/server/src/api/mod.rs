use axum::{
  Json, Router,
  routing::{get, post},
};
use utoipa::OpenApi;
use utoipa_scalar::{Scalar, Servable};

use crate::utils::AppState;

mod least_similar;

pub use least_similar::{LeastSimilar, LeastSimilarRawResult, OutcomeStatus};

#[derive(OpenApi)]
#[openapi(
  info(
    title = "Antipode API",
    version = "0.0.1",
    description = "Least-similar item recommendations over an embedding collection"
  ),
  paths(
    least_similar::least_similar,
    least_similar::least_similar_raw
  ),
  components(schemas(
    LeastSimilar,
    LeastSimilarRawResult,
    OutcomeStatus,
    antipode_core::Recommendation,
    antipode_core::EmptyReason,
  ))
)]
pub struct ApiDoc;

async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
  Json(ApiDoc::openapi())
}

pub fn app() -> Router<AppState> {
  Router::new()
    .route(
      "/api/v0/recommend/least_similar",
      post(least_similar::least_similar),
    )
    .route(
      "/api/v0/recommend/least_similar/raw",
      post(least_similar::least_similar_raw),
    )
    .route("/openapi.json", get(openapi_json))
    .merge(Scalar::with_url("/openapi/", ApiDoc::openapi()))
}
