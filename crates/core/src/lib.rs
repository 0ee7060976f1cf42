mod collection;
pub use collection::{CollectionAccessor, GetResult, InMemoryCollection, PgCollection};

mod recommend;
pub use recommend::{
  DEFAULT_SAMPLE_SIZE, DEFAULT_TOP_K, EmptyReason, Outcome, RecommendParams, Recommendation,
  recommend_least_similar,
};
pub use recommend::{EmbeddingMatrix, draw_sample, sample_target, select_least_similar};
