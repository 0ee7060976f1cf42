use std::collections::BTreeMap;
use std::sync::Arc;

use antipode_shared::AppError;
use async_trait::async_trait;
use tokio::sync::RwLock;

use super::{CollectionAccessor, GetResult};

/// Collection held in process memory, listed in id order.
#[derive(Clone, Debug, Default)]
pub struct InMemoryCollection {
  items: Arc<RwLock<BTreeMap<String, Option<Vec<f32>>>>>,
}

impl InMemoryCollection {
  #[must_use]
  pub fn new() -> Self {
    Self::default()
  }

  /// Insert or replace an item.
  pub async fn insert(&self, id: impl Into<String>, embedding: Option<Vec<f32>>) {
    self.items.write().await.insert(id.into(), embedding);
  }
}

impl<S: Into<String>> FromIterator<(S, Option<Vec<f32>>)> for InMemoryCollection {
  fn from_iter<T: IntoIterator<Item = (S, Option<Vec<f32>>)>>(iter: T) -> Self {
    let items = iter
      .into_iter()
      .map(|(id, embedding)| (id.into(), embedding))
      .collect();
    Self {
      items: Arc::new(RwLock::new(items)),
    }
  }
}

#[async_trait]
impl CollectionAccessor for InMemoryCollection {
  async fn get_embeddings(&self, ids: &[String]) -> Result<GetResult, AppError> {
    let items = self.items.read().await;
    let (ids, embeddings) = ids
      .iter()
      .filter_map(|id| items.get(id).map(|embedding| (id.clone(), embedding.clone())))
      .unzip();
    GetResult::new(ids, embeddings)
  }

  async fn list_ids(&self, limit: Option<u64>) -> Result<Vec<String>, AppError> {
    let items = self.items.read().await;
    let limit = limit.map_or(usize::MAX, |l| usize::try_from(l).unwrap_or(usize::MAX));
    Ok(items.keys().take(limit).cloned().collect())
  }
}
