use anyhow::anyhow;
use antipode_shared::AppError;
use async_trait::async_trait;

mod memory;
pub use memory::InMemoryCollection;

mod postgres;
pub use postgres::PgCollection;

/// Ids and embeddings returned by a [`CollectionAccessor`], aligned by index.
///
/// An id paired with `None` exists in the collection but has no embedding.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GetResult {
  ids: Vec<String>,
  embeddings: Vec<Option<Vec<f32>>>,
}

impl GetResult {
  pub fn new(ids: Vec<String>, embeddings: Vec<Option<Vec<f32>>>) -> Result<Self, AppError> {
    if ids.len() != embeddings.len() {
      return Err(
        anyhow!(
          "misaligned collection response: {} ids, {} embeddings",
          ids.len(),
          embeddings.len()
        )
        .into(),
      );
    }
    Ok(Self { ids, embeddings })
  }

  #[must_use]
  pub fn len(&self) -> usize {
    self.ids.len()
  }

  #[must_use]
  pub fn is_empty(&self) -> bool {
    self.ids.is_empty()
  }

  #[must_use]
  pub fn ids(&self) -> &[String] {
    &self.ids
  }

  /// Embedding stored for `id`, if the id was returned and has one.
  #[must_use]
  pub fn embedding_of(&self, id: &str) -> Option<&[f32]> {
    self
      .ids
      .iter()
      .position(|i| i == id)
      .and_then(|idx| self.embeddings[idx].as_deref())
  }

  /// Number of entries that carry an embedding.
  #[must_use]
  pub fn embedding_count(&self) -> usize {
    self.embeddings.iter().filter(|e| e.is_some()).count()
  }

  /// Drop every entry whose id matches `predicate`.
  #[must_use]
  pub fn without(self, mut predicate: impl FnMut(&str) -> bool) -> Self {
    let (ids, embeddings) = self
      .ids
      .into_iter()
      .zip(self.embeddings)
      .filter(|(id, _)| !predicate(id))
      .unzip();
    Self { ids, embeddings }
  }

  #[must_use]
  pub fn into_parts(self) -> (Vec<String>, Vec<Option<Vec<f32>>>) {
    (self.ids, self.embeddings)
  }
}

/// Read access to one resolved embedding collection.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CollectionAccessor: Send + Sync {
  /// Fetch ids and embeddings for `ids`, in request order.
  ///
  /// Ids absent from the collection are omitted from the result.
  async fn get_embeddings(&self, ids: &[String]) -> Result<GetResult, AppError>;

  /// List item ids in the collection, all of them when `limit` is `None`.
  async fn list_ids(&self, limit: Option<u64>) -> Result<Vec<String>, AppError>;
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn rejects_misaligned_parts() {
    let err = GetResult::new(vec!["a".into(), "b".into()], vec![None]).unwrap_err();
    assert!(err.to_string().contains("2 ids, 1 embeddings"));
  }

  #[test]
  fn embedding_lookup_and_filtering() {
    let result = GetResult::new(
      vec!["a".into(), "b".into(), "c".into()],
      vec![Some(vec![1.0]), None, Some(vec![2.0])],
    )
    .unwrap();

    assert_eq!(result.embedding_of("a"), Some(&[1.0][..]));
    assert_eq!(result.embedding_of("b"), None);
    assert_eq!(result.embedding_of("z"), None);
    assert_eq!(result.embedding_count(), 2);

    let filtered = result.without(|id| id == "a");
    assert_eq!(filtered.ids(), &["b".to_owned(), "c".to_owned()]);
    assert_eq!(filtered.len(), 2);
  }
}
