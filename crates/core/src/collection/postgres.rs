use std::collections::HashMap;

use antipode_entities::collection_item;
use antipode_shared::AppError;
use async_trait::async_trait;
use sea_orm::{
  ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, QuerySelect,
};

use super::{CollectionAccessor, GetResult};

/// Collection stored in the `collection_item` table (Postgres + pgvector).
#[derive(Clone, Debug)]
pub struct PgCollection {
  db: DatabaseConnection,
  name: String,
}

impl PgCollection {
  #[must_use]
  pub fn new(db: DatabaseConnection, name: impl Into<String>) -> Self {
    Self {
      db,
      name: name.into(),
    }
  }

  #[must_use]
  pub fn name(&self) -> &str {
    &self.name
  }
}

#[async_trait]
impl CollectionAccessor for PgCollection {
  async fn get_embeddings(&self, ids: &[String]) -> Result<GetResult, AppError> {
    if ids.is_empty() {
      return Ok(GetResult::default());
    }

    let models = collection_item::Entity::find()
      .filter(collection_item::Column::Collection.eq(self.name.as_str()))
      .filter(collection_item::Column::Id.is_in(ids.iter().map(String::as_str)))
      .all(&self.db)
      .await?;

    let mut found: HashMap<String, _> = models
      .into_iter()
      .map(|model| (model.id, model.embedding))
      .collect();

    // Postgres returns rows in arbitrary order, restore the request order.
    let (ids, embeddings) = ids
      .iter()
      .filter_map(|id| {
        found
          .remove(id)
          .map(|embedding| (id.clone(), embedding.map(|v| v.to_vec())))
      })
      .unzip();

    GetResult::new(ids, embeddings)
  }

  async fn list_ids(&self, limit: Option<u64>) -> Result<Vec<String>, AppError> {
    let ids = collection_item::Entity::find()
      .select_only()
      .column(collection_item::Column::Id)
      .filter(collection_item::Column::Collection.eq(self.name.as_str()))
      .order_by_asc(collection_item::Column::Id)
      .limit(limit)
      .into_tuple::<String>()
      .all(&self.db)
      .await?;

    Ok(ids)
  }
}

#[cfg(test)]
mod tests {
  use std::collections::BTreeMap;

  use sea_orm::{DatabaseBackend, MockDatabase, Value, prelude::PgVector};

  use super::*;

  fn model(id: &str, embedding: Option<Vec<f32>>) -> collection_item::Model {
    collection_item::Model {
      collection: "docs".to_owned(),
      id: id.to_owned(),
      embedding: embedding.map(PgVector::from),
      created_at: chrono::Utc::now().fixed_offset(),
    }
  }

  #[tokio::test]
  async fn get_embeddings_restores_request_order() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
      .append_query_results([vec![
        model("b", None),
        model("a", Some(vec![1.0, 0.0])),
      ]])
      .into_connection();
    let collection = PgCollection::new(db, "docs");

    let ids = vec!["a".to_owned(), "missing".to_owned(), "b".to_owned()];
    let result = collection.get_embeddings(&ids).await.unwrap();

    assert_eq!(result.ids(), &["a".to_owned(), "b".to_owned()]);
    assert_eq!(result.embedding_of("a"), Some(&[1.0, 0.0][..]));
    assert_eq!(result.embedding_of("b"), None);
  }

  #[tokio::test]
  async fn get_embeddings_skips_the_query_for_no_ids() {
    // No query results queued: any query would fail.
    let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();
    let collection = PgCollection::new(db, "docs");

    let result = collection.get_embeddings(&[]).await.unwrap();
    assert!(result.is_empty());
  }

  #[tokio::test]
  async fn list_ids_reads_the_id_column() {
    let rows: Vec<BTreeMap<&str, Value>> = ["a", "b"]
      .into_iter()
      .map(|id| BTreeMap::from([("id", Value::from(id))]))
      .collect();
    let db = MockDatabase::new(DatabaseBackend::Postgres)
      .append_query_results([rows])
      .into_connection();
    let collection = PgCollection::new(db, "docs");

    assert_eq!(collection.list_ids(None).await.unwrap(), vec!["a", "b"]);
  }
}
