use sea_orm_migration::{
  prelude::*,
  schema::{custom_null, text, timestamp_with_time_zone},
};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
  async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
    manager
      .create_table(
        Table::create()
          .table(CollectionItem::Table)
          .if_not_exists()
          .col(text(CollectionItem::Collection))
          .col(text(CollectionItem::Id))
          // dimension is fixed per collection, not per table
          .col(custom_null(CollectionItem::Embedding, "vector"))
          .col(timestamp_with_time_zone(CollectionItem::CreatedAt).default(Expr::current_timestamp()))
          .primary_key(
            Index::create()
              .col(CollectionItem::Collection)
              .col(CollectionItem::Id),
          )
          .to_owned(),
      )
      .await?;

    Ok(())
  }

  async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
    manager
      .drop_table(Table::drop().table(CollectionItem::Table).to_owned())
      .await?;

    Ok(())
  }
}

#[derive(Iden)]
pub enum CollectionItem {
  Table,

  // collection name, resolved by the caller
  Collection,
  // item id, unique within a collection
  Id,
  // item embedding (for cosine similarity), NULL when not embedded yet
  Embedding,
  // create timestamp
  CreatedAt,
}
