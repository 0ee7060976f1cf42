use sea_orm::entity::prelude::*;

/// One embedded item. Items are scoped by `collection`; `id` is only unique within it.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "collection_item")]
pub struct Model {
  #[sea_orm(primary_key, auto_increment = false)]
  pub collection: String,
  #[sea_orm(primary_key, auto_increment = false)]
  pub id: String,
  pub embedding: Option<PgVector>,
  pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
