pub use sea_orm_migration::*;

mod m20261016_01_create_vector_extension;
mod m20261016_02_create_collection_item_table;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
  fn migrations() -> Vec<Box<dyn MigrationTrait>> {
    vec![
      Box::new(m20261016_01_create_vector_extension::Migration),
      Box::new(m20261016_02_create_collection_item_table::Migration),
    ]
  }
}
