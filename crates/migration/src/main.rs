use sea_orm_migration::prelude::*;

#[tokio::main]
async fn main() {
  cli::run_cli(antipode_migration::Migrator).await
}
