use std::sync::Arc;

use antipode_core::PgCollection;
use antipode_migration::{Migrator, MigratorTrait};
use antipode_server::{server, utils::AppState};
use antipode_shared::{APP_ENV, AppError};
use sea_orm::Database;
use tracing_error::ErrorLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), AppError> {
  tracing_subscriber::registry()
    .with(
      tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| format!("{}=debug,antipode_core=debug", env!("CARGO_CRATE_NAME")).into()),
    )
    .with(tracing_subscriber::fmt::layer())
    .with(ErrorLayer::default())
    .init();
  dotenvy::dotenv().ok();

  let db = Database::connect(APP_ENV.database_url.as_str()).await?;

  // Apply all pending migrations
  // https://www.sea-ql.org/SeaORM/docs/migration/running-migration/#migrating-programmatically
  Migrator::up(&db, None).await?;

  let collection = PgCollection::new(db, APP_ENV.collection.as_str());
  tracing::info!(collection = collection.name(), "recommending from collection");

  server(AppState::new(Arc::new(collection)), &APP_ENV.bind_addr).await
}
