use std::env;
use std::sync::LazyLock;

const DEFAULT_COLLECTION: &str = "antipode";
const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";

pub struct AppEnv {
  pub database_url: String,
  /// Collection the server recommends from.
  pub collection: String,
  pub bind_addr: String,
}

impl AppEnv {
  fn new() -> Self {
    Self {
      database_url: env::var("DATABASE_URL").expect("DATABASE_URL must be set"),
      collection: env::var("ANTIPODE_COLLECTION").unwrap_or_else(|_| DEFAULT_COLLECTION.to_owned()),
      bind_addr: env::var("ANTIPODE_BIND_ADDR").unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_owned()),
    }
  }
}

pub static APP_ENV: LazyLock<AppEnv> = LazyLock::new(AppEnv::new);
