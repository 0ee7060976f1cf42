use std::sync::Arc;

use antipode_core::CollectionAccessor;

#[derive(Clone)]
pub struct AppState {
  /// Collection resolved at start-up; handlers never pick one themselves.
  pub collection: Arc<dyn CollectionAccessor>,
}

impl AppState {
  #[must_use]
  pub fn new(collection: Arc<dyn CollectionAccessor>) -> Self {
    Self { collection }
  }
}
