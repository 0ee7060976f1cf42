use antipode_shared::AppError;
use axum::{Router, response::Html, routing::get};
use tokio::net::TcpListener;

use crate::{
  api,
  utils::{AppState, shutdown_signal},
};

#[axum::debug_handler]
async fn handler() -> Html<&'static str> {
  Html("<h1>Antipode</h1>")
}

pub fn router(app_state: AppState) -> Router {
  Router::new()
    .route("/", get(handler))
    .merge(api::app())
    .with_state(app_state)
}

pub async fn server(app_state: AppState, addr: &str) -> Result<(), AppError> {
  let listener = TcpListener::bind(addr).await?;

  tracing::info!("server started at http://{addr}");

  axum::serve(listener, router(app_state))
    .with_graceful_shutdown(shutdown_signal())
    .await?;

  Ok(())
}
