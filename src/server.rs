//! Dev server
//!
//! The coordinator sits in front of a static file service as middleware:
//! requests for the manifest path are answered from the cached snapshot, every
//! other request continues down the chain untouched.

use crate::core::coordinator::VersionCoordinator;
use crate::core::error::{ManifestResult, ResultExt};
use crate::core::host::DevResponse;
use axum::Router;
use axum::extract::{Request, State};
use axum::http::{StatusCode, header};
use axum::middleware::{self, Next};
use axum::response::{IntoResponse, Response};
use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;
use tower_http::services::ServeDir;

/// Router serving `static_root`, with the manifest middleware in front
pub fn build_router(coordinator: Arc<VersionCoordinator>, static_root: &Path) -> Router {
  Router::new()
    .fallback_service(ServeDir::new(static_root))
    .layer(middleware::from_fn_with_state(coordinator, version_middleware))
}

async fn version_middleware(
  State(coordinator): State<Arc<VersionCoordinator>>,
  request: Request,
  next: Next,
) -> Response {
  match coordinator.on_dev_request(request.uri().path()) {
    Ok(DevResponse::Respond(json)) => ([(header::CONTENT_TYPE, json.content_type)], json.body).into_response(),
    Ok(DevResponse::Next) => next.run(request).await,
    Err(err) => {
      tracing::error!("failed to serve {}: {}", request.uri().path(), err);
      (StatusCode::INTERNAL_SERVER_ERROR, err.to_string()).into_response()
    }
  }
}

/// Bind and serve until Ctrl-C
pub async fn serve(coordinator: Arc<VersionCoordinator>, static_root: &Path, addr: SocketAddr) -> ManifestResult<()> {
  let request_path = coordinator.options().request_path();
  let app = build_router(coordinator, static_root);

  let listener = tokio::net::TcpListener::bind(addr)
    .await
    .with_context(|| format!("Failed to bind dev server to {}", addr))?;
  let local = listener.local_addr()?;

  tracing::info!("dev server listening on http://{}", local);
  tracing::info!("manifest available at http://{}{}", local, request_path);

  axum::serve(listener, app)
    .with_graceful_shutdown(shutdown_signal())
    .await
    .context("Dev server stopped unexpectedly")?;

  Ok(())
}

async fn shutdown_signal() {
  if let Err(e) = tokio::signal::ctrl_c().await {
    tracing::warn!("failed to listen for Ctrl-C: {}", e);
    std::future::pending::<()>().await;
  }
  tracing::info!("shutting down dev server");
}
