//! Static server for published images.
//!
//! Routes come from the manifest loaded at start-up. Anything not in the
//! manifest is a 404, so the server never exposes the rest of the public
//! directory.

use crate::manifest::Manifest;
use axum::{
    extract::State,
    http::{header, Method, StatusCode, Uri},
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use nbagraph_common::Result;
use std::collections::HashMap;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;
use tracing::{debug, info, warn};

/// Published images never change, so clients may cache them forever.
pub const IMMUTABLE_CACHE_CONTROL: &str = "public, max-age=31536000, immutable";

/// Shared state: URL path to file on disk.
#[derive(Debug, Clone)]
pub struct AppState {
    routes: Arc<HashMap<String, PathBuf>>,
}

impl AppState {
    pub fn new(manifest: &Manifest, public_dir: &Path) -> Self {
        Self {
            routes: Arc::new(manifest.routes(public_dir)),
        }
    }
}

/// Build the router serving every entry of `manifest`.
pub fn router(manifest: &Manifest, public_dir: &Path) -> Router {
    let state = AppState::new(manifest, public_dir);
    Router::new()
        .route("/health", get(health))
        .fallback(serve_image)
        .layer(ServiceBuilder::new().layer(TraceLayer::new_for_http()))
        .with_state(state)
}

async fn health() -> &'static str {
    "ok"
}

async fn serve_image(State(state): State<AppState>, method: Method, uri: Uri) -> Response {
    if method != Method::GET && method != Method::HEAD {
        return StatusCode::METHOD_NOT_ALLOWED.into_response();
    }

    let Some(file) = state.routes.get(uri.path()) else {
        debug!(path = %uri.path(), "Not a published URL");
        return StatusCode::NOT_FOUND.into_response();
    };

    match tokio::fs::read(file).await {
        Ok(bytes) => (
            [
                (header::CONTENT_TYPE, "image/png"),
                (header::CACHE_CONTROL, IMMUTABLE_CACHE_CONTROL),
            ],
            bytes,
        )
            .into_response(),
        Err(e) => {
            warn!(path = %uri.path(), file = %file.display(), error = %e, "Published file is missing");
            StatusCode::NOT_FOUND.into_response()
        }
    }
}

/// Load the manifest and serve it on `bind` until Ctrl-C.
pub async fn serve(bind: SocketAddr, manifest_path: &Path, public_dir: &Path) -> Result<()> {
    let manifest = Manifest::load(manifest_path)?;
    info!(
        manifest = %manifest_path.display(),
        routes = manifest.entries.len(),
        "Starting image server on {}",
        bind
    );

    let app = router(&manifest, public_dir);
    let listener = tokio::net::TcpListener::bind(bind).await?;
    info!("Image server listening on {}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Image server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "Failed to listen for Ctrl-C");
    }
}
