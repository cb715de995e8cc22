//! Axum server setup and router construction.

use std::net::SocketAddr;
use std::path::PathBuf;

use axum::routing::{get, post};
use axum::Router;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::web::{api, AppState};

/// Build the full axum router.
pub fn build_router(state: AppState, static_dir: Option<PathBuf>) -> Router {
    let mut router = Router::new()
        .route("/", get(api::index))
        .route("/summarize", post(api::summarize_json))
        .route("/summarize-web", post(api::summarize_form))
        .route("/health", get(api::health))
        .with_state(state);

    if let Some(dir) = static_dir {
        router = router.nest_service("/static", ServeDir::new(dir));
    }

    router.layer(TraceLayer::new_for_http())
}

/// Bind, spawn the server on a Tokio task and return the bound address.
pub async fn start_server(router: Router, bind_addr: SocketAddr) -> std::io::Result<SocketAddr> {
    let listener = tokio::net::TcpListener::bind(bind_addr).await?;
    let addr = listener.local_addr()?;

    tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, router).await {
            tracing::error!(error=%e, "web server terminated with error");
        }
    });

    Ok(addr)
}
