//! HTTP adapter: an HTML form and a JSON endpoint over the shared service.
//!
//! ```text
//! GET  /               empty form
//! POST /summarize      JSON in, JSON out
//! POST /summarize-web  form in, rendered page out
//! GET  /health         backend status
//! GET  /static/*       assets from the configured directory
//! ```
//!
//! The model is loaded on the first request that needs it and shared by
//! every request after that. Backend calls are blocking and run on tokio's
//! blocking pool.

mod api;
mod model;
mod page;
mod server;

pub use api::SummaryResponse;
pub use model::SharedModel;

use std::future::Future;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use crate::config::{DEFAULT_MAX_LENGTH, DEFAULT_MIN_LENGTH};

/// Configuration for the web server.
#[derive(Debug, Clone)]
pub struct WebConfig {
    /// Address to bind to. Default: `127.0.0.1:8000`.
    pub bind_addr: SocketAddr,
    /// Directory served under `/static`. `None` disables static assets.
    pub static_dir: Option<PathBuf>,
    /// Bounds used when a request leaves them out.
    pub max_length: usize,
    pub min_length: usize,
}

impl Default for WebConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 8000)),
            static_dir: None,
            max_length: DEFAULT_MAX_LENGTH,
            min_length: DEFAULT_MIN_LENGTH,
        }
    }
}

/// Shared application state passed to all handlers via axum's `State` extractor.
#[derive(Clone)]
pub struct AppState {
    pub model: Arc<SharedModel>,
    pub max_length: usize,
    pub min_length: usize,
}

impl AppState {
    fn new(model: Arc<SharedModel>, config: &WebConfig) -> Self {
        Self {
            model,
            max_length: config.max_length,
            min_length: config.min_length,
        }
    }
}

/// Spawn the server on a Tokio task and return the bound address.
///
/// Bind to port 0 to get a random free port. The server runs until the
/// Tokio runtime shuts down.
pub async fn spawn_web(model: Arc<SharedModel>, config: WebConfig) -> std::io::Result<SocketAddr> {
    let router = server::build_router(AppState::new(model, &config), config.static_dir);
    server::start_server(router, config.bind_addr).await
}

/// Serve in the foreground until `shutdown` resolves.
pub async fn serve<F>(model: Arc<SharedModel>, config: WebConfig, shutdown: F) -> std::io::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let router = server::build_router(AppState::new(model, &config), config.static_dir.clone());
    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    tracing::info!(addr=%listener.local_addr()?, "web server listening");
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown)
        .await
}
