use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;

use text_summarizer::config::AppConfig;
use text_summarizer::web::{self, SharedModel, WebConfig};
use text_summarizer::{health, logging};

#[derive(Debug, Parser)]
#[command(name = "summarizer-web")]
#[command(about = "Web form and JSON API for text summarization", long_about = None)]
struct Args {
    #[command(flatten)]
    app: AppConfig,

    #[arg(long, env = "BIND_ADDR", default_value = "127.0.0.1:8000")]
    bind: SocketAddr,

    #[arg(long, env = "STATIC_DIR", default_value = "static")]
    static_dir: PathBuf,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    logging::init_logging("info,text_summarizer=info");

    let args = Args::parse();
    if let Err(e) = args.app.validate() {
        tracing::warn!(config_error=%e, "invalid config");
    }

    // Startup health check (best-effort, logged only)
    let probe = args.app.clone();
    let backend_ok = tokio::task::spawn_blocking(move || health::check_backend(&probe))
        .await
        .unwrap_or(false);
    tracing::info!(
        backend_ok,
        summary_backend=%args.app.summary_backend,
        summary_model=%args.app.summary_model,
        static_dir=%args.static_dir.display(),
        "startup checks complete"
    );

    let config = WebConfig {
        bind_addr: args.bind,
        static_dir: Some(args.static_dir),
        max_length: args.app.max_length,
        min_length: args.app.min_length,
    };
    let model = Arc::new(SharedModel::lazy(args.app));

    web::serve(model.clone(), config, async {
        let _ = tokio::signal::ctrl_c().await;
        tracing::info!("received shutdown signal");
    })
    .await?;

    // backends hold blocking HTTP clients, which must not be dropped on a runtime thread
    let _ = tokio::task::spawn_blocking(move || drop(model)).await;
    Ok(())
}
