use clap::Parser;

use text_summarizer::cli;
use text_summarizer::config::AppConfig;
use text_summarizer::logging;
use text_summarizer::service::SummarizationService;

#[derive(Debug, Parser)]
#[command(name = "text-summarizer")]
#[command(about = "Summarize text typed or piped on stdin", long_about = None)]
struct Args {
    #[command(flatten)]
    app: AppConfig,
}

fn main() {
    logging::init_logging("warn");

    let cfg = Args::parse().app;
    if let Err(e) = cfg.validate() {
        tracing::warn!(config_error=%e, "invalid config");
    }

    let stdin = std::io::stdin();
    let mut input = stdin.lock();
    let mut out = std::io::stdout().lock();
    // Always exits normally; failures are reported on stdout by the adapter.
    let res = cli::run_interactive(&mut input, &mut out, cfg.max_length, cfg.min_length, || {
        SummarizationService::from_config(&cfg)
    });
    if let Err(e) = res {
        tracing::error!(error=%e, "failed writing to stdout");
    }
}
