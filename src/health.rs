use crate::config::AppConfig;

/// Any HTTP answer from the inference host counts as reachable; the API
/// root itself may well be a 404.
pub fn check_inference_endpoint(base_url: &str) -> bool {
    reqwest::blocking::Client::new()
        .get(base_url)
        .send()
        .is_ok()
}

pub fn check_ollama(host: &str) -> bool {
    let url = format!("{}/api/tags", host.trim_end_matches('/'));
    reqwest::blocking::Client::new()
        .get(url)
        .send()
        .map(|r| r.status().is_success())
        .unwrap_or(false)
}

/// Probe whatever the configured backend talks to. Local backends are
/// always up.
pub fn check_backend(cfg: &AppConfig) -> bool {
    match cfg.summary_backend.as_str() {
        "huggingface" => check_inference_endpoint(&cfg.inference_url),
        "ollama" => check_ollama(&cfg.ollama_host),
        _ => true,
    }
}
