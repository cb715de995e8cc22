//! Abstractive text summarization behind a terminal prompt and a small web
//! form/JSON API.
//!
//! Both front ends share one [`service::SummarizationService`]: it wraps the
//! input for display ([`format`]) and hands the raw text to a model backend
//! ([`summarize`]).

pub mod cli;
pub mod config;
pub mod errors;
pub mod format;
pub mod health;
pub mod logging;
pub mod service;
pub mod summarize;
pub mod tokenizer;
pub mod web;
