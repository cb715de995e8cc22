//! Sentence tokenizer backed by an abbreviation list kept on disk.
//!
//! The data file is looked up in a local directory and fetched on demand the
//! first time it is missing. If no source is configured, or the fetch fails,
//! the built-in list is written instead so later runs find it locally.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use once_cell::sync::Lazy;
use regex::Regex;

pub const RESOURCE_FILE: &str = "sentence_abbreviations.txt";

const BUILTIN_ABBREVIATIONS: &str = "\
# one abbreviation per line, lowercase, without the trailing period
mr
mrs
ms
dr
prof
sr
jr
st
mt
vs
etc
e.g
i.e
inc
ltd
co
corp
dept
est
fig
no
approx
gen
gov
sen
rep
jan
feb
mar
apr
jun
jul
aug
sep
sept
oct
nov
dec
u.s
u.k
a.m
p.m
";

static BOUNDARY: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"[.!?]+["'\)\]]*\s+"#).expect("valid sentence boundary pattern")
});

/// Make sure the tokenizer data exists under `dir`, returning its path.
pub fn ensure_resource(dir: &Path, source_url: Option<&str>) -> std::io::Result<PathBuf> {
    let path = dir.join(RESOURCE_FILE);
    if path.is_file() {
        tracing::debug!(path=%path.display(), "tokenizer data present");
        return Ok(path);
    }
    std::fs::create_dir_all(dir)?;
    let contents = match source_url {
        Some(url) => match fetch(url) {
            Ok(body) => {
                tracing::info!(%url, path=%path.display(), "downloaded tokenizer data");
                body
            }
            Err(e) => {
                tracing::warn!(%url, error=%e, "tokenizer download failed, using built-in data");
                BUILTIN_ABBREVIATIONS.to_string()
            }
        },
        None => BUILTIN_ABBREVIATIONS.to_string(),
    };
    std::fs::write(&path, contents)?;
    Ok(path)
}

fn fetch(url: &str) -> Result<String, reqwest::Error> {
    reqwest::blocking::get(url)?.error_for_status()?.text()
}

#[derive(Debug, Clone)]
pub struct SentenceTokenizer {
    abbreviations: HashSet<String>,
}

impl SentenceTokenizer {
    pub fn builtin() -> Self {
        Self::from_data(BUILTIN_ABBREVIATIONS)
    }

    pub fn load(path: &Path) -> std::io::Result<Self> {
        Ok(Self::from_data(&std::fs::read_to_string(path)?))
    }

    /// Ensure the data under `dir` and load it.
    pub fn ensure_and_load(dir: &Path, source_url: Option<&str>) -> std::io::Result<Self> {
        let path = ensure_resource(dir, source_url)?;
        Self::load(&path)
    }

    pub fn from_data(data: &str) -> Self {
        let abbreviations = data
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty() && !l.starts_with('#'))
            .map(|l| l.trim_end_matches('.').to_lowercase())
            .collect();
        Self { abbreviations }
    }

    /// Split into trimmed sentences. Text with no terminator is one sentence.
    pub fn split<'a>(&self, text: &'a str) -> Vec<&'a str> {
        let mut out = Vec::new();
        let mut start = 0usize;
        for m in BOUNDARY.find_iter(text) {
            if self.is_abbreviation(&text[start..m.start()], m.as_str()) {
                continue;
            }
            let sentence = text[start..m.end()].trim();
            if !sentence.is_empty() {
                out.push(sentence);
            }
            start = m.end();
        }
        let tail = text[start..].trim();
        if !tail.is_empty() {
            out.push(tail);
        }
        out
    }

    /// Byte offset just past the last sentence end at or before `limit` bytes.
    pub fn last_boundary_before(&self, text: &str, limit: usize) -> Option<usize> {
        let mut start = 0usize;
        let mut last = None;
        for m in BOUNDARY.find_iter(text) {
            if m.end() > limit {
                break;
            }
            if self.is_abbreviation(&text[start..m.start()], m.as_str()) {
                continue;
            }
            last = Some(m.end());
            start = m.end();
        }
        last
    }

    fn is_abbreviation(&self, preceding: &str, terminator: &str) -> bool {
        if !terminator.starts_with('.') || terminator.trim_end().len() > 1 {
            return false;
        }
        let word = preceding
            .rsplit(|c: char| c.is_whitespace() || c == '(' || c == '"')
            .next()
            .unwrap_or("");
        if word.is_empty() {
            return false;
        }
        let lower = word.to_lowercase();
        // single-letter initials ("J. Smith")
        (lower.chars().count() == 1 && lower.chars().all(char::is_alphabetic))
            || self.abbreviations.contains(&lower)
    }
}
