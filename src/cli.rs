//! Interactive terminal adapter.

use std::io::{BufRead, Write};

use crate::errors::SummarizeError;
use crate::format::format_summary;
use crate::service::SummarizationService;

/// Collect lines until two consecutive blank lines or end of input.
/// The first blank line of the terminating pair is kept, as are blank lines
/// between paragraphs.
pub fn read_until_blank_lines<R: BufRead>(reader: &mut R) -> std::io::Result<String> {
    let mut lines: Vec<String> = Vec::new();
    let mut empty_line_count = 0usize;
    let mut line = String::new();
    loop {
        line.clear();
        if reader.read_line(&mut line)? == 0 {
            break;
        }
        let trimmed = line.trim_end_matches(['\r', '\n']);
        if trimmed.trim().is_empty() {
            empty_line_count += 1;
            if empty_line_count >= 2 {
                break;
            }
        } else {
            empty_line_count = 0;
        }
        lines.push(trimmed.to_string());
    }
    Ok(lines.join("\n"))
}

/// Run one prompt/summarize/print cycle. The service is built only once
/// there is text to summarize. Errors are reported on `out`; only a failure
/// to write to `out` itself is returned.
pub fn run_interactive<R, W, F>(
    input: &mut R,
    out: &mut W,
    max_length: usize,
    min_length: usize,
    build_service: F,
) -> std::io::Result<()>
where
    R: BufRead,
    W: Write,
    F: FnOnce() -> Result<SummarizationService, SummarizeError>,
{
    writeln!(out, "Text Summarization Tool")?;
    writeln!(
        out,
        "Enter your content below. Press Enter twice to finish input.\n"
    )?;
    out.flush()?;

    let text = match read_until_blank_lines(input) {
        Ok(t) => t,
        Err(e) => {
            tracing::error!(error=%e, "failed reading input");
            writeln!(out, "An error occurred: {e}")?;
            return Ok(());
        }
    };
    if text.trim().is_empty() {
        writeln!(out, "Error: No input text provided.")?;
        return Ok(());
    }

    let outcome = build_service().and_then(|svc| {
        let res = svc.summarize(&text, max_length, min_length)?;
        Ok((svc.width(), res))
    });
    match outcome {
        Ok((width, res)) => {
            writeln!(out, "{}", res.formatted_original)?;
            writeln!(out, "{}", format_summary(&res.summary, width))?;
        }
        Err(e) => {
            tracing::error!(error=%e, kind=e.kind().as_str(), "summarization failed");
            writeln!(out, "An error occurred: {e}")?;
        }
    }
    out.flush()
}
