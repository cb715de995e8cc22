//! Display formatting: paragraph wrapping and banner decoration.

pub const ORIGINAL_LABEL: &str = "ORIGINAL TEXT:";
pub const SUMMARY_LABEL: &str = "GENERATED SUMMARY:";

/// Wrap `text` for display under the `ORIGINAL TEXT:` banner.
///
/// Paragraphs are separated by one or more blank lines; each is wrapped on
/// its own and they are rejoined with a single blank line. Never fails: blank
/// input yields the banner over an empty body.
pub fn format_for_display(text: &str, width: usize) -> String {
    let body = paragraphs(text)
        .iter()
        .map(|p| wrap(p, width))
        .collect::<Vec<_>>()
        .join("\n\n");
    format!("{}{}", banner(ORIGINAL_LABEL, width), body)
}

/// Wrap a generated summary under the `GENERATED SUMMARY:` banner.
pub fn format_summary(summary: &str, width: usize) -> String {
    format!("{}{}", banner(SUMMARY_LABEL, width), wrap(summary, width))
}

/// `\n=====\nLABEL\n=====\n` with a rule `width` characters long.
pub fn banner(label: &str, width: usize) -> String {
    let rule = "=".repeat(width);
    format!("\n{rule}\n{label}\n{rule}\n")
}

/// Greedy word wrap. Whitespace runs collapse to one space; a word wider than
/// `width` sits alone on its line rather than being split.
pub fn wrap(text: &str, width: usize) -> String {
    let width = width.max(1);
    let mut lines: Vec<String> = Vec::new();
    let mut line = String::new();
    let mut line_len = 0usize;
    for word in text.split_whitespace() {
        let word_len = word.chars().count();
        if line_len == 0 {
            line.push_str(word);
            line_len = word_len;
        } else if line_len + 1 + word_len <= width {
            line.push(' ');
            line.push_str(word);
            line_len += 1 + word_len;
        } else {
            lines.push(std::mem::take(&mut line));
            line.push_str(word);
            line_len = word_len;
        }
    }
    if line_len > 0 {
        lines.push(line);
    }
    lines.join("\n")
}

/// Split on blank-line boundaries, dropping blank paragraphs.
fn paragraphs(text: &str) -> Vec<String> {
    let mut out = Vec::new();
    let mut current: Vec<&str> = Vec::new();
    for line in text.lines() {
        if line.trim().is_empty() {
            if !current.is_empty() {
                out.push(current.join("\n"));
                current.clear();
            }
        } else {
            current.push(line);
        }
    }
    if !current.is_empty() {
        out.push(current.join("\n"));
    }
    out
}
