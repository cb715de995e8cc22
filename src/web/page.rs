//! HTML page rendering.
//!
//! The page is `templates/index.html`, compiled in. Placeholders are
//! `{{name}}` and are filled in one pass, so user text that happens to
//! contain a placeholder is never expanded.

const TEMPLATE: &str = include_str!("../../templates/index.html");

#[derive(Debug, Clone, Default)]
pub struct PageView {
    pub text: String,
    pub max_length: usize,
    pub min_length: usize,
    pub summary: Option<String>,
    pub processing_time: Option<String>,
    pub error: Option<String>,
}

impl PageView {
    pub fn empty(max_length: usize, min_length: usize) -> Self {
        Self {
            max_length,
            min_length,
            ..Default::default()
        }
    }
}

pub fn render(view: &PageView) -> String {
    fill(TEMPLATE, |key| match key {
        "text" => Some(escape_html(&view.text)),
        "max_length" => Some(view.max_length.to_string()),
        "min_length" => Some(view.min_length.to_string()),
        "results" => Some(results_section(view)),
        _ => None,
    })
}

fn results_section(view: &PageView) -> String {
    if let Some(error) = &view.error {
        return format!(
            "<section class=\"error\">\n  <h2>Something went wrong</h2>\n  <p>{}</p>\n</section>",
            escape_html(error)
        );
    }
    let Some(summary) = &view.summary else {
        return String::new();
    };
    let timing = view
        .processing_time
        .as_deref()
        .map(|t| format!("\n  <p class=\"timing\">Processing time: {}</p>", escape_html(t)))
        .unwrap_or_default();
    format!(
        "<section class=\"results\">\n  <h2>Original text</h2>\n  <pre class=\"original\">{}</pre>\n  <h2>Summary</h2>\n  <p class=\"summary\">{}</p>{}\n</section>",
        escape_html(&view.text),
        escape_html(summary),
        timing
    )
}

/// Replace every `{{key}}` with `lookup(key)`. Unknown keys are left as is.
fn fill<F>(template: &str, lookup: F) -> String
where
    F: Fn(&str) -> Option<String>,
{
    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(open) = rest.find("{{") {
        out.push_str(&rest[..open]);
        let after = &rest[open + 2..];
        match after.find("}}") {
            Some(close) => {
                let key = after[..close].trim();
                match lookup(key) {
                    Some(value) => out.push_str(&value),
                    None => out.push_str(&rest[open..open + 2 + close + 2]),
                }
                rest = &after[close + 2..];
            }
            None => {
                out.push_str(&rest[open..]);
                rest = "";
            }
        }
    }
    out.push_str(rest);
    out
}

pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
