//! Terminal content-injection step.
//!
//! Consumes and returns HTML; the snippet content itself is opaque to
//! the pipeline (analytics, tag manager, demo banner).

/// Insert `snippet` just before the closing `</body>` tag, or append
/// it when the captured HTML has none.
pub fn inject_snippet(html: &str, snippet: &str) -> String {
    if snippet.is_empty() {
        return html.to_string();
    }

    match html.to_ascii_lowercase().rfind("</body>") {
        Some(pos) => {
            let mut out = String::with_capacity(html.len() + snippet.len());
            out.push_str(&html[..pos]);
            out.push_str(snippet);
            out.push_str(&html[pos..]);
            out
        }
        None => format!("{html}{snippet}"),
    }
}
