//! Summary markup rendering

use once_cell::sync::Lazy;
use regex::Regex;

static BOLD_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\*\*(.+?)\*\*").expect("valid regex"));
static EMPHASIS_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\*([^*\n]+)\*").expect("valid regex"));

/// Translate minimal summary markup to HTML.
///
/// Bold delimiters become `<strong>`, single-star delimiters become
/// `<em>`, newlines become `<br>`. Anything else passes through
/// untouched.
pub fn render_markup(text: &str) -> String {
    let html = BOLD_RE.replace_all(text, "<strong>$1</strong>");
    let html = EMPHASIS_RE.replace_all(&html, "<em>$1</em>");
    html.replace('\n', "<br>")
}
