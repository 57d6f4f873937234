//! HTML artifact extraction from raw model output
//!
//! Models wrap their output in markdown fences and append commentary.
//! This module cuts the actual document out of that noise and refuses
//! anything that is not a complete HTML document.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::ExtractError;

static FENCE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)```(?:html)?\s*").unwrap());
static DOCTYPE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)<!DOCTYPE\s+html>").unwrap());
static HTML_OPEN: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)<html[^>]*>").unwrap());
static HTML_ANY_OPEN: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)<html").unwrap());
static HTML_CLOSE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)</html>").unwrap());

/// Extract a complete HTML document from raw backend output.
///
/// Strips markdown fences, discards any preamble before the doctype
/// (synthesizing one if the document starts at `<html>`), and drops
/// trailing commentary after the last `</html>`. Fails if no opening
/// or closing root tag survives. Idempotent on its own output.
pub fn extract_html(raw: &str) -> Result<String, ExtractError> {
    let mut cleaned = FENCE.replace_all(raw, "").into_owned();

    if let Some(start) = DOCTYPE.find(&cleaned).map(|m| m.start()) {
        cleaned.drain(..start);
    } else if let Some(start) = HTML_OPEN.find(&cleaned).map(|m| m.start()) {
        cleaned.drain(..start);
        cleaned.insert_str(0, "<!DOCTYPE html>\n");
    }

    if let Some(end) = HTML_CLOSE.find_iter(&cleaned).last().map(|m| m.end()) {
        cleaned.truncate(end);
    }

    if !HTML_ANY_OPEN.is_match(&cleaned) {
        return Err(ExtractError("missing opening <html> tag"));
    }
    if !HTML_CLOSE.is_match(&cleaned) {
        return Err(ExtractError("missing closing </html> tag"));
    }

    Ok(cleaned.trim().to_string())
}
