//! Best-effort email extraction from free text.

use std::sync::LazyLock;

use regex::Regex;

/// Local part of `._%+-` and alphanumerics, a dotted domain, and a
/// top-level label of at least two letters.
static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}\b").expect("valid email regex")
});

/// Returns the first email address found in `text`.
///
/// Pattern matching only: no DNS or MX lookup, no uniqueness check.
#[must_use]
pub fn extract_email(text: &str) -> Option<String> {
    EMAIL_RE.find(text).map(|m| m.as_str().to_owned())
}
