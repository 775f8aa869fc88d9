//! Offset-based pagination for SerpApi's `google_maps` engine.
//!
//! SerpApi signals another page with a `next` URL in `serpapi_pagination`.
//! The page offset travels as a `start` query parameter on that URL:
//!
//! ```text
//! https://serpapi.com/search.json?engine=google_maps&q=hotel&start=20&type=search
//! ```
//!
//! Some responses also carry the offset directly as `serpapi_pagination.start`.

use reqwest::Url;

use crate::types::Pagination;

/// Resolves the `start` offset for the page after `pagination`.
///
/// Prefers the explicit `start` field, then the `start` query parameter of
/// the `next` URL. Returns `None` if neither is present or the URL has no
/// usable `start`.
#[must_use]
pub fn next_start_offset(pagination: &Pagination) -> Option<u64> {
    if let Some(start) = pagination.start {
        return Some(start);
    }
    let next = pagination.next_url.as_deref()?;
    extract_start_param(next)
}

/// Extracts and parses the `start` query parameter from a URL string.
fn extract_start_param(url: &str) -> Option<u64> {
    let url = Url::parse(url).ok()?;
    url.query_pairs()
        .find(|(key, _)| key == "start")
        .and_then(|(_, value)| value.trim().parse::<u64>().ok())
}
