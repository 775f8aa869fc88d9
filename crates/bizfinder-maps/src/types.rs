//! SerpApi `google_maps` response shapes.
//!
//! ## Observed shape
//!
//! ```json
//! {
//!   "local_results": [
//!     {
//!       "title": "Roast Coffee & Eatery",
//!       "address": "335 Sukhumvit Rd, Bangkok 10110",
//!       "phone": "02 258 6161",
//!       "website": "https://roastbkk.com/",
//!       "type": "Coffee shop",
//!       "rating": 4.4,
//!       "reviews": 1893,
//!       "hours": "Open ⋅ Closes 10 PM",
//!       "gps_coordinates": { "latitude": 13.7307, "longitude": 100.5695 },
//!       "snippet": "Contact hello@roastbkk.com for bookings"
//!     }
//!   ],
//!   "serpapi_pagination": {
//!     "next": "https://serpapi.com/search.json?engine=google_maps&q=coffee&start=20"
//!   }
//! }
//! ```
//!
//! Every listing field may be absent. Types are not trusted either: ratings
//! and review counts have been seen as strings, and `hours` is sometimes an
//! object. Listings are therefore kept as raw [`serde_json::Value`] on the
//! page and decoded one at a time by [`RawLocalResult::from_value`], so one
//! odd listing never fails the whole page.

use bizfinder_core::SearchRequest;
use serde_json::Value;

/// Parameters for one provider page request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    /// Free-text query, already combined with the location.
    pub query: String,
    /// Result-count hint passed as `num`.
    pub result_count: usize,
    /// Offset of the first result; `None` for the first page.
    pub start: Option<u64>,
}

impl PageRequest {
    /// Builds the first-page request for a search.
    #[must_use]
    pub fn first(request: &SearchRequest) -> Self {
        Self {
            query: request.provider_query(),
            result_count: request.desired_count(),
            start: None,
        }
    }
}

/// Pagination block of a response (`serpapi_pagination`, or `pagination`).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Pagination {
    /// `true` when the block carries a non-null `next` entry.
    pub has_next: bool,
    /// The `next` entry when it is a URL string.
    pub next_url: Option<String>,
    /// Explicit offset for the next page, when supplied.
    pub start: Option<u64>,
}

impl Pagination {
    fn from_value(value: &Value) -> Self {
        let next = value.get("next").filter(|v| !v.is_null());
        Self {
            has_next: next.is_some(),
            next_url: next.and_then(Value::as_str).map(str::to_owned),
            start: value.get("start").and_then(lenient_u64),
        }
    }
}

/// One page of provider results.
#[derive(Debug, Clone, Default)]
pub struct MapsPage {
    /// Listings in provider order. Empty when the key is missing.
    pub local_results: Vec<Value>,
    pub pagination: Option<Pagination>,
}

impl MapsPage {
    /// Extracts listings and pagination from a decoded response body.
    ///
    /// A missing or non-array `local_results` yields an empty page.
    #[must_use]
    pub fn from_body(body: &Value) -> Self {
        let local_results = body
            .get("local_results")
            .and_then(Value::as_array)
            .cloned()
            .unwrap_or_default();

        let pagination = body
            .get("serpapi_pagination")
            .or_else(|| body.get("pagination"))
            .filter(|v| v.is_object())
            .map(Pagination::from_value);

        Self {
            local_results,
            pagination,
        }
    }

    /// Returns the continuation block if the provider says more pages exist.
    #[must_use]
    pub fn continuation(&self) -> Option<&Pagination> {
        self.pagination.as_ref().filter(|p| p.has_next)
    }
}

/// A single listing with every field optional.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawLocalResult {
    pub title: Option<String>,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub website: Option<String>,
    /// The provider's `type` field.
    pub kind: Option<String>,
    pub rating: Option<f64>,
    pub reviews: Option<u64>,
    pub hours: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub snippet: Option<String>,
}

impl RawLocalResult {
    /// Decodes a listing, treating any field of an unexpected type as absent.
    ///
    /// Returns `None` only when `value` is not a JSON object.
    #[must_use]
    pub fn from_value(value: &Value) -> Option<Self> {
        let obj = value.as_object()?;
        let gps = obj.get("gps_coordinates").filter(|v| v.is_object());

        Some(Self {
            title: obj.get("title").and_then(lenient_text),
            address: obj.get("address").and_then(lenient_text),
            phone: obj.get("phone").and_then(lenient_text),
            website: obj.get("website").and_then(lenient_text),
            kind: obj.get("type").and_then(lenient_text),
            rating: obj.get("rating").and_then(lenient_f64),
            reviews: obj.get("reviews").and_then(lenient_u64),
            hours: obj.get("hours").and_then(lenient_hours),
            latitude: gps.and_then(|g| g.get("latitude")).and_then(lenient_f64),
            longitude: gps.and_then(|g| g.get("longitude")).and_then(lenient_f64),
            snippet: obj.get("snippet").and_then(Value::as_str).map(str::to_owned),
        })
    }
}

fn lenient_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Structured hours are kept as compact JSON so the status is not lost.
fn lenient_hours(value: &Value) -> Option<String> {
    match value {
        Value::Object(_) | Value::Array(_) => Some(value.to_string()),
        other => lenient_text(other),
    }
}

fn lenient_f64(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok().filter(|f| f.is_finite()),
        _ => None,
    }
}

/// Accepts `1893`, `1893.0`, `"1893"` and `"1,893"`.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn lenient_u64(value: &Value) -> Option<u64> {
    match value {
        Value::Number(n) => n.as_u64().or_else(|| {
            n.as_f64()
                .filter(|f| f.is_finite() && *f >= 0.0 && f.fract() == 0.0)
                .map(|f| f as u64)
        }),
        Value::String(s) => s.trim().replace(',', "").parse::<u64>().ok(),
        _ => None,
    }
}
