//! HTTP client for SerpApi's `google_maps` search endpoint.
//!
//! Wraps `reqwest` with SerpApi-specific error handling, API key management,
//! and error-envelope checks. Requests are never retried.

use std::time::Duration;

use reqwest::{Client, StatusCode, Url};
use serde_json::Value;

use crate::error::MapsError;
use crate::source::PageSource;
use crate::types::{MapsPage, PageRequest};

const DEFAULT_BASE_URL: &str = "https://serpapi.com/search.json";

/// Engine identifier for map-style local results.
const ENGINE: &str = "google_maps";

/// Geographic anchor sent with every query: central Bangkok at zoom 15.
/// A ranking hint only; results outside the viewport still come back.
pub const DEFAULT_ANCHOR: &str = "@13.7563,100.5018,15z";

/// SerpApi answers an empty search with this error message and a 200.
const NO_RESULTS_MARKER: &str = "hasn't returned any results";

/// Client for SerpApi's `google_maps` engine.
///
/// Use [`SerpMapsClient::new`] for production or
/// [`SerpMapsClient::with_base_url`] to point at a mock server in tests.
pub struct SerpMapsClient {
    client: Client,
    api_key: String,
    base_url: Url,
}

impl SerpMapsClient {
    /// Creates a client pointed at the production SerpApi endpoint.
    ///
    /// # Errors
    ///
    /// Returns [`MapsError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(api_key: &str, timeout_secs: u64, user_agent: &str) -> Result<Self, MapsError> {
        Self::with_base_url(api_key, timeout_secs, user_agent, DEFAULT_BASE_URL)
    }

    /// Creates a client with a custom endpoint URL (for testing with wiremock).
    ///
    /// `base_url` is the full search endpoint, e.g.
    /// `http://127.0.0.1:8080/search.json`.
    ///
    /// # Errors
    ///
    /// Returns [`MapsError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`MapsError::InvalidBaseUrl`] if `base_url`
    /// is not a valid URL.
    pub fn with_base_url(
        api_key: &str,
        timeout_secs: u64,
        user_agent: &str,
        base_url: &str,
    ) -> Result<Self, MapsError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;

        let base_url = Url::parse(base_url).map_err(|e| MapsError::InvalidBaseUrl {
            url: base_url.to_owned(),
            reason: e.to_string(),
        })?;

        Ok(Self {
            client,
            api_key: api_key.to_owned(),
            base_url,
        })
    }

    /// Fetches one page of local results.
    ///
    /// # Errors
    ///
    /// - [`MapsError::Http`] on network failure.
    /// - [`MapsError::Unauthorized`] for HTTP 401/403.
    /// - [`MapsError::RateLimited`] for HTTP 429.
    /// - [`MapsError::UnexpectedStatus`] for any other non-2xx status.
    /// - [`MapsError::Deserialize`] if the body is not JSON.
    /// - [`MapsError::Api`] if the body carries an `"error"` message other
    ///   than SerpApi's "no results" notice.
    pub async fn search_page(&self, request: &PageRequest) -> Result<MapsPage, MapsError> {
        let url = self.build_url(request);
        tracing::debug!(
            q = %request.query,
            start = ?request.start,
            num = request.result_count,
            "requesting google_maps page"
        );

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| MapsError::Http(e.without_url()))?;
        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| MapsError::Http(e.without_url()))?;

        if !status.is_success() {
            return Err(Self::status_error(status, &body));
        }

        let payload: Value =
            serde_json::from_str(&body).map_err(|e| MapsError::Deserialize {
                context: Self::describe(request),
                source: e,
            })?;

        if let Some(message) = Self::error_message(&payload) {
            if message.contains(NO_RESULTS_MARKER) {
                tracing::debug!(q = %request.query, "provider reported no results");
                return Ok(MapsPage::default());
            }
            return Err(MapsError::Api(message));
        }

        Ok(MapsPage::from_body(&payload))
    }

    /// Builds the request URL with percent-encoded query parameters.
    fn build_url(&self, request: &PageRequest) -> Url {
        let mut url = self.base_url.clone();
        {
            let mut pairs = url.query_pairs_mut();
            pairs.append_pair("engine", ENGINE);
            pairs.append_pair("q", &request.query);
            pairs.append_pair("ll", DEFAULT_ANCHOR);
            pairs.append_pair("type", "search");
            pairs.append_pair("num", &request.result_count.to_string());
            if let Some(start) = request.start {
                pairs.append_pair("start", &start.to_string());
            }
            pairs.append_pair("api_key", &self.api_key);
        }
        url
    }

    /// Maps a non-2xx response to a typed error, keeping SerpApi's message.
    fn status_error(status: StatusCode, body: &str) -> MapsError {
        let message = serde_json::from_str::<Value>(body)
            .ok()
            .and_then(|v| Self::error_message(&v))
            .unwrap_or_else(|| {
                status
                    .canonical_reason()
                    .unwrap_or("unknown error")
                    .to_owned()
            });

        match status {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => MapsError::Unauthorized {
                status: status.as_u16(),
                message,
            },
            StatusCode::TOO_MANY_REQUESTS => MapsError::RateLimited { message },
            _ => MapsError::UnexpectedStatus {
                status: status.as_u16(),
                message,
            },
        }
    }

    /// Returns the top-level `"error"` string, if any.
    fn error_message(payload: &Value) -> Option<String> {
        payload
            .get("error")
            .and_then(Value::as_str)
            .map(str::to_owned)
    }

    fn describe(request: &PageRequest) -> String {
        match request.start {
            Some(start) => format!("google_maps(q={}, start={start})", request.query),
            None => format!("google_maps(q={})", request.query),
        }
    }
}

impl PageSource for SerpMapsClient {
    async fn fetch_page(&self, request: &PageRequest) -> Result<MapsPage, MapsError> {
        self.search_page(request).await
    }
}

#[cfg(test)]
#[path = "client_test.rs"]
mod tests;
