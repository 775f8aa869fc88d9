use thiserror::Error;

/// Errors from a provider page request.
///
/// Every variant aborts pagination; none is retried.
#[derive(Debug, Error)]
pub enum MapsError {
    /// Network or TLS failure. The request URL is stripped before the error
    /// is stored because it carries the API key.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("SerpApi rejected the API key (HTTP {status}): {message}")]
    Unauthorized { status: u16, message: String },

    #[error("rate limited by SerpApi: {message}")]
    RateLimited { message: String },

    #[error("unexpected HTTP status {status} from SerpApi: {message}")]
    UnexpectedStatus { status: u16, message: String },

    /// SerpApi answered 2xx with an `"error"` field in the body.
    #[error("SerpApi error: {0}")]
    Api(String),

    #[error("invalid base URL \"{url}\": {reason}")]
    InvalidBaseUrl { url: String, reason: String },
}
