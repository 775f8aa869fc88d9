use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Location value meaning "the whole default region"; never folded into the
/// provider query text.
pub const DEFAULT_LOCATION: &str = "Thailand";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RequestError {
    #[error("search query must not be empty")]
    EmptyQuery,

    #[error("desired result count must be at least 1")]
    ZeroCount,
}

/// What the caller wants to find: a business category, an optional area
/// qualifier, and an upper bound on the number of records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchRequest {
    query: String,
    location: String,
    desired_count: usize,
}

impl SearchRequest {
    /// Builds a request, trimming `query` and `location`.
    ///
    /// # Errors
    ///
    /// - [`RequestError::EmptyQuery`] if `query` is empty after trimming.
    /// - [`RequestError::ZeroCount`] if `desired_count` is `0`.
    pub fn new(query: &str, location: &str, desired_count: usize) -> Result<Self, RequestError> {
        let query = query.trim();
        if query.is_empty() {
            return Err(RequestError::EmptyQuery);
        }
        if desired_count == 0 {
            return Err(RequestError::ZeroCount);
        }
        Ok(Self {
            query: query.to_owned(),
            location: location.trim().to_owned(),
            desired_count,
        })
    }

    #[must_use]
    pub fn query(&self) -> &str {
        &self.query
    }

    #[must_use]
    pub fn location(&self) -> &str {
        &self.location
    }

    #[must_use]
    pub fn desired_count(&self) -> usize {
        self.desired_count
    }

    /// Returns the free-text query sent to the provider.
    ///
    /// The location is appended only when it narrows the search, i.e. when
    /// it is non-empty and not [`DEFAULT_LOCATION`].
    #[must_use]
    pub fn provider_query(&self) -> String {
        if self.location.is_empty() || self.location == DEFAULT_LOCATION {
            self.query.clone()
        } else {
            format!("{} {}", self.query, self.location)
        }
    }
}
