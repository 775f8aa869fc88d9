use std::future::Future;

use crate::error::MapsError;
use crate::types::{MapsPage, PageRequest};

/// Anything that can answer a single provider page request.
///
/// [`crate::SerpMapsClient`] is the production implementation; the
/// aggregator only depends on this trait.
pub trait PageSource: Send + Sync {
    fn fetch_page(
        &self,
        request: &PageRequest,
    ) -> impl Future<Output = Result<MapsPage, MapsError>> + Send;
}
