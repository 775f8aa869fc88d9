//! Multi-page aggregation of local results into business records.
//!
//! Pages are requested strictly one after another because each page's
//! offset comes from the previous response. Aggregation never fails as a
//! whole: a provider error stops pagination, keeps what was gathered, and is
//! reported through [`SearchOutcome::error`].

use std::time::Duration;

use bizfinder_core::{BusinessRecord, SearchRequest};
use serde_json::Value;

use crate::error::MapsError;
use crate::normalize::{normalize, Normalized};
use crate::pagination::next_start_offset;
use crate::source::PageSource;
use crate::types::PageRequest;

/// Most pages requested for one search, the first page included.
pub const MAX_PAGES: usize = 3;

/// Courtesy pause before every page after the first.
pub const INTER_PAGE_DELAY: Duration = Duration::from_secs(1);

/// Page ceiling and delay used by [`aggregate_with_policy`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaginationPolicy {
    pub max_pages: usize,
    pub inter_page_delay: Duration,
}

impl Default for PaginationPolicy {
    fn default() -> Self {
        Self {
            max_pages: MAX_PAGES,
            inter_page_delay: INTER_PAGE_DELAY,
        }
    }
}

/// Everything one aggregation produced.
#[derive(Debug, Default)]
pub struct SearchOutcome {
    /// Records in page order, then in-page order. Never longer than the
    /// requested count.
    pub records: Vec<BusinessRecord>,
    /// Provider requests issued, including a failed one.
    pub pages_requested: usize,
    /// Listings dropped because they could not be normalized.
    pub skipped: usize,
    /// The provider failure that ended aggregation early, if any.
    pub error: Option<MapsError>,
}

impl SearchOutcome {
    /// `true` when aggregation stopped on a provider error.
    #[must_use]
    pub fn is_partial(&self) -> bool {
        self.error.is_some()
    }

    /// `true` for a clean search that matched nothing.
    #[must_use]
    pub fn is_empty_result(&self) -> bool {
        self.records.is_empty() && self.error.is_none()
    }
}

/// Collects up to `request.desired_count()` records using the fixed
/// [`MAX_PAGES`] ceiling and [`INTER_PAGE_DELAY`].
pub async fn aggregate<S: PageSource>(source: &S, request: &SearchRequest) -> SearchOutcome {
    aggregate_with_policy(source, request, PaginationPolicy::default()).await
}

/// Collects up to `request.desired_count()` records under `policy`.
///
/// Another page is requested only while the previous response carried a
/// continuation, fewer than `desired_count` records are held, and fewer than
/// `policy.max_pages` pages have been requested. The first page is always
/// requested, even when `max_pages` is `0`. A continuation that yields no
/// offset is still followed, with the previous page's offset.
pub async fn aggregate_with_policy<S: PageSource>(
    source: &S,
    request: &SearchRequest,
    policy: PaginationPolicy,
) -> SearchOutcome {
    let desired = request.desired_count();
    let max_pages = policy.max_pages.max(1);
    let mut outcome = SearchOutcome::default();
    let mut page_request = PageRequest::first(request);

    loop {
        outcome.pages_requested += 1;

        let page = match source.fetch_page(&page_request).await {
            Ok(page) => page,
            Err(err) => {
                tracing::error!(
                    q = %page_request.query,
                    page = outcome.pages_requested,
                    collected = outcome.records.len(),
                    error = %err,
                    "search aborted; keeping records gathered so far"
                );
                outcome.error = Some(err);
                break;
            }
        };

        collect_page(&mut outcome, &page.local_results, desired);

        let Some(continuation) = page.continuation() else {
            break;
        };
        if outcome.records.len() >= desired || outcome.pages_requested >= max_pages {
            break;
        }
        match next_start_offset(continuation) {
            Some(start) => page_request.start = Some(start),
            None => tracing::warn!(
                q = %page_request.query,
                page = outcome.pages_requested,
                start = ?page_request.start,
                "continuation has no usable start offset, reusing previous offset"
            ),
        }

        if !policy.inter_page_delay.is_zero() {
            tokio::time::sleep(policy.inter_page_delay).await;
        }
    }

    tracing::info!(
        q = %page_request.query,
        records = outcome.records.len(),
        pages = outcome.pages_requested,
        skipped = outcome.skipped,
        partial = outcome.is_partial(),
        "search complete"
    );

    outcome
}

/// Normalizes listings into `outcome` until `desired` records are held.
fn collect_page(outcome: &mut SearchOutcome, listings: &[Value], desired: usize) {
    for (position, raw) in listings.iter().enumerate() {
        if outcome.records.len() >= desired {
            break;
        }
        match normalize(raw) {
            Normalized::Record(record) => outcome.records.push(record),
            Normalized::Skip(reason) => {
                outcome.skipped += 1;
                tracing::warn!(
                    page = outcome.pages_requested,
                    position,
                    %reason,
                    "skipping listing"
                );
            }
        }
    }
}

#[cfg(test)]
#[path = "aggregate_test.rs"]
mod tests;
