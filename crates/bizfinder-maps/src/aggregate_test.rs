use std::collections::VecDeque;
use std::sync::Mutex;

use serde_json::json;
use tokio::time::Instant;

use super::*;
use crate::types::MapsPage;

/// Replays canned pages in order and records every request it receives.
struct ScriptedSource {
    pages: Mutex<VecDeque<Result<MapsPage, MapsError>>>,
    requests: Mutex<Vec<(PageRequest, Instant)>>,
}

impl ScriptedSource {
    fn new(pages: Vec<Result<MapsPage, MapsError>>) -> Self {
        Self {
            pages: Mutex::new(pages.into()),
            requests: Mutex::new(Vec::new()),
        }
    }

    fn requests(&self) -> Vec<PageRequest> {
        self.requests
            .lock()
            .unwrap()
            .iter()
            .map(|(r, _)| r.clone())
            .collect()
    }

    fn request_times(&self) -> Vec<Instant> {
        self.requests.lock().unwrap().iter().map(|(_, t)| *t).collect()
    }
}

impl PageSource for ScriptedSource {
    async fn fetch_page(&self, request: &PageRequest) -> Result<MapsPage, MapsError> {
        self.requests
            .lock()
            .unwrap()
            .push((request.clone(), Instant::now()));
        self.pages
            .lock()
            .unwrap()
            .pop_front()
            .expect("aggregator requested more pages than scripted")
    }
}

/// A page of `count` listings titled `"{prefix}-{i}"`, with a `next` URL
/// pointing at `next_start` when given.
fn page(prefix: &str, count: usize, next_start: Option<u64>) -> Result<MapsPage, MapsError> {
    let listings: Vec<Value> = (0..count)
        .map(|i| json!({"title": format!("{prefix}-{i}"), "rating": 4.0}))
        .collect();
    let mut body = json!({ "local_results": listings });
    if let Some(start) = next_start {
        body["serpapi_pagination"] = json!({
            "next": format!("https://serpapi.com/search.json?engine=google_maps&start={start}")
        });
    }
    Ok(MapsPage::from_body(&body))
}

fn names(outcome: &SearchOutcome) -> Vec<String> {
    outcome
        .records
        .iter()
        .map(|r| r.name.clone().unwrap_or_default())
        .collect()
}

/// Paused-clock sleeps land on millisecond ticks; allow a tick of slack.
fn assert_waited(actual: Duration, expected: Duration) {
    assert!(
        actual >= expected && actual < expected + Duration::from_millis(5),
        "expected a wait of {expected:?}, measured {actual:?}"
    );
}

fn no_delay() -> PaginationPolicy {
    PaginationPolicy {
        max_pages: MAX_PAGES,
        inter_page_delay: Duration::ZERO,
    }
}

// ---------------------------------------------------------------------------
// Scenarios
// ---------------------------------------------------------------------------

#[tokio::test(start_paused = true)]
async fn single_page_without_continuation_returns_all_records_in_order() {
    let source = ScriptedSource::new(vec![page("cafe", 12, None)]);
    let request = SearchRequest::new("coffee shop", "Thailand", 20).unwrap();

    let started = Instant::now();
    let outcome = aggregate(&source, &request).await;

    assert_eq!(outcome.records.len(), 12);
    let expected: Vec<String> = (0..12).map(|i| format!("cafe-{i}")).collect();
    assert_eq!(names(&outcome), expected);
    assert_eq!(outcome.pages_requested, 1);
    assert_eq!(source.requests().len(), 1);
    assert_eq!(source.requests()[0].query, "coffee shop");
    assert_eq!(started.elapsed(), Duration::ZERO, "no delay expected");
    assert!(outcome.error.is_none());
}

#[tokio::test(start_paused = true)]
async fn two_pages_are_capped_with_one_courtesy_delay() {
    let source = ScriptedSource::new(vec![page("p1", 6, Some(20)), page("p2", 5, None)]);
    let request = SearchRequest::new("hotel", "Chiang Mai", 10).unwrap();

    let outcome = aggregate(&source, &request).await;

    assert_eq!(outcome.records.len(), 10);
    let mut expected: Vec<String> = (0..6).map(|i| format!("p1-{i}")).collect();
    expected.extend((0..4).map(|i| format!("p2-{i}")));
    assert_eq!(names(&outcome), expected);

    let requests = source.requests();
    assert_eq!(requests.len(), 2);
    assert_eq!(requests[0].query, "hotel Chiang Mai");
    assert_eq!(requests[0].start, None);
    assert_eq!(requests[1].query, "hotel Chiang Mai");
    assert_eq!(requests[1].start, Some(20));

    let times = source.request_times();
    assert_waited(times[1] - times[0], INTER_PAGE_DELAY);
}

// ---------------------------------------------------------------------------
// Page ceiling and count cap
// ---------------------------------------------------------------------------

#[tokio::test(start_paused = true)]
async fn stops_at_page_ceiling_even_when_more_pages_exist() {
    let source = ScriptedSource::new(vec![
        page("p1", 5, Some(20)),
        page("p2", 5, Some(40)),
        page("p3", 5, Some(60)),
    ]);
    let request = SearchRequest::new("temple", "Bangkok", 50).unwrap();

    let started = Instant::now();
    let outcome = aggregate(&source, &request).await;

    assert_eq!(outcome.records.len(), 15);
    assert_eq!(outcome.pages_requested, MAX_PAGES);
    assert_eq!(source.requests().len(), 3);
    assert_waited(started.elapsed(), INTER_PAGE_DELAY * 2);
}

#[tokio::test]
async fn caps_within_first_page() {
    let source = ScriptedSource::new(vec![page("p1", 8, Some(20))]);
    let request = SearchRequest::new("market", "", 5).unwrap();

    let outcome = aggregate_with_policy(&source, &request, no_delay()).await;

    assert_eq!(outcome.records.len(), 5);
    assert_eq!(outcome.pages_requested, 1, "cap reached, no second page");
}

#[tokio::test]
async fn eight_plus_eight_with_cap_ten_returns_ten() {
    let source = ScriptedSource::new(vec![page("p1", 8, Some(20)), page("p2", 8, Some(40))]);
    let request = SearchRequest::new("spa", "Phuket", 10).unwrap();

    let outcome = aggregate_with_policy(&source, &request, no_delay()).await;

    assert_eq!(outcome.records.len(), 10);
    assert_eq!(source.requests().len(), 2);
}

#[tokio::test]
async fn returns_exactly_desired_count_across_three_pages() {
    let source = ScriptedSource::new(vec![
        page("p1", 4, Some(20)),
        page("p2", 4, Some(40)),
        page("p3", 4, None),
    ]);
    let request = SearchRequest::new("bakery", "Khon Kaen", 10).unwrap();

    let outcome = aggregate_with_policy(&source, &request, no_delay()).await;

    assert_eq!(outcome.records.len(), 10);
    assert_eq!(names(&outcome)[8], "p3-0");
    assert_eq!(names(&outcome)[9], "p3-1");
    assert_eq!(source.requests().len(), 3);
}

#[tokio::test]
async fn zero_max_pages_still_requests_first_page() {
    let source = ScriptedSource::new(vec![page("p1", 3, Some(20))]);
    let request = SearchRequest::new("gym", "", 10).unwrap();
    let policy = PaginationPolicy {
        max_pages: 0,
        inter_page_delay: Duration::ZERO,
    };

    let outcome = aggregate_with_policy(&source, &request, policy).await;

    assert_eq!(outcome.records.len(), 3);
    assert_eq!(outcome.pages_requested, 1);
}

// ---------------------------------------------------------------------------
// Empty pages and missing results
// ---------------------------------------------------------------------------

#[tokio::test]
async fn missing_local_results_yields_empty_outcome() {
    let source = ScriptedSource::new(vec![Ok(MapsPage::from_body(
        &json!({"search_metadata": {"status": "Success"}}),
    ))]);
    let request = SearchRequest::new("observatory", "", 20).unwrap();

    let outcome = aggregate_with_policy(&source, &request, no_delay()).await;

    assert!(outcome.records.is_empty());
    assert!(outcome.is_empty_result());
    assert!(!outcome.is_partial());
    assert_eq!(outcome.pages_requested, 1);
}

#[tokio::test(start_paused = true)]
async fn delay_applies_after_an_empty_intermediate_page() {
    let source = ScriptedSource::new(vec![
        page("p1", 0, Some(20)),
        page("p2", 0, Some(40)),
        page("p3", 2, None),
    ]);
    let request = SearchRequest::new("museum", "Ayutthaya", 10).unwrap();

    let outcome = aggregate(&source, &request).await;

    assert_eq!(outcome.records.len(), 2);
    let times = source.request_times();
    assert_eq!(times.len(), 3);
    assert_waited(times[1] - times[0], INTER_PAGE_DELAY);
    assert_waited(times[2] - times[1], INTER_PAGE_DELAY);
}

#[tokio::test]
async fn explicit_start_is_used_for_next_page() {
    let first = MapsPage::from_body(&json!({
        "local_results": [{"title": "a"}],
        "pagination": {"next": true, "start": 20}
    }));
    let source = ScriptedSource::new(vec![Ok(first), page("p2", 1, None)]);
    let request = SearchRequest::new("pharmacy", "", 10).unwrap();

    let outcome = aggregate_with_policy(&source, &request, no_delay()).await;

    assert_eq!(outcome.records.len(), 2);
    assert_eq!(source.requests()[1].start, Some(20));
}

#[tokio::test(start_paused = true)]
async fn continuation_without_offset_still_requests_next_page() {
    let listings: Vec<Value> = (0..6).map(|i| json!({"title": format!("p1-{i}")})).collect();
    let first = MapsPage::from_body(&json!({
        "local_results": listings,
        "serpapi_pagination": {"next": "https://serpapi.com/search.json?engine=google_maps&q=hotel"}
    }));
    let source = ScriptedSource::new(vec![Ok(first), page("p2", 5, None)]);
    let request = SearchRequest::new("hotel", "Chiang Mai", 10).unwrap();

    let outcome = aggregate(&source, &request).await;

    assert_eq!(outcome.records.len(), 10);
    assert_eq!(outcome.pages_requested, 2);
    assert!(outcome.error.is_none());

    let requests = source.requests();
    assert_eq!(requests.len(), 2);
    assert_eq!(requests[1].query, "hotel Chiang Mai");
    assert_eq!(requests[1].start, None, "no offset derived, none sent");
    let times = source.request_times();
    assert_waited(times[1] - times[0], INTER_PAGE_DELAY);
}

#[tokio::test]
async fn continuation_without_offset_keeps_previous_offset() {
    let second = MapsPage::from_body(&json!({
        "local_results": [{"title": "b"}],
        "serpapi_pagination": {"next": "https://serpapi.com/search.json?q=x"}
    }));
    let source = ScriptedSource::new(vec![
        page("p1", 1, Some(20)),
        Ok(second),
        page("p3", 1, None),
    ]);
    let request = SearchRequest::new("pharmacy", "", 10).unwrap();

    let outcome = aggregate_with_policy(&source, &request, no_delay()).await;

    assert_eq!(outcome.records.len(), 3);
    let requests = source.requests();
    assert_eq!(requests[1].start, Some(20));
    assert_eq!(requests[2].start, Some(20));
}

// ---------------------------------------------------------------------------
// Skips and provider failures
// ---------------------------------------------------------------------------

#[tokio::test]
async fn skipped_listings_do_not_abort_the_page() {
    let body = json!({
        "local_results": [
            {"title": "first"},
            "garbage",
            null,
            {"title": "second"},
            {"title": "third"}
        ]
    });
    let source = ScriptedSource::new(vec![Ok(MapsPage::from_body(&body))]);
    let request = SearchRequest::new("bar", "", 10).unwrap();

    let outcome = aggregate_with_policy(&source, &request, no_delay()).await;

    assert_eq!(names(&outcome), vec!["first", "second", "third"]);
    assert_eq!(outcome.skipped, 2);
}

#[tokio::test]
async fn cap_counts_records_not_listing_positions() {
    let body = json!({
        "local_results": [{"title": "a"}, 1, {"title": "b"}, {"title": "c"}]
    });
    let source = ScriptedSource::new(vec![Ok(MapsPage::from_body(&body))]);
    let request = SearchRequest::new("bar", "", 2).unwrap();

    let outcome = aggregate_with_policy(&source, &request, no_delay()).await;

    assert_eq!(names(&outcome), vec!["a", "b"]);
    assert_eq!(outcome.skipped, 1);
}

#[tokio::test]
async fn provider_error_on_first_page_returns_empty_partial_outcome() {
    let source = ScriptedSource::new(vec![Err(MapsError::Api("Invalid API key".to_owned()))]);
    let request = SearchRequest::new("hotel", "", 10).unwrap();

    let outcome = aggregate_with_policy(&source, &request, no_delay()).await;

    assert!(outcome.records.is_empty());
    assert!(outcome.is_partial());
    assert!(!outcome.is_empty_result());
    assert!(matches!(outcome.error, Some(MapsError::Api(_))));
}

#[tokio::test]
async fn provider_error_mid_search_keeps_earlier_records() {
    let source = ScriptedSource::new(vec![
        page("p1", 6, Some(20)),
        Err(MapsError::RateLimited {
            message: "Too Many Requests".to_owned(),
        }),
    ]);
    let request = SearchRequest::new("hotel", "Chiang Mai", 20).unwrap();

    let outcome = aggregate_with_policy(&source, &request, no_delay()).await;

    assert_eq!(outcome.records.len(), 6);
    assert_eq!(outcome.pages_requested, 2);
    assert!(matches!(outcome.error, Some(MapsError::RateLimited { .. })));
}
