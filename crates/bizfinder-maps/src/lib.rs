pub mod aggregate;
pub mod client;
pub mod email;
pub mod error;
pub mod normalize;
pub mod pagination;
pub mod source;
pub mod types;

pub use aggregate::{
    aggregate, aggregate_with_policy, PaginationPolicy, SearchOutcome, INTER_PAGE_DELAY, MAX_PAGES,
};
pub use client::SerpMapsClient;
pub use email::extract_email;
pub use error::MapsError;
pub use normalize::{normalize, Normalized, SkipReason};
pub use source::PageSource;
pub use types::{MapsPage, PageRequest, Pagination, RawLocalResult};
