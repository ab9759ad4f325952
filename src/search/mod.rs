//! Vacancy search aggregation across external job boards.
//!
//! A query holds a job title and a location name. The location is resolved
//! against an embedded area catalog to decide whether the HeadHunter API is
//! queried at all; the LinkedIn guest listing is always queried. Each source
//! produces its own site-tagged posting list and the two are never merged.

pub mod areas;
pub mod domain;
pub mod headhunter;
pub mod linkedin;
pub mod router;
pub mod service;

pub use domain::{JobPosting, JobSite, VacancySearchQuery, VacancySearchResults, NOT_FOUND};
pub use router::search_router;
pub use service::VacancySearchService;

/// Failure reaching or decoding one upstream job board.
///
/// These never escape the aggregator; the affected source degrades to an
/// empty posting list and the failure is logged.
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    #[error("transport failure: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("unexpected status {status} from {url}")]
    Status {
        status: reqwest::StatusCode,
        url: String,
    },
    #[error("undecodable listing payload: {0}")]
    Decode(#[source] reqwest::Error),
}
