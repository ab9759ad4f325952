use std::sync::Arc;

use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};
use serde::Serialize;

use super::domain::{JobPosting, VacancySearchQuery};
use super::service::VacancySearchService;

/// Router builder exposing the vacancy search endpoint.
///
/// `GET` answers with a blank query so clients can render an empty search
/// form; `POST` runs the aggregation.
pub fn search_router(service: Arc<VacancySearchService>) -> Router {
    Router::new()
        .route(
            "/api/v1/vacancies/search",
            get(blank_form_handler).post(search_handler),
        )
        .with_state(service)
}

#[derive(Debug, Serialize)]
struct SearchResponse {
    profile: String,
    location: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    headhunter_jobs: Option<Vec<JobPosting>>,
    linkedin_jobs: Vec<JobPosting>,
}

async fn blank_form_handler() -> Json<VacancySearchQuery> {
    Json(VacancySearchQuery::default())
}

async fn search_handler(
    State(service): State<Arc<VacancySearchService>>,
    Json(query): Json<VacancySearchQuery>,
) -> Json<SearchResponse> {
    let results = service.search(&query).await;

    Json(SearchResponse {
        profile: query.profile,
        location: query.location,
        headhunter_jobs: results.headhunter_jobs,
        linkedin_jobs: results.linkedin_jobs,
    })
}
