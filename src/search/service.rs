use tracing::warn;

use crate::config::SearchConfig;

use super::areas;
use super::domain::{JobPosting, VacancySearchQuery, VacancySearchResults};
use super::headhunter::HeadHunterClient;
use super::linkedin::LinkedInClient;

// The guest listing endpoint rejects the default client string.
const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// Aggregates vacancy listings from both external job boards.
///
/// One shared HTTP client backs both sources. Aggregation never fails as a
/// whole: each source degrades to an empty list on its own failures.
pub struct VacancySearchService {
    headhunter: HeadHunterClient,
    linkedin: LinkedInClient,
}

impl VacancySearchService {
    pub fn new(config: SearchConfig) -> Result<Self, reqwest::Error> {
        let http = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .user_agent(USER_AGENT)
            .build()?;

        Ok(Self {
            headhunter: HeadHunterClient::new(http.clone(), config.headhunter_base_url),
            linkedin: LinkedInClient::new(http, config.linkedin_base_url),
        })
    }

    /// Run one aggregated search.
    ///
    /// The HeadHunter side only runs when the location resolves to a known
    /// area; an unresolved location leaves it `None`. Both sources are
    /// fetched concurrently.
    pub async fn search(&self, query: &VacancySearchQuery) -> VacancySearchResults {
        let area_id = areas::resolve_area(&query.location);

        let headhunter = async {
            match area_id {
                Some(area) => Some(self.run_headhunter(&query.profile, area).await),
                None => None,
            }
        };
        let linkedin = self.run_linkedin(&query.profile, &query.location);

        let (headhunter_jobs, linkedin_jobs) = tokio::join!(headhunter, linkedin);

        VacancySearchResults {
            headhunter_jobs,
            linkedin_jobs,
        }
    }

    async fn run_headhunter(&self, profile: &str, area_id: &str) -> Vec<JobPosting> {
        match self.headhunter.fetch_all(profile, area_id).await {
            Ok(postings) => postings,
            Err(err) => {
                warn!(error = %err, "headhunter fetch failed, dropping the source from this search");
                Vec::new()
            }
        }
    }

    async fn run_linkedin(&self, profile: &str, location: &str) -> Vec<JobPosting> {
        match self.linkedin.fetch_all(profile, location).await {
            Ok(postings) => postings,
            Err(err) => {
                warn!(error = %err, "linkedin fetch failed, dropping the source from this search");
                Vec::new()
            }
        }
    }
}
