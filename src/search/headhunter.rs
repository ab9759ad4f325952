use serde::Deserialize;
use tracing::debug;

use super::domain::{JobPosting, JobSite, NOT_FOUND};
use super::SourceError;

/// Client for the HeadHunter public vacancies API.
#[derive(Debug, Clone)]
pub struct HeadHunterClient {
    http: reqwest::Client,
    base_url: String,
}

impl HeadHunterClient {
    pub(crate) fn new(http: reqwest::Client, base_url: String) -> Self {
        Self { http, base_url }
    }

    /// Fetch and decode one page of the vacancies listing.
    async fn fetch_page(
        &self,
        profile: &str,
        area_id: &str,
        page: u32,
    ) -> Result<VacanciesPage, SourceError> {
        let url = format!("{}/vacancies", self.base_url);
        let response = self
            .http
            .get(url.as_str())
            .query(&[
                ("text", format!("NAME:{profile}")),
                ("area", area_id.to_string()),
                ("page", page.to_string()),
                ("per_page", "100".to_string()),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(SourceError::Status {
                status: response.status(),
                url,
            });
        }

        response.json().await.map_err(SourceError::Decode)
    }

    /// Walk the paginated vacancies listing for one job title within one area.
    ///
    /// Pages are zero-based. Each response reports the total page count and
    /// the walk stops once `(pages - page) <= 1`, so at most `pages` requests
    /// are issued and no request ever names a page past the reported count.
    pub async fn fetch_all(
        &self,
        profile: &str,
        area_id: &str,
    ) -> Result<Vec<JobPosting>, SourceError> {
        let mut postings = Vec::new();
        let mut page: u32 = 0;

        loop {
            let listing = self.fetch_page(profile, area_id, page).await?;
            let pages = listing.pages;
            postings.extend(listing.items.into_iter().map(VacancyItem::into_posting));

            debug!(page, pages, collected = postings.len(), "headhunter page fetched");

            if pages.saturating_sub(page) <= 1 {
                break;
            }
            page += 1;
        }

        Ok(postings)
    }
}

#[derive(Debug, Deserialize)]
struct VacanciesPage {
    items: Vec<VacancyItem>,
    pages: u32,
}

#[derive(Debug, Deserialize)]
struct VacancyItem {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    employer: Option<EmployerRef>,
    #[serde(default)]
    area: Option<AreaRef>,
    #[serde(default)]
    alternate_url: Option<String>,
}

#[derive(Debug, Deserialize)]
struct EmployerRef {
    #[serde(default)]
    name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct AreaRef {
    #[serde(default)]
    name: Option<String>,
}

impl VacancyItem {
    fn into_posting(self) -> JobPosting {
        JobPosting {
            site: JobSite::HeadHunter,
            title: self.name.unwrap_or_else(|| NOT_FOUND.to_string()),
            company_name: self
                .employer
                .and_then(|employer| employer.name)
                .unwrap_or_else(|| NOT_FOUND.to_string()),
            location: self
                .area
                .and_then(|area| area.name)
                .unwrap_or_else(|| NOT_FOUND.to_string()),
            url: self.alternate_url.unwrap_or_else(|| NOT_FOUND.to_string()),
        }
    }
}
