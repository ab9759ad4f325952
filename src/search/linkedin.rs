use scraper::{ElementRef, Html, Selector};
use std::sync::OnceLock;
use tracing::debug;

use super::domain::{JobPosting, JobSite, NOT_FOUND};
use super::SourceError;

/// Hard ceiling on postings collected per search.
const MAX_POSTINGS: usize = 25;
/// Offset step between listing pages.
const PAGE_STEP: usize = 25;

/// Client for the public (guest) LinkedIn job listing endpoint.
#[derive(Debug, Clone)]
pub struct LinkedInClient {
    http: reqwest::Client,
    base_url: String,
}

impl LinkedInClient {
    pub(crate) fn new(http: reqwest::Client, base_url: String) -> Self {
        Self { http, base_url }
    }

    /// Fetch one listing page and extract its job cards.
    async fn fetch_page(
        &self,
        keywords: &str,
        location: &str,
        offset: usize,
    ) -> Result<Vec<JobPosting>, SourceError> {
        let url = format!(
            "{}/jobs-guest/jobs/api/seeMoreJobPostings/search?keywords={}&location={}&start={}",
            self.base_url, keywords, location, offset
        );

        let response = self.http.get(url.as_str()).send().await?;
        if !response.status().is_success() {
            return Err(SourceError::Status {
                status: response.status(),
                url,
            });
        }

        let body = response.text().await?;
        Ok(extract_postings(&body))
    }

    /// Walk the guest listing in offset steps of 25.
    ///
    /// Spaces in the keywords and location become `+` in the request URL.
    /// The walk ends when a page comes back without job cards or once 25
    /// postings have been collected; the result never exceeds 25 entries.
    pub async fn fetch_all(
        &self,
        profile: &str,
        location: &str,
    ) -> Result<Vec<JobPosting>, SourceError> {
        let keywords = profile.replace(' ', "+");
        let location = location.replace(' ', "+");
        let mut postings = Vec::new();
        let mut offset = 0usize;

        loop {
            let cards = self.fetch_page(&keywords, &location, offset).await?;
            if cards.is_empty() {
                break;
            }

            postings.extend(cards);
            debug!(offset, collected = postings.len(), "linkedin page fetched");

            if postings.len() >= MAX_POSTINGS {
                postings.truncate(MAX_POSTINGS);
                break;
            }
            offset += PAGE_STEP;
        }

        Ok(postings)
    }
}

/// Collect one posting per `<li>` card in a listing page.
fn extract_postings(body: &str) -> Vec<JobPosting> {
    static CARDS: OnceLock<Selector> = OnceLock::new();
    let cards = CARDS.get_or_init(|| Selector::parse("li").expect("card selector"));

    let document = Html::parse_document(body);
    document
        .select(cards)
        .map(|card| JobPosting {
            site: JobSite::LinkedIn,
            title: extract_title(card).unwrap_or_else(|| NOT_FOUND.to_string()),
            company_name: extract_company(card).unwrap_or_else(|| NOT_FOUND.to_string()),
            location: extract_location(card).unwrap_or_else(|| NOT_FOUND.to_string()),
            url: extract_url(card).unwrap_or_else(|| NOT_FOUND.to_string()),
        })
        .collect()
}

fn extract_title(card: ElementRef<'_>) -> Option<String> {
    static SELECTOR: OnceLock<Selector> = OnceLock::new();
    let selector = SELECTOR.get_or_init(|| Selector::parse("h3").expect("title selector"));
    card.select(selector)
        .next()
        .map(|el| clean_text(&el.text().collect::<String>()))
        .filter(|text| !text.is_empty())
}

fn extract_url(card: ElementRef<'_>) -> Option<String> {
    static SELECTOR: OnceLock<Selector> = OnceLock::new();
    let selector =
        SELECTOR.get_or_init(|| Selector::parse("a.base-card__full-link").expect("link selector"));
    card.select(selector)
        .next()
        .and_then(|el| el.value().attr("href"))
        .map(|href| href.trim().to_string())
        .filter(|href| !href.is_empty())
}

fn extract_company(card: ElementRef<'_>) -> Option<String> {
    static SELECTOR: OnceLock<Selector> = OnceLock::new();
    let selector = SELECTOR.get_or_init(|| Selector::parse("h4 a").expect("company selector"));
    card.select(selector)
        .next()
        .map(|el| clean_text(&el.text().collect::<String>()))
        .filter(|text| !text.is_empty())
}

/// City segment of the card's location line: text before the first comma.
fn extract_location(card: ElementRef<'_>) -> Option<String> {
    static SELECTOR: OnceLock<Selector> = OnceLock::new();
    let selector = SELECTOR
        .get_or_init(|| Selector::parse("span.job-search-card__location").expect("location selector"));
    card.select(selector)
        .next()
        .map(|el| el.text().collect::<String>())
        .and_then(|raw| raw.split(',').next().map(clean_text))
        .filter(|city| !city.is_empty())
}

fn clean_text(raw: &str) -> String {
    raw.split_whitespace().collect::<Vec<_>>().join(" ")
}
