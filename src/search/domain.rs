use serde::{Deserialize, Serialize};

/// Placeholder stored when a posting field cannot be read from an upstream payload.
pub const NOT_FOUND: &str = "not-found";

/// External job board a posting was collected from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum JobSite {
    HeadHunter,
    LinkedIn,
}

impl JobSite {
    pub const fn label(self) -> &'static str {
        match self {
            Self::HeadHunter => "HeadHunter",
            Self::LinkedIn => "LinkedIn",
        }
    }
}

/// One vacancy listing, normalized across sources.
///
/// Any of the text fields may hold [`NOT_FOUND`] when the upstream payload
/// was missing that piece.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobPosting {
    pub site: JobSite,
    pub title: String,
    pub company_name: String,
    pub location: String,
    pub url: String,
}

/// A single aggregation request: a job title plus a location name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VacancySearchQuery {
    #[serde(default)]
    pub profile: String,
    #[serde(default)]
    pub location: String,
}

/// Listings collected for one query, kept separate per site.
///
/// `headhunter_jobs` is `None` when the location did not resolve to a known
/// area and the HeadHunter side was skipped; a failed or empty fetch is an
/// empty list instead.
#[derive(Debug, Clone, Serialize)]
pub struct VacancySearchResults {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub headhunter_jobs: Option<Vec<JobPosting>>,
    pub linkedin_jobs: Vec<JobPosting>,
}
