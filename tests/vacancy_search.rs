//! End-to-end specifications for the two-source vacancy aggregation.
//!
//! Scenarios drive the public service facade against mock upstream servers
//! so pagination, termination, capping, and degradation behavior can be
//! verified without touching the real job boards.

mod common {
    use std::time::Duration;

    use httpmock::MockServer;
    use jobscout::config::SearchConfig;
    use jobscout::search::{VacancySearchQuery, VacancySearchService};

    pub(super) const LINKEDIN_PATH: &str = "/jobs-guest/jobs/api/seeMoreJobPostings/search";

    pub(super) fn service_for(
        headhunter_base_url: String,
        linkedin_base_url: String,
    ) -> VacancySearchService {
        VacancySearchService::new(SearchConfig {
            headhunter_base_url,
            linkedin_base_url,
            request_timeout: Duration::from_secs(5),
        })
        .expect("service builds")
    }

    pub(super) fn service_against(hh: &MockServer, li: &MockServer) -> VacancySearchService {
        service_for(hh.base_url(), li.base_url())
    }

    pub(super) fn query(profile: &str, location: &str) -> VacancySearchQuery {
        VacancySearchQuery {
            profile: profile.to_string(),
            location: location.to_string(),
        }
    }

    pub(super) fn job_card(title: &str, company: &str, location: &str, id: usize) -> String {
        format!(
            r#"<li>
                 <a class="base-card__full-link" href="https://example.com/jobs/view/{id}">open</a>
                 <h3>{title}</h3>
                 <h4><a href="https://example.com/company">{company}</a></h4>
                 <span class="job-search-card__location">{location}</span>
               </li>"#
        )
    }

    pub(super) fn listing_page(cards: &[String]) -> String {
        format!("<ul>{}</ul>", cards.join("\n"))
    }

    pub(super) fn empty_page() -> String {
        r#"<div class="no-results">nothing here</div>"#.to_string()
    }
}

mod aggregation {
    use super::common::*;
    use httpmock::prelude::*;
    use jobscout::search::JobSite;
    use serde_json::json;

    #[tokio::test]
    async fn resolved_location_queries_both_sources() {
        let hh = MockServer::start();
        let li = MockServer::start();

        let hh_page = hh.mock(|when, then| {
            when.method(GET)
                .path("/vacancies")
                .query_param("text", "NAME:Backend Developer")
                .query_param("area", "160")
                .query_param("page", "0")
                .query_param("per_page", "100");
            then.status(200).json_body(json!({
                "items": [{
                    "name": "Backend Developer",
                    "employer": { "name": "Kolesa Group" },
                    "area": { "name": "Алматы" },
                    "alternate_url": "https://hh.kz/vacancy/101"
                }],
                "pages": 1
            }));
        });

        let li_page = li.mock(|when, then| {
            when.method(GET)
                .path(LINKEDIN_PATH)
                .query_param("keywords", "Backend Developer")
                .query_param("location", "Алматы")
                .query_param("start", "0");
            then.status(200).body(listing_page(&[job_card(
                "Backend Developer",
                "Acme Corp",
                "Алматы, Казахстан",
                1,
            )]));
        });
        let li_next = li.mock(|when, then| {
            when.method(GET).path(LINKEDIN_PATH).query_param("start", "25");
            then.status(200).body(empty_page());
        });

        let service = service_against(&hh, &li);
        let results = service.search(&query("Backend Developer", "Алматы")).await;

        hh_page.assert();
        li_page.assert();
        li_next.assert();

        let headhunter = results.headhunter_jobs.expect("location resolves");
        assert_eq!(headhunter.len(), 1);
        assert_eq!(headhunter[0].site, JobSite::HeadHunter);
        assert_eq!(headhunter[0].title, "Backend Developer");
        assert_eq!(headhunter[0].company_name, "Kolesa Group");
        assert_eq!(headhunter[0].url, "https://hh.kz/vacancy/101");

        assert_eq!(results.linkedin_jobs.len(), 1);
        assert_eq!(results.linkedin_jobs[0].site, JobSite::LinkedIn);
        assert_eq!(results.linkedin_jobs[0].company_name, "Acme Corp");
        assert_eq!(results.linkedin_jobs[0].location, "Алматы");
    }

    #[tokio::test]
    async fn unresolved_location_skips_headhunter_entirely() {
        let hh = MockServer::start();
        let li = MockServer::start();

        let hh_any = hh.mock(|when, then| {
            when.method(GET).path("/vacancies");
            then.status(200).json_body(json!({ "items": [], "pages": 1 }));
        });
        let li_page = li.mock(|when, then| {
            when.method(GET).path(LINKEDIN_PATH);
            then.status(200).body(empty_page());
        });

        let service = service_against(&hh, &li);
        let results = service.search(&query("Backend Developer", "Atlantis")).await;

        assert!(results.headhunter_jobs.is_none());
        assert!(results.linkedin_jobs.is_empty());
        hh_any.assert_hits(0);
        li_page.assert();
    }
}

mod pagination {
    use super::common::*;
    use httpmock::prelude::*;
    use serde_json::json;

    #[tokio::test]
    async fn headhunter_walk_is_bounded_by_reported_page_count() {
        let hh = MockServer::start();
        let li = MockServer::start();

        let mut page_mocks = Vec::new();
        for page in 0..3u32 {
            let page_param = page.to_string();
            let mock = hh.mock(|when, then| {
                when.method(GET)
                    .path("/vacancies")
                    .query_param("page", page_param.as_str());
                then.status(200).json_body(json!({
                    "items": [{
                        "name": format!("Vacancy {page}"),
                        "employer": { "name": "Acme" },
                        "area": { "name": "Алматы" },
                        "alternate_url": format!("https://hh.kz/vacancy/{page}")
                    }],
                    "pages": 3
                }));
            });
            page_mocks.push(mock);
        }
        let beyond_last = hh.mock(|when, then| {
            when.method(GET).path("/vacancies").query_param("page", "3");
            then.status(200).json_body(json!({ "items": [], "pages": 3 }));
        });
        let li_page = li.mock(|when, then| {
            when.method(GET).path(LINKEDIN_PATH);
            then.status(200).body(empty_page());
        });

        let service = service_against(&hh, &li);
        let results = service.search(&query("Rust Engineer", "Алматы")).await;

        let headhunter = results.headhunter_jobs.expect("location resolves");
        assert_eq!(headhunter.len(), 3);
        assert_eq!(headhunter[0].title, "Vacancy 0");
        assert_eq!(headhunter[2].title, "Vacancy 2");

        for mock in &page_mocks {
            mock.assert();
        }
        beyond_last.assert_hits(0);
        li_page.assert();
    }

    #[tokio::test]
    async fn single_page_listing_is_fetched_once() {
        let hh = MockServer::start();
        let li = MockServer::start();

        let first = hh.mock(|when, then| {
            when.method(GET).path("/vacancies").query_param("page", "0");
            then.status(200).json_body(json!({ "items": [], "pages": 1 }));
        });
        let second = hh.mock(|when, then| {
            when.method(GET).path("/vacancies").query_param("page", "1");
            then.status(200).json_body(json!({ "items": [], "pages": 1 }));
        });
        let li_page = li.mock(|when, then| {
            when.method(GET).path(LINKEDIN_PATH);
            then.status(200).body(empty_page());
        });

        let service = service_against(&hh, &li);
        let results = service.search(&query("Rust Engineer", "Астана")).await;

        assert_eq!(results.headhunter_jobs, Some(Vec::new()));
        first.assert();
        second.assert_hits(0);
        li_page.assert();
    }
}

mod capping {
    use super::common::*;
    use httpmock::prelude::*;

    #[tokio::test]
    async fn linkedin_stops_on_first_empty_page() {
        let hh = MockServer::start();
        let li = MockServer::start();

        let first = li.mock(|when, then| {
            when.method(GET).path(LINKEDIN_PATH).query_param("start", "0");
            then.status(200).body(empty_page());
        });
        let second = li.mock(|when, then| {
            when.method(GET).path(LINKEDIN_PATH).query_param("start", "25");
            then.status(200)
                .body(listing_page(&[job_card("Ghost", "Acme", "Remote", 99)]));
        });

        let service = service_against(&hh, &li);
        let results = service.search(&query("Engineer", "Atlantis")).await;

        assert!(results.linkedin_jobs.is_empty());
        first.assert();
        second.assert_hits(0);
    }

    #[tokio::test]
    async fn oversized_listing_page_is_capped_at_twenty_five() {
        let hh = MockServer::start();
        let li = MockServer::start();

        let cards: Vec<String> = (0..30)
            .map(|i| job_card(&format!("Role {i}"), "Acme", "Remote", i))
            .collect();
        let first = li.mock(|when, then| {
            when.method(GET).path(LINKEDIN_PATH).query_param("start", "0");
            then.status(200).body(listing_page(&cards));
        });
        let second = li.mock(|when, then| {
            when.method(GET).path(LINKEDIN_PATH).query_param("start", "25");
            then.status(200).body(empty_page());
        });

        let service = service_against(&hh, &li);
        let results = service.search(&query("Engineer", "Atlantis")).await;

        assert_eq!(results.linkedin_jobs.len(), 25);
        assert_eq!(results.linkedin_jobs[0].title, "Role 0");
        assert_eq!(results.linkedin_jobs[24].title, "Role 24");
        first.assert();
        second.assert_hits(0);
    }

    #[tokio::test]
    async fn cap_spans_consecutive_pages() {
        let hh = MockServer::start();
        let li = MockServer::start();

        let first_cards: Vec<String> = (0..25)
            .map(|i| job_card(&format!("Role {i}"), "Acme", "Remote", i))
            .collect();
        let first = li.mock(|when, then| {
            when.method(GET).path(LINKEDIN_PATH).query_param("start", "0");
            then.status(200).body(listing_page(&first_cards));
        });
        let second = li.mock(|when, then| {
            when.method(GET).path(LINKEDIN_PATH).query_param("start", "25");
            then.status(200)
                .body(listing_page(&[job_card("Role 25", "Acme", "Remote", 25)]));
        });

        let service = service_against(&hh, &li);
        let results = service.search(&query("Engineer", "Atlantis")).await;

        // the first page already fills the cap, so the walk never advances
        assert_eq!(results.linkedin_jobs.len(), 25);
        first.assert();
        second.assert_hits(0);
    }
}

mod degradation {
    use super::common::*;
    use httpmock::prelude::*;
    use serde_json::json;

    #[tokio::test]
    async fn headhunter_failure_leaves_linkedin_results_intact() {
        let hh = MockServer::start();
        let li = MockServer::start();

        let hh_broken = hh.mock(|when, then| {
            when.method(GET).path("/vacancies");
            then.status(500).body("upstream exploded");
        });
        let li_page = li.mock(|when, then| {
            when.method(GET).path(LINKEDIN_PATH).query_param("start", "0");
            then.status(200)
                .body(listing_page(&[job_card("Role", "Acme", "Remote", 1)]));
        });
        let li_next = li.mock(|when, then| {
            when.method(GET).path(LINKEDIN_PATH).query_param("start", "25");
            then.status(200).body(empty_page());
        });

        let service = service_against(&hh, &li);
        let results = service.search(&query("Engineer", "Алматы")).await;

        // the source degrades to an empty list rather than an absent one
        assert_eq!(results.headhunter_jobs, Some(Vec::new()));
        assert_eq!(results.linkedin_jobs.len(), 1);
        hh_broken.assert();
        li_page.assert();
        li_next.assert();
    }

    #[tokio::test]
    async fn unreachable_headhunter_leaves_linkedin_results_intact() {
        let li = MockServer::start();

        let li_page = li.mock(|when, then| {
            when.method(GET).path(LINKEDIN_PATH).query_param("start", "0");
            then.status(200)
                .body(listing_page(&[job_card("Role", "Acme", "Remote", 1)]));
        });
        let li_next = li.mock(|when, then| {
            when.method(GET).path(LINKEDIN_PATH).query_param("start", "25");
            then.status(200).body(empty_page());
        });

        // nothing listens on port 1, so the request fails before any response
        let service = service_for("http://127.0.0.1:1".to_string(), li.base_url());
        let results = service.search(&query("Engineer", "Алматы")).await;

        assert_eq!(results.headhunter_jobs, Some(Vec::new()));
        assert_eq!(results.linkedin_jobs.len(), 1);
        li_page.assert();
        li_next.assert();
    }

    #[tokio::test]
    async fn undecodable_headhunter_payload_degrades_to_empty() {
        let hh = MockServer::start();
        let li = MockServer::start();

        let hh_page = hh.mock(|when, then| {
            when.method(GET).path("/vacancies");
            then.status(200).body("<html>scheduled maintenance</html>");
        });
        let li_page = li.mock(|when, then| {
            when.method(GET).path(LINKEDIN_PATH);
            then.status(200).body(empty_page());
        });

        let service = service_against(&hh, &li);
        let results = service.search(&query("Engineer", "Алматы")).await;

        assert_eq!(results.headhunter_jobs, Some(Vec::new()));
        hh_page.assert();
        li_page.assert();
    }

    #[tokio::test]
    async fn linkedin_failure_leaves_headhunter_results_intact() {
        let hh = MockServer::start();
        let li = MockServer::start();

        let hh_page = hh.mock(|when, then| {
            when.method(GET).path("/vacancies");
            then.status(200).json_body(json!({
                "items": [{
                    "name": "Backend Developer",
                    "employer": { "name": "Kolesa Group" },
                    "area": { "name": "Алматы" },
                    "alternate_url": "https://hh.kz/vacancy/101"
                }],
                "pages": 1
            }));
        });
        let li_broken = li.mock(|when, then| {
            when.method(GET).path(LINKEDIN_PATH);
            then.status(429).body("slow down");
        });

        let service = service_against(&hh, &li);
        let results = service.search(&query("Backend Developer", "Алматы")).await;

        let headhunter = results.headhunter_jobs.expect("location resolves");
        assert_eq!(headhunter.len(), 1);
        assert!(results.linkedin_jobs.is_empty());
        hh_page.assert();
        li_broken.assert();
    }
}
