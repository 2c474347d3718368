use std::collections::VecDeque;
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;

use jobbot::collectors::linkedin::params::PageRequest;
use jobbot::collectors::{FetchOutcome, FetchedPage, PageFetcher};
use jobbot::error::FetchError;
use jobbot::models::search_config::SearchConfig;

pub const BASE_URL: &str = "https://www.linkedin.com";

/// In-memory stand-in for the search endpoint.
pub struct StubEndpoint {
    search: Mutex<VecDeque<Result<FetchOutcome, FetchError>>>,
    pub requested_starts: Mutex<Vec<u32>>,
}

impl StubEndpoint {
    pub fn new(search: Vec<Result<FetchOutcome, FetchError>>) -> Self {
        Self {
            search: Mutex::new(search.into()),
            requested_starts: Mutex::new(Vec::new()),
        }
    }

    pub fn starts(&self) -> Vec<u32> {
        self.requested_starts.lock().unwrap().clone()
    }
}

#[async_trait]
impl PageFetcher for StubEndpoint {
    async fn fetch_search_page(
        &self,
        request: &PageRequest,
        _timeout: Duration,
    ) -> Result<FetchOutcome, FetchError> {
        self.requested_starts.lock().unwrap().push(request.start);
        self.search
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(search_page(&[])))
    }

    async fn fetch_detail_page(
        &self,
        job_id: &str,
        _timeout: Duration,
    ) -> Result<FetchOutcome, FetchError> {
        // Every detail page bounces anonymous visitors to the auth wall.
        Ok(FetchOutcome::Page(FetchedPage {
            final_url: format!("{BASE_URL}/authwall?sessionRedirect=/jobs/view/{job_id}"),
            body: "<html><body>Sign in</body></html>".to_string(),
        }))
    }

    fn job_url(&self, job_id: &str) -> String {
        format!("{BASE_URL}/jobs/view/{job_id}")
    }
}

pub fn search_page(ids: &[u32]) -> FetchOutcome {
    let body: String = ids
        .iter()
        .map(|id| {
            format!(
                r#"<li><div class="base-card base-search-card">
  <a class="base-card__full-link"
     href="{BASE_URL}/jobs/view/engineer-at-acme-{id}?position=1&amp;pageNum=0">
    <span class="sr-only">Engineer {id}</span>
  </a>
  <div class="base-search-card__info">
    <h4 class="base-search-card__subtitle"><a href="{BASE_URL}/company/acme">Acme</a></h4>
  </div>
</div></li>"#
            )
        })
        .collect();

    FetchOutcome::Page(FetchedPage {
        final_url: format!("{BASE_URL}/jobs-guest/jobs/api/seeMoreJobPostings/search"),
        body,
    })
}

pub fn config(results_wanted: usize) -> SearchConfig {
    let mut cfg = SearchConfig::new("engineer", "Remote");
    cfg.results_wanted = results_wanted;
    cfg.delay_seconds = 0.0;
    cfg.jitter_seconds = 0.0;
    cfg
}
