// Collector module.
// Defines the fetcher seam and the pagination loop that drives it.

pub mod linkedin;
pub mod runner;

use std::time::Duration;

use async_trait::async_trait;

use crate::collectors::linkedin::params::PageRequest;
use crate::error::FetchError;

/// A successfully fetched page and the URL it resolved to after redirects.
#[derive(Debug, Clone)]
pub struct FetchedPage {
    pub final_url: String,
    pub body: String,
}

/// Result of a single GET that reached the server.
#[derive(Debug, Clone)]
pub enum FetchOutcome {
    Page(FetchedPage),
    /// HTTP 429.
    RateLimited,
    /// Any other status >= 400, with the start of the response body.
    HttpError { status: u16, body_preview: String },
}

/// Trait over the network side of a scrape.
/// Implementations perform exactly one request per call and never retry.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// GET one page of search results.
    async fn fetch_search_page(
        &self,
        request: &PageRequest,
        timeout: Duration,
    ) -> Result<FetchOutcome, FetchError>;

    /// GET the detail page of one job.
    async fn fetch_detail_page(
        &self,
        job_id: &str,
        timeout: Duration,
    ) -> Result<FetchOutcome, FetchError>;

    /// Canonical detail-page URL for a job id.
    fn job_url(&self, job_id: &str) -> String;
}
