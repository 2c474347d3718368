use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};

use crate::collectors::linkedin::params::PageRequest;
use crate::collectors::{FetchOutcome, FetchedPage, PageFetcher};
use crate::config::HttpConfig;
use crate::error::{AppError, FetchError};

const BODY_PREVIEW_CHARS: usize = 200;

/// Browser-like headers; without them the guest endpoint serves short pages or blocks.
const DEFAULT_HEADERS: [(&str, &str); 4] = [
    (
        "accept",
        "text/html,application/xhtml+xml,application/xml;q=0.9,image/avif,image/webp,image/apng,*/*;q=0.8,application/signed-exchange;v=b3;q=0.7",
    ),
    ("accept-language", "en-US,en;q=0.9"),
    ("cache-control", "max-age=0"),
    ("upgrade-insecure-requests", "1"),
];

/// Page fetcher for the public guest job search.
pub struct LinkedInClient {
    client: reqwest::Client,
    search_url: String,
    base_url: String,
}

impl LinkedInClient {
    pub fn new(config: &HttpConfig) -> Result<Self, AppError> {
        let mut headers = HeaderMap::new();
        let extra = config
            .headers
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()));
        for (name, value) in DEFAULT_HEADERS.into_iter().chain(extra) {
            let name = HeaderName::from_bytes(name.as_bytes())
                .map_err(|e| AppError::Config(format!("Invalid header name '{name}': {e}")))?;
            let value = HeaderValue::from_str(value)
                .map_err(|e| AppError::Config(format!("Invalid value for header '{name}': {e}")))?;
            headers.insert(name, value);
        }

        let client = reqwest::Client::builder()
            .user_agent(&config.user_agent)
            .default_headers(headers)
            .build()?;

        Ok(Self {
            client,
            search_url: config.search_url.clone(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    async fn get(
        &self,
        request: reqwest::RequestBuilder,
        timeout: Duration,
    ) -> Result<FetchOutcome, FetchError> {
        let resp = request
            .timeout(timeout)
            .send()
            .await
            .map_err(|e| FetchError::Transport(e.to_string()))?;

        let status = resp.status();
        if status.as_u16() == 429 {
            return Ok(FetchOutcome::RateLimited);
        }

        let final_url = resp.url().to_string();
        let body = resp
            .text()
            .await
            .map_err(|e| FetchError::Body(e.to_string()))?;

        if status.as_u16() >= 400 {
            return Ok(FetchOutcome::HttpError {
                status: status.as_u16(),
                body_preview: body.chars().take(BODY_PREVIEW_CHARS).collect(),
            });
        }

        Ok(FetchOutcome::Page(FetchedPage { final_url, body }))
    }
}

#[async_trait]
impl PageFetcher for LinkedInClient {
    async fn fetch_search_page(
        &self,
        request: &PageRequest,
        timeout: Duration,
    ) -> Result<FetchOutcome, FetchError> {
        let builder = self.client.get(&self.search_url).query(&request.params);
        self.get(builder, timeout).await
    }

    async fn fetch_detail_page(
        &self,
        job_id: &str,
        timeout: Duration,
    ) -> Result<FetchOutcome, FetchError> {
        let builder = self.client.get(self.job_url(job_id));
        self.get(builder, timeout).await
    }

    fn job_url(&self, job_id: &str) -> String {
        format!("{}/jobs/view/{job_id}", self.base_url)
    }
}
