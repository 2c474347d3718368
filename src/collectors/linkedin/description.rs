use std::time::Duration;

use reqwest::Url;
use scraper::{Html, Selector};

use crate::collectors::linkedin::cards::parse_selector;
use crate::collectors::{FetchOutcome, PageFetcher};
use crate::error::AppError;

const DESCRIPTION_SELECTOR: &str = r#"div[class*="show-more-less-html__markup"]"#;

/// Paths the provider redirects anonymous visitors to instead of the posting.
const SIGN_IN_PATHS: [&str; 4] = ["/signup", "/login", "/authwall", "/uas/login"];

/// Best-effort enrichment from a job's detail page.
/// Every failure resolves to `None`; nothing here can stop a scrape.
pub struct DescriptionFetcher {
    content: Selector,
}

impl DescriptionFetcher {
    pub fn new() -> Result<Self, AppError> {
        Ok(Self {
            content: parse_selector(DESCRIPTION_SELECTOR)?,
        })
    }

    pub async fn fetch(
        &self,
        fetcher: &dyn PageFetcher,
        job_id: &str,
        timeout: Duration,
    ) -> Option<String> {
        let page = match fetcher.fetch_detail_page(job_id, timeout).await {
            Ok(FetchOutcome::Page(page)) => page,
            Ok(FetchOutcome::RateLimited) => {
                tracing::debug!("Detail page for {job_id} rate limited");
                return None;
            }
            Ok(FetchOutcome::HttpError { status, .. }) => {
                tracing::debug!("Detail page for {job_id} returned {status}");
                return None;
            }
            Err(e) => {
                tracing::debug!("Detail page for {job_id} failed: {e}");
                return None;
            }
        };

        if is_sign_in_boundary(&page.final_url) {
            tracing::debug!("Detail page for {job_id} redirected to {}", page.final_url);
            return None;
        }

        let description = self.extract(&page.body);
        if description.is_none() {
            tracing::debug!("Detail page for {job_id} has no description block");
        }
        description
    }

    /// Plain text of the description block, with whitespace runs collapsed.
    pub fn extract(&self, markup: &str) -> Option<String> {
        let document = Html::parse_document(markup);
        let block = document.select(&self.content).next()?;
        let text = block.text().collect::<Vec<_>>().join(" ");
        Some(collapse_whitespace(&text))
    }
}

pub fn is_sign_in_boundary(final_url: &str) -> bool {
    let Ok(url) = Url::parse(final_url) else {
        return false;
    };
    let path = url.path();
    SIGN_IN_PATHS.iter().any(|p| {
        path.strip_prefix(p).is_some_and(|rest| rest.is_empty() || rest.starts_with('/'))
    })
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_and_normalizes_description() {
        let html = r#"<html><body>
            <section class="description">
              <div class="show-more-less-html__markup show-more-less-html__markup--clamp-after-5">
                <p>We build <strong>fast</strong>
                   systems.</p>
                <ul><li>Rust</li><li>Tokio</li></ul>
              </div>
            </section>
        </body></html>"#;

        let fetcher = DescriptionFetcher::new().unwrap();
        assert_eq!(
            fetcher.extract(html).as_deref(),
            Some("We build fast systems. Rust Tokio")
        );
    }

    #[test]
    fn missing_block_is_unavailable() {
        let fetcher = DescriptionFetcher::new().unwrap();
        assert_eq!(fetcher.extract("<html><body><p>nope</p></body></html>"), None);
    }

    #[test]
    fn detects_sign_in_redirects() {
        assert!(is_sign_in_boundary(
            "https://www.linkedin.com/signup/cold-join?session_redirect=x"
        ));
        assert!(is_sign_in_boundary("https://www.linkedin.com/login"));
        assert!(is_sign_in_boundary("https://www.linkedin.com/authwall?trk=1"));
        assert!(!is_sign_in_boundary("https://www.linkedin.com/jobs/view/123"));
        assert!(!is_sign_in_boundary("https://www.linkedin.com/loginhelp"));
        assert!(!is_sign_in_boundary("not a url"));
    }
}
