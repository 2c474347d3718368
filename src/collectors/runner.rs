use std::collections::HashSet;
use std::fmt;
use std::time::Duration;

use crate::collectors::linkedin::cards::CardExtractor;
use crate::collectors::linkedin::description::DescriptionFetcher;
use crate::collectors::linkedin::params::build_search_params;
use crate::collectors::{FetchOutcome, PageFetcher};
use crate::error::AppError;
use crate::models::job::Job;
use crate::models::search_config::SearchConfig;

/// Granularity used to align the starting offset.
pub const PAGE_SIZE: u32 = 10;

/// The provider stops paginating at this offset.
pub const MAX_OFFSET: u32 = 1000;

/// Why the collection loop stopped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StopReason {
    TargetReached,
    NoMoreCards,
    RateLimited,
    RequestError(String),
    HttpError { status: u16 },
    OffsetCeiling,
}

impl StopReason {
    /// Stops caused by the provider or the network rather than normal exhaustion.
    pub fn is_abnormal(&self) -> bool {
        matches!(
            self,
            StopReason::RateLimited | StopReason::RequestError(_) | StopReason::HttpError { .. }
        )
    }
}

impl fmt::Display for StopReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StopReason::TargetReached => write!(f, "target reached"),
            StopReason::NoMoreCards => write!(f, "no more job cards"),
            StopReason::RateLimited => write!(f, "rate limited (429)"),
            StopReason::RequestError(e) => write!(f, "request error: {e}"),
            StopReason::HttpError { status } => write!(f, "HTTP error {status}"),
            StopReason::OffsetCeiling => write!(f, "offset ceiling {MAX_OFFSET} reached"),
        }
    }
}

/// Everything a run produced. Jobs are kept for every stop reason.
#[derive(Debug, Clone)]
pub struct ScrapeOutcome {
    pub jobs: Vec<Job>,
    pub stop_reason: StopReason,
    pub pages_fetched: usize,
    /// Offset the next search page would have started at.
    pub next_offset: u32,
}

/// Run-level switches that don't belong to the search itself.
#[derive(Debug, Clone, Copy)]
pub struct RunOptions {
    /// Echo each resolved search URL and its batch size at info level.
    pub verbose: bool,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self { verbose: true }
    }
}

/// Pause between search pages: `delay + uniform(0, jitter)` seconds.
#[derive(Debug, Clone, Copy)]
pub struct PoliteDelay {
    delay_seconds: f64,
    jitter_seconds: f64,
    ceiling: Duration,
}

impl PoliteDelay {
    pub fn from_config(config: &SearchConfig) -> Result<Self, AppError> {
        Ok(Self {
            delay_seconds: config.delay_seconds,
            jitter_seconds: config.jitter_seconds,
            ceiling: config.max_delay()?,
        })
    }

    pub fn next(&self) -> Duration {
        let jitter = rand::random::<f64>() * self.jitter_seconds;
        Duration::try_from_secs_f64(self.delay_seconds + jitter).unwrap_or(self.ceiling)
    }
}

/// Align the configured offset down to the page granularity.
pub fn initial_offset(offset: u32) -> u32 {
    (offset / PAGE_SIZE) * PAGE_SIZE
}

/// Page through search results until the target count, the end of results,
/// the offset ceiling, or a fetch failure. Pages are fetched one at a time.
///
/// Only setup failures return `Err`; every stop condition returns the jobs
/// collected so far.
pub async fn scrape(
    fetcher: &dyn PageFetcher,
    config: &SearchConfig,
    options: RunOptions,
) -> Result<ScrapeOutcome, AppError> {
    let extractor = CardExtractor::new()?;
    let describer = DescriptionFetcher::new()?;
    let pacer = PoliteDelay::from_config(config)?;
    let timeout = config.timeout();

    let mut jobs: Vec<Job> = Vec::new();
    let mut seen: HashSet<String> = HashSet::new();
    let mut offset = initial_offset(config.offset);
    let mut pages_fetched = 0;

    let stop_reason = loop {
        if jobs.len() >= config.results_wanted {
            break StopReason::TargetReached;
        }
        if offset >= MAX_OFFSET {
            break StopReason::OffsetCeiling;
        }

        let request = build_search_params(config, offset);
        let page = match fetcher.fetch_search_page(&request, timeout).await {
            Ok(FetchOutcome::Page(page)) => page,
            Ok(FetchOutcome::RateLimited) => break StopReason::RateLimited,
            Ok(FetchOutcome::HttpError {
                status,
                body_preview,
            }) => {
                tracing::warn!("Search page at {offset} returned {status}: {body_preview}");
                break StopReason::HttpError { status };
            }
            Err(e) => break StopReason::RequestError(e.to_string()),
        };
        pages_fetched += 1;

        let batch = extractor.extract(&page.body);
        if batch.listings == 0 {
            break StopReason::NoMoreCards;
        }

        if options.verbose {
            tracing::info!("{}", page.final_url);
            tracing::info!(
                "Fetching page starting at {offset}, received {} jobs.",
                batch.listings
            );
        } else {
            tracing::debug!(
                "Page at {offset} ({}) returned {} listings",
                page.final_url,
                batch.listings
            );
        }

        for card in batch.cards {
            if !seen.insert(card.job_id.clone()) {
                continue;
            }

            if config.is_company_blocked(&card.company_name) {
                tracing::debug!(
                    "Skipping job {} from blocked company '{}'",
                    card.job_id,
                    card.company_name
                );
                continue;
            }

            let description = if config.fetch_description {
                describer.fetch(fetcher, &card.job_id, timeout).await
            } else {
                None
            };

            jobs.push(Job {
                job_url: fetcher.job_url(&card.job_id),
                title: card.title,
                company_name: card.company_name,
                description,
            });

            if jobs.len() >= config.results_wanted {
                break;
            }
        }

        offset = offset.saturating_add(u32::try_from(batch.listings).unwrap_or(u32::MAX));

        if jobs.len() < config.results_wanted && offset < MAX_OFFSET {
            tokio::time::sleep(pacer.next()).await;
        }
    };

    if stop_reason.is_abnormal() {
        tracing::warn!("Stopping: {stop_reason}");
    } else {
        tracing::info!("Stopping: {stop_reason}");
    }

    Ok(ScrapeOutcome {
        jobs,
        stop_reason,
        pages_fetched,
        next_offset: offset,
    })
}
