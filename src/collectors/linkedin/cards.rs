use regex::Regex;
use scraper::{ElementRef, Html, Selector};

use crate::error::AppError;
use crate::models::job::RawCard;

const CARD_SELECTOR: &str = "div.base-search-card";
const LINK_SELECTOR: &str = "a.base-card__full-link";
const TITLE_SELECTOR: &str = "span.sr-only";
const COMPANY_SELECTOR: &str = "h4.base-search-card__subtitle a";

const MISSING: &str = "N/A";

/// Cards parsed from one search page.
#[derive(Debug, Clone, Default)]
pub struct CardBatch {
    /// Number of listing containers on the page, parseable or not.
    pub listings: usize,
    /// Usable cards in document order.
    pub cards: Vec<RawCard>,
}

/// Parses search result markup into cards.
pub struct CardExtractor {
    card: Selector,
    link: Selector,
    title: Selector,
    company: Selector,
    slug_id: Regex,
    view_id: Regex,
}

impl CardExtractor {
    pub fn new() -> Result<Self, AppError> {
        Ok(Self {
            card: parse_selector(CARD_SELECTOR)?,
            link: parse_selector(LINK_SELECTOR)?,
            title: parse_selector(TITLE_SELECTOR)?,
            company: parse_selector(COMPANY_SELECTOR)?,
            slug_id: compile(r"-(\d+)$")?,
            view_id: compile(r"/jobs/view/(\d+)")?,
        })
    }

    pub fn extract(&self, markup: &str) -> CardBatch {
        let document = Html::parse_fragment(markup);
        let mut batch = CardBatch::default();

        for container in document.select(&self.card) {
            batch.listings += 1;
            if let Some(card) = self.parse_card(container) {
                batch.cards.push(card);
            }
        }

        batch
    }

    fn parse_card(&self, container: ElementRef<'_>) -> Option<RawCard> {
        let href = container
            .select(&self.link)
            .next()
            .and_then(|a| a.value().attr("href"))
            .map(str::trim)
            .filter(|href| !href.is_empty())?;

        let Some(job_id) = self.job_id_from_href(href) else {
            tracing::debug!("Skipping card with unparseable link: {href}");
            return None;
        };

        let title = first_text(container, &self.title);
        let company_name = first_text(container, &self.company);

        Some(RawCard {
            job_id,
            title,
            company_name,
        })
    }

    /// Pull the numeric job id out of a card link, ignoring any query string.
    /// Slug links end in `-<digits>`; canonical links contain `/jobs/view/<digits>`.
    pub fn job_id_from_href(&self, href: &str) -> Option<String> {
        let path = href.split('?').next().unwrap_or(href);
        self.slug_id
            .captures(path)
            .or_else(|| self.view_id.captures(path))
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().to_string())
    }
}

fn first_text(container: ElementRef<'_>, selector: &Selector) -> String {
    container
        .select(selector)
        .next()
        .map(|el| el.text().map(str::trim).collect::<String>())
        .filter(|text| !text.is_empty())
        .unwrap_or_else(|| MISSING.to_string())
}

pub(crate) fn parse_selector(css: &str) -> Result<Selector, AppError> {
    Selector::parse(css)
        .map_err(|e| AppError::Internal(format!("Invalid selector '{css}': {e}")))
}

fn compile(pattern: &str) -> Result<Regex, AppError> {
    Regex::new(pattern)
        .map_err(|e| AppError::Internal(format!("Invalid pattern '{pattern}': {e}")))
}
