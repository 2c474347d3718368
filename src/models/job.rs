use serde::Serialize;

/// One scraped posting, in the shape written to the output file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Job {
    pub job_url: String,
    pub title: String,
    pub company_name: String,
    pub description: Option<String>,
}

/// Listing summary pulled from a search results page, before dedup and enrichment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawCard {
    pub job_id: String,
    pub title: String,
    pub company_name: String,
}
