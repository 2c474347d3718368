use std::time::Duration;

use serde::Deserialize;

use crate::error::AppError;

/// Workplace filter accepted by the search endpoint (`f_WT`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(try_from = "i64")]
pub enum WorkType {
    OnSite,
    Remote,
    Hybrid,
}

impl WorkType {
    pub fn code(self) -> u8 {
        match self {
            WorkType::OnSite => 1,
            WorkType::Remote => 2,
            WorkType::Hybrid => 3,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("linkedin.f_WT must be 1, 2, or 3 (got {0})")]
pub struct InvalidWorkType(pub i64);

impl From<InvalidWorkType> for AppError {
    fn from(e: InvalidWorkType) -> Self {
        AppError::Config(e.to_string())
    }
}

impl TryFrom<i64> for WorkType {
    type Error = InvalidWorkType;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(WorkType::OnSite),
            2 => Ok(WorkType::Remote),
            3 => Ok(WorkType::Hybrid),
            other => Err(InvalidWorkType(other)),
        }
    }
}

/// Search parameters and run tuning for one scrape.
/// Loaded once from the `linkedin` section of the config file and never mutated.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SearchConfig {
    pub keywords: String,
    pub location: String,

    #[serde(default = "default_distance")]
    pub distance: u32,

    #[serde(rename = "f_WT", default)]
    pub work_type: Option<WorkType>,

    #[serde(default = "default_experience_levels")]
    pub experience_levels: String,

    #[serde(default)]
    pub easy_apply: bool,

    #[serde(default)]
    pub company_ids: Vec<u64>,

    /// `null` disables the recency filter.
    #[serde(default = "default_hours_old")]
    pub hours_old: Option<u32>,

    #[serde(default = "default_true")]
    pub fetch_description: bool,

    #[serde(default = "default_results_wanted")]
    pub results_wanted: usize,

    #[serde(default)]
    pub offset: u32,

    #[serde(default = "default_delay_seconds")]
    pub delay_seconds: f64,

    #[serde(default = "default_jitter_seconds")]
    pub jitter_seconds: f64,

    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,

    #[serde(default)]
    pub filter_out_companies: Vec<String>,
}

fn default_distance() -> u32 {
    25
}

fn default_experience_levels() -> String {
    "2,3".to_string()
}

fn default_hours_old() -> Option<u32> {
    Some(24)
}

fn default_true() -> bool {
    true
}

fn default_results_wanted() -> usize {
    50
}

fn default_delay_seconds() -> f64 {
    2.5
}

fn default_jitter_seconds() -> f64 {
    1.5
}

fn default_timeout_seconds() -> u64 {
    12
}

impl SearchConfig {
    /// Minimal config with every optional field at its default.
    pub fn new(keywords: impl Into<String>, location: impl Into<String>) -> Self {
        Self {
            keywords: keywords.into(),
            location: location.into(),
            distance: default_distance(),
            work_type: None,
            experience_levels: default_experience_levels(),
            easy_apply: false,
            company_ids: Vec::new(),
            hours_old: default_hours_old(),
            fetch_description: true,
            results_wanted: default_results_wanted(),
            offset: 0,
            delay_seconds: default_delay_seconds(),
            jitter_seconds: default_jitter_seconds(),
            timeout_seconds: default_timeout_seconds(),
            filter_out_companies: Vec::new(),
        }
    }

    /// Check ranges serde cannot express and normalize the company blocklist.
    pub fn validate(mut self) -> Result<Self, AppError> {
        if !self.delay_seconds.is_finite() || self.delay_seconds < 0.0 {
            return Err(AppError::Config(format!(
                "linkedin.delay_seconds must be a non-negative number (got {})",
                self.delay_seconds
            )));
        }
        if !self.jitter_seconds.is_finite() || self.jitter_seconds < 0.0 {
            return Err(AppError::Config(format!(
                "linkedin.jitter_seconds must be a non-negative number (got {})",
                self.jitter_seconds
            )));
        }
        self.max_delay()?;

        self.filter_out_companies = self
            .filter_out_companies
            .iter()
            .map(|term| term.trim().to_lowercase())
            .filter(|term| !term.is_empty())
            .collect();

        Ok(self)
    }

    /// Longest politeness pause the delay settings can produce.
    pub fn max_delay(&self) -> Result<Duration, AppError> {
        Duration::try_from_secs_f64(self.delay_seconds + self.jitter_seconds).map_err(|_| {
            AppError::Config(format!(
                "linkedin.delay_seconds + jitter_seconds must be a non-negative, \
                 representable number of seconds (got {} + {})",
                self.delay_seconds, self.jitter_seconds
            ))
        })
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }

    pub fn blocklist_enabled(&self) -> bool {
        !self.filter_out_companies.is_empty()
    }

    /// Case-insensitive substring match against the blocklist. Blank terms never match.
    pub fn is_company_blocked(&self, company: &str) -> bool {
        if !self.blocklist_enabled() {
            return false;
        }
        let company = company.to_lowercase();
        self.filter_out_companies.iter().any(|term| {
            let term = term.trim().to_lowercase();
            !term.is_empty() && company.contains(&term)
        })
    }
}
