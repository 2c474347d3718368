use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use clap::Parser;
use serde::Deserialize;

use crate::error::AppError;
use crate::models::search_config::SearchConfig;

pub const DEFAULT_SEARCH_URL: &str =
    "https://www.linkedin.com/jobs-guest/jobs/api/seeMoreJobPostings/search";
pub const DEFAULT_BASE_URL: &str = "https://www.linkedin.com";
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

#[derive(Parser, Debug, Clone)]
#[command(name = "jobbot", about = "Job search scraper")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(clap::Subcommand, Debug, Clone)]
pub enum Command {
    /// Run the scrape and write the jobs as JSON (stdout by default)
    Run(RunArgs),
}

#[derive(clap::Args, Debug, Clone)]
pub struct RunArgs {
    /// Path to the YAML config file
    #[arg(short, long, env = "JOBBOT_CONFIG", default_value = "config.yaml")]
    pub config: PathBuf,

    /// Output path, or "-" for stdout
    #[arg(short, long, default_value = "-")]
    pub out: String,

    /// Do not echo each requested search URL and its batch size
    #[arg(long = "no-print-urls", action = clap::ArgAction::SetFalse)]
    pub print_urls: bool,
}

impl Default for RunArgs {
    fn default() -> Self {
        Self {
            config: std::env::var("JOBBOT_CONFIG")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("config.yaml")),
            out: "-".to_string(),
            print_urls: true,
        }
    }
}

impl Cli {
    /// Resolve the command, defaulting to Run if none specified.
    pub fn resolved_command(&self) -> Command {
        self.command
            .clone()
            .unwrap_or_else(|| Command::Run(RunArgs::default()))
    }
}

/// Endpoint and header settings for the page fetcher.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct HttpConfig {
    #[serde(default = "default_search_url")]
    pub search_url: String,

    #[serde(default = "default_base_url")]
    pub base_url: String,

    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Extra headers sent with every request, on top of the browser-like defaults.
    #[serde(default)]
    pub headers: BTreeMap<String, String>,
}

fn default_search_url() -> String {
    DEFAULT_SEARCH_URL.to_string()
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_user_agent() -> String {
    DEFAULT_USER_AGENT.to_string()
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            search_url: default_search_url(),
            base_url: default_base_url(),
            user_agent: default_user_agent(),
            headers: BTreeMap::new(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub linkedin: SearchConfig,
    pub http: HttpConfig,
}

impl AppConfig {
    pub fn load(path: &Path) -> Result<Self, AppError> {
        let raw = std::fs::read_to_string(path).map_err(|e| {
            AppError::Config(format!("Failed to read config {}: {e}", path.display()))
        })?;
        Self::from_yaml_str(&raw)
    }

    /// Parse a config document. The search settings live under `linkedin`,
    /// or at the top level when that key is absent.
    pub fn from_yaml_str(raw: &str) -> Result<Self, AppError> {
        let mut doc: serde_yaml::Value = serde_yaml::from_str(raw)?;
        if doc.is_null() {
            return Err(AppError::Config("Config file is empty".to_string()));
        }

        let http = match doc.as_mapping_mut().and_then(|m| m.remove("http")) {
            Some(section) => serde_yaml::from_value(section)?,
            None => HttpConfig::default(),
        };

        let section = match doc.as_mapping_mut().and_then(|m| m.remove("linkedin")) {
            Some(section) => section,
            None => doc,
        };
        let linkedin: SearchConfig = serde_yaml::from_value(section)?;

        Ok(Self {
            linkedin: linkedin.validate()?,
            http,
        })
    }
}
