use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

/// Placeholder substituted with the achievement ID in the URL template
pub const ID_PLACEHOLDER: &str = "{}";

pub const DEFAULT_URL_TEMPLATE: &str = "https://hackmyvm.eu/achievement/?achievement={}";

pub const DEFAULT_LEDGER_PATH: &str = "data/achievements.csv";

/// Substitutes `id` for the first placeholder in `template`
pub fn expand_url_template(template: &str, id: u64) -> String {
    template.replacen(ID_PLACEHOLDER, &id.to_string(), 1)
}

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub crawler: CrawlerConfig,
    #[serde(default, rename = "user-agent")]
    pub user_agent: UserAgentConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

/// Crawl loop thresholds and page addressing
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CrawlerConfig {
    /// Page URL with a single `{}` placeholder for the ID
    #[serde(rename = "url-template")]
    pub url_template: String,

    /// Fetch attempts per ID before the ID counts as empty
    #[serde(rename = "max-retry")]
    pub max_retry: u32,

    /// Consecutive empty IDs that end the crawl
    #[serde(rename = "empty-limit")]
    pub empty_limit: u32,

    /// Accepted records buffered before a ledger flush
    #[serde(rename = "batch-size")]
    pub batch_size: usize,

    /// IDs below this value never end the crawl by exhaustion
    #[serde(rename = "exhaustion-floor")]
    pub exhaustion_floor: u64,

    /// Per-request timeout (seconds)
    #[serde(rename = "request-timeout")]
    pub request_timeout: u64,

    /// Optional cap on IDs attempted in one run
    #[serde(rename = "max-ids")]
    pub max_ids: Option<u64>,
}

impl CrawlerConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout)
    }

    /// Expands the URL template for one ID
    pub fn page_url(&self, id: u64) -> String {
        expand_url_template(&self.url_template, id)
    }
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            url_template: DEFAULT_URL_TEMPLATE.to_string(),
            max_retry: 3,
            empty_limit: 10,
            batch_size: 50,
            exhaustion_floor: 34000,
            request_timeout: 10,
            max_ids: None,
        }
    }
}

/// User agent identification configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UserAgentConfig {
    #[serde(rename = "crawler-name")]
    pub crawler_name: String,

    #[serde(rename = "crawler-version")]
    pub crawler_version: String,
}

impl UserAgentConfig {
    /// Format: CrawlerName/Version
    pub fn header_value(&self) -> String {
        format!("{}/{}", self.crawler_name, self.crawler_version)
    }
}

impl Default for UserAgentConfig {
    fn default() -> Self {
        Self {
            crawler_name: env!("CARGO_PKG_NAME").to_string(),
            crawler_version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Path to the CSV ledger
    #[serde(rename = "ledger-path")]
    pub ledger_path: PathBuf,

    /// Emit `[ACTION]` lines on stdout
    #[serde(rename = "action-log")]
    pub action_log: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            ledger_path: PathBuf::from(DEFAULT_LEDGER_PATH),
            action_log: true,
        }
    }
}
