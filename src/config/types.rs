use serde::Deserialize;

/// URLs fetched when no configuration file is given
pub const DEFAULT_URLS: [&str; 5] = [
    "http://info.cern.ch",
    "https://www.example.com",
    "https://www.iana.org/domains/reserved",
    "http://httpbin.org/html",
    "http://quotes.toscrape.com/",
];

/// Main configuration structure for Tandem-Scrape
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub pipeline: PipelineConfig,
    #[serde(rename = "user-agent", default)]
    pub user_agent: UserAgentConfig,
    #[serde(default)]
    pub http: HttpConfig,
    #[serde(default)]
    pub report: ReportConfig,
}

/// The batch of documents to process
#[derive(Debug, Clone, Deserialize)]
pub struct PipelineConfig {
    /// Absolute URLs, fetched once each. One fetch unit and one parse unit
    /// are launched per entry.
    pub urls: Vec<String>,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            urls: DEFAULT_URLS.iter().map(|url| url.to_string()).collect(),
        }
    }
}

/// User agent identification configuration
#[derive(Debug, Clone, Deserialize)]
pub struct UserAgentConfig {
    /// Name of the crawler
    #[serde(rename = "crawler-name")]
    pub crawler_name: String,

    /// Version of the crawler
    #[serde(rename = "crawler-version")]
    pub crawler_version: String,

    /// URL with information about the crawler
    #[serde(rename = "contact-url")]
    pub contact_url: String,

    /// Email address for crawler-related contact
    #[serde(rename = "contact-email")]
    pub contact_email: String,
}

impl Default for UserAgentConfig {
    fn default() -> Self {
        Self {
            crawler_name: "tandem-scrape".to_string(),
            crawler_version: env!("CARGO_PKG_VERSION").to_string(),
            contact_url: "https://example.com/about".to_string(),
            contact_email: "admin@example.com".to_string(),
        }
    }
}

impl UserAgentConfig {
    /// Formats the header value: `Name/Version (+ContactURL; ContactEmail)`
    pub fn header_value(&self) -> String {
        format!(
            "{}/{} (+{}; {})",
            self.crawler_name, self.crawler_version, self.contact_url, self.contact_email
        )
    }
}

/// HTTP client timeouts
#[derive(Debug, Clone, Deserialize)]
pub struct HttpConfig {
    /// Whole-request timeout in seconds
    #[serde(rename = "timeout-secs", default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Connection establishment timeout in seconds
    #[serde(rename = "connect-timeout-secs", default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout_secs(),
            connect_timeout_secs: default_connect_timeout_secs(),
        }
    }
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_connect_timeout_secs() -> u64 {
    10
}

/// Report formatting
#[derive(Debug, Clone, Deserialize)]
pub struct ReportConfig {
    /// Extracted text longer than this many characters is truncated in reports
    #[serde(rename = "preview-length", default = "default_preview_length")]
    pub preview_length: usize,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            preview_length: default_preview_length(),
        }
    }
}

fn default_preview_length() -> usize {
    200
}
