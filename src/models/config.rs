//! Application configuration structures.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::{NewsSelectors, PageIndex};
use crate::error::{AppError, Result};

/// Placeholder replaced by the rendered page index in `provider.list_path`.
pub const PAGE_PLACEHOLDER: &str = "{page}";

/// Root application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// HTTP client settings
    #[serde(default)]
    pub crawler: CrawlerConfig,

    /// Where the news lives and how to scrape it
    #[serde(default)]
    pub provider: ProviderConfig,

    /// Polling and delivery switches
    #[serde(default)]
    pub notify: NotifyConfig,

    /// Storage file locations
    #[serde(default)]
    pub paths: PathsConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Load configuration or return default if loading fails.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        Self::load(&path).unwrap_or_else(|e| {
            log::warn!(
                "Config load failed from {:?}: {}. Using defaults.",
                path.as_ref(),
                e
            );
            Self::default()
        })
    }

    /// Validate configuration values for basic sanity.
    pub fn validate(&self) -> Result<()> {
        if self.crawler.user_agent.trim().is_empty() {
            return Err(AppError::validation("crawler.user_agent is empty"));
        }
        if self.crawler.timeout_secs == 0 {
            return Err(AppError::validation("crawler.timeout_secs must be > 0"));
        }
        if self.crawler.max_concurrent == 0 {
            return Err(AppError::validation("crawler.max_concurrent must be > 0"));
        }
        if self.notify.interval_secs == 0 {
            return Err(AppError::validation("notify.interval_secs must be > 0"));
        }
        if !self.provider.list_path.contains(PAGE_PLACEHOLDER) {
            return Err(AppError::validation(format!(
                "provider.list_path must contain {PAGE_PLACEHOLDER}"
            )));
        }
        url::Url::parse(&self.provider.base_url)?;
        self.provider.selectors.validate()?;
        Ok(())
    }
}

/// HTTP client settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CrawlerConfig {
    /// User-Agent header for HTTP requests
    #[serde(default = "defaults::user_agent")]
    pub user_agent: String,

    /// Request timeout in seconds
    #[serde(default = "defaults::timeout")]
    pub timeout_secs: u64,

    /// Maximum concurrent detail page requests
    #[serde(default = "defaults::max_concurrent")]
    pub max_concurrent: usize,
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            user_agent: defaults::user_agent(),
            timeout_secs: defaults::timeout(),
            max_concurrent: defaults::max_concurrent(),
        }
    }
}

/// The news provider's addresses and page structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// Site origin; listing paths and notice links resolve against it
    #[serde(default = "defaults::base_url")]
    pub base_url: String,

    /// Listing page path containing `{page}`
    #[serde(default = "defaults::list_path")]
    pub list_path: String,

    #[serde(default)]
    pub selectors: NewsSelectors,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            base_url: defaults::base_url(),
            list_path: defaults::list_path(),
            selectors: NewsSelectors::default(),
        }
    }
}

impl ProviderConfig {
    /// Full listing URL for a page.
    pub fn list_url(&self, index: PageIndex) -> String {
        format!(
            "{}{}",
            self.base_url.trim_end_matches('/'),
            self.list_path.replace(PAGE_PLACEHOLDER, &index.to_string())
        )
    }

    /// Extract the page token (`3`, `n617`, ...) from a listing link.
    ///
    /// Only the last path segment is compared against the template, so both
    /// relative and absolute links are accepted.
    pub fn page_token<'a>(&self, href: &'a str) -> Option<&'a str> {
        let (prefix, suffix) = self.list_path.split_once(PAGE_PLACEHOLDER)?;
        let segment_prefix = prefix.rsplit('/').next().unwrap_or(prefix);

        let path = href.split(['?', '#']).next().unwrap_or(href);
        let segment = path.rsplit('/').next().unwrap_or(path);

        let token = segment.strip_prefix(segment_prefix)?.strip_suffix(suffix)?;
        (!token.is_empty()).then_some(token)
    }
}

/// How a new notice is rendered for delivery.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotifyMode {
    /// Full Markdown content
    Content,
    /// Title and link only
    #[default]
    Url,
}

impl NotifyMode {
    /// Template passed to [`crate::models::Notice::format`].
    pub fn template(&self) -> &'static str {
        match self {
            NotifyMode::Content => "{url}\n\n{content}",
            NotifyMode::Url => "{title}\n{url}",
        }
    }
}

/// Polling switches consumed by the scheduler and the delivery step.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotifyConfig {
    /// Whether polling is enabled at all
    #[serde(default)]
    pub enable: bool,

    /// Delivery rendering
    #[serde(default, alias = "type")]
    pub mode: NotifyMode,

    /// Poll interval in seconds
    #[serde(default = "defaults::interval", alias = "interval")]
    pub interval_secs: u64,

    /// Also write changed notices to the archive directory
    #[serde(default, alias = "news_cache")]
    pub archive: bool,
}

impl Default for NotifyConfig {
    fn default() -> Self {
        Self {
            enable: false,
            mode: NotifyMode::default(),
            interval_secs: defaults::interval(),
            archive: false,
        }
    }
}

/// File locations, relative to the storage directory.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathsConfig {
    #[serde(default = "defaults::fingerprint_file")]
    pub fingerprint_file: String,

    #[serde(default = "defaults::archive_dir")]
    pub archive_dir: String,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            fingerprint_file: defaults::fingerprint_file(),
            archive_dir: defaults::archive_dir(),
        }
    }
}

impl PathsConfig {
    /// Archive directory under a storage root.
    pub fn archive_root(&self, storage_dir: &Path) -> PathBuf {
        storage_dir.join(&self.archive_dir)
    }
}

mod defaults {
    // Crawler defaults
    pub fn user_agent() -> String {
        "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) \
         Chrome/142.0.0.0 Safari/537.36 Edg/142.0.0.0"
            .into()
    }
    pub fn timeout() -> u64 {
        30
    }
    pub fn max_concurrent() -> usize {
        8
    }

    // Provider defaults
    pub fn base_url() -> String {
        "https://wuxia.qq.com".into()
    }
    pub fn list_path() -> String {
        "/webplat/info/news_version3/5012/5013/5014/m3485/list_{page}.shtml".into()
    }

    // Notify defaults
    pub fn interval() -> u64 {
        60
    }

    // Path defaults
    pub fn fingerprint_file() -> String {
        "last_notice.json".into()
    }
    pub fn archive_dir() -> String {
        "news".into()
    }
}
