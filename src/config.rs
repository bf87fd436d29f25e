use crate::error::{Result, ScrapeError};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;

/// Retry settings for navigation and plain HTTP calls
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RetryConfig {
    pub max_attempts: u32,
    /// First backoff wait, in seconds
    pub min_wait_secs: f64,
    /// Upper bound for a single backoff wait, in seconds
    pub max_wait_secs: f64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            min_wait_secs: 1.0,
            max_wait_secs: 10.0,
        }
    }
}

impl RetryConfig {
    pub fn min_wait(&self) -> Duration {
        Duration::from_secs_f64(self.min_wait_secs)
    }

    pub fn max_wait(&self) -> Duration {
        Duration::from_secs_f64(self.max_wait_secs)
    }
}

/// Everything the scraper needs to know about the site and how to crawl it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScraperConfig {
    /// Site root, also the target of the plain-HTTP fallback
    pub base_url: String,
    /// Results listing, relative to `base_url`
    pub listing_path: String,
    /// Path segment every listing link contains
    pub listing_segment: String,
    /// Token preceding the listing id in a listing link
    pub id_delimiter: String,
    /// Query parameter carrying the page number
    pub page_param: String,
    /// Element that signals the results have rendered
    pub content_marker: String,
    /// Clicked on the root page before crawling, when present
    pub country_selector: Option<String>,
    /// Pause after each navigation, in seconds
    pub rate_limit_secs: f64,
    pub headless: bool,
    pub navigation_timeout_secs: u64,
    pub content_timeout_secs: u64,
    pub max_pages: u32,
    /// Drop listings whose make, model or year contradict the query
    pub filter_to_query: bool,
    pub user_agent: String,
    pub retry: RetryConfig,
}

impl Default for ScraperConfig {
    fn default() -> Self {
        Self {
            base_url: "https://autochek.africa".to_string(),
            listing_path: "/ng/cars-for-sale".to_string(),
            listing_segment: "/ng/car/".to_string(),
            id_delimiter: "-ref-".to_string(),
            page_param: "page_number".to_string(),
            content_marker: "h6.MuiTypography-h6".to_string(),
            country_selector: Some(
                r#"img[alt*="Nigeria"], a[href*="/ng"], .country-ng"#.to_string(),
            ),
            rate_limit_secs: 1.0,
            headless: true,
            navigation_timeout_secs: 30,
            content_timeout_secs: 10,
            max_pages: 6,
            filter_to_query: false,
            user_agent: "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36".to_string(),
            retry: RetryConfig::default(),
        }
    }
}

impl ScraperConfig {
    /// Load a config file; missing keys keep their defaults
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let config: ScraperConfig = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.base_url.trim().is_empty() {
            return Err(ScrapeError::config("base_url must not be empty"));
        }
        url::Url::parse(&self.base_url).map_err(|e| {
            ScrapeError::config(format!("invalid base_url '{}': {}", self.base_url, e))
        })?;
        if self.listing_segment.is_empty() {
            return Err(ScrapeError::config("listing_segment must not be empty"));
        }
        if self.max_pages == 0 {
            return Err(ScrapeError::config("max_pages must be at least 1"));
        }
        if self.retry.max_attempts == 0 {
            return Err(ScrapeError::config("retry.max_attempts must be at least 1"));
        }
        let waits = [
            ("rate_limit_secs", self.rate_limit_secs),
            ("retry.min_wait_secs", self.retry.min_wait_secs),
            ("retry.max_wait_secs", self.retry.max_wait_secs),
        ];
        for (name, secs) in waits {
            if Duration::try_from_secs_f64(secs).is_err() {
                return Err(ScrapeError::config(format!(
                    "{} must be a non-negative number of seconds that fits a duration, got {}",
                    name, secs
                )));
            }
        }
        if self.retry.min_wait_secs > self.retry.max_wait_secs {
            return Err(ScrapeError::config(
                "retry.min_wait_secs must not exceed retry.max_wait_secs",
            ));
        }
        Ok(())
    }

    pub fn rate_limit(&self) -> Duration {
        Duration::from_secs_f64(self.rate_limit_secs)
    }

    pub fn navigation_timeout(&self) -> Duration {
        Duration::from_secs(self.navigation_timeout_secs)
    }

    pub fn content_timeout(&self) -> Duration {
        Duration::from_secs(self.content_timeout_secs)
    }

    /// Absolute URL of the results listing
    pub fn listing_url(&self) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), self.listing_path)
    }
}
