use crate::config::ScraperConfig;
use crate::error::FetchError;
use anyhow::Result;
use scraper::Html;
use std::time::Duration;

/// A rendered page that can be navigated and snapshotted.
///
/// Implemented by the headless Chrome tab; tests use in-memory pages.
pub trait PageAccessor {
    /// Load `url`, failing on timeout or network error
    fn navigate(&mut self, url: &str, timeout: Duration) -> std::result::Result<(), FetchError>;

    /// Block until the page has settled after navigation
    fn wait_for_idle(&mut self) -> Result<()>;

    /// Wait for `selector` to appear. Returns `false` on timeout.
    fn wait_for_selector(&mut self, selector: &str, timeout: Duration) -> bool;

    /// URL the page ended up on, after redirects
    fn current_url(&self) -> String;

    /// Parsed snapshot of the current DOM
    fn document(&self) -> Result<Html>;

    /// Click the first element matching `selector`, if any.
    /// Returns whether something was clicked.
    fn click(&mut self, selector: &str) -> Result<bool>;
}

/// Opens pages for a search
pub trait PageLauncher {
    type Page: PageAccessor;

    fn launch(&self, config: &ScraperConfig) -> Result<Self::Page>;
}

/// Status and body of a plain HTTP response
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Plain HTTP GET, one attempt
pub trait HttpGet {
    fn get(&self, url: &str) -> std::result::Result<HttpResponse, FetchError>;
}
