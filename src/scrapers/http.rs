use super::traits::{HttpGet, HttpResponse};
use crate::config::ScraperConfig;
use crate::error::{FetchError, Result};
use reqwest::blocking::Client;
use tracing::debug;

/// Blocking HTTP client used when the browser is unavailable
pub struct HttpClient {
    client: Client,
}

impl HttpClient {
    pub fn new(config: &ScraperConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.navigation_timeout())
            .user_agent(&config.user_agent)
            .build()?;

        Ok(Self { client })
    }
}

impl HttpGet for HttpClient {
    fn get(&self, url: &str) -> std::result::Result<HttpResponse, FetchError> {
        debug!("Fetching URL: {}", url);

        let response = self.client.get(url).send().map_err(FetchError::transport)?;
        let status = response.status().as_u16();
        let body = response.text().map_err(FetchError::transport)?;

        debug!("Downloaded {} bytes of HTML (status {})", body.len(), status);
        Ok(HttpResponse { status, body })
    }
}
