use super::traits::{PageAccessor, PageLauncher};
use crate::config::ScraperConfig;
use crate::error::FetchError;
use anyhow::{Context, Result};
use headless_chrome::{Browser, LaunchOptions, Tab};
use scraper::Html;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Launches headless Chrome for a search
pub struct ChromeLauncher;

impl PageLauncher for ChromeLauncher {
    type Page = ChromePage;

    fn launch(&self, config: &ScraperConfig) -> Result<ChromePage> {
        ChromePage::launch(config)
    }
}

/// A single Chrome tab driven through the DevTools protocol
pub struct ChromePage {
    // Keeps the browser process alive for as long as the tab is used
    _browser: Browser,
    tab: Arc<Tab>,
}

impl ChromePage {
    pub fn launch(config: &ScraperConfig) -> Result<Self> {
        info!("Launching headless Chrome...");

        let options = LaunchOptions::default_builder()
            .headless(config.headless)
            .build()
            .context("Failed to build launch options")?;

        let browser = Browser::new(options).context("Failed to launch Chrome browser")?;
        let tab = browser.new_tab().context("Failed to open browser tab")?;
        tab.set_user_agent(&config.user_agent, None, None)
            .context("Failed to set user agent")?;
        tab.set_default_timeout(config.navigation_timeout());

        Ok(Self {
            _browser: browser,
            tab,
        })
    }
}

impl PageAccessor for ChromePage {
    fn navigate(&mut self, url: &str, timeout: Duration) -> std::result::Result<(), FetchError> {
        debug!("Navigating to {}", url);
        self.tab.set_default_timeout(timeout);
        self.tab
            .navigate_to(url)
            .and_then(|tab| tab.wait_until_navigated())
            .map_err(FetchError::transport)?;
        Ok(())
    }

    fn wait_for_idle(&mut self) -> Result<()> {
        self.tab
            .wait_until_navigated()
            .context("Page did not settle after navigation")?;
        Ok(())
    }

    fn wait_for_selector(&mut self, selector: &str, timeout: Duration) -> bool {
        match self.tab.wait_for_element_with_custom_timeout(selector, timeout) {
            Ok(_) => true,
            Err(e) => {
                debug!("Waiting for '{}' failed: {}", selector, e);
                false
            }
        }
    }

    fn current_url(&self) -> String {
        self.tab.get_url()
    }

    fn document(&self) -> Result<Html> {
        let html_result = self
            .tab
            .evaluate("document.documentElement.outerHTML", false)
            .context("Failed to capture page HTML")?;

        let html_str = match html_result.value {
            Some(value) => value.as_str().unwrap_or_default().to_string(),
            None => String::new(),
        };
        if html_str.is_empty() {
            warn!("HTML is empty");
        } else {
            debug!("Captured {} bytes of page HTML", html_str.len());
        }

        Ok(Html::parse_document(&html_str))
    }

    fn click(&mut self, selector: &str) -> Result<bool> {
        let Ok(element) = self.tab.find_element(selector) else {
            return Ok(false);
        };
        element
            .click()
            .with_context(|| format!("Failed to click '{}'", selector))?;
        Ok(true)
    }
}
