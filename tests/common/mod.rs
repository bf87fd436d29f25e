#![allow(dead_code)]

use anyhow::{bail, Result};
use autochek_scout::scrapers::{HttpGet, HttpResponse, Interrupt, PageAccessor, PageLauncher};
use autochek_scout::{FetchError, RetryConfig, ScraperConfig};
use scraper::Html;
use std::collections::{HashMap, HashSet, VecDeque};
use std::sync::{Arc, Mutex};
use std::time::Duration;

pub const ROOT: &str = "https://autochek.africa";
pub const PAGE_1: &str = "https://autochek.africa/ng/cars-for-sale";

pub fn page_url(n: u32) -> String {
    if n == 1 {
        PAGE_1.to_string()
    } else {
        format!("{}?page_number={}", PAGE_1, n)
    }
}

/// Config with no waiting anywhere
pub fn fast_config() -> ScraperConfig {
    ScraperConfig {
        rate_limit_secs: 0.0,
        content_timeout_secs: 0,
        retry: RetryConfig {
            max_attempts: 2,
            min_wait_secs: 0.0,
            max_wait_secs: 0.0,
        },
        ..ScraperConfig::default()
    }
}

pub fn card(id: &str, title: &str, price: &str, mileage: &str) -> String {
    format!(
        r#"<a href="/ng/car/{slug}-ref-{id}">
            <img src="https://media.autochek.africa/{id}.jpg">
            <h6 class="MuiTypography-root MuiTypography-h6">{title}</h6>
            <p class="MuiTypography-root MuiTypography-body1">{price}</p>
            <span class="MuiChip-label">{mileage}</span>
            <span class="MuiTypography-caption">Lagos</span>
        </a>"#,
        slug = title.to_lowercase().replace(' ', "-"),
    )
}

pub fn results_page(cards: &[String]) -> String {
    format!(
        r#"<html><body><main><h6 class="MuiTypography-h6">Cars for sale</h6>{}</main></body></html>"#,
        cards.concat()
    )
}

/// In-memory site: URL to HTML, with optional broken URLs
#[derive(Clone, Default)]
pub struct FakeSite {
    pub pages: HashMap<String, String>,
    pub broken: HashSet<String>,
    /// Navigating to one of these URLs sets the paired interrupt
    pub traps: HashMap<String, Interrupt>,
    /// The content marker never shows up, as on a slow render
    pub marker_missing: bool,
    pub visits: Arc<Mutex<Vec<String>>>,
}

impl FakeSite {
    pub fn with_page(mut self, url: &str, html: String) -> Self {
        self.pages.insert(url.to_string(), html);
        self
    }

    pub fn with_broken(mut self, url: &str) -> Self {
        self.broken.insert(url.to_string());
        self
    }

    pub fn with_trap(mut self, url: &str, interrupt: &Interrupt) -> Self {
        self.traps.insert(url.to_string(), interrupt.clone());
        self
    }

    pub fn without_content_marker(mut self) -> Self {
        self.marker_missing = true;
        self
    }

    pub fn visits(&self) -> Vec<String> {
        self.visits.lock().unwrap().clone()
    }

    pub fn open(&self) -> FakePage {
        FakePage {
            site: self.clone(),
            current: String::new(),
        }
    }
}

pub struct FakePage {
    site: FakeSite,
    current: String,
}

impl PageAccessor for FakePage {
    fn navigate(&mut self, url: &str, _timeout: Duration) -> std::result::Result<(), FetchError> {
        self.site.visits.lock().unwrap().push(url.to_string());
        if let Some(interrupt) = self.site.traps.get(url) {
            interrupt.trigger();
        }
        if self.site.broken.contains(url) {
            return Err(FetchError::transport("net::ERR_CONNECTION_RESET"));
        }
        self.current = url.to_string();
        Ok(())
    }

    fn wait_for_idle(&mut self) -> Result<()> {
        Ok(())
    }

    fn wait_for_selector(&mut self, _selector: &str, _timeout: Duration) -> bool {
        !self.site.marker_missing && self.site.pages.contains_key(&self.current)
    }

    fn current_url(&self) -> String {
        self.current.clone()
    }

    fn document(&self) -> Result<Html> {
        let html = self
            .site
            .pages
            .get(&self.current)
            .cloned()
            .unwrap_or_else(|| "<html><body></body></html>".to_string());
        Ok(Html::parse_document(&html))
    }

    fn click(&mut self, _selector: &str) -> Result<bool> {
        Ok(false)
    }
}

pub enum FakeLauncher {
    Site(FakeSite),
    Broken,
}

impl PageLauncher for FakeLauncher {
    type Page = FakePage;

    fn launch(&self, _config: &ScraperConfig) -> Result<FakePage> {
        match self {
            FakeLauncher::Site(site) => Ok(site.open()),
            FakeLauncher::Broken => bail!("Failed to launch Chrome browser"),
        }
    }
}

/// Replays canned statuses, one per request
#[derive(Default)]
pub struct ScriptedHttp {
    statuses: Mutex<VecDeque<u16>>,
    pub calls: Mutex<u32>,
}

impl ScriptedHttp {
    pub fn new(statuses: &[u16]) -> Self {
        Self {
            statuses: Mutex::new(statuses.iter().copied().collect()),
            calls: Mutex::new(0),
        }
    }

    pub fn calls(&self) -> u32 {
        *self.calls.lock().unwrap()
    }
}

impl HttpGet for ScriptedHttp {
    fn get(&self, _url: &str) -> std::result::Result<HttpResponse, FetchError> {
        *self.calls.lock().unwrap() += 1;
        match self.statuses.lock().unwrap().pop_front() {
            Some(status) => Ok(HttpResponse {
                status,
                body: "<html></html>".to_string(),
            }),
            None => Err(FetchError::transport("connection refused")),
        }
    }
}
