use super::browser::ChromeLauncher;
use super::http::HttpClient;
use super::listing::{LinkPattern, ListingExtractor};
use super::page::PageExtractor;
use super::interrupt::Interrupt;
use super::pagination::{Crawl, Paginator};
use super::retry::RetryPolicy;
use super::traits::{HttpGet, PageAccessor, PageLauncher};
use super::types::SearchParams;
use crate::config::ScraperConfig;
use crate::error::{Result, ScrapeError};
use crate::models::{SearchOutcome, VehicleListing};
use std::thread;
use tracing::{error, info, warn};

/// Id carried by the synthetic listing of a degraded result
pub const FALLBACK_LISTING_ID: &str = "fallback";

/// Autochek vehicle search.
///
/// Crawls the results pages in a browser; when that path fails as a whole,
/// checks the site over plain HTTP and returns a degraded result instead.
pub struct AutochekScraper<L = ChromeLauncher, H = HttpClient> {
    config: ScraperConfig,
    launcher: L,
    http: H,
    interrupt: Interrupt,
}

impl AutochekScraper {
    /// Scraper backed by headless Chrome and a blocking HTTP client
    pub fn new(config: ScraperConfig) -> Result<Self> {
        let http = HttpClient::new(&config)?;
        Self::with_parts(config, ChromeLauncher, http)
    }
}

impl<L: PageLauncher, H: HttpGet> AutochekScraper<L, H> {
    pub fn with_parts(config: ScraperConfig, launcher: L, http: H) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            launcher,
            http,
            interrupt: Interrupt::new(),
        })
    }

    /// Share an interrupt flag created elsewhere
    pub fn with_interrupt(mut self, interrupt: Interrupt) -> Self {
        self.interrupt = interrupt;
        self
    }

    pub fn config(&self) -> &ScraperConfig {
        &self.config
    }

    /// Handle for stopping a running search from another thread
    pub fn interrupt_handle(&self) -> Interrupt {
        self.interrupt.clone()
    }

    /// Search for vehicles matching the given make, model and year.
    ///
    /// Scraping failures never surface as errors: they shorten the result
    /// or turn it into a degraded one. Errors are reserved for invalid
    /// arguments, interruption, and the fallback running out of retries.
    /// Only a browser that cannot start or a site root that cannot be
    /// loaded leads to the fallback; results-page failures end the crawl.
    pub fn search(&self, make: &str, model: &str, year: u16) -> Result<SearchOutcome> {
        let params = SearchParams::new(make, model, year)?;
        info!("Searching for {} {} {}", params.make, params.model, params.year);

        match self.search_live() {
            Ok(Crawl { mut listings, stop }) => {
                if self.config.filter_to_query {
                    let before = listings.len();
                    listings.retain(|listing| params.matches(listing));
                    info!("Kept {} of {} listings matching the query", listings.len(), before);
                }
                info!("Successfully scraped {} vehicles ({:?})", listings.len(), stop);
                Ok(SearchOutcome::Live { listings, stop })
            }
            Err(_) if self.interrupt.is_triggered() => Err(ScrapeError::Interrupted),
            Err(e) if e.is_fatal() => Err(e),
            Err(e) => {
                error!("Error during scraping: {}", e);
                self.fallback(&params, e.to_string())
            }
        }
    }

    fn search_live(&self) -> Result<Crawl> {
        self.interrupt.check()?;
        let mut page = self.launcher.launch(&self.config)?;

        self.open_storefront(&mut page)?;

        let listing = ListingExtractor::new(LinkPattern {
            segment: self.config.listing_segment.clone(),
            id_delimiter: self.config.id_delimiter.clone(),
        });
        let extractor =
            PageExtractor::new(listing, &self.config.content_marker, self.config.content_timeout());
        let paginator = Paginator::new(&self.config, extractor, self.interrupt.clone())?;

        paginator.crawl(&mut page)
    }

    /// Load the site root and pick the country storefront if a selector is offered
    fn open_storefront<P: PageAccessor>(&self, page: &mut P) -> Result<()> {
        let retry = RetryPolicy::from_config(&self.config.retry);
        let timeout = self.config.navigation_timeout();
        retry.run("navigation to site root", &self.interrupt, |_| {
            page.navigate(&self.config.base_url, timeout)
        })?;

        let Some(selector) = &self.config.country_selector else {
            return Ok(());
        };
        match page.click(selector) {
            Ok(true) => {
                if let Err(e) = page.wait_for_idle() {
                    warn!("Country page did not settle: {:#}", e);
                }
                thread::sleep(self.config.rate_limit());
            }
            Ok(false) => info!("No country selector on the root page"),
            Err(e) => warn!("Could not select country: {:#}", e),
        }
        Ok(())
    }

    /// Plain-HTTP check of the site root, producing a tagged degraded result
    fn fallback(&self, params: &SearchParams, cause: String) -> Result<SearchOutcome> {
        info!("Using fallback scraping with plain HTTP");

        let retry = RetryPolicy::from_config(&self.config.retry);
        let response = retry.get(&self.http, &self.config.base_url, &self.interrupt)?;

        if !response.is_success() {
            warn!("Fallback request returned status {}", response.status);
            return Ok(SearchOutcome::Degraded {
                listings: Vec::new(),
                cause,
            });
        }

        info!("Site reachable without the browser; returning a placeholder listing");
        Ok(SearchOutcome::Degraded {
            listings: vec![fallback_listing(params, &self.config)],
            cause,
        })
    }
}

/// Placeholder standing in for results the browser could not extract.
/// Only the query itself and the site root are filled in.
pub fn fallback_listing(params: &SearchParams, config: &ScraperConfig) -> VehicleListing {
    VehicleListing {
        listing_id: Some(FALLBACK_LISTING_ID.to_string()),
        make: Some(params.make.clone()),
        model: Some(params.model.clone()),
        year: Some(params.year),
        listing_url: Some(config.base_url.clone()),
        ..VehicleListing::new()
    }
}
