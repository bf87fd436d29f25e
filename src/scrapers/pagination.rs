use super::interrupt::Interrupt;
use super::page::PageExtractor;
use super::retry::RetryPolicy;
use super::traits::PageAccessor;
use crate::config::ScraperConfig;
use crate::error::{Result, ScrapeError};
use crate::models::{StopReason, VehicleListing};
use std::thread;
use std::time::Duration;
use tracing::{error, info, warn};
use url::Url;

/// Listings gathered by one crawl and why it ended
#[derive(Debug, Clone, PartialEq)]
pub struct Crawl {
    pub listings: Vec<VehicleListing>,
    pub stop: StopReason,
}

/// Walks the numbered results pages one at a time
pub struct Paginator {
    listing_url: Url,
    page_param: String,
    max_pages: u32,
    navigation_timeout: Duration,
    rate_limit: Duration,
    retry: RetryPolicy,
    extractor: PageExtractor,
    interrupt: Interrupt,
}

impl Paginator {
    pub fn new(config: &ScraperConfig, extractor: PageExtractor, interrupt: Interrupt) -> Result<Self> {
        Ok(Self {
            listing_url: Url::parse(&config.listing_url())?,
            page_param: config.page_param.clone(),
            max_pages: config.max_pages,
            navigation_timeout: config.navigation_timeout(),
            rate_limit: config.rate_limit(),
            retry: RetryPolicy::from_config(&config.retry),
            extractor,
            interrupt,
        })
    }

    /// URL of a results page; page 1 is the bare listing path
    pub fn page_url(&self, page_number: u32) -> Url {
        let mut url = self.listing_url.clone();
        if page_number > 1 {
            url.query_pairs_mut()
                .append_pair(&self.page_param, &page_number.to_string());
        }
        url
    }

    /// Crawl until a page comes back empty, the page ceiling is hit, or a
    /// page fails.
    ///
    /// A page failure ends the crawl and keeps what was gathered so far,
    /// even when that is nothing. The only error is `Interrupted`, which
    /// also wins over a page failure seen while the interrupt is set.
    pub fn crawl<P: PageAccessor>(&self, page: &mut P) -> Result<Crawl> {
        let mut listings = Vec::new();
        let mut page_number = 1;

        loop {
            info!("Processing page {}", page_number);

            match self.process_page(page, page_number) {
                Ok(found) if found.is_empty() => {
                    info!("No listings found on page {}, stopping pagination", page_number);
                    return Ok(Crawl {
                        listings,
                        stop: StopReason::Exhausted {
                            last_page: page_number,
                        },
                    });
                }
                Ok(found) => {
                    info!("Extracted {} vehicles from page {}", found.len(), page_number);
                    listings.extend(found);
                }
                Err(_) if self.interrupt.is_triggered() => return Err(ScrapeError::Interrupted),
                Err(e) => {
                    error!("Error processing page {}: {}", page_number, e);
                    return Ok(Crawl {
                        listings,
                        stop: StopReason::Failed {
                            page: page_number,
                            error: e.to_string(),
                        },
                    });
                }
            }

            page_number += 1;
            if page_number > self.max_pages {
                warn!("Reached maximum page limit ({}), stopping", self.max_pages);
                return Ok(Crawl {
                    listings,
                    stop: StopReason::PageLimit {
                        max_pages: self.max_pages,
                    },
                });
            }
        }
    }

    fn process_page<P: PageAccessor>(&self, page: &mut P, page_number: u32) -> Result<Vec<VehicleListing>> {
        self.interrupt.check()?;

        let url = self.page_url(page_number);
        let what = format!("navigation to {}", url);
        self.retry.run(&what, &self.interrupt, |_| {
            page.navigate(url.as_str(), self.navigation_timeout)
        })?;
        page.wait_for_idle()?;
        thread::sleep(self.rate_limit);

        self.interrupt.check()?;
        Ok(self.extractor.extract(page)?)
    }
}
