use super::dom::NodeExt;
use super::listing::ListingExtractor;
use super::traits::PageAccessor;
use crate::models::VehicleListing;
use anyhow::{Context, Result};
use scraper::ElementRef;
use std::time::Duration;
use tracing::{debug, info, warn};
use url::Url;

/// Card containers, tried in order until one matches anything.
///
/// Listing links come first: only elements carrying their own listing link
/// can become listings.
pub fn card_selectors(listing_segment: &str) -> Vec<String> {
    vec![
        format!(r#"a[href*="{}"]"#, listing_segment),
        "article".to_string(),
        r#"[data-testid*="car"]"#.to_string(),
        ".MuiCard-root".to_string(),
        r#"div[role="article"]"#.to_string(),
    ]
}

/// Collects every listing on a rendered results page
pub struct PageExtractor {
    listing: ListingExtractor,
    card_selectors: Vec<String>,
    content_marker: String,
    content_timeout: Duration,
}

impl PageExtractor {
    pub fn new(listing: ListingExtractor, content_marker: &str, content_timeout: Duration) -> Self {
        Self {
            card_selectors: card_selectors(&listing.link().segment),
            listing,
            content_marker: content_marker.to_string(),
            content_timeout,
        }
    }

    /// Wait for the results to render, then extract listings in page order
    pub fn extract<P: PageAccessor>(&self, page: &mut P) -> Result<Vec<VehicleListing>> {
        if !page.wait_for_selector(&self.content_marker, self.content_timeout) {
            warn!(
                "Content marker '{}' did not appear; page may not have loaded fully",
                self.content_marker
            );
        }

        let page_url = page.current_url();
        let page_url =
            Url::parse(&page_url).with_context(|| format!("Invalid page URL: {}", page_url))?;
        let document = page.document().context("Failed to read page content")?;

        Ok(self.extract_from(document.root_element(), &page_url))
    }

    /// Extract listings from an already parsed document
    pub fn extract_from(&self, root: ElementRef<'_>, page_url: &Url) -> Vec<VehicleListing> {
        let Some((selector, cards)) = self.find_cards(root) else {
            warn!("No vehicle cards found on page");
            return Vec::new();
        };
        info!("Found {} potential vehicle cards using selector: {}", cards.len(), selector);

        let mut listings = Vec::new();
        for (idx, card) in cards.iter().enumerate() {
            match self.listing.extract(card, page_url) {
                Some(listing) => {
                    debug!(
                        "Extracted vehicle {}: {} {}",
                        idx + 1,
                        listing.make.as_deref().unwrap_or("?"),
                        listing.model.as_deref().unwrap_or("?")
                    );
                    listings.push(listing);
                }
                None => debug!("Skipped card {}: insufficient data", idx + 1),
            }
        }

        listings
    }

    fn find_cards<'a>(&self, root: ElementRef<'a>) -> Option<(&str, Vec<ElementRef<'a>>)> {
        self.card_selectors.iter().find_map(|selector| {
            let cards = root.query_all(selector);
            (!cards.is_empty()).then_some((selector.as_str(), cards))
        })
    }
}
