use super::dom::NodeExt;
use super::fields::{FieldRule, LOCATION, MILEAGE, POSTED_AT, PRICE, THUMBNAIL, TITLE};
use crate::models::VehicleListing;
use crate::parsers::{parse_mileage, parse_price, parse_title};
use scraper::ElementRef;
use tracing::debug;
use url::Url;

/// Site-specific rules for recognizing a listing link
#[derive(Debug, Clone)]
pub struct LinkPattern {
    /// Path segment every listing link contains
    pub segment: String,
    /// Token preceding the listing id
    pub id_delimiter: String,
}

/// Turns one card element into a listing
pub struct ListingExtractor {
    link: LinkPattern,
}

impl ListingExtractor {
    pub fn new(link: LinkPattern) -> Self {
        Self { link }
    }

    pub fn link(&self) -> &LinkPattern {
        &self.link
    }

    /// Extract a listing from `card`, resolving links against `page_url`.
    ///
    /// Returns `None` when the card does not link to a listing or the
    /// extracted fields are too thin to be useful.
    pub fn extract(&self, card: &ElementRef<'_>, page_url: &Url) -> Option<VehicleListing> {
        let href = card.attribute("href")?;
        if !href.contains(&self.link.segment) {
            return None;
        }

        let mut listing = VehicleListing::new();
        listing.listing_url = match page_url.join(&href) {
            Ok(url) => Some(url.to_string()),
            Err(e) => {
                debug!("Could not resolve listing link '{}': {}", href, e);
                None
            }
        };
        if href.contains(&self.link.id_delimiter) {
            listing.listing_id = href
                .rsplit(self.link.id_delimiter.as_str())
                .next()
                .filter(|id| !id.is_empty())
                .map(str::to_string);
        }

        if let Some(title) = field(&TITLE, card) {
            let parts = parse_title(&title);
            listing.make = parts.make;
            listing.model = parts.model;
            listing.year = parts.year;
            listing.variant = parts.variant;
        }

        if let Some(price_text) = field(&PRICE, card) {
            let price = parse_price(&price_text);
            listing.price = price.amount;
            listing.currency = price.currency.to_string();
        }

        listing.mileage = field(&MILEAGE, card).and_then(|text| parse_mileage(&text));
        listing.location = field(&LOCATION, card);
        listing.thumbnail_url = field(&THUMBNAIL, card).and_then(|raw| absolute(page_url, &raw));
        listing.created_at = field(&POSTED_AT, card);

        if listing.has_minimum_info() {
            Some(listing)
        } else {
            debug!("Dropping card {}: not enough data", href);
            None
        }
    }
}

fn field(rule: &FieldRule, card: &ElementRef<'_>) -> Option<String> {
    let value = rule.extract(card);
    if value.is_none() {
        debug!("No {} found in card", rule.name);
    }
    value
}

/// Protocol-relative and root-relative references become https URLs on the page's host
fn absolute(page_url: &Url, raw: &str) -> Option<String> {
    match page_url.join(raw) {
        Ok(mut url) => {
            if url.scheme() == "http"
                && raw.starts_with("//")
                && url.set_scheme("https").is_err()
            {
                debug!("Could not upgrade image reference '{}' to https", raw);
            }
            Some(url.to_string())
        }
        Err(e) => {
            debug!("Could not resolve image reference '{}': {}", raw, e);
            None
        }
    }
}
