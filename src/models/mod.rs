use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Currency used when a price text carries no recognizable marker
pub const DEFAULT_CURRENCY: &str = "NGN";

/// One vehicle listing scraped from a results page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VehicleListing {
    pub listing_id: Option<String>,
    pub make: Option<String>,
    pub model: Option<String>,
    pub year: Option<u16>,
    pub variant: Option<String>,
    pub price: Option<u64>,
    pub currency: String,
    pub mileage: Option<u64>,
    pub location: Option<String>,
    pub listing_url: Option<String>,
    pub thumbnail_url: Option<String>,
    /// Posting date exactly as it appeared on the page
    pub created_at: Option<String>,
    pub scraped_at: DateTime<Utc>,
}

impl VehicleListing {
    /// Empty listing with the default currency
    pub fn new() -> Self {
        Self {
            listing_id: None,
            make: None,
            model: None,
            year: None,
            variant: None,
            price: None,
            currency: DEFAULT_CURRENCY.to_string(),
            mileage: None,
            location: None,
            listing_url: None,
            thumbnail_url: None,
            created_at: None,
            scraped_at: Utc::now(),
        }
    }

    /// Admission gate for every listing handed to a caller.
    ///
    /// A listing needs a make or a model, plus at least one of id, url,
    /// price or year.
    pub fn has_minimum_info(&self) -> bool {
        let has_basic_info = self.make.is_some() || self.model.is_some();
        let has_identifying_info = self.listing_id.is_some()
            || self.listing_url.is_some()
            || self.price.is_some()
            || self.year.is_some();

        has_basic_info && has_identifying_info
    }
}

impl Default for VehicleListing {
    fn default() -> Self {
        Self::new()
    }
}

/// Why the page-by-page crawl stopped
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StopReason {
    /// A page produced no listings
    Exhausted { last_page: u32 },
    /// The page ceiling was reached while pages still had listings
    PageLimit { max_pages: u32 },
    /// A page after the first one failed; earlier pages are kept
    Failed { page: u32, error: String },
}

/// Result of a search.
///
/// `Degraded` is produced only by the plain-HTTP fallback and never holds
/// data extracted from a results page.
#[derive(Debug, Clone, PartialEq)]
pub enum SearchOutcome {
    Live {
        listings: Vec<VehicleListing>,
        stop: StopReason,
    },
    Degraded {
        listings: Vec<VehicleListing>,
        cause: String,
    },
}

impl SearchOutcome {
    pub fn listings(&self) -> &[VehicleListing] {
        match self {
            SearchOutcome::Live { listings, .. } | SearchOutcome::Degraded { listings, .. } => {
                listings
            }
        }
    }

    pub fn into_listings(self) -> Vec<VehicleListing> {
        match self {
            SearchOutcome::Live { listings, .. } | SearchOutcome::Degraded { listings, .. } => {
                listings
            }
        }
    }

    pub fn is_degraded(&self) -> bool {
        matches!(self, SearchOutcome::Degraded { .. })
    }
}
