use crate::error::{Result, ScrapeError};
use crate::models::VehicleListing;
use crate::parsers::title::YEAR_RANGE;
use serde::{Deserialize, Serialize};

/// What the caller is looking for
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchParams {
    /// Vehicle make, e.g. "Toyota"
    pub make: String,
    /// Vehicle model, e.g. "Corolla"
    pub model: String,
    /// Model year, e.g. 2015
    pub year: u16,
}

impl SearchParams {
    /// Validated search parameters
    pub fn new(make: &str, model: &str, year: u16) -> Result<Self> {
        let make = make.trim();
        let model = model.trim();

        if make.is_empty() {
            return Err(ScrapeError::invalid_arguments("make is required"));
        }
        if model.is_empty() {
            return Err(ScrapeError::invalid_arguments("model is required"));
        }
        if !YEAR_RANGE.contains(&year) {
            return Err(ScrapeError::invalid_arguments(format!(
                "year {} is outside {}..={}",
                year,
                YEAR_RANGE.start(),
                YEAR_RANGE.end()
            )));
        }

        Ok(Self {
            make: make.to_string(),
            model: model.to_string(),
            year,
        })
    }

    /// Whether a listing fits the query. Fields the listing lacks do not
    /// count against it.
    pub fn matches(&self, listing: &VehicleListing) -> bool {
        let same = |wanted: &str, found: &Option<String>| {
            found
                .as_deref()
                .map_or(true, |found| found.eq_ignore_ascii_case(wanted))
        };

        same(&self.make, &listing.make)
            && same(&self.model, &listing.model)
            && listing.year.map_or(true, |year| year == self.year)
    }
}
