//! Vehicle listing scraper for the Autochek Nigeria marketplace.
//!
//! [`AutochekScraper::search`] crawls the results pages in headless Chrome,
//! pulls listings out of each card through selector fallback tables, and
//! falls back to a plain HTTP check when the browser path fails.

pub mod config;
pub mod error;
pub mod models;
pub mod output;
pub mod parsers;
pub mod scrapers;

pub use config::{RetryConfig, ScraperConfig};
pub use error::{FetchError, Result, ScrapeError};
pub use models::{SearchOutcome, StopReason, VehicleListing};
pub use scrapers::AutochekScraper;
