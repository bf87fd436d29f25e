pub mod autochek;
pub mod browser;
pub mod dom;
pub mod fields;
pub mod http;
pub mod interrupt;
pub mod listing;
pub mod page;
pub mod pagination;
pub mod retry;
pub mod traits;
pub mod types;

pub use autochek::AutochekScraper;
pub use browser::{ChromeLauncher, ChromePage};
pub use http::HttpClient;
pub use listing::{LinkPattern, ListingExtractor};
pub use page::PageExtractor;
pub use interrupt::Interrupt;
pub use pagination::{Crawl, Paginator};
pub use retry::RetryPolicy;
pub use traits::{HttpGet, HttpResponse, PageAccessor, PageLauncher};
pub use types::SearchParams;
