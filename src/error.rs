use thiserror::Error;

/// Result type for scraping operations
pub type Result<T> = std::result::Result<T, ScrapeError>;

/// A single failed attempt at a network call
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    /// The server answered with a status worth retrying
    #[error("HTTP {status} from {url}")]
    Status { status: u16, url: String },

    /// The request never produced a response (timeout, connection, navigation)
    #[error("transport error: {0}")]
    Transport(String),
}

impl FetchError {
    pub fn transport(message: impl ToString) -> Self {
        Self::Transport(message.to_string())
    }
}

/// Errors surfaced by the scraper
#[derive(Error, Debug)]
pub enum ScrapeError {
    /// Every attempt of a retried call failed
    #[error("{what} failed after {attempts} attempts")]
    RetriesExhausted {
        what: String,
        attempts: u32,
        #[source]
        last: FetchError,
    },

    /// The caller asked the search to stop
    #[error("search interrupted")]
    Interrupted,

    /// Search arguments that can never produce a valid query
    #[error("invalid search arguments: {0}")]
    InvalidArguments(String),

    /// Configuration values that cannot be used
    #[error("configuration error: {0}")]
    Config(String),

    /// Browser automation failed
    #[error("browser error: {0:#}")]
    Browser(#[from] anyhow::Error),

    /// HTTP client could not be built
    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    /// URL parsing failed
    #[error("URL parse error: {0}")]
    Url(#[from] url::ParseError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

impl ScrapeError {
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    pub fn invalid_arguments(message: impl Into<String>) -> Self {
        Self::InvalidArguments(message.into())
    }

    /// Errors that must reach the caller instead of triggering the fallback
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            ScrapeError::Interrupted | ScrapeError::InvalidArguments(_) | ScrapeError::Config(_)
        )
    }
}
