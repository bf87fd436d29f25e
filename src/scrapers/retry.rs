use super::interrupt::Interrupt;
use super::traits::{HttpGet, HttpResponse};
use crate::config::RetryConfig;
use crate::error::{FetchError, Result, ScrapeError};
use std::thread;
use std::time::Duration;
use tracing::{info, warn};

/// Bounded retries with exponential backoff.
///
/// Waits start at `min_wait`, double after every failed attempt and never
/// exceed `max_wait`. There is no wait after the last attempt. The interrupt
/// is checked before every attempt and after every wait.
#[derive(Debug, Clone, PartialEq)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub min_wait: Duration,
    pub max_wait: Duration,
}

impl RetryPolicy {
    pub fn from_config(config: &RetryConfig) -> Self {
        Self {
            max_attempts: config.max_attempts.max(1),
            min_wait: config.min_wait(),
            max_wait: config.max_wait(),
        }
    }

    /// Wait after the given failed attempt (1-based)
    pub fn backoff(&self, attempt: u32) -> Duration {
        let factor = 2u32.saturating_pow(attempt.saturating_sub(1));
        self.min_wait
            .checked_mul(factor)
            .unwrap_or(self.max_wait)
            .min(self.max_wait)
    }

    /// Run `op` until it succeeds or attempts run out, sleeping between attempts
    pub fn run<T>(
        &self,
        what: &str,
        interrupt: &Interrupt,
        op: impl FnMut(u32) -> std::result::Result<T, FetchError>,
    ) -> Result<T> {
        self.run_with(what, interrupt, op, thread::sleep)
    }

    /// Like [`run`](Self::run), with the sleep supplied by the caller
    pub fn run_with<T>(
        &self,
        what: &str,
        interrupt: &Interrupt,
        mut op: impl FnMut(u32) -> std::result::Result<T, FetchError>,
        mut sleep: impl FnMut(Duration),
    ) -> Result<T> {
        let mut attempt = 1;
        loop {
            interrupt.check()?;
            match op(attempt) {
                Ok(value) => return Ok(value),
                Err(_) if interrupt.is_triggered() => return Err(ScrapeError::Interrupted),
                Err(e) if attempt >= self.max_attempts => {
                    warn!("{} failed on attempt {}/{}: {}", what, attempt, self.max_attempts, e);
                    return Err(ScrapeError::RetriesExhausted {
                        what: what.to_string(),
                        attempts: attempt,
                        last: e,
                    });
                }
                Err(e) => {
                    warn!("{} failed on attempt {}/{}: {}", what, attempt, self.max_attempts, e);
                    let wait = self.backoff(attempt);
                    info!("Retrying in {:.1} seconds...", wait.as_secs_f64());
                    sleep(wait);
                    interrupt.check()?;
                    attempt += 1;
                }
            }
        }
    }

    /// GET `url`, retrying on 5xx and transport errors.
    /// Client errors (4xx) come back as ordinary responses.
    pub fn get(
        &self,
        http: &impl HttpGet,
        url: &str,
        interrupt: &Interrupt,
    ) -> Result<HttpResponse> {
        self.get_with(http, url, interrupt, thread::sleep)
    }

    pub fn get_with(
        &self,
        http: &impl HttpGet,
        url: &str,
        interrupt: &Interrupt,
        sleep: impl FnMut(Duration),
    ) -> Result<HttpResponse> {
        let what = format!("GET {}", url);
        self.run_with(
            &what,
            interrupt,
            |_| {
                let response = http.get(url)?;
                if response.status >= 500 {
                    return Err(FetchError::Status {
                        status: response.status,
                        url: url.to_string(),
                    });
                }
                Ok(response)
            },
            sleep,
        )
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::from_config(&RetryConfig::default())
    }
}
