//! Static page fetching with exponential backoff retry logic.
//!
//! # Architecture
//!
//! - [`FetchAsync`]: core trait for "give me the HTML behind this URL"
//! - [`HttpFetcher`]: `reqwest` implementation sending the configured User-Agent
//! - [`RetryFetch`]: decorator that adds retries to any [`FetchAsync`]
//!
//! # Retry Strategy
//!
//! - Maximum 3 retry attempts
//! - Exponential backoff starting at 1 second
//! - Maximum delay capped at 30 seconds
//! - Random jitter (0-250ms) added to each delay
//!
//! The browser-rendered path lives in [`crate::dom::browser`], since there the
//! session itself is the DOM.

use rand::{Rng, rng};
use std::error::Error;
use std::fmt;
use std::time::{Duration as StdDuration, Instant};
use tokio::time::sleep;
use tracing::{error, info, instrument, warn};

/// Trait for fetching a page body.
pub trait FetchAsync {
    async fn fetch(&self, url: &str) -> Result<String, Box<dyn Error>>;
}

/// Plain HTTP GET with a fixed User-Agent header.
#[derive(Debug)]
pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    pub fn new(user_agent: &str) -> Result<Self, Box<dyn Error>> {
        let client = reqwest::Client::builder().user_agent(user_agent).build()?;
        Ok(Self { client })
    }
}

impl FetchAsync for HttpFetcher {
    #[instrument(level = "info", skip(self))]
    async fn fetch(&self, url: &str) -> Result<String, Box<dyn Error>> {
        let t0 = Instant::now();
        let body = self
            .client
            .get(url)
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;
        info!(
            bytes = body.len(),
            elapsed_ms = t0.elapsed().as_millis() as u128,
            "Fetched page"
        );
        Ok(body)
    }
}

/// Wrapper that retries a [`FetchAsync`] with exponential backoff.
///
/// ```text
/// delay = min(base_delay * 2^(attempt-1), max_delay) + random_jitter(0..250ms)
/// ```
pub struct RetryFetch<T> {
    inner: T,
    max_retries: usize,
    base_delay: StdDuration,
    max_delay: StdDuration,
}

impl<T> RetryFetch<T>
where
    T: FetchAsync,
{
    pub fn new(inner: T, max_retries: usize, base_delay: StdDuration) -> Self {
        Self {
            inner,
            max_retries,
            base_delay,
            max_delay: StdDuration::from_secs(30),
        }
    }
}

impl<T> fmt::Debug for RetryFetch<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RetryFetch")
            .field("max_retries", &self.max_retries)
            .field("base_delay", &self.base_delay)
            .field("max_delay", &self.max_delay)
            .finish()
    }
}

/// Delay before retry number `attempt` (1-based), without jitter.
pub fn backoff_delay(base: StdDuration, max: StdDuration, attempt: usize) -> StdDuration {
    let shift = attempt.saturating_sub(1).min(31) as u32;
    base.saturating_mul(1u32 << shift).min(max)
}

impl<T> FetchAsync for RetryFetch<T>
where
    T: FetchAsync,
{
    #[instrument(level = "info", skip(self))]
    async fn fetch(&self, url: &str) -> Result<String, Box<dyn Error>> {
        let total_t0 = Instant::now();
        let mut attempt = 0usize;

        loop {
            match self.inner.fetch(url).await {
                Ok(body) => return Ok(body),
                Err(e) => {
                    attempt += 1;
                    let total_dt = total_t0.elapsed();

                    if attempt > self.max_retries {
                        error!(
                            attempt,
                            max = self.max_retries,
                            elapsed_ms_total = total_dt.as_millis() as u128,
                            error = %e,
                            "fetch() exhausted retries"
                        );
                        return Err(e);
                    }

                    let jitter_ms: u64 = rng().random_range(0..=250);
                    let delay = backoff_delay(self.base_delay, self.max_delay, attempt)
                        + StdDuration::from_millis(jitter_ms);

                    warn!(
                        attempt,
                        max = self.max_retries,
                        elapsed_ms_total = total_dt.as_millis() as u128,
                        ?delay,
                        error = %e,
                        "fetch() attempt failed; backing off"
                    );
                    sleep(delay).await;
                }
            }
        }
    }
}

/// Fetch `url` with the configured User-Agent, retrying transient failures.
#[instrument(level = "info", skip(user_agent))]
pub async fn fetch_with_backoff(url: &str, user_agent: &str) -> Result<String, Box<dyn Error>> {
    let fetcher = RetryFetch::new(HttpFetcher::new(user_agent)?, 3, StdDuration::from_secs(1));
    fetcher.fetch(url).await
}
