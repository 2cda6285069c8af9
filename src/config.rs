//! Service configuration.

use std::time::Duration;

use crate::aggregator::FetchMode;
use crate::retry::RetryPolicy;

/// Everything needed to wire the aggregator to its upstreams.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Base URL of the movie-info service, e.g. `http://localhost:8080/v1`.
    pub movie_info_url: String,
    /// Base URL of the review service, e.g. `http://localhost:8081/v1`.
    pub reviews_url: String,
    /// Total attempts per upstream leg, including the first.
    pub max_attempts: u32,
    /// Backoff after the first failed attempt; doubles on every retry.
    pub base_delay: Duration,
    pub fetch_mode: FetchMode,
    /// Timeout for a single upstream call.
    pub upstream_timeout: Duration,
    /// Overall deadline for one inbound request, retries included.
    pub request_timeout: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            movie_info_url: "http://localhost:8080/v1".to_string(),
            reviews_url: "http://localhost:8081/v1".to_string(),
            max_attempts: 4,
            base_delay: Duration::from_secs(1),
            fetch_mode: FetchMode::Sequential,
            upstream_timeout: Duration::from_secs(5),
            request_timeout: Duration::from_secs(30),
        }
    }
}

impl Config {
    pub fn new(movie_info_url: impl Into<String>, reviews_url: impl Into<String>) -> Self {
        Self {
            movie_info_url: movie_info_url.into(),
            reviews_url: reviews_url.into(),
            ..Self::default()
        }
    }

    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy::new(self.max_attempts, self.base_delay)
    }
}
