use std::future::Future;
use std::time::Duration;

use crate::upstream::{ErrorClass, UpstreamOutcome};

use super::Sleeper;

/// Retry configuration: total attempts and backoff shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    max_attempts: u32,
    base_delay: Duration,
    max_delay: Option<Duration>,
}

impl Default for RetryPolicy {
    /// One initial attempt plus three retries, starting at one second.
    fn default() -> Self {
        Self::new(4, Duration::from_secs(1))
    }
}

impl RetryPolicy {
    /// `max_attempts` counts the initial attempt; zero is treated as one.
    pub fn new(max_attempts: u32, base_delay: Duration) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            base_delay,
            max_delay: None,
        }
    }

    /// A policy that makes exactly one attempt.
    pub fn no_retry() -> Self {
        Self::new(1, Duration::ZERO)
    }

    /// Cap each individual backoff delay.
    pub fn with_max_delay(mut self, max_delay: Duration) -> Self {
        self.max_delay = Some(max_delay);
        self
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    pub fn base_delay(&self) -> Duration {
        self.base_delay
    }

    /// Delay to wait after failed attempt number `attempt` (1-based):
    /// `base_delay * 2^(attempt - 1)`, capped at `max_delay` if set.
    pub fn delay_for_attempt(&self, attempt: u32) -> Duration {
        let exponent = attempt.saturating_sub(1).min(31);
        let delay = self.base_delay.saturating_mul(1u32 << exponent);
        match self.max_delay {
            Some(max) => delay.min(max),
            None => delay,
        }
    }

    /// Run `call` until it succeeds, fails with a client fault, or the
    /// attempt budget is spent.
    pub async fn run<T, F, Fut, S>(&self, sleeper: &S, mut call: F) -> UpstreamOutcome<T>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = UpstreamOutcome<T>>,
        S: Sleeper,
    {
        let mut attempt = 1;
        loop {
            let outcome = call().await;
            match outcome.class() {
                Some(ErrorClass::Server) if attempt < self.max_attempts => {
                    let delay = self.delay_for_attempt(attempt);
                    tracing::warn!(
                        attempt,
                        max_attempts = self.max_attempts,
                        delay_ms = saturating_millis(delay),
                        error = %outcome,
                        "upstream call failed, retrying"
                    );
                    sleeper.sleep(delay).await;
                    attempt += 1;
                }
                Some(ErrorClass::Server) => {
                    tracing::warn!(attempts = attempt, error = %outcome, "retries exhausted");
                    return outcome;
                }
                Some(ErrorClass::Client) | None => return outcome,
            }
        }
    }
}

/// Whole milliseconds in `duration`, pinned at `u64::MAX` for longer spans.
fn saturating_millis(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}
