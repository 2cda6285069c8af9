//! Upstream clients: one HTTP call per invocation, reported faithfully.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                 Upstream (trait)                          │
//! │  fetch::<T>(segments, query) -> UpstreamOutcome<T>        │
//! └──────────────────────────────────────────────────────────┘
//!          │                                │
//!          ▼                                ▼
//! ┌──────────────────┐            ┌──────────────────────┐
//! │  HttpUpstream    │            │  ScriptedUpstream    │
//! │  (reqwest)       │            │  (unit tests)        │
//! └──────────────────┘            └──────────────────────┘
//! ```
//!
//! An upstream never retries and never recovers: every non-2xx response and
//! every transport failure comes back as an [`UpstreamOutcome`] variant, and
//! [`classify`] decides whether it is worth retrying.

mod client;
mod outcome;
#[cfg(test)]
pub(crate) mod scripted;

use std::future::Future;

use serde::de::DeserializeOwned;

pub use client::HttpUpstream;
pub(crate) use client::is_addressable;
pub use outcome::{classify, ErrorClass, UpstreamOutcome};

/// A remote service this crate calls as a client.
pub trait Upstream: Send + Sync {
    /// Name used in logs and error messages (e.g. `"MetadataService"`).
    fn name(&self) -> &str;

    /// Issue exactly one GET for the path built from `segments` (relative to
    /// the upstream's base URL) with the given query parameters, and parse a
    /// 2xx body as `T`.
    ///
    /// Each segment is sent as exactly one path segment: `/`, `?` and `#`
    /// inside a segment are percent-encoded, never interpreted.
    fn fetch<T>(
        &self,
        segments: &[&str],
        query: &[(&str, &str)],
    ) -> impl Future<Output = UpstreamOutcome<T>> + Send
    where
        T: DeserializeOwned + Send;
}
