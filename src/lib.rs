//! Movie aggregation service.
//!
//! Composes one [`Movie`] view from two independent upstream services (a
//! movie-info service and a review service), classifying upstream
//! failures by status class and retrying transient server faults with
//! exponential backoff.
//!
//! ## Quick Start
//!
//! ```ignore
//! use movies_rust::{Config, http};
//!
//! let config = Config::new("http://localhost:8080/v1", "http://localhost:8081/v1");
//! http::serve(config, "0.0.0.0:8082").await?;
//! ```
//!
//! Or drive the aggregator directly:
//!
//! ```ignore
//! use movies_rust::{HttpUpstream, MovieAggregator, RetryPolicy};
//!
//! let client = reqwest::Client::new();
//! let aggregator = MovieAggregator::new(
//!     HttpUpstream::new(client.clone(), info_url, "MetadataService", timeout),
//!     HttpUpstream::new(client, reviews_url, "ReviewsService", timeout),
//!     RetryPolicy::default(),
//! );
//! let movie = aggregator.get_movie("1").await?;
//! ```

pub mod aggregator;
pub mod broadcast;
mod config;
pub mod domain;
pub mod retry;
pub mod upstream;

// HTTP surface (requires "http" feature)
#[cfg(feature = "http")]
pub mod http;

pub use aggregator::{AggregationError, FailureKind, FetchMode, MovieAggregator, UpstreamService};
pub use broadcast::{ReplayChannel, Subscription};
pub use config::Config;
pub use domain::{Movie, MovieInfo, Review};
pub use retry::{RetryPolicy, Sleeper, TokioSleeper};
pub use upstream::{classify, ErrorClass, HttpUpstream, Upstream, UpstreamOutcome};
