//! Movie aggregation: one movie-info fetch and one review-list fetch joined
//! into a [`Movie`](crate::domain::Movie).
//!
//! ## Failure policy
//!
//! | Leg | Client fault (4xx) | Server fault (5xx / transport) |
//! |---|---|---|
//! | movie info | `MovieInfoNotFound`, reviews skipped | retried, then `Upstream { MovieInfo }` |
//! | reviews | empty review list | retried, then `Upstream { Reviews }` |
//!
//! A movie-info failure always wins: reviews are never fetched (sequential
//! mode) or are cancelled (concurrent mode) once the movie info has failed.

mod aggregator;
mod error;

pub use aggregator::{FetchMode, MovieAggregator};
pub use error::{AggregationError, FailureKind, UpstreamService};
