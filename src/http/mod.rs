//! HTTP surface: axum routers for the aggregator and the movie-info feed.
//!
//! Requires the `http` feature.
//!
//! ## Routes
//!
//! Aggregator ([`router`]):
//! - `GET /movies/:id`: composite movie as JSON; failures as plain text.
//! - `GET /movies/stream`: proxied NDJSON stream of new movie infos.
//! - `GET /health`: `{ "ok": true }`.
//!
//! Feed ([`feed_router`]), mounted by the movie-info service:
//! - `GET /movieinfos/stream`: NDJSON replay of every published movie info.
//!
//! ## Example
//!
//! ```ignore
//! let config = movies_rust::Config::default();
//! movies_rust::http::serve(config, "0.0.0.0:8082").await?;
//! ```

mod feed;
mod movies;

pub use feed::feed_router;
pub use movies::{build_aggregator, router, serve, AppState, HttpAggregator};

pub(crate) const NDJSON: &str = "application/x-ndjson";
