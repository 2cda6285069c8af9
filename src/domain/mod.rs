//! Domain types shared by the upstream clients and the aggregator.
//!
//! - [`MovieInfo`]: the metadata record owned by the movie-info service.
//! - [`Review`]: a single review owned by the review service, pointing at a
//!   movie info by id.
//! - [`Movie`]: the composite view built per request by the aggregator.

mod movie;
mod movie_info;
mod review;

pub use movie::Movie;
pub use movie_info::MovieInfo;
pub use review::Review;
