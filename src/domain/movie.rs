use serde::{Deserialize, Serialize};

use super::{MovieInfo, Review};

/// Composite view of a movie: its metadata plus every review found for it.
///
/// Built fresh for each request and never stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Movie {
    pub movie_info: MovieInfo,
    #[serde(alias = "reviewList")]
    pub reviews: Vec<Review>,
}

impl Movie {
    pub fn new(movie_info: MovieInfo, reviews: Vec<Review>) -> Self {
        Self {
            movie_info,
            reviews,
        }
    }
}
