use reqwest::Response;

use crate::domain::{Movie, MovieInfo, Review};
use crate::retry::{RetryPolicy, Sleeper, TokioSleeper};
use crate::upstream::{is_addressable, HttpUpstream, Upstream, UpstreamOutcome};

use super::error::{AggregationError, UpstreamService};

/// How the two upstream legs are scheduled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FetchMode {
    /// Fetch reviews only after the movie info has resolved. A failed movie
    /// info never issues a review call.
    #[default]
    Sequential,
    /// Launch both legs together. A movie-info failure drops the in-flight
    /// review call.
    Concurrent,
}

/// Composes a [`Movie`] from a movie-info upstream and a review upstream.
///
/// Holds no per-request state, so one instance is shared by every request.
pub struct MovieAggregator<M, R, S = TokioSleeper> {
    movie_infos: M,
    reviews: R,
    retry: RetryPolicy,
    mode: FetchMode,
    sleeper: S,
}

impl<M: Upstream, R: Upstream> MovieAggregator<M, R> {
    pub fn new(movie_infos: M, reviews: R, retry: RetryPolicy) -> Self {
        Self {
            movie_infos,
            reviews,
            retry,
            mode: FetchMode::default(),
            sleeper: TokioSleeper,
        }
    }
}

impl<M, R, S> MovieAggregator<M, R, S> {
    pub fn with_fetch_mode(mut self, mode: FetchMode) -> Self {
        self.mode = mode;
        self
    }

    /// Replace the backoff sleeper (tests use one that does not wait).
    pub fn with_sleeper<S2: Sleeper>(self, sleeper: S2) -> MovieAggregator<M, R, S2> {
        MovieAggregator {
            movie_infos: self.movie_infos,
            reviews: self.reviews,
            retry: self.retry,
            mode: self.mode,
            sleeper,
        }
    }

    pub fn movie_infos(&self) -> &M {
        &self.movie_infos
    }

    pub fn reviews(&self) -> &R {
        &self.reviews
    }

    pub fn retry_policy(&self) -> &RetryPolicy {
        &self.retry
    }

    pub fn fetch_mode(&self) -> FetchMode {
        self.mode
    }
}

impl<M: Upstream, R: Upstream, S: Sleeper> MovieAggregator<M, R, S> {
    /// Fetch the movie info and reviews for `id` and join them.
    #[tracing::instrument(skip(self), fields(mode = ?self.mode))]
    pub async fn get_movie(&self, id: &str) -> Result<Movie, AggregationError> {
        let (movie_info, reviews) = match self.mode {
            FetchMode::Sequential => {
                let movie_info = self.fetch_movie_info(id).await?;
                let reviews = self.fetch_reviews(id).await?;
                (movie_info, reviews)
            }
            FetchMode::Concurrent => {
                // The review leg never fails the join itself, so only a
                // movie-info failure can short-circuit it.
                let (movie_info, reviews) = tokio::try_join!(
                    self.fetch_movie_info(id),
                    async { Ok::<_, AggregationError>(self.fetch_reviews(id).await) },
                )?;
                (movie_info, reviews?)
            }
        };

        tracing::info!(reviews = reviews.len(), "movie aggregated");
        Ok(Movie::new(movie_info, reviews))
    }

    /// Movie-info leg: `GET /movieinfos/{id}` under the retry policy.
    ///
    /// The id travels as one encoded path segment. Ids that no URL can carry
    /// as a segment (`""`, `.`, `..`) cannot name a movie and are not found
    /// without a call.
    pub async fn fetch_movie_info(&self, id: &str) -> Result<MovieInfo, AggregationError> {
        if !is_addressable(id) {
            tracing::debug!(id, "id is not a usable path segment");
            return Err(AggregationError::MovieInfoNotFound {
                status: 404,
                message: not_found_message(id),
            });
        }
        let segments = ["movieinfos", id];
        let outcome = self
            .retry
            .run(&self.sleeper, || {
                self.movie_infos.fetch::<MovieInfo>(&segments, &[])
            })
            .await;
        movie_info_result(outcome, Some(id))
    }

    /// Review leg: `GET /reviews?movieInfoId={id}` under the retry policy.
    ///
    /// A client fault from the review service means "no reviews" and yields an
    /// empty list.
    pub async fn fetch_reviews(&self, id: &str) -> Result<Vec<Review>, AggregationError> {
        let query = [("movieInfoId", id)];
        let outcome = self
            .retry
            .run(&self.sleeper, || {
                self.reviews.fetch::<Vec<Review>>(&["reviews"], &query)
            })
            .await;

        match outcome {
            UpstreamOutcome::Success(reviews) => Ok(reviews),
            UpstreamOutcome::ClientError { status, body } => {
                tracing::debug!(
                    upstream = self.reviews.name(),
                    status,
                    %body,
                    "no reviews available, continuing with an empty list"
                );
                Ok(Vec::new())
            }
            UpstreamOutcome::ServerError { status, body } => Err(AggregationError::upstream(
                UpstreamService::Reviews,
                Some(status),
                body,
            )),
            UpstreamOutcome::TransportError(cause) => Err(AggregationError::upstream(
                UpstreamService::Reviews,
                None,
                cause,
            )),
        }
    }
}

impl<R, S> MovieAggregator<HttpUpstream, R, S> {
    /// Open the movie-info service's live NDJSON stream.
    ///
    /// Not retried: a stream is opened once per subscriber and its failure is
    /// reported straight back.
    pub async fn movie_info_stream(&self) -> Result<Response, AggregationError> {
        let outcome = self.movie_infos.open_stream(&["movieinfos", "stream"]).await;
        movie_info_result(outcome, None)
    }
}

/// Map a movie-info outcome onto the aggregation result.
///
/// With an `id`, a 404 gets the not-found message for that id; otherwise the
/// upstream body is passed through.
fn movie_info_result<T>(
    outcome: UpstreamOutcome<T>,
    id: Option<&str>,
) -> Result<T, AggregationError> {
    match outcome {
        UpstreamOutcome::Success(value) => Ok(value),
        UpstreamOutcome::ClientError { status, body } => {
            let message = match id {
                Some(id) if status == 404 => not_found_message(id),
                _ => body,
            };
            Err(AggregationError::MovieInfoNotFound { status, message })
        }
        UpstreamOutcome::ServerError { status, body } => Err(AggregationError::upstream(
            UpstreamService::MovieInfo,
            Some(status),
            body,
        )),
        UpstreamOutcome::TransportError(cause) => Err(AggregationError::upstream(
            UpstreamService::MovieInfo,
            None,
            cause,
        )),
    }
}

fn not_found_message(id: &str) -> String {
    format!("There is no MovieInfo available for the passed id {}", id)
}
