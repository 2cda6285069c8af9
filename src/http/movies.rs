use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::extract::{Path, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde_json::json;

use crate::aggregator::{AggregationError, MovieAggregator};
use crate::config::Config;
use crate::upstream::HttpUpstream;

use super::NDJSON;

/// The aggregator as wired for production: both legs over HTTP.
pub type HttpAggregator = MovieAggregator<HttpUpstream, HttpUpstream>;

/// Shared handler state.
#[derive(Clone)]
pub struct AppState {
    pub aggregator: Arc<HttpAggregator>,
    pub request_timeout: Duration,
}

impl AppState {
    pub fn new(aggregator: HttpAggregator, request_timeout: Duration) -> Self {
        Self {
            aggregator: Arc::new(aggregator),
            request_timeout,
        }
    }

    pub fn from_config(config: &Config) -> Result<Self, reqwest::Error> {
        Ok(Self::new(build_aggregator(config)?, config.request_timeout))
    }
}

/// Build both HTTP upstreams on one connection pool and wire the aggregator.
pub fn build_aggregator(config: &Config) -> Result<HttpAggregator, reqwest::Error> {
    let client = reqwest::Client::builder()
        .connect_timeout(config.upstream_timeout)
        .build()?;

    let movie_infos = HttpUpstream::new(
        client.clone(),
        &config.movie_info_url,
        "MetadataService",
        config.upstream_timeout,
    );
    let reviews = HttpUpstream::new(
        client,
        &config.reviews_url,
        "ReviewsService",
        config.upstream_timeout,
    );

    Ok(MovieAggregator::new(movie_infos, reviews, config.retry_policy())
        .with_fetch_mode(config.fetch_mode))
}

/// Build the aggregator's axum `Router`.
///
/// - `GET /health`
/// - `GET /movies/stream`: the movie-info feed, proxied as NDJSON
/// - `GET /movies/:id`: one aggregated [`Movie`](crate::Movie)
///
/// The static `stream` route wins over `:id`, so a movie whose id is the
/// literal `stream` cannot be looked up through this router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/movies/stream", get(movie_stream_handler))
        .route("/movies/:id", get(movie_handler))
        .with_state(state)
}

/// Serve the aggregator at the given address (e.g. `"0.0.0.0:8082"`).
pub async fn serve(config: Config, addr: &str) -> Result<(), Box<dyn std::error::Error>> {
    let state = AppState::from_config(&config)?;
    let app = router(state);
    let listener = tokio::net::TcpListener::bind(addr).await?;

    tracing::info!(
        %addr,
        movie_info_url = %config.movie_info_url,
        reviews_url = %config.reviews_url,
        "movies aggregator listening"
    );
    axum::serve(listener, app).await?;
    Ok(())
}

/// `GET /health`
async fn health_handler() -> impl IntoResponse {
    Json(json!({ "ok": true }))
}

/// `GET /movies/:id`
async fn movie_handler(State(state): State<AppState>, Path(id): Path<String>) -> Response {
    let lookup = state.aggregator.get_movie(&id);
    match tokio::time::timeout(state.request_timeout, lookup).await {
        Ok(Ok(movie)) => (StatusCode::OK, Json(movie)).into_response(),
        Ok(Err(e)) => error_response(&e),
        Err(_) => {
            tracing::error!(movie_id = %id, timeout = ?state.request_timeout, "movie lookup timed out");
            (
                StatusCode::GATEWAY_TIMEOUT,
                format!("Timed out retrieving movie {}", id),
            )
                .into_response()
        }
    }
}

/// `GET /movies/stream`
async fn movie_stream_handler(State(state): State<AppState>) -> Response {
    match state.aggregator.movie_info_stream().await {
        Ok(upstream) => (
            [(header::CONTENT_TYPE, NDJSON)],
            Body::from_stream(upstream.bytes_stream()),
        )
            .into_response(),
        Err(e) => error_response(&e),
    }
}

fn error_response(err: &AggregationError) -> Response {
    let status =
        StatusCode::from_u16(err.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    if err.is_client_fault() {
        tracing::info!(%status, error = %err, "movie lookup rejected");
    } else {
        tracing::error!(%status, service = %err.service(), error = %err, "upstream failure");
    }
    (status, err.to_string()).into_response()
}
