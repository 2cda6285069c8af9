use std::convert::Infallible;

use axum::body::Body;
use axum::extract::State;
use axum::http::header;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::Router;
use futures::StreamExt;

use crate::broadcast::ReplayChannel;
use crate::domain::MovieInfo;

use super::NDJSON;

/// Router exposing a movie-info replay channel as an NDJSON stream.
///
/// Each connection gets its own subscription, so it receives every record
/// published so far followed by live ones.
pub fn feed_router(channel: ReplayChannel<MovieInfo>) -> Router {
    Router::new()
        .route("/movieinfos/stream", get(stream_handler))
        .with_state(channel)
}

/// `GET /movieinfos/stream`
async fn stream_handler(State(channel): State<ReplayChannel<MovieInfo>>) -> impl IntoResponse {
    let lines = channel
        .subscribe()
        .into_stream()
        .filter_map(|info| async move {
            match serde_json::to_string(&info) {
                Ok(mut line) => {
                    line.push('\n');
                    Some(Ok::<_, Infallible>(line))
                }
                Err(e) => {
                    tracing::warn!(error = %e, "skipping unserializable movie info");
                    None
                }
            }
        });

    ([(header::CONTENT_TYPE, NDJSON)], Body::from_stream(lines))
}
