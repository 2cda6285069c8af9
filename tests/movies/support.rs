//! Stub upstreams standing in for the movie-info and review services.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::extract::{Path, Query, State};
use axum::http::{header, StatusCode, Uri};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::Router;
use movies_rust::http::{self, AppState};
use movies_rust::{Config, FetchMode};
use serde_json::json;

/// A canned response.
#[derive(Clone)]
pub struct Stub {
    pub status: StatusCode,
    pub body: String,
    pub delay: Duration,
}

impl Stub {
    pub fn json(value: serde_json::Value) -> Self {
        Self {
            status: StatusCode::OK,
            body: value.to_string(),
            delay: Duration::ZERO,
        }
    }

    pub fn status(status: u16, body: &str) -> Self {
        Self {
            status: StatusCode::from_u16(status).unwrap(),
            body: body.to_string(),
            delay: Duration::ZERO,
        }
    }

    pub fn delayed(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }
}

/// One server playing both upstreams under `/v1`, counting every hit.
pub struct FakeUpstreams {
    movie_info: Stub,
    reviews: Stub,
    movie_info_hits: AtomicUsize,
    movie_info_requests: Mutex<Vec<(String, String)>>,
    review_hits: AtomicUsize,
    review_queries: Mutex<Vec<HashMap<String, String>>>,
}

impl FakeUpstreams {
    pub fn new(movie_info: Stub, reviews: Stub) -> Arc<Self> {
        Arc::new(Self {
            movie_info,
            reviews,
            movie_info_hits: AtomicUsize::new(0),
            movie_info_requests: Mutex::new(Vec::new()),
            review_hits: AtomicUsize::new(0),
            review_queries: Mutex::new(Vec::new()),
        })
    }

    pub fn movie_info_hits(&self) -> usize {
        self.movie_info_hits.load(Ordering::SeqCst)
    }

    /// Raw request paths seen by the movie-info stub.
    pub fn movie_info_paths(&self) -> Vec<String> {
        let requests = self.movie_info_requests.lock().unwrap();
        requests.iter().map(|(path, _)| path.clone()).collect()
    }

    /// Ids as the movie-info stub decoded them from the path.
    pub fn movie_info_ids(&self) -> Vec<String> {
        let requests = self.movie_info_requests.lock().unwrap();
        requests.iter().map(|(_, id)| id.clone()).collect()
    }

    pub fn review_hits(&self) -> usize {
        self.review_hits.load(Ordering::SeqCst)
    }

    pub fn review_queries(&self) -> Vec<HashMap<String, String>> {
        self.review_queries.lock().unwrap().clone()
    }
}

async fn respond(stub: &Stub) -> impl IntoResponse {
    if !stub.delay.is_zero() {
        tokio::time::sleep(stub.delay).await;
    }
    (
        stub.status,
        [(header::CONTENT_TYPE, "application/json")],
        stub.body.clone(),
    )
}

async fn movie_info_handler(
    State(fake): State<Arc<FakeUpstreams>>,
    uri: Uri,
    Path(id): Path<String>,
) -> impl IntoResponse {
    fake.movie_info_hits.fetch_add(1, Ordering::SeqCst);
    fake.movie_info_requests
        .lock()
        .unwrap()
        .push((uri.path().to_string(), id));
    respond(&fake.movie_info).await
}

async fn reviews_handler(
    State(fake): State<Arc<FakeUpstreams>>,
    Query(query): Query<HashMap<String, String>>,
) -> impl IntoResponse {
    fake.review_hits.fetch_add(1, Ordering::SeqCst);
    fake.review_queries.lock().unwrap().push(query);
    respond(&fake.reviews).await
}

/// Bind to port 0, serve `app`, and return the base URL.
pub async fn start_server(app: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}

/// Start the stub upstreams and return their `/v1` base URL.
pub async fn start_upstreams(fake: Arc<FakeUpstreams>) -> String {
    let app = Router::new()
        .route("/v1/movieinfos/:id", get(movie_info_handler))
        .route("/v1/reviews", get(reviews_handler))
        .with_state(fake);
    format!("{}/v1", start_server(app).await)
}

/// Config pointing both legs at `upstream_base`, with instant retries.
pub fn test_config(upstream_base: &str) -> Config {
    Config {
        base_delay: Duration::ZERO,
        request_timeout: Duration::from_secs(10),
        ..Config::new(upstream_base, upstream_base)
    }
}

/// Start the aggregator for `config` and return its base URL.
pub async fn start_aggregator(config: Config) -> String {
    let state = AppState::from_config(&config).unwrap();
    start_server(http::router(state)).await
}

/// Stub upstreams plus an aggregator in front of them.
pub async fn start_stack(fake: Arc<FakeUpstreams>, mode: FetchMode) -> String {
    let upstream = start_upstreams(fake).await;
    let config = Config {
        fetch_mode: mode,
        ..test_config(&upstream)
    };
    start_aggregator(config).await
}

pub fn batman_begins() -> serde_json::Value {
    json!({
        "id": "1",
        "title": "Batman Begins",
        "releaseYear": 2005,
        "cast": ["Christian Bale", "Michael Caine"],
        "releaseDate": "2005-06-15"
    })
}

/// Two reviews for movie 1, shaped like the review service emits them.
pub fn two_reviews() -> serde_json::Value {
    json!([
        { "reviewId": "1", "movieInfoId": 1, "comment": "Awesome Movie", "rating": 9.0 },
        { "reviewId": "2", "movieInfoId": 1, "comment": "Excellent Movie", "rating": 8.0 }
    ])
}
