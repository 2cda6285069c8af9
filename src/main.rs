use std::time::Duration;

use clap::{Parser, ValueEnum};
use movies_rust::{http, Config, FetchMode};

#[derive(Parser)]
#[command(name = "movies-aggregator")]
#[command(about = "Composes movies from the movie-info and review services", long_about = None)]
struct Cli {
    /// Port to listen on
    #[arg(short, long, env = "MOVIES_PORT", default_value = "8082")]
    port: u16,

    /// Host to bind to
    #[arg(long, env = "MOVIES_HOST", default_value = "127.0.0.1")]
    host: String,

    /// Base URL of the movie-info service
    #[arg(long, env = "MOVIES_INFO_URL", default_value = "http://localhost:8080/v1")]
    movie_info_url: String,

    /// Base URL of the review service
    #[arg(long, env = "MOVIES_REVIEWS_URL", default_value = "http://localhost:8081/v1")]
    reviews_url: String,

    /// Attempts per upstream call, including the first
    #[arg(long, env = "MOVIES_RETRY_MAX_ATTEMPTS", default_value = "4")]
    max_attempts: u32,

    /// Backoff after the first failed attempt, in milliseconds
    #[arg(long, env = "MOVIES_RETRY_BASE_DELAY_MS", default_value = "1000")]
    base_delay_ms: u64,

    /// Whether reviews are fetched after or alongside the movie info
    #[arg(long, env = "MOVIES_FETCH_MODE", value_enum, default_value = "sequential")]
    fetch_mode: Mode,

    /// Timeout for a single upstream call, in milliseconds
    #[arg(long, env = "MOVIES_UPSTREAM_TIMEOUT_MS", default_value = "5000")]
    upstream_timeout_ms: u64,

    /// Deadline for one inbound request, in milliseconds
    #[arg(long, env = "MOVIES_REQUEST_TIMEOUT_MS", default_value = "30000")]
    request_timeout_ms: u64,
}

#[derive(Clone, Copy, ValueEnum)]
enum Mode {
    Sequential,
    Concurrent,
}

impl From<Mode> for FetchMode {
    fn from(mode: Mode) -> Self {
        match mode {
            Mode::Sequential => FetchMode::Sequential,
            Mode::Concurrent => FetchMode::Concurrent,
        }
    }
}

impl From<Cli> for Config {
    fn from(cli: Cli) -> Self {
        Config {
            movie_info_url: cli.movie_info_url,
            reviews_url: cli.reviews_url,
            max_attempts: cli.max_attempts,
            base_delay: Duration::from_millis(cli.base_delay_ms),
            fetch_mode: cli.fetch_mode.into(),
            upstream_timeout: Duration::from_millis(cli.upstream_timeout_ms),
            request_timeout: Duration::from_millis(cli.request_timeout_ms),
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let cli = Cli::parse();
    let addr = format!("{}:{}", cli.host, cli.port);

    http::serve(cli.into(), &addr).await
}
