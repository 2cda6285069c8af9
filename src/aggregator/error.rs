use std::fmt;

use thiserror::Error;

/// Which upstream a failure came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UpstreamService {
    MovieInfo,
    Reviews,
}

impl UpstreamService {
    /// Service name as it appears in error messages and logs.
    pub fn service_name(&self) -> &'static str {
        match self {
            UpstreamService::MovieInfo => "MetadataService",
            UpstreamService::Reviews => "ReviewsService",
        }
    }
}

impl fmt::Display for UpstreamService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.service_name())
    }
}

/// Coarse classification of an aggregation failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    MetadataNotFound,
    MetadataUpstreamError,
    ReviewsUpstreamError,
}

/// Why an aggregation short-circuited.
///
/// The `Display` output is the plain-text body returned to HTTP callers.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AggregationError {
    /// The movie-info service rejected the lookup (4xx). Not retried.
    #[error("{message}")]
    MovieInfoNotFound { status: u16, message: String },

    /// An upstream kept failing with a server fault until retries ran out.
    /// `status` is `None` when no response was received at all.
    #[error("Server Exception in {service} {body}")]
    Upstream {
        service: UpstreamService,
        status: Option<u16>,
        body: String,
    },
}

impl AggregationError {
    pub fn upstream(service: UpstreamService, status: Option<u16>, body: impl Into<String>) -> Self {
        AggregationError::Upstream {
            service,
            status,
            body: body.into(),
        }
    }

    pub fn kind(&self) -> FailureKind {
        match self {
            AggregationError::MovieInfoNotFound { .. } => FailureKind::MetadataNotFound,
            AggregationError::Upstream {
                service: UpstreamService::MovieInfo,
                ..
            } => FailureKind::MetadataUpstreamError,
            AggregationError::Upstream {
                service: UpstreamService::Reviews,
                ..
            } => FailureKind::ReviewsUpstreamError,
        }
    }

    /// The upstream that produced the failure.
    pub fn service(&self) -> UpstreamService {
        match self {
            AggregationError::MovieInfoNotFound { .. } => UpstreamService::MovieInfo,
            AggregationError::Upstream { service, .. } => *service,
        }
    }

    /// Map this error to the HTTP status returned to the caller.
    pub fn status_code(&self) -> u16 {
        match self {
            AggregationError::MovieInfoNotFound { status, .. } => *status,
            AggregationError::Upstream { .. } => 500,
        }
    }

    /// Whether the caller is at fault (and retrying the request is pointless).
    pub fn is_client_fault(&self) -> bool {
        matches!(self, AggregationError::MovieInfoNotFound { .. })
    }
}
