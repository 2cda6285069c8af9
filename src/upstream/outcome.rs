use std::fmt;

use serde::de::DeserializeOwned;

/// Result of a single upstream call.
#[derive(Debug, Clone, PartialEq)]
pub enum UpstreamOutcome<T> {
    /// 2xx with a body that parsed into `T`.
    Success(T),
    /// 4xx. `body` is the upstream's error message.
    ClientError { status: u16, body: String },
    /// 5xx, or any other status that is neither success nor a client fault.
    ServerError { status: u16, body: String },
    /// Connection failure, timeout, or a response that could not be read or parsed.
    TransportError(String),
}

/// Binary split of failed outcomes that decides whether a retry can help.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorClass {
    /// Caller-facing fault. Retrying cannot change the outcome.
    Client,
    /// Upstream fault (server error or transport failure). Retryable.
    Server,
}

/// Classify a failed outcome. Returns `None` for `Success`.
pub fn classify<T>(outcome: &UpstreamOutcome<T>) -> Option<ErrorClass> {
    match outcome {
        UpstreamOutcome::Success(_) => None,
        UpstreamOutcome::ClientError { .. } => Some(ErrorClass::Client),
        UpstreamOutcome::ServerError { .. } | UpstreamOutcome::TransportError(_) => {
            Some(ErrorClass::Server)
        }
    }
}

impl<T> UpstreamOutcome<T> {
    /// Build an outcome from a raw status code and response body.
    ///
    /// A 2xx body that does not parse into `T` is a `TransportError`.
    pub fn from_parts(status: u16, body: &str) -> Self
    where
        T: DeserializeOwned,
    {
        match status {
            200..=299 => match serde_json::from_str(body) {
                Ok(value) => UpstreamOutcome::Success(value),
                Err(e) => UpstreamOutcome::TransportError(format!(
                    "malformed response body (status {}): {}",
                    status, e
                )),
            },
            _ => Self::failure(status, body.to_string()),
        }
    }

    /// Outcome for a response that is known not to be a success.
    ///
    /// 4xx is a client fault; everything else is charged to the upstream.
    pub fn failure(status: u16, body: String) -> Self {
        match status {
            400..=499 => UpstreamOutcome::ClientError { status, body },
            _ => UpstreamOutcome::ServerError { status, body },
        }
    }

    pub fn class(&self) -> Option<ErrorClass> {
        classify(self)
    }

    pub fn is_success(&self) -> bool {
        matches!(self, UpstreamOutcome::Success(_))
    }

    /// HTTP status of the upstream response, if one was received.
    pub fn status(&self) -> Option<u16> {
        match self {
            UpstreamOutcome::ClientError { status, .. }
            | UpstreamOutcome::ServerError { status, .. } => Some(*status),
            UpstreamOutcome::Success(_) | UpstreamOutcome::TransportError(_) => None,
        }
    }

    /// Transform the success value, keeping failures as they are.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> UpstreamOutcome<U> {
        match self {
            UpstreamOutcome::Success(value) => UpstreamOutcome::Success(f(value)),
            UpstreamOutcome::ClientError { status, body } => {
                UpstreamOutcome::ClientError { status, body }
            }
            UpstreamOutcome::ServerError { status, body } => {
                UpstreamOutcome::ServerError { status, body }
            }
            UpstreamOutcome::TransportError(cause) => UpstreamOutcome::TransportError(cause),
        }
    }
}

impl<T> fmt::Display for UpstreamOutcome<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UpstreamOutcome::Success(_) => write!(f, "success"),
            UpstreamOutcome::ClientError { status, body } => {
                write!(f, "client error {}: {}", status, body)
            }
            UpstreamOutcome::ServerError { status, body } => {
                write!(f, "server error {}: {}", status, body)
            }
            UpstreamOutcome::TransportError(cause) => write!(f, "transport error: {}", cause),
        }
    }
}
