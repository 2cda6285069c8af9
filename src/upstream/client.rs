use std::time::Duration;

use reqwest::{Client, Response, Url};
use serde::de::DeserializeOwned;

use super::{Upstream, UpstreamOutcome};

/// HTTP upstream backed by a shared `reqwest::Client`.
///
/// Path segments are appended to `base_url`, so a base of `http://host/v1` and
/// the segments `["movieinfos", "1"]` request `http://host/v1/movieinfos/1`.
#[derive(Debug, Clone)]
pub struct HttpUpstream {
    client: Client,
    base_url: String,
    name: String,
    timeout: Duration,
}

impl HttpUpstream {
    pub fn new(
        client: Client,
        base_url: impl Into<String>,
        name: impl Into<String>,
        timeout: Duration,
    ) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            client,
            base_url,
            name: name.into(),
            timeout,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Join `segments` onto the base URL, percent-encoding each one as a
    /// single path segment.
    pub(crate) fn url(&self, segments: &[&str]) -> Result<Url, String> {
        if let Some(segment) = segments.iter().find(|s| !is_addressable(s)) {
            return Err(format!("{:?} cannot be sent as a path segment", segment));
        }
        let mut url = Url::parse(&self.base_url)
            .map_err(|e| format!("invalid base url {}: {}", self.base_url, e))?;
        url.path_segments_mut()
            .map_err(|_| format!("base url {} cannot carry a path", self.base_url))?
            .pop_if_empty()
            .extend(segments.iter().copied());
        Ok(url)
    }

    /// Open a long-lived GET and hand back the unread response on 2xx.
    ///
    /// No per-request timeout is applied, so the body can be streamed for as
    /// long as the upstream keeps it open. Non-2xx responses are read in full
    /// and reported the same way [`fetch`](Upstream::fetch) reports them.
    pub async fn open_stream(&self, segments: &[&str]) -> UpstreamOutcome<Response> {
        let url = match self.url(segments) {
            Ok(url) => url,
            Err(cause) => return UpstreamOutcome::TransportError(cause),
        };
        tracing::debug!(upstream = %self.name, %url, "opening upstream stream");

        let response = match self.client.get(url).send().await {
            Ok(response) => response,
            Err(e) => return UpstreamOutcome::TransportError(e.to_string()),
        };

        let status = response.status();
        if status.is_success() {
            return UpstreamOutcome::Success(response);
        }

        match response.text().await {
            Ok(body) => UpstreamOutcome::failure(status.as_u16(), body),
            Err(e) => UpstreamOutcome::TransportError(e.to_string()),
        }
    }
}

/// Whether `segment` survives URL normalization as one distinct segment.
/// Empty, `.` and `..` segments are collapsed or dropped by URL parsers.
pub(crate) fn is_addressable(segment: &str) -> bool {
    !matches!(segment, "" | "." | "..")
}

impl Upstream for HttpUpstream {
    fn name(&self) -> &str {
        &self.name
    }

    async fn fetch<T>(&self, segments: &[&str], query: &[(&str, &str)]) -> UpstreamOutcome<T>
    where
        T: DeserializeOwned + Send,
    {
        let url = match self.url(segments) {
            Ok(url) => url,
            Err(cause) => return UpstreamOutcome::TransportError(cause),
        };
        tracing::debug!(upstream = %self.name, %url, ?query, "calling upstream");

        let response = match self
            .client
            .get(url)
            .query(query)
            .timeout(self.timeout)
            .send()
            .await
        {
            Ok(response) => response,
            Err(e) => return UpstreamOutcome::TransportError(e.to_string()),
        };

        let status = response.status().as_u16();
        match response.text().await {
            Ok(body) => UpstreamOutcome::from_parts(status, &body),
            Err(e) => UpstreamOutcome::TransportError(e.to_string()),
        }
    }
}
