//! In-process upstream that replays scripted responses. Test-only.

use std::collections::VecDeque;
use std::sync::Mutex;

use serde::de::DeserializeOwned;

use super::{Upstream, UpstreamOutcome};

#[derive(Debug, Clone)]
pub(crate) enum Reply {
    /// Status code and raw body, parsed like an HTTP response would be.
    Status(u16, String),
    /// Connection-level failure.
    Transport(&'static str),
    /// Never resolves.
    Hang,
}

impl Reply {
    pub(crate) fn json(value: serde_json::Value) -> Self {
        Reply::Status(200, value.to_string())
    }

    pub(crate) fn status(status: u16, body: &str) -> Self {
        Reply::Status(status, body.to_string())
    }
}

/// Scripted upstream. Replies are consumed in order; the last one repeats.
pub(crate) struct ScriptedUpstream {
    name: &'static str,
    replies: Mutex<VecDeque<Reply>>,
    calls: Mutex<Vec<(Vec<String>, Vec<(String, String)>)>>,
}

impl ScriptedUpstream {
    pub(crate) fn new(name: &'static str, replies: Vec<Reply>) -> Self {
        Self {
            name,
            replies: Mutex::new(replies.into()),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    pub(crate) fn calls(&self) -> Vec<(Vec<String>, Vec<(String, String)>)> {
        self.calls.lock().unwrap().clone()
    }

    fn next_reply(&self) -> Reply {
        let mut replies = self.replies.lock().unwrap();
        if replies.len() > 1 {
            replies.pop_front().unwrap()
        } else {
            replies
                .front()
                .cloned()
                .unwrap_or(Reply::Transport("no scripted reply"))
        }
    }
}

impl Upstream for ScriptedUpstream {
    fn name(&self) -> &str {
        self.name
    }

    async fn fetch<T>(&self, segments: &[&str], query: &[(&str, &str)]) -> UpstreamOutcome<T>
    where
        T: DeserializeOwned + Send,
    {
        self.calls.lock().unwrap().push((
            segments.iter().map(|s| s.to_string()).collect(),
            query
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        ));

        match self.next_reply() {
            Reply::Status(status, body) => UpstreamOutcome::from_parts(status, &body),
            Reply::Transport(cause) => UpstreamOutcome::TransportError(cause.to_string()),
            Reply::Hang => std::future::pending().await,
        }
    }
}
