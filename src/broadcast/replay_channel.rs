use std::sync::{Arc, PoisonError, RwLock};

use futures::stream::{self, Stream};
use tokio::sync::Notify;

struct Shared<T> {
    log: RwLock<Vec<T>>,
    published: Notify,
}

/// Append-only replay log shared by one writer and many readers.
///
/// Cloning is cheap and every clone publishes into the same log.
pub struct ReplayChannel<T> {
    shared: Arc<Shared<T>>,
}

impl<T> Clone for ReplayChannel<T> {
    fn clone(&self) -> Self {
        Self {
            shared: Arc::clone(&self.shared),
        }
    }
}

impl<T: Clone> Default for ReplayChannel<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone> ReplayChannel<T> {
    pub fn new() -> Self {
        Self {
            shared: Arc::new(Shared {
                log: RwLock::new(Vec::new()),
                published: Notify::new(),
            }),
        }
    }

    /// Append `item` and wake every waiting subscriber. Never waits on readers.
    pub fn publish(&self, item: T) {
        self.shared
            .log
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .push(item);
        self.shared.published.notify_waiters();
    }

    /// Attach a new reader positioned at the start of the log.
    pub fn subscribe(&self) -> Subscription<T> {
        Subscription {
            shared: Arc::clone(&self.shared),
            cursor: 0,
        }
    }

    /// Every item published so far, in order.
    pub fn snapshot(&self) -> Vec<T> {
        self.shared
            .log
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn len(&self) -> usize {
        self.shared
            .log
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// One reader's position in a [`ReplayChannel`].
pub struct Subscription<T> {
    shared: Arc<Shared<T>>,
    cursor: usize,
}

impl<T: Clone> Subscription<T> {
    /// Next buffered item, or `None` if the reader has caught up.
    pub fn try_next(&mut self) -> Option<T> {
        let log = self
            .shared
            .log
            .read()
            .unwrap_or_else(PoisonError::into_inner);
        let item = log.get(self.cursor).cloned()?;
        self.cursor += 1;
        Some(item)
    }

    /// Wait for the next item. The log never ends, so this always yields
    /// eventually as long as someone publishes.
    pub async fn next(&mut self) -> T {
        loop {
            // Register interest before checking, so a publish between the
            // check and the await is not missed.
            let shared = Arc::clone(&self.shared);
            let published = shared.published.notified();
            tokio::pin!(published);
            published.as_mut().enable();

            if let Some(item) = self.try_next() {
                return item;
            }
            published.await;
        }
    }

    /// Number of items this reader has consumed.
    pub fn position(&self) -> usize {
        self.cursor
    }
}

impl<T: Clone + Send + Sync + 'static> Subscription<T> {
    /// Turn the subscription into an endless stream.
    pub fn into_stream(self) -> impl Stream<Item = T> + Send + 'static {
        stream::unfold(self, |mut subscription| async move {
            let item = subscription.next().await;
            Some((item, subscription))
        })
    }
}
