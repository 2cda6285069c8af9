//! Replay broadcast: an append-only log that every subscriber reads from the
//! start.
//!
//! The movie-info creation path publishes each saved record; any number of
//! subscribers attach at any time, receive the full backlog first, then live
//! records as they are published.
//!
//! ```
//! use movies_rust::broadcast::ReplayChannel;
//!
//! let channel = ReplayChannel::new();
//! channel.publish(1);
//! channel.publish(2);
//!
//! let mut late = channel.subscribe();
//! channel.publish(3);
//!
//! assert_eq!(late.try_next(), Some(1));
//! assert_eq!(late.try_next(), Some(2));
//! assert_eq!(late.try_next(), Some(3));
//! assert_eq!(late.try_next(), None);
//! ```

mod replay_channel;

pub use replay_channel::{ReplayChannel, Subscription};
