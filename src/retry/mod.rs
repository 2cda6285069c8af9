//! Bounded retry with exponential backoff for upstream calls.
//!
//! Only outcomes classified as [`ErrorClass::Server`](crate::upstream::ErrorClass)
//! are retried. Client faults return immediately, and after the last attempt
//! the final failure is handed back unmodified.
//!
//! ## Example
//!
//! ```ignore
//! use std::time::Duration;
//! use movies_rust::retry::{RetryPolicy, TokioSleeper};
//!
//! let policy = RetryPolicy::new(4, Duration::from_secs(1));
//! let outcome = policy
//!     .run(&TokioSleeper, || upstream.fetch::<MovieInfo>(&["movieinfos", "1"], &[]))
//!     .await;
//! ```

mod policy;
mod sleeper;

pub use policy::RetryPolicy;
pub use sleeper::{Sleeper, TokioSleeper};
