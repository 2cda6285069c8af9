//! Aggregator integration tests.
//!
//! Each test starts stub upstreams and the aggregator on ephemeral ports and
//! drives them with reqwest.

#![cfg(feature = "http")]

mod support;
