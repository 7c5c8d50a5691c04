//! Upstream JSON fetching with fixed-count retry.

pub mod client;
pub mod retry;

pub use client::Fetcher;
pub use retry::{retry, RetryPolicy};
