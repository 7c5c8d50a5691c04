//! Inbound HTTP transport.

pub mod http;

pub use http::{router, HttpTransport};
