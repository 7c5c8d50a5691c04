//! fizz-subtext server — fetches upstream JSON with retries, serves range
//! reports and relays fragment search results.

pub mod config;
pub mod fetch;
pub mod handlers;
pub mod transport;
pub mod types;

pub use config::{ConfigOverrides, Endpoints, ServerConfig};
pub use fetch::{Fetcher, RetryPolicy};
pub use handlers::AppState;
pub use transport::HttpTransport;
pub use types::{ServerError, ServerResult};
