//! Request handlers and the state they share.

pub mod range_report;
pub mod subtexts;

use crate::config::{Endpoints, ServerConfig};
use crate::fetch::Fetcher;
use crate::types::ServerResult;

pub use range_report::{handle_range_report, range_report};
pub use subtexts::{handle_subtexts, search_and_submit};

/// Immutable state shared by every request.
#[derive(Clone)]
pub struct AppState {
    pub fetcher: Fetcher,
    pub endpoints: Endpoints,
    pub candidate: String,
}

impl AppState {
    pub fn new(config: &ServerConfig) -> ServerResult<Self> {
        Ok(Self {
            fetcher: Fetcher::new(config.retry)?,
            endpoints: config.endpoints.clone(),
            candidate: config.candidate.clone(),
        })
    }
}
