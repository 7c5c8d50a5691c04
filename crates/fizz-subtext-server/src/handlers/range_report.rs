//! Handler: `GET /` — divisor-annotated range report as plain text.

use std::sync::Arc;

use axum::extract::State;

use fizz_subtext::{build_report, DivisorMapping, Range};

use crate::types::ServerResult;

use super::AppState;

/// Fetch the range and divisor payloads together and render the report.
pub async fn range_report(state: &AppState) -> ServerResult<String> {
    let range_url = state.endpoints.range_info();
    let divisor_url = state.endpoints.divisor_info();

    let (range_json, divisor_json) = tokio::try_join!(
        state.fetcher.get_json(&range_url),
        state.fetcher.get_json(&divisor_url),
    )?;

    let range = Range::from_payload(&range_json)?;
    let divisors = DivisorMapping::from_payload(&divisor_json)?;

    tracing::info!(min = range.min, max = range.max, "Serving range report");
    Ok(build_report(&range, &divisors))
}

pub async fn handle_range_report(State(state): State<Arc<AppState>>) -> ServerResult<String> {
    range_report(&state).await
}
