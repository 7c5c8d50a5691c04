//! Handler: `GET /subtexts` — locate fragments, submit the results, relay the reply.

use std::sync::Arc;

use axum::extract::State;
use axum::Json;
use serde_json::Value;

use fizz_subtext::{locate, parse_fragments, parse_text, ResultEnvelope};

use crate::types::ServerResult;

use super::AppState;

/// Fetch text and fragments together, search, and POST the envelope onward.
///
/// Returns whatever JSON the submission endpoint answers with.
pub async fn search_and_submit(state: &AppState) -> ServerResult<Value> {
    let text_url = state.endpoints.text_to_search();
    let fragments_url = state.endpoints.subtexts();

    let (text_json, fragments_json) = tokio::try_join!(
        state.fetcher.get_json(&text_url),
        state.fetcher.get_json(&fragments_url),
    )?;

    let text = parse_text(&text_json)?;
    let fragments = parse_fragments(&fragments_json)?;
    let results = locate(&fragments, &text);

    tracing::info!(
        fragments = fragments.len(),
        results = results.len(),
        "Submitting fragment results"
    );

    let envelope = ResultEnvelope::new(state.candidate.as_str(), text, results);
    state
        .fetcher
        .post_json(&state.endpoints.submit_results(), &envelope)
        .await
}

pub async fn handle_subtexts(State(state): State<Arc<AppState>>) -> ServerResult<Json<Value>> {
    search_and_submit(&state).await.map(Json)
}
