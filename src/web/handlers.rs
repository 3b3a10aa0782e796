//! HTTP request handlers

use super::state::AppState;
use crate::search::{SearchRequest, SearchResponse};
use axum::{
    extract::{Query, State},
    response::IntoResponse,
    Json,
};
use serde::Serialize;

/// Search handler
///
/// Both `query` and `platform` are required; a missing parameter is rejected
/// by the `Query` extractor before any search work starts. Every search
/// outcome, including failures, is a 200 JSON envelope.
pub async fn search(
    State(state): State<AppState>,
    Query(request): Query<SearchRequest>,
) -> Json<SearchResponse> {
    Json(state.search.execute(&request).await)
}

#[derive(Debug, Serialize)]
pub struct PlatformsResponse {
    pub platforms: Vec<&'static str>,
}

/// Enabled platforms
pub async fn platforms(State(state): State<AppState>) -> Json<PlatformsResponse> {
    Json(PlatformsResponse {
        platforms: state.registry.names(),
    })
}

/// Health check handler
pub async fn health(State(state): State<AppState>) -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "instance": state.instance_name(),
        "version": crate::VERSION
    }))
}
