//! Metrics API module
//!
//! Aggregated ticket counters for the dashboard.

use axum::{Json, Router, extract::State, routing::get};
use shared::client::MetricsResponse;

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::utils::error::AppResult;

pub fn router() -> Router<ServerState> {
    Router::new().route("/api/metrics", get(metrics))
}

/// GET /api/metrics - totals plus per-category/status/priority counts
async fn metrics(
    State(state): State<ServerState>,
    _user: CurrentUser,
) -> AppResult<Json<MetricsResponse>> {
    Ok(Json(state.tickets.metrics()))
}
