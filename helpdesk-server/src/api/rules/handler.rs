//! Routing rule API handlers

use axum::{
    Json,
    extract::{Path, State},
};
use serde::Deserialize;
use shared::models::{RoutingDecision, RoutingRule, RuleCreate, RuleUpdate};

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::utils::error::AppResult;
use crate::utils::validation::{MAX_BODY_LEN, validate_required_text};

/// GET /api/rules - all routing rules
pub async fn list(
    State(state): State<ServerState>,
    _user: CurrentUser,
) -> AppResult<Json<Vec<RoutingRule>>> {
    Ok(Json(state.rules.list()))
}

/// POST /api/rules - create a routing rule
pub async fn create(
    State(state): State<ServerState>,
    user: CurrentUser,
    Json(payload): Json<RuleCreate>,
) -> AppResult<Json<RoutingRule>> {
    let rule = state.rules.create(payload)?;
    tracing::info!(
        rule_id = rule.id,
        action = rule.action.describe(),
        operator = user.username,
        "Routing rule created"
    );
    Ok(Json(rule))
}

/// PUT /api/rules/:id - partial update of a routing rule
pub async fn update(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<i64>,
    Json(payload): Json<RuleUpdate>,
) -> AppResult<Json<RoutingRule>> {
    let rule = state.rules.update(id, payload)?;
    tracing::info!(rule_id = id, operator = user.username, "Routing rule updated");
    Ok(Json(rule))
}

/// DELETE /api/rules/:id - delete a routing rule
pub async fn delete(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<i64>,
) -> AppResult<Json<bool>> {
    state.rules.delete(id)?;
    tracing::info!(rule_id = id, operator = user.username, "Routing rule deleted");
    Ok(Json(true))
}

/// POST /api/rules/:id/toggle - flip a rule's active flag
pub async fn toggle(
    State(state): State<ServerState>,
    _user: CurrentUser,
    Path(id): Path<i64>,
) -> AppResult<Json<RoutingRule>> {
    Ok(Json(state.rules.toggle_active(id)?))
}

#[derive(Deserialize)]
pub struct ClassifyRequest {
    pub text: String,
}

/// POST /api/rules/classify - dry-run classification against the
/// current rule set, without recording anything
pub async fn classify(
    State(state): State<ServerState>,
    _user: CurrentUser,
    Json(payload): Json<ClassifyRequest>,
) -> AppResult<Json<RoutingDecision>> {
    validate_required_text(&payload.text, "text", MAX_BODY_LEN)?;
    Ok(Json(state.rules.classify(&payload.text)))
}
