//! Ticket API handlers

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;
use shared::client::UpdateStatusRequest;
use shared::models::{Ticket, TicketStatus};

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::utils::error::AppResult;

#[derive(Deserialize)]
pub struct ListQuery {
    status: Option<TicketStatus>,
}

/// GET /api/tickets - list tickets, newest first
pub async fn list(
    State(state): State<ServerState>,
    _user: CurrentUser,
    Query(query): Query<ListQuery>,
) -> AppResult<Json<Vec<Ticket>>> {
    Ok(Json(state.tickets.list(query.status)))
}

/// GET /api/tickets/:id - single ticket
pub async fn get_by_id(
    State(state): State<ServerState>,
    _user: CurrentUser,
    Path(id): Path<i64>,
) -> AppResult<Json<Ticket>> {
    Ok(Json(state.tickets.get(id)?))
}

/// PATCH /api/tickets/:id/status - lifecycle transition
pub async fn update_status(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<i64>,
    Json(payload): Json<UpdateStatusRequest>,
) -> AppResult<Json<Ticket>> {
    let ticket = state.tickets.transition(id, payload.status)?;
    tracing::info!(
        ticket_id = id,
        status = ticket.status.as_str(),
        operator = user.username,
        "Ticket status updated"
    );
    Ok(Json(ticket))
}
