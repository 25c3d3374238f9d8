//! SLA API module

mod handler;

use axum::{
    Router,
    routing::{delete, get, post},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/sla", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::overview))
        .route("/refresh", post(handler::refresh))
        .route("/thresholds", post(handler::update_thresholds))
        .route(
            "/alerts",
            get(handler::list_alerts)
                .post(handler::raise_alert)
                .delete(handler::clear_alerts),
        )
        .route("/alerts/{id}", delete(handler::dismiss_alert))
}
